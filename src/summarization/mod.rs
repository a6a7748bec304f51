//! Text summarization: remote providers with a local extractive fallback.

pub mod config;
pub mod error;
pub mod fallback;
pub mod handler;
pub mod providers;
pub mod types;

pub use config::{ProviderConfig, ProviderKind, SummarizerConfig};
pub use error::{ConfigError, InputError, ProviderError};
pub use fallback::ExtractiveSummarizer;
pub use handler::Summarizer;
pub use providers::SummaryProvider;
pub use types::{SummarizeRequest, SummarizeResponse};
