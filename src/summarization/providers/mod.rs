//! Remote summary providers.
//!
//! Each provider turns `(text, max_sentences)` into one outbound HTTP call and
//! parses its own response shape. Callers only see [`SummaryProvider`].

pub mod gemini;
pub mod openai;

pub use gemini::GeminiProvider;
pub use openai::OpenAiProvider;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tracing::info;

use super::config::{ProviderConfig, ProviderKind};
use super::error::{ConfigError, ProviderError, ProviderResult};

/// Boxed future type for provider operations.
pub type ProviderFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Trait abstraction over remote summarization APIs.
pub trait SummaryProvider: Send + Sync {
    /// Summarize `text` into roughly `max_sentences` sentences.
    ///
    /// # Errors
    /// Returns an error on transport failure, timeout, non-2xx status,
    /// unexpected response shape or empty output.
    fn summarize<'a>(
        &'a self,
        text: &'a str,
        max_sentences: usize,
    ) -> ProviderFuture<'a, ProviderResult<String>>;

    /// Which API this provider talks to.
    fn kind(&self) -> ProviderKind;
}

/// Build the provider described by `config`.
///
/// # Errors
/// Returns an error if the base URL is invalid or the HTTP client cannot be built.
pub fn build_provider(config: &ProviderConfig) -> Result<Arc<dyn SummaryProvider>, ConfigError> {
    let provider: Arc<dyn SummaryProvider> = match config.kind {
        ProviderKind::Gemini => Arc::new(GeminiProvider::new(config)?),
        ProviderKind::OpenAi => Arc::new(OpenAiProvider::new(config)?),
    };
    info!("Summary provider: {} (model {})", config.kind.name(), config.model);
    Ok(provider)
}

/// Build the shared outbound HTTP client.
fn build_client(config: &ProviderConfig) -> Result<reqwest::Client, ConfigError> {
    reqwest::Client::builder()
        .timeout(config.timeout)
        .build()
        .map_err(|e| ConfigError::HttpClient(e.to_string()))
}

/// Turn a non-2xx response into an error, pass others through.
async fn check_status(response: reqwest::Response) -> ProviderResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<unreadable body>".to_string());
    Err(ProviderError::Status {
        status: status.as_u16(),
        body,
    })
}

/// Trim provider output, rejecting blank text.
fn non_empty(text: &str) -> ProviderResult<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Err(ProviderError::EmptyContent)
    } else {
        Ok(trimmed.to_string())
    }
}
