//! Application state shared across all request handlers.

use std::sync::Arc;

use crate::summarization::{ConfigError, Summarizer, SummarizerConfig};

/// Shared application state.
pub struct AppState {
    /// Summarizer with the startup-selected strategy.
    pub summarizer: Summarizer,
}

impl AppState {
    /// Create the application state from startup configuration.
    ///
    /// # Errors
    /// Returns an error if the provider client cannot be created.
    pub fn new(config: &SummarizerConfig) -> Result<Arc<Self>, ConfigError> {
        let summarizer = Summarizer::from_config(config)?;
        Ok(Self::with_summarizer(summarizer))
    }

    /// Wrap an already built summarizer.
    #[must_use]
    pub fn with_summarizer(summarizer: Summarizer) -> Arc<Self> {
        Arc::new(Self { summarizer })
    }
}
