//! Request handling: validation, strategy choice and silent fallback.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::config::SummarizerConfig;
use super::error::{ConfigError, InputError};
use super::fallback::ExtractiveSummarizer;
use super::providers::{SummaryProvider, build_provider};
use super::types::{SummarizeRequest, SummarizeResponse};

/// Summarizes requests with the configured provider, or locally.
pub struct Summarizer {
    provider: Option<Arc<dyn SummaryProvider>>,
    fallback: ExtractiveSummarizer,
}

impl Summarizer {
    /// Create a summarizer from startup configuration.
    ///
    /// # Errors
    /// Returns an error if the provider client cannot be built.
    pub fn from_config(config: &SummarizerConfig) -> Result<Self, ConfigError> {
        let provider = config.provider.as_ref().map(build_provider).transpose()?;
        if provider.is_none() {
            info!("No provider credential set, serving extractive summaries only");
        }
        Self::new(provider)
    }

    /// Create a summarizer around an explicit provider (`None` for fallback only).
    ///
    /// # Errors
    /// Returns an error if the sentence boundary pattern cannot be compiled.
    pub fn new(provider: Option<Arc<dyn SummaryProvider>>) -> Result<Self, ConfigError> {
        Ok(Self {
            provider,
            fallback: ExtractiveSummarizer::new()?,
        })
    }

    /// Name of the active strategy.
    #[must_use]
    pub fn mode(&self) -> &'static str {
        self.provider.as_ref().map_or("fallback", |p| p.kind().name())
    }

    /// Summarize a request.
    ///
    /// Provider failures never surface here: they are logged and answered
    /// with the extractive fallback.
    ///
    /// # Errors
    /// Returns [`InputError::EmptyText`] if the text is blank.
    pub async fn summarize(
        &self,
        request: SummarizeRequest,
    ) -> Result<SummarizeResponse, InputError> {
        let text = request.text.trim();
        if text.is_empty() {
            return Err(InputError::EmptyText);
        }
        let max_sentences = request.max_sentences();

        let Some(provider) = &self.provider else {
            debug!("No provider configured, using fallback");
            return Ok(SummarizeResponse {
                summary: self.fallback.summarize(text, max_sentences),
                source: request.source,
            });
        };

        let summary = provider
            .summarize(text, max_sentences)
            .await
            .unwrap_or_else(|e| {
                warn!("{} provider failed, using fallback: {e}", provider.kind().name());
                self.fallback.summarize(text, max_sentences)
            });

        Ok(SummarizeResponse {
            summary,
            source: request.source,
        })
    }
}
