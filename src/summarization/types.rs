//! Request and response types for the summarize endpoint.

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

/// Number of sentences requested when the caller does not say.
pub const DEFAULT_MAX_SENTENCES: usize = 3;

/// Incoming summarization request.
#[derive(Clone, Debug, Deserialize)]
pub struct SummarizeRequest {
    /// Text to summarize. Must be non-empty after trimming.
    pub text: String,
    /// Upper bound on summary sentences. Zero is rejected at deserialization.
    #[serde(default)]
    pub max_sentences: Option<NonZeroUsize>,
    /// Free-form caller metadata (URL, document name), echoed back.
    #[serde(default)]
    pub source: Option<String>,
}

impl SummarizeRequest {
    /// Create a request with default options.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            max_sentences: None,
            source: None,
        }
    }

    /// Set the sentence budget.
    #[must_use]
    pub const fn with_max_sentences(mut self, max_sentences: NonZeroUsize) -> Self {
        self.max_sentences = Some(max_sentences);
        self
    }

    /// Set the source metadata.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sentence budget with the default applied.
    #[must_use]
    pub fn max_sentences(&self) -> usize {
        self.max_sentences
            .map_or(DEFAULT_MAX_SENTENCES, NonZeroUsize::get)
    }
}

/// Summarization result returned to the caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarizeResponse {
    /// The summary text.
    pub summary: String,
    /// The request's `source`, unchanged (`null` when absent).
    pub source: Option<String>,
}
