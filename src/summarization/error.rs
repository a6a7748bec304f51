//! Error types for the summarization subsystem.

use thiserror::Error;

/// Errors raised by a remote summary provider.
///
/// None of these reach the HTTP caller: the handler answers with the
/// extractive fallback instead.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport-level failure (connect, TLS, body read).
    #[error("provider request failed: {0}")]
    Http(reqwest::Error),

    /// The provider did not answer within the client timeout.
    #[error("provider request timed out")]
    Timeout,

    /// The provider answered with a non-success status.
    #[error("provider returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as far as it could be read.
        body: String,
    },

    /// The response body did not have the expected shape.
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    /// The provider answered successfully but produced no text.
    #[error("provider returned an empty summary")]
    EmptyContent,
}

impl From<reqwest::Error> for ProviderError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_timeout() {
            Self::Timeout
        } else if value.is_decode() {
            Self::MalformedResponse(value.without_url().to_string())
        } else {
            // The Gemini key travels in the query string.
            Self::Http(value.without_url())
        }
    }
}

/// Request validation errors. The only errors a caller can observe.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    /// `text` was missing or blank after trimming.
    #[error("text must be provided in the request body")]
    EmptyText,
}

/// Errors raised while reading the startup configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `SUMMARIZER_PROVIDER` names no known provider.
    #[error("unknown provider '{0}' (expected gemini, openai or none)")]
    UnknownProvider(String),

    /// The listening port is not a valid `u16`.
    #[error("invalid port '{0}'")]
    InvalidPort(String),

    /// A provider base URL could not be parsed.
    #[error("invalid base url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The sentence boundary pattern failed to compile.
    #[error("regex error: {0}")]
    Regex(#[from] regex::Error),

    /// The outbound HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    HttpClient(String),
}

/// Convenience result alias for provider calls.
pub type ProviderResult<T> = Result<T, ProviderError>;
