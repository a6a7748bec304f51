//! HTTP mapping for request errors.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use crate::summarization::InputError;

/// Error body returned to callers.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable reason.
    pub detail: String,
}

/// Errors a route can answer with.
#[derive(Debug)]
pub enum ApiError {
    /// The request failed validation.
    InvalidInput(InputError),
}

impl From<InputError> for ApiError {
    fn from(value: InputError) -> Self {
        Self::InvalidInput(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            Self::InvalidInput(err) => (StatusCode::BAD_REQUEST, err.to_string()),
        };
        (status, Json(ErrorBody { detail })).into_response()
    }
}

/// Errors that stop the HTTP server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The listening address could not be bound.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Address that was requested.
        addr: std::net::SocketAddr,
        /// Underlying socket error.
        source: std::io::Error,
    },

    /// The accept loop failed.
    #[error("server error: {0}")]
    Serve(std::io::Error),
}
