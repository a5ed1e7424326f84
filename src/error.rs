//! Fluenter Error Types
//!
//! Centralized error handling for the API service and the clipboard agent.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// Central error type for Fluenter
#[derive(Error, Debug)]
pub enum FluentError {
    /// No usable model provider (missing credentials, disabled backend)
    #[error("Model provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// The provider answered with an error or an unusable payload
    #[error("Model provider error: {0}")]
    Provider(String),

    /// Any failure while serving a correct/rephrase call
    #[error("{0}")]
    ProcessingFailure(String),

    #[error("Model returned empty text.")]
    EmptyOutput,

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Input simulation error: {0}")]
    Input(String),

    #[error("Hotkey error: {0}")]
    Hotkey(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for Fluenter operations
pub type FluentResult<T> = Result<T, FluentError>;

/// Body of an HTTP error response
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

impl ResponseError for FluentError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorDetail {
            detail: self.to_string(),
        })
    }
}
