use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Failure talking to the completion provider.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider request timed out")]
    Timeout,

    #[error("Failed to call provider: {0}")]
    Transport(String),

    #[error("Provider returned {status}: {message}")]
    Status { status: u16, message: String },

    /// `{"error": {"message": ...}}` in an otherwise successful response
    #[error("Provider error: {0}")]
    Api(String),

    #[error("Malformed provider response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ProviderError::Timeout
        } else {
            ProviderError::Transport(e.to_string())
        }
    }
}

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Provider error: {0}")]
    Provider(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl From<RelayError> for ApiError {
    fn from(e: RelayError) -> Self {
        match e {
            RelayError::InvalidRequest(msg) => ApiError::BadRequest(msg),
            RelayError::Provider(e) => ApiError::Provider(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, msg)
            }
            ApiError::Provider(msg) => {
                tracing::error!("Provider error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
