use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Io(#[from] tokio::io::Error),

    #[error(transparent)]
    Config(#[from] envy::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid CORS origin {origin:?}: {reason}")]
    InvalidOrigin { origin: String, reason: String },

    #[error("A path prefix must start with '/': {0:?}")]
    PrefixWithoutLeadingSlash(String),

    #[error("A path prefix must not end with '/': {0:?}")]
    PrefixWithTrailingSlash(String),

    #[error("Route already registered: {0}")]
    DuplicateRoute(String),

    #[error("Failed to initialize logging: {0}")]
    Logging(String),

    #[error("Not Found")]
    NotFound,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Error bodies use the `{"detail": ...}` shape for every status
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
