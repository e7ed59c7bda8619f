use crate::errors::ApiError;
use axum::http::Uri;

/// Fallback for paths no router matched
pub(crate) async fn not_found(uri: Uri) -> ApiError {
    tracing::debug!("No route for {}", uri.path());
    ApiError::NotFound
}
