use aide::axum::IntoApiResponse;
use aide::openapi::OpenApi;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use std::ops::Deref;
use std::sync::Arc;

/// # Endpoint: GET {api_prefix}/openapi.json
pub(crate) async fn get_openapi(Extension(api): Extension<Arc<OpenApi>>) -> impl IntoApiResponse {
    Json(api.deref()).into_response()
}
