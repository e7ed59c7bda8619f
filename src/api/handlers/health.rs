use axum::{http::StatusCode, Json};

/// Health check endpoint
///
/// # Endpoint: GET /health
pub(crate) async fn health_check() -> (StatusCode, Json<serde_json::Value>) {
    let health_status = serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now()
    });

    (StatusCode::OK, Json(health_status))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_check() {
        let (status, Json(body)) = health_check().await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert!(body["timestamp"].is_string());
    }
}
