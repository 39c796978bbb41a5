use axum::http::StatusCode;

/// Liveness probe; no auth and no state.
pub async fn health_check() -> (StatusCode, String) {
    (StatusCode::OK, "Healthy".to_string())
}
