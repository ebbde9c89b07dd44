use axum::{Json, response::IntoResponse};

const SERVICE_NAME: &str = "Humanivio API";

// liveness banner
pub async fn root_handler() -> &'static str {
    "Humanivio API is running"
}

pub async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "OK",
        "service": SERVICE_NAME,
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
