use axum::http::StatusCode;
use prometheus::{Encoder, TextEncoder};

// Prometheus text exposition of every registered metric
pub async fn metrics_handler() -> Result<String, (StatusCode, String)> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}
