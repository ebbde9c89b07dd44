use axum::{
    Json,
    extract::{ConnectInfo, State, rejection::JsonRejection},
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use crate::error::ApiError;
use crate::metrics::{QUOTA_REJECTIONS, REQUEST_LATENCY, REQUEST_TOTAL, UPSTREAM_FAILURES};
use crate::models::{HumanizeRequest, HumanizeResponse};
use crate::state::AppState;
use crate::validate::validate;

// quota -> validation -> upstream rewrite -> response shaping
pub async fn humanize_handler(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    payload: Result<Json<HumanizeRequest>, JsonRejection>,
) -> Result<Json<HumanizeResponse>, ApiError> {
    REQUEST_TOTAL.inc();
    let client = addr.ip().to_string();

    if !state.quota.admit(&client) {
        QUOTA_REJECTIONS.inc();
        tracing::warn!(client = %client, "Daily quota exhausted");
        return Err(ApiError::QuotaExceeded);
    }

    let Json(request) = payload.map_err(|rejection| {
        let message = rejection.body_text();
        tracing::warn!(client = %client, error = %message, "Rejected request body");
        ApiError::InvalidBody(message)
    })?;
    let valid = validate(request.text.as_deref()).inspect_err(|e| {
        tracing::warn!(client = %client, error = %e, "Rejected humanize input");
    })?;

    let start_time = Instant::now();
    tracing::debug!(client = %client, words = valid.word_count, "Humanizing text");

    let result = state.rewriter.rewrite(valid.text).await;
    REQUEST_LATENCY.observe(start_time.elapsed().as_secs_f64());

    let rewritten = result.inspect_err(|e| {
        UPSTREAM_FAILURES.with_label_values(&[e.kind()]).inc();
        tracing::error!(client = %client, kind = e.kind(), error = ?e, "Upstream rewrite failed");
    })?;

    Ok(Json(HumanizeResponse::shape(valid.text, &rewritten)))
}
