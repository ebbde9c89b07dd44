//! Shared helpers for the integration tests.

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    extract::ConnectInfo,
    http::{Request, Response},
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tower::ServiceExt;

use humanivio_api::rate_limit::InMemoryQuota;
use humanivio_api::state::AppState;
use humanivio_api::upstream::{Rewriter, UpstreamError};

/// Canned rewriter standing in for the completion service.
pub struct StubRewriter {
    reply: Result<String, UpstreamError>,
    pub calls: AtomicU32,
}

impl StubRewriter {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            calls: AtomicU32::new(0),
        }
    }

    pub fn failing(err: UpstreamError) -> Self {
        Self {
            reply: Err(err),
            calls: AtomicU32::new(0),
        }
    }
}

#[async_trait]
impl Rewriter for StubRewriter {
    async fn rewrite(&self, _text: &str) -> Result<String, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone()
    }
}

pub fn build_app(capacity: u32, rewriter: Arc<StubRewriter>) -> Router {
    let quota = Arc::new(InMemoryQuota::new(capacity, Duration::from_secs(24 * 60 * 60)));
    humanivio_api::app(Arc::new(AppState::new(quota, rewriter)))
}

/// POST a JSON body to /api/humanize as if it came from `ip`.
pub fn humanize_request(ip: [u8; 4], body: &str) -> Request<Body> {
    let mut req = Request::builder()
        .method("POST")
        .uri("/api/humanize")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    req.extensions_mut().insert(ConnectInfo(SocketAddr::from((ip, 40000))));
    req
}

pub async fn send(app: &Router, req: Request<Body>) -> (u16, serde_json::Value) {
    let resp: Response<Body> = app.clone().oneshot(req).await.unwrap();
    let status = resp.status().as_u16();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}
