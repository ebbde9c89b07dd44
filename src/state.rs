use std::sync::Arc;

use crate::rate_limit::QuotaStore;
use crate::upstream::Rewriter;

// app's shared state, both collaborators are injected
#[derive(Clone)]
pub struct AppState {
    pub quota: Arc<dyn QuotaStore>,
    pub rewriter: Arc<dyn Rewriter>,
}

impl AppState {
    pub fn new(quota: Arc<dyn QuotaStore>, rewriter: Arc<dyn Rewriter>) -> Self {
        Self { quota, rewriter }
    }
}
