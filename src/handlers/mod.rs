mod health;
mod humanize;
mod metrics;

pub use health::{health_handler, root_handler};
pub use humanize::humanize_handler;
pub use metrics::metrics_handler;
