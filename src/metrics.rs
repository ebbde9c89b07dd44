use lazy_static::lazy_static;
use prometheus::{
    Counter, CounterVec, Gauge, Histogram, register_counter, register_counter_vec, register_gauge,
    register_histogram,
};

lazy_static! {
    pub static ref REQUEST_TOTAL: Counter =
        register_counter!("humanivio_requests_total", "Total number of humanize requests").unwrap();
    pub static ref QUOTA_REJECTIONS: Counter = register_counter!(
        "humanivio_quota_rejections_total",
        "Requests rejected because the client quota was exhausted"
    )
    .unwrap();
    pub static ref UPSTREAM_FAILURES: CounterVec = register_counter_vec!(
        "humanivio_upstream_failures_total",
        "Failed completion calls by kind",
        &["kind"]
    )
    .unwrap();
    pub static ref REQUEST_LATENCY: Histogram = register_histogram!(
        "humanivio_request_latency_seconds",
        "Humanize latency in seconds, upstream call included"
    )
    .unwrap();
    pub static ref QUOTA_CLIENTS: Gauge = register_gauge!(
        "humanivio_quota_clients",
        "Clients currently tracked by the quota"
    )
    .unwrap();
}
