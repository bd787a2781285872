use lazy_static::lazy_static;
use prometheus::{Counter, Gauge, Histogram, register_counter, register_gauge, register_histogram};


lazy_static! {
    pub static ref FILTER_REQUESTS: Counter =
        register_counter!("flipside_filter_requests_total", "Total number of /filter requests").unwrap();
    pub static ref LENS_REQUESTS: Counter =
        register_counter!("flipside_lens_requests_total", "Total number of /flip and /generate-all requests").unwrap();
    pub static ref RATE_LIMITED: Counter =
        register_counter!("flipside_rate_limited_total", "Requests rejected by the rate limiter").unwrap();
    pub static ref UPSTREAM_FAILURES: Counter =
        register_counter!("flipside_upstream_failures_total", "Failed upstream completion calls").unwrap();
    pub static ref UPSTREAM_LATENCY: Histogram = register_histogram!(
        "flipside_upstream_latency_seconds",
        "Upstream completion latency in seconds"
    )
    .unwrap();
    pub static ref RATE_LIMIT_CLIENTS: Gauge =
        register_gauge!("flipside_rate_limit_clients", "Client identifiers tracked by the rate limiter").unwrap();
}
