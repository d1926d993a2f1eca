//! Prometheus metrics setup and metric definitions

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

/// Histogram buckets (seconds) for HTTP latency.
const LATENCY_BUCKETS: &[f64] = &[
    0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

/// Install the Prometheus recorder and return a handle for rendering metrics.
pub fn install_prometheus_recorder() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new()
        .set_buckets(LATENCY_BUCKETS)?
        .install_recorder()
}

/// Register metric descriptions and emit zero values so HELP/TYPE lines are
/// present from startup.
pub fn describe_metrics() {
    describe_counter!("wealth_http_requests_total", "Total number of HTTP requests");
    describe_histogram!(
        "wealth_http_request_duration_seconds",
        "HTTP request duration in seconds"
    );
    describe_gauge!(
        "wealth_http_requests_in_flight",
        "Number of HTTP requests currently being processed"
    );
    describe_counter!(
        "wealth_redirect_urls_total",
        "HSL redirect URL generation outcomes"
    );

    gauge!("wealth_http_requests_in_flight").set(0.0);
    for result in ["success", "config_error", "encryption_error"] {
        counter!("wealth_redirect_urls_total", "result" => result).absolute(0);
    }
}
