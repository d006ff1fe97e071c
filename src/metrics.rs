use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

/// Initialize Prometheus metrics exporter
pub fn init_metrics() -> PrometheusHandle {
    let builder = PrometheusBuilder::new();

    let handle = builder
        .install_recorder()
        .expect("Failed to install Prometheus recorder");

    init_metric_descriptions();

    handle
}

/// Initialize metric descriptions (can be called multiple times safely)
fn init_metric_descriptions() {
    describe_counter!(
        "house_price_requests_total",
        "Total number of estimation requests"
    );
    describe_histogram!(
        "house_price_request_duration_seconds",
        "Request duration in seconds"
    );
    describe_counter!("house_price_errors_total", "Total number of errors");
    describe_histogram!(
        "house_price_estimate_value",
        "Distribution of estimated prices, in the configured currency"
    );
    describe_gauge!(
        "house_pricer_info",
        "Service version and build information"
    );

    gauge!("house_pricer_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);
}

/// Record a request
pub fn record_request(endpoint: &str) {
    counter!(
        "house_price_requests_total",
        "endpoint" => endpoint.to_string(),
    )
    .increment(1);
}

/// Record request duration
pub fn record_duration(endpoint: &str, duration: Duration) {
    histogram!(
        "house_price_request_duration_seconds",
        "endpoint" => endpoint.to_string(),
    )
    .record(duration.as_secs_f64());
}

/// Record an error
pub fn record_error(endpoint: &str, error_type: &str) {
    counter!(
        "house_price_errors_total",
        "endpoint" => endpoint.to_string(),
        "error_type" => error_type.to_string(),
    )
    .increment(1);
}

/// Record the value of a produced estimate
pub fn record_estimate(currency: &str, amount: f64) {
    histogram!(
        "house_price_estimate_value",
        "currency" => currency.to_string(),
    )
    .record(amount);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_metrics() {
        init_metric_descriptions();

        // Without an installed recorder these are no-ops; the test guards
        // against label/macro mistakes that would panic at call time.
        record_request("/api/v1/house-price");
        record_duration("/api/v1/house-price", Duration::from_millis(3));
        record_error("/api/v1/house-price", "invalid_input");
        record_estimate("EUR", 421_802.26);
    }
}
