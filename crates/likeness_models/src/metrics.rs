//! Metrics for provider calls.
//!
//! OpenTelemetry instruments labeled with provider, model and operation.
//! Without an installed meter provider the global meter is a no-op.

use opentelemetry::{
    KeyValue, global,
    metrics::{Counter, Histogram, Meter},
};
use std::sync::OnceLock;

static METRICS: OnceLock<GatewayMetrics> = OnceLock::new();

/// Gateway request, error and latency instruments.
#[derive(Clone)]
pub struct GatewayMetrics {
    /// Meter handle kept alive for metric instruments
    _meter: Meter,
    /// Total provider requests
    pub requests: Counter<u64>,
    /// Failed provider requests
    pub errors: Counter<u64>,
    /// Provider call duration in seconds
    pub duration: Histogram<f64>,
}

impl GatewayMetrics {
    fn init() -> Self {
        let meter = global::meter("likeness_gateway");

        Self {
            _meter: meter.clone(),
            requests: meter
                .u64_counter("gateway.requests")
                .with_description("Total provider requests")
                .build(),
            errors: meter
                .u64_counter("gateway.errors")
                .with_description("Failed provider requests")
                .build(),
            duration: meter
                .f64_histogram("gateway.duration")
                .with_unit("seconds")
                .with_description("Provider call duration")
                .build(),
        }
    }

    /// Get the global gateway metrics instance.
    pub fn get() -> &'static Self {
        METRICS.get_or_init(Self::init)
    }

    /// Record a successful provider call.
    pub fn record_request(&self, provider: &str, model: &str, operation: &str, duration_secs: f64) {
        let labels = &[
            KeyValue::new("provider", provider.to_string()),
            KeyValue::new("model", model.to_string()),
            KeyValue::new("operation", operation.to_string()),
        ];
        self.requests.add(1, labels);
        self.duration.record(duration_secs, labels);
    }

    /// Record a failed provider call.
    pub fn record_error(&self, provider: &str, model: &str, operation: &str, error_class: &str) {
        let labels = &[
            KeyValue::new("provider", provider.to_string()),
            KeyValue::new("model", model.to_string()),
            KeyValue::new("operation", operation.to_string()),
            KeyValue::new("error_class", error_class.to_string()),
        ];
        self.errors.add(1, labels);
    }
}
