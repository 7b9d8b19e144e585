//! Structured logging and metrics setup for the binary.

use likeness_error::{ConfigError, LikenessResult};
use opentelemetry::{KeyValue, global};
use opentelemetry_sdk::{
    Resource,
    metrics::{PeriodicReader, SdkMeterProvider},
};
use std::env;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Logging and metrics configuration.
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Service name attached to every event
    pub service_name: String,
    /// Service version
    pub service_version: String,
    /// Log level filter (e.g., "info", "likeness_pipeline=debug")
    pub log_level: String,
    /// Enable JSON-formatted logs for structured logging
    pub json_logs: bool,
    /// Install a meter provider exporting gateway metrics to stdout
    pub metrics: bool,
}

impl ObservabilityConfig {
    /// Create a new configuration with the given service name.
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            log_level: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            json_logs: false,
            metrics: false,
        }
    }

    /// Set the log level.
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Enable JSON-formatted logs.
    pub fn with_json_logs(mut self, enabled: bool) -> Self {
        self.json_logs = enabled;
        self
    }

    /// Enable metrics export.
    pub fn with_metrics(mut self, enabled: bool) -> Self {
        self.metrics = enabled;
        self
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self::new(env!("CARGO_PKG_NAME"))
    }
}

/// Handle to the installed providers.
///
/// Call [`ObservabilityGuard::shutdown`] before exit so pending metrics are
/// exported.
#[must_use]
#[derive(Debug)]
pub struct ObservabilityGuard {
    meter_provider: Option<SdkMeterProvider>,
}

impl ObservabilityGuard {
    /// Whether a meter provider was installed.
    pub fn metrics_enabled(&self) -> bool {
        self.meter_provider.is_some()
    }

    /// Flush and stop the meter provider.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the exporter fails to flush.
    pub fn shutdown(self) -> LikenessResult<()> {
        if let Some(provider) = self.meter_provider {
            provider
                .shutdown()
                .map_err(|e| ConfigError::new(format!("Failed to flush metrics: {}", e)))?;
        }
        Ok(())
    }
}

/// Install a global meter provider with a periodic stdout exporter.
///
/// Gateway instruments created afterwards record into this provider.
pub fn init_metrics(config: &ObservabilityConfig) -> SdkMeterProvider {
    let resource = Resource::builder()
        .with_service_name(config.service_name.clone())
        .with_attributes(vec![KeyValue::new(
            "service.version",
            config.service_version.clone(),
        )])
        .build();

    let exporter = opentelemetry_stdout::MetricExporter::default();
    let reader = PeriodicReader::builder(exporter).build();
    let provider = SdkMeterProvider::builder()
        .with_reader(reader)
        .with_resource(resource)
        .build();

    global::set_meter_provider(provider.clone());
    provider
}

/// Install the global subscriber, and the meter provider when metrics are on.
///
/// `RUST_LOG` takes precedence over the configured level. Logs go to stderr
/// so command output on stdout stays machine-readable. Metrics are printed
/// to stdout when exported.
///
/// # Errors
///
/// Returns a [`ConfigError`] for an unparsable filter or when a subscriber
/// is already installed.
pub fn init_observability(config: &ObservabilityConfig) -> LikenessResult<ObservabilityGuard> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| ConfigError::new(format!("Invalid log filter: {}", e)))?;

    let fmt_layer = if config.json_logs {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_level(true)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| ConfigError::new(format!("Failed to install subscriber: {}", e)))?;

    let meter_provider = config.metrics.then(|| init_metrics(config));

    tracing::debug!(
        service = %config.service_name,
        version = %config.service_version,
        metrics = meter_provider.is_some(),
        "Observability initialized"
    );
    Ok(ObservabilityGuard { meter_provider })
}
