//! Metrics collection and Prometheus export.
//!
//! Installs the Prometheus recorder and renders the /metrics payload.
//! Detector-level counters are recorded here so handlers stay terse.

use metrics::counter;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

/// Global handle to the Prometheus recorder.
pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the metrics recorder.
///
/// Must be called once at startup before any metrics are recorded.
pub fn init_metrics() -> Result<(), BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    if METRICS_HANDLE.set(handle).is_err() {
        tracing::warn!("Metrics recorder already initialized");
    }
    Ok(())
}

/// Get the current metrics in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized".to_string())
}

pub fn record_rows_loaded(dataset: &'static str, rows: usize) {
    counter!("insights_records_loaded_total", "dataset" => dataset).increment(rows as u64);
}

pub fn record_findings(detector: &'static str, findings: usize) {
    counter!("insights_findings_total", "detector" => detector).increment(findings as u64);
}
