//! Prometheus metrics
//!
//! Counts authentication attempts, probe outcomes and skipped job ticks so
//! upstream failures are visible without reading logs.

use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounterVec, IntGaugeVec, Opts, Registry, TextEncoder,
};
use std::sync::Arc;

use crate::types::status::HealthStatus;

/// Metrics registry for the dashboard.
///
/// Clone is cheap (Arc internally).
#[derive(Clone)]
pub struct BoardMetrics {
    registry: Registry,
    /// Login/refresh attempts by operation and result
    pub auth_attempts_total: IntCounterVec,
    /// Probe outcomes by endpoint and status colour
    pub probe_results_total: IntCounterVec,
    /// Latest PRTG value per endpoint
    pub endpoint_status: IntGaugeVec,
    /// Wall time of a full probe cycle
    pub probe_cycle_duration_seconds: Histogram,
    /// Ticks skipped because the previous run was still in progress
    pub job_ticks_skipped_total: IntCounterVec,
}

impl BoardMetrics {
    /// Create a registry with all metrics registered
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let auth_attempts_total = IntCounterVec::new(
            Opts::new(
                "healthboard_auth_attempts_total",
                "Login and token refresh attempts",
            ),
            &["operation", "result"],
        )?;
        registry.register(Box::new(auth_attempts_total.clone()))?;

        let probe_results_total = IntCounterVec::new(
            Opts::new(
                "healthboard_probe_results_total",
                "Health probe outcomes per endpoint",
            ),
            &["endpoint", "status"],
        )?;
        registry.register(Box::new(probe_results_total.clone()))?;

        let endpoint_status = IntGaugeVec::new(
            Opts::new(
                "healthboard_endpoint_status",
                "Current endpoint status (0 healthy, 1 degraded, 2 unreachable)",
            ),
            &["endpoint"],
        )?;
        registry.register(Box::new(endpoint_status.clone()))?;

        let probe_cycle_duration_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "healthboard_probe_cycle_duration_seconds",
                "Duration of a full probe cycle in seconds",
            )
            .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
        )?;
        registry.register(Box::new(probe_cycle_duration_seconds.clone()))?;

        let job_ticks_skipped_total = IntCounterVec::new(
            Opts::new(
                "healthboard_job_ticks_skipped_total",
                "Scheduler ticks skipped because the job was still running",
            ),
            &["job"],
        )?;
        registry.register(Box::new(job_ticks_skipped_total.clone()))?;

        Ok(Self {
            registry,
            auth_attempts_total,
            probe_results_total,
            endpoint_status,
            probe_cycle_duration_seconds,
            job_ticks_skipped_total,
        })
    }

    /// Record a login or refresh attempt
    pub fn record_auth(&self, operation: &str, success: bool) {
        let result = if success { "success" } else { "error" };
        self.auth_attempts_total
            .with_label_values(&[operation, result])
            .inc();
    }

    /// Record one endpoint's classified outcome
    pub fn record_probe(&self, endpoint: &str, status: HealthStatus) {
        self.probe_results_total
            .with_label_values(&[endpoint, status.as_str()])
            .inc();
        self.endpoint_status
            .with_label_values(&[endpoint])
            .set(i64::from(status.prtg_value()));
    }

    /// Record the duration of a completed cycle
    pub fn observe_cycle(&self, duration_secs: f64) {
        self.probe_cycle_duration_seconds.observe(duration_secs);
    }

    /// Record a skipped tick
    pub fn record_skipped_tick(&self, job: &str) {
        self.job_ticks_skipped_total.with_label_values(&[job]).inc();
    }

    /// Encode all metrics to Prometheus text format
    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| {
            prometheus::Error::Msg(format!("Failed to encode metrics as UTF-8: {}", e))
        })
    }
}

/// Shared metrics handle
pub type SharedMetrics = Arc<BoardMetrics>;

/// Create a new shared metrics instance
pub fn create_metrics() -> Result<SharedMetrics, prometheus::Error> {
    Ok(Arc::new(BoardMetrics::new()?))
}
