//! Prometheus gauge registry for chart freshness
//!
//! The reconciliation cycle talks to this through two calls: `publish`
//! overwrites one sample's series, `clear` drops everything. The registry
//! is owned rather than the process-global default so tests can build
//! isolated instances without re-registration conflicts.

use prometheus::proto::MetricFamily;
use prometheus::{GaugeVec, Opts, Registry};

use crate::reconcile::StatusSample;

const LABEL_NAMES: [&str; 5] = [
    "application",
    "chart",
    "repo_url",
    "current_version",
    "latest_version",
];

/// Registry publishing the `helm_chart_version_status` gauge.
///
/// The underlying GaugeVec is internally synchronized, so the scrape task
/// reads while the cycle writes without tearing individual samples.
pub struct VersionStatusMetrics {
    registry: Registry,
    chart_version_status: GaugeVec,
}

impl VersionStatusMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();
        let chart_version_status = GaugeVec::new(
            Opts::new(
                "helm_chart_version_status",
                "Status of Helm chart versions (1 = up-to-date, 0 = outdated)",
            ),
            &LABEL_NAMES,
        )?;
        registry.register(Box::new(chart_version_status.clone()))?;
        Ok(Self {
            registry,
            chart_version_status,
        })
    }

    /// Overwrite the series keyed by the sample's label tuple.
    pub fn publish(&self, sample: &StatusSample) {
        let value = if sample.current { 1.0 } else { 0.0 };
        self.chart_version_status
            .with_label_values(&[
                sample.application.as_str(),
                sample.chart.as_str(),
                sample.repo_url.as_str(),
                sample.current_version.as_str(),
                sample.latest_version.as_str(),
            ])
            .set(value);
    }

    /// Drop every series; used when stale-series expiry is configured.
    pub fn clear(&self) {
        self.chart_version_status.reset();
    }

    /// Snapshot all metric families for encoding.
    pub fn gather(&self) -> Vec<MetricFamily> {
        self.registry.gather()
    }
}
