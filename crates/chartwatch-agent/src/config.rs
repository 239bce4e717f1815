//! Agent configuration
//!
//! Every setting is a flag with an environment fallback, so the agent
//! configures the same way from a container spec and a shell.

use clap::Parser;

/// Helm chart freshness exporter for Argo CD applications
#[derive(Debug, Clone, Parser)]
#[command(name = "chartwatch", version, about)]
pub struct Config {
    /// Namespace to watch for Argo CD applications
    #[arg(long, env = "NAMESPACE", default_value = "argocd")]
    pub namespace: String,

    /// Port serving the Prometheus scrape endpoint
    #[arg(long, env = "METRICS_PORT", default_value_t = 9080)]
    pub metrics_port: u16,

    /// Seconds between reconciliation cycles
    #[arg(long, env = "RECONCILE_INTERVAL", default_value_t = 60)]
    pub interval: u64,

    /// Log level used when RUST_LOG is not set
    #[arg(long, env = "LOGLEVEL", default_value = "info")]
    pub log_level: String,

    /// Drop series left over from previous cycles before publishing.
    ///
    /// By default series for applications that disappear between cycles
    /// stay in the registry at their last value.
    #[arg(long, env = "RESET_STALE_SERIES")]
    pub reset_stale_series: bool,
}
