//! chartwatch - Helm chart freshness exporter for Argo CD
//!
//! Lists the applications in one namespace on a fixed interval, resolves
//! the latest published version of every declared Helm chart, and exposes
//! an up-to-date/outdated gauge per chart for Prometheus.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use chartwatch::api::{self, AppState};
use chartwatch::config::Config;
use chartwatch::metrics::VersionStatusMetrics;
use chartwatch::reconcile;
use chartwatch_kube::{ApplicationLister, ArgoApplications};
use chartwatch_repo::IndexClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with(fmt::layer().json())
        .init();

    info!(
        namespace = %config.namespace,
        interval = config.interval,
        metrics_port = config.metrics_port,
        "starting chartwatch"
    );

    // Failing to reach the cluster API is the only fatal error; every
    // per-cycle failure after this point is logged and retried on the
    // next tick.
    let client = kube::Client::try_default()
        .await
        .context("failed to establish cluster API access")?;
    let lister = ArgoApplications::new(client, &config.namespace);

    let resolver = IndexClient::new().context("failed to build repository HTTP client")?;
    let metrics = Arc::new(VersionStatusMetrics::new().context("failed to register metrics")?);

    let state = AppState {
        metrics: metrics.clone(),
    };
    let metrics_port = config.metrics_port;
    tokio::spawn(async move {
        if let Err(error) = api::serve(metrics_port, state).await {
            warn!(%error, "metrics server terminated");
        }
    });

    tokio::select! {
        _ = run_cycles(&config, &lister, &resolver, &metrics) => {}
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received");
        }
    }

    Ok(())
}

/// Drive reconciliation until the process is terminated.
async fn run_cycles(
    config: &Config,
    lister: &ArgoApplications,
    resolver: &IndexClient,
    metrics: &VersionStatusMetrics,
) {
    let mut ticker = tokio::time::interval(Duration::from_secs(config.interval.max(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let apps = match lister.list().await {
            Ok(apps) => apps,
            Err(error) => {
                warn!(namespace = %config.namespace, %error, "failed to list applications");
                continue;
            }
        };
        debug!(count = apps.len(), "listed applications");

        let samples = reconcile::run_once(&apps, resolver).await;
        if config.reset_stale_series {
            metrics.clear();
        }
        for sample in &samples {
            metrics.publish(sample);
        }
        info!(samples = samples.len(), "reconciliation cycle complete");
    }
}
