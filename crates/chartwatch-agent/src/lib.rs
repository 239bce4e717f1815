//! Chartwatch - Helm chart freshness monitoring for Argo CD
//!
//! The agent reconciles on a fixed interval: list the applications in one
//! namespace, extract their Helm sources, resolve each chart's latest
//! published version from its repository index, compare against the
//! declared version, and publish one freshness gauge sample per
//! (application, chart, repo, current, latest) label tuple for Prometheus
//! to scrape.

pub mod api;
pub mod config;
pub mod metrics;
pub mod reconcile;
