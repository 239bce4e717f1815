//! The reconciliation cycle
//!
//! One pass: for every discovered application, extract its Helm sources,
//! resolve the latest published version of each chart, compare against the
//! declared version, and emit one status sample per resolved source.
//! Failures are contained at the smallest scope that can absorb them — a
//! malformed source or an unreachable repository skips that source, never
//! the cycle.

use chartwatch_core::{Comparison, compare, helm_sources};
use chartwatch_kube::AppRecord;
use chartwatch_repo::LatestVersionSource;
use tracing::{debug, info, warn};

/// One freshness verdict, keyed in the metrics sink by its first five
/// fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSample {
    pub application: String,
    pub chart: String,
    pub repo_url: String,
    pub current_version: String,
    pub latest_version: String,
    /// True iff the declared version compares equal to the latest. Any
    /// parse ambiguity on either side reports false — never "up to date"
    /// on ambiguous data.
    pub current: bool,
}

/// Run one reconciliation pass over the listed applications.
///
/// Samples come back in listing order, source order within an application.
/// Individual resolution failures are logged and skipped; the next
/// scheduled cycle is the retry.
pub async fn run_once(
    apps: &[AppRecord],
    resolver: &dyn LatestVersionSource,
) -> Vec<StatusSample> {
    let mut samples = Vec::new();
    for app in apps {
        let Some(spec) = &app.spec else {
            debug!(application = %app.name, "skipping application without a spec");
            continue;
        };

        let sources = helm_sources(spec);
        if sources.is_empty() {
            debug!(application = %app.name, "no Helm sources declared");
            continue;
        }

        for source in sources {
            let latest = match resolver
                .resolve_latest(&source.repo_url, &source.chart)
                .await
            {
                Ok(latest) => latest,
                Err(error) => {
                    warn!(
                        application = %app.name,
                        chart = %source.chart,
                        repo_url = %source.repo_url,
                        %error,
                        "failed to resolve latest chart version"
                    );
                    continue;
                }
            };

            let current = compare(&source.target_revision, &latest) == Comparison::Equal;
            info!(
                application = %app.name,
                chart = %source.chart,
                repo_url = %source.repo_url,
                current_version = %source.target_revision,
                latest_version = %latest,
                up_to_date = current,
                "chart version status"
            );
            samples.push(StatusSample {
                application: app.name.clone(),
                chart: source.chart,
                repo_url: source.repo_url,
                current_version: source.target_revision,
                latest_version: latest,
                current,
            });
        }
    }
    samples
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chartwatch_repo::RepoError;
    use serde_json::json;
    use std::collections::HashMap;

    /// Canned resolver: known (repo_url, chart) pairs resolve, everything
    /// else fails like an unreachable repository.
    struct StubResolver {
        latest: HashMap<(String, String), String>,
    }

    impl StubResolver {
        fn new(entries: &[(&str, &str, &str)]) -> Self {
            let latest = entries
                .iter()
                .map(|(repo, chart, version)| {
                    ((repo.to_string(), chart.to_string()), version.to_string())
                })
                .collect();
            Self { latest }
        }
    }

    #[async_trait]
    impl LatestVersionSource for StubResolver {
        async fn resolve_latest(
            &self,
            repo_url: &str,
            chart: &str,
        ) -> chartwatch_repo::Result<String> {
            self.latest
                .get(&(repo_url.to_string(), chart.to_string()))
                .cloned()
                .ok_or_else(|| RepoError::NetworkError {
                    message: format!("no route to {repo_url}"),
                })
        }
    }

    fn helm_app(name: &str, chart: &str, repo_url: &str, revision: &str) -> AppRecord {
        AppRecord {
            name: name.to_string(),
            spec: Some(json!({
                "source": {
                    "chart": chart,
                    "repoURL": repo_url,
                    "targetRevision": revision,
                },
            })),
        }
    }

    #[tokio::test]
    async fn test_up_to_date_when_versions_equal() {
        let resolver = StubResolver::new(&[("https://charts/", "nginx", "1.0.0")]);
        let apps = vec![helm_app("web", "nginx", "https://charts/", "1.0.0")];

        let samples = run_once(&apps, &resolver).await;
        assert_eq!(samples.len(), 1);
        assert!(samples[0].current);
        assert_eq!(samples[0].latest_version, "1.0.0");
    }

    #[tokio::test]
    async fn test_outdated_when_newer_published() {
        let resolver = StubResolver::new(&[("https://charts/", "nginx", "1.1.0")]);
        let apps = vec![helm_app("web", "nginx", "https://charts/", "1.0.0")];

        let samples = run_once(&apps, &resolver).await;
        assert_eq!(samples.len(), 1);
        assert!(!samples[0].current);
    }

    #[tokio::test]
    async fn test_unparseable_declared_version_never_current() {
        let resolver = StubResolver::new(&[("https://charts/", "nginx", "1.0.0")]);
        let apps = vec![helm_app("web", "nginx", "https://charts/", "bogus")];

        let samples = run_once(&apps, &resolver).await;
        assert_eq!(samples.len(), 1);
        assert!(!samples[0].current);
    }

    #[tokio::test]
    async fn test_unparseable_latest_never_current() {
        // An all-malformed index degenerates to a non-semver "latest";
        // the conservative verdict applies on that side too.
        let resolver = StubResolver::new(&[("https://charts/", "nginx", "stable")]);
        let apps = vec![helm_app("web", "nginx", "https://charts/", "stable")];

        let samples = run_once(&apps, &resolver).await;
        assert_eq!(samples.len(), 1);
        assert!(!samples[0].current);
    }

    #[tokio::test]
    async fn test_application_without_spec_emits_nothing() {
        let resolver = StubResolver::new(&[]);
        let apps = vec![AppRecord {
            name: "empty".to_string(),
            spec: None,
        }];

        assert!(run_once(&apps, &resolver).await.is_empty());
    }

    #[tokio::test]
    async fn test_application_without_sources_emits_nothing() {
        let resolver = StubResolver::new(&[]);
        let apps = vec![AppRecord {
            name: "git-app".to_string(),
            spec: Some(json!({
                "source": {
                    "repoURL": "https://git.example.com/app.git",
                    "targetRevision": "main",
                },
            })),
        }];

        assert!(run_once(&apps, &resolver).await.is_empty());
    }

    #[tokio::test]
    async fn test_failed_resolution_does_not_starve_cycle() {
        let resolver = StubResolver::new(&[("https://up/", "redis", "2.0.0")]);
        let apps = vec![
            helm_app("broken", "nginx", "https://down/", "1.0.0"),
            helm_app("healthy", "redis", "https://up/", "2.0.0"),
        ];

        let samples = run_once(&apps, &resolver).await;
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].application, "healthy");
        assert!(samples[0].current);
    }

    #[tokio::test]
    async fn test_multi_source_application_emits_per_source() {
        let resolver = StubResolver::new(&[
            ("https://a/", "nginx", "1.0.0"),
            ("https://b/", "redis", "3.0.0"),
        ]);
        let apps = vec![AppRecord {
            name: "stack".to_string(),
            spec: Some(json!({
                "sources": [
                    {"chart": "nginx", "repoURL": "https://a/", "targetRevision": "1.0.0"},
                    {"repoURL": "https://git.example.com/cfg.git", "targetRevision": "main"},
                    {"chart": "redis", "repoURL": "https://b/", "targetRevision": "2.5.0"},
                ],
            })),
        }];

        let samples = run_once(&apps, &resolver).await;
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].chart, "nginx");
        assert!(samples[0].current);
        assert_eq!(samples[1].chart, "redis");
        assert!(!samples[1].current);
    }
}
