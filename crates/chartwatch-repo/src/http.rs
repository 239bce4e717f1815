//! HTTP index fetching and latest-version resolution
//!
//! One network fetch per resolution call: `GET {repo_url}index.yaml`,
//! decode, scan. No caching, no conditional requests — the caller's cycle
//! interval is the staleness window.

use async_trait::async_trait;
use tracing::debug;

use crate::error::{RepoError, Result};
use crate::index::RepositoryIndex;

/// Resolves the latest published version of a chart.
///
/// Seam between the reconciliation cycle and the network; the cycle
/// consumes this trait so it can be driven with canned resolutions in
/// tests.
#[async_trait]
pub trait LatestVersionSource: Send + Sync {
    /// Resolve the highest version of `chart` published by the repository
    /// rooted at `repo_url`.
    ///
    /// `repo_url` must already carry its single trailing `/` (the source
    /// extractor guarantees this).
    async fn resolve_latest(&self, repo_url: &str, chart: &str) -> Result<String>;
}

/// HTTP chart repository client
pub struct IndexClient {
    http: reqwest::Client,
}

impl IndexClient {
    /// Create a client with the chartwatch user agent.
    pub fn new() -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("chartwatch/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http })
    }

    /// Create from a preconfigured reqwest client.
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl LatestVersionSource for IndexClient {
    async fn resolve_latest(&self, repo_url: &str, chart: &str) -> Result<String> {
        let index_url = format!("{repo_url}index.yaml");
        url::Url::parse(&index_url).map_err(|e| RepoError::InvalidRepositoryUrl {
            url: index_url.clone(),
            reason: e.to_string(),
        })?;

        debug!(url = %index_url, chart, "fetching repository index");
        let response = self.http.get(&index_url).send().await?.error_for_status()?;
        let body = response.bytes().await?;
        let index = RepositoryIndex::from_bytes(&body)?;

        match index.latest_version(chart) {
            Some(version) => {
                debug!(chart, version, "resolved latest chart version");
                Ok(version.to_string())
            }
            None => Err(RepoError::ChartNotFound {
                name: chart.to_string(),
                repo: repo_url.to_string(),
            }),
        }
    }
}
