//! Repository index types
//!
//! Helm-compatible repository index format, reduced to what resolution
//! needs: per-chart version lists in published order.

use std::collections::HashMap;

use chartwatch_core::{Comparison, compare};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{RepoError, Result};

/// Repository index (Helm-compatible)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryIndex {
    /// API version
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// When this index was generated
    #[serde(default = "Utc::now")]
    pub generated: DateTime<Utc>,

    /// Charts indexed by name; entry order is as published, not sorted
    #[serde(default)]
    pub entries: HashMap<String, Vec<ChartEntry>>,
}

fn default_api_version() -> String {
    "v1".to_string()
}

impl RepositoryIndex {
    /// Parse index from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse index from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let yaml = std::str::from_utf8(bytes).map_err(|e| RepoError::IndexParseError {
            message: format!("Invalid UTF-8: {}", e),
        })?;
        Self::from_yaml(yaml)
    }

    /// Get all published entries of a chart
    pub fn get(&self, name: &str) -> Option<&Vec<ChartEntry>> {
        self.entries.get(name)
    }

    /// Highest published version of a chart under the running-maximum scan.
    ///
    /// The first listed entry seeds the maximum even when it is not valid
    /// semver; a later candidate replaces it only when it parses and
    /// compares greater than the current maximum. Unparseable candidates
    /// are skipped but never abort the scan, so an index whose entries are
    /// all malformed degenerates to returning the first listed string.
    /// Returns `None` when the chart is absent or has zero version records.
    pub fn latest_version(&self, name: &str) -> Option<&str> {
        let entries = self.entries.get(name)?;
        let (seed, rest) = entries.split_first()?;
        let mut latest = seed.version.as_str();
        for entry in rest {
            if compare(&entry.version, latest) == Comparison::Greater {
                latest = &entry.version;
            }
        }
        Some(latest)
    }
}

/// Chart entry in the index
///
/// Carries the usual Helm index fields; resolution only reads `version`,
/// the rest is tolerated so real-world indexes decode cleanly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartEntry {
    /// Chart name
    #[serde(default)]
    pub name: String,

    /// Chart version as published
    pub version: String,

    /// Application version
    #[serde(default)]
    pub app_version: Option<String>,

    /// Description
    #[serde(default)]
    pub description: Option<String>,

    /// URLs to download the chart archive
    #[serde(default)]
    pub urls: Vec<String>,

    /// SHA256 digest of the archive
    #[serde(default)]
    pub digest: Option<String>,

    /// Creation timestamp
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,

    /// Deprecated flag
    #[serde(default)]
    pub deprecated: bool,
}
