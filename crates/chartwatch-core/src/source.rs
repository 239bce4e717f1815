//! Extraction of Helm source descriptors from application records
//!
//! Argo CD applications declare their deployment source as loosely-typed
//! JSON: a single `spec.source` object, an ordered `spec.sources` array,
//! or neither. A source may point at a git repository instead of a chart.
//! Extraction is tolerant by design: anything that does not look like a
//! complete Helm source yields `None`, which is a normal outcome and not
//! an error.

use serde_json::Value;

/// A well-formed Helm deployment source.
///
/// Valid only with all three fields non-empty; construct through
/// [`HelmSource::from_value`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelmSource {
    /// Chart name as listed in the repository index.
    pub chart: String,
    /// Repository base URL, normalized to end with a single `/`.
    pub repo_url: String,
    /// Chart version the application currently declares.
    pub target_revision: String,
}

impl HelmSource {
    /// Extract a Helm source from one untyped source record.
    ///
    /// Returns `None` when the record is not an object, has no `chart`
    /// key at all, or when any of `chart`, `repoURL`, `targetRevision`
    /// is missing, non-string, or empty. Non-string values read as empty
    /// rather than as type errors.
    pub fn from_value(source: &Value) -> Option<HelmSource> {
        let record = source.as_object()?;

        // A missing or null chart key means "not a Helm source" — the
        // usual shape for git-sourced applications.
        match record.get("chart") {
            None | Some(Value::Null) => return None,
            Some(_) => {}
        }

        let chart = str_field(record, "chart");
        let repo_url = str_field(record, "repoURL");
        let target_revision = str_field(record, "targetRevision");
        if chart.is_empty() || repo_url.is_empty() || target_revision.is_empty() {
            return None;
        }

        Some(HelmSource {
            chart: chart.to_string(),
            repo_url: normalize_repo_url(repo_url),
            target_revision: target_revision.to_string(),
        })
    }
}

fn str_field<'a>(record: &'a serde_json::Map<String, Value>, key: &str) -> &'a str {
    record.get(key).and_then(Value::as_str).unwrap_or("")
}

fn normalize_repo_url(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{url}/")
    }
}

/// Collect every valid Helm source declared by an application spec.
///
/// Reads `source` (single record) first, then `sources` (ordered
/// sequence, non-object entries dropped). An application may legitimately
/// present either shape, both, or neither.
pub fn helm_sources(spec: &Value) -> Vec<HelmSource> {
    let mut found = Vec::new();
    if let Some(source) = spec.get("source") {
        found.extend(HelmSource::from_value(source));
    }
    if let Some(Value::Array(sources)) = spec.get("sources") {
        found.extend(sources.iter().filter_map(HelmSource::from_value));
    }
    found
}
