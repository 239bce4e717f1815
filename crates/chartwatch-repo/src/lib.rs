//! Chartwatch Repository Resolution
//!
//! This crate answers one question: what is the latest version of a named
//! chart published by a Helm-style HTTP repository?
//!
//! - [`index`]: serde model of the repository `index.yaml` and the
//!   latest-version scan over its per-chart entry lists
//! - [`http`]: the HTTP client that fetches and decodes an index, behind
//!   the [`LatestVersionSource`] trait so callers can be tested with stubs
//!
//! Resolution is deliberately cache-free: every call re-fetches the index,
//! so the staleness window is exactly the caller's cycle interval.

pub mod error;
pub mod http;
pub mod index;

pub use error::{RepoError, Result};
pub use http::{IndexClient, LatestVersionSource};
pub use index::{ChartEntry, RepositoryIndex};
