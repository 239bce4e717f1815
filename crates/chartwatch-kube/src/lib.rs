//! Chartwatch Kube - Argo CD application discovery
//!
//! Lists `argoproj.io/v1alpha1 Application` resources in one namespace
//! through the Kubernetes dynamic API and projects each onto the minimal
//! record reconciliation reads: a name and an untyped `spec` subdocument.

pub mod discovery;
pub mod error;

pub use discovery::{AppRecord, ApplicationLister, ArgoApplications};
pub use error::{DiscoveryError, Result};
