//! Application listing over the Kubernetes dynamic API
//!
//! Argo CD applications are custom resources, so they are read as
//! [`DynamicObject`]s rather than typed structs: reconciliation only needs
//! the name and the untyped `spec` subdocument, and the loose typing is
//! handled downstream by the source extractor.

use async_trait::async_trait;
use kube::api::{Api, DynamicObject, ListParams};
use kube::core::{ApiResource, GroupVersionKind};
use kube::{Client, ResourceExt};
use serde_json::Value;

use crate::error::Result;

/// One discovered application, reduced to what reconciliation reads.
#[derive(Debug, Clone)]
pub struct AppRecord {
    /// Application name
    pub name: String,
    /// The application's `spec` subdocument, if it has one
    pub spec: Option<Value>,
}

/// Lists application records for one namespace.
#[async_trait]
pub trait ApplicationLister: Send + Sync {
    async fn list(&self) -> Result<Vec<AppRecord>>;
}

/// Argo CD `Application` discovery.
pub struct ArgoApplications {
    api: Api<DynamicObject>,
}

impl ArgoApplications {
    /// Scope discovery to `namespace`.
    pub fn new(client: Client, namespace: &str) -> Self {
        let gvk = GroupVersionKind::gvk("argoproj.io", "v1alpha1", "Application");
        let resource = ApiResource::from_gvk_with_plural(&gvk, "applications");
        let api = Api::namespaced_with(client, namespace, &resource);
        Self { api }
    }
}

#[async_trait]
impl ApplicationLister for ArgoApplications {
    async fn list(&self) -> Result<Vec<AppRecord>> {
        let applications = self.api.list(&ListParams::default()).await?;
        Ok(applications.items.into_iter().map(record_from).collect())
    }
}

fn record_from(object: DynamicObject) -> AppRecord {
    AppRecord {
        name: object.name_any(),
        spec: object.data.get("spec").cloned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn argo_resource() -> ApiResource {
        let gvk = GroupVersionKind::gvk("argoproj.io", "v1alpha1", "Application");
        ApiResource::from_gvk_with_plural(&gvk, "applications")
    }

    #[test]
    fn test_record_projection() {
        let mut object = DynamicObject::new("guestbook", &argo_resource());
        object.data = json!({
            "spec": {
                "source": {
                    "chart": "guestbook",
                    "repoURL": "https://charts.example.com",
                    "targetRevision": "1.0.0",
                },
            },
            "status": {"sync": {"status": "Synced"}},
        });

        let record = record_from(object);
        assert_eq!(record.name, "guestbook");
        let spec = record.spec.unwrap();
        assert_eq!(spec["source"]["chart"], "guestbook");
    }

    #[test]
    fn test_record_without_spec() {
        let object = DynamicObject::new("empty", &argo_resource());
        let record = record_from(object);
        assert_eq!(record.name, "empty");
        assert!(record.spec.is_none());
    }

    // Listing against a live API server is exercised in cluster
    // integration environments, not here.
}
