//! ContentLibrary CRD (v1alpha1)
//!
//! A namespaced mirror of a content library in the virtualization backend,
//! keyed by the Kubernetes object name. Immutable to end users.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::crd::conditions::{self, Condition, Conditioned, ConditionedStatus};

// =============================================================================
// ContentLibrary CRD
// =============================================================================

/// ContentLibrarySpec defines the desired state of a ContentLibrary.
#[derive(CustomResource, Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "imageregistry.vmware.com",
    version = "v1alpha1",
    kind = "ContentLibrary",
    plural = "contentlibraries",
    shortname = "cl",
    status = "ContentLibraryStatus",
    printcolumn = r#"{"name": "LibraryName", "type": "string", "jsonPath": ".status.libraryName"}"#,
    printcolumn = r#"{"name": "UUID", "type": "string", "jsonPath": ".status.libraryUUID"}"#,
    printcolumn = r#"{"name": "LibraryType", "type": "string", "jsonPath": ".status.libraryType"}"#,
    printcolumn = r#"{"name": "StorageType", "type": "string", "jsonPath": ".spec.storageBacking.storageType"}"#,
    printcolumn = r#"{"name": "Age", "type": "date", "jsonPath": ".metadata.creationTimestamp"}"#,
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct ContentLibrarySpec {
    /// Human-readable description for this library in the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub library_description: Option<String>,

    /// Default storage backing available for this library
    pub storage_backing: StorageBacking,
}

/// Default storage backing available for the library
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StorageBacking {
    /// Type of storage where the content is stored
    pub storage_type: String,

    /// Datastore holding the library content, for datastore-backed storage
    #[serde(default, rename = "datastoreID", skip_serializing_if = "Option::is_none")]
    pub datastore_id: Option<String>,
}

// =============================================================================
// Status
// =============================================================================

/// ContentLibraryStatus defines the observed state of ContentLibrary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContentLibraryStatus {
    /// Identifier of the library in the backend
    #[serde(default, rename = "libraryUUID", skip_serializing_if = "Option::is_none")]
    pub library_uuid: Option<String>,

    /// Name of the library in the backend
    pub library_name: String,

    /// Local or Subscribed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub library_type: Option<String>,

    /// Version number identifying metadata changes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Conditions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

impl ConditionedStatus for ContentLibraryStatus {
    fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    fn conditions_mut(&mut self) -> &mut Vec<Condition> {
        &mut self.conditions
    }
}

// =============================================================================
// Implementations
// =============================================================================

impl ContentLibrary {
    /// Get the name of this library resource
    pub fn name(&self) -> &str {
        self.metadata.name.as_deref().unwrap_or("unknown")
    }

    /// Backend identifier, once observed
    pub fn library_uuid(&self) -> Option<&str> {
        self.status.as_ref()?.library_uuid.as_deref()
    }

    /// Check if the Ready condition is True
    pub fn is_ready(&self) -> bool {
        conditions::is_condition_true(self.conditions(), conditions::READY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_spec_requires_storage_backing() {
        let res = serde_json::from_value::<ContentLibrarySpec>(json!({
            "libraryDescription": "golden images",
        }));
        assert!(res.is_err());

        let spec: ContentLibrarySpec = serde_json::from_value(json!({
            "storageBacking": {"storageType": "Datastore", "datastoreID": "datastore-12"},
        }))
        .unwrap();
        assert!(spec.library_description.is_none());
        assert_eq!(spec.storage_backing.datastore_id.as_deref(), Some("datastore-12"));
    }

    #[test]
    fn test_status_wire_names() {
        let status = ContentLibraryStatus {
            library_uuid: Some("5b1e-44aa".into()),
            library_name: "golden".into(),
            library_type: Some("Local".into()),
            ..Default::default()
        };
        let value = serde_json::to_value(&status).unwrap();
        assert_eq!(
            value,
            json!({"libraryUUID": "5b1e-44aa", "libraryName": "golden", "libraryType": "Local"})
        );
    }

    #[test]
    fn test_library_accessors() {
        let mut cl = ContentLibrary::new("golden", ContentLibrarySpec::default());
        assert_eq!(cl.name(), "golden");
        assert!(cl.library_uuid().is_none());
        assert!(!cl.is_ready());

        cl.set_conditions(vec![Condition::true_(conditions::READY)]);
        assert!(cl.is_ready());
    }
}
