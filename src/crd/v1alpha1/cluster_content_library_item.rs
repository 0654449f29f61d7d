//! ClusterContentLibraryItem CRD (v1alpha1)
//!
//! Cluster-scoped variant of ContentLibraryItem. Immutable to end users.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::crd::conditions::{Condition, ConditionedStatus};

/// ClusterContentLibraryItemSpec defines the desired state of a ClusterContentLibraryItem.
#[derive(CustomResource, Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "imageregistry.vmware.com",
    version = "v1alpha1",
    kind = "ClusterContentLibraryItem",
    plural = "clustercontentlibraryitems",
    shortname = "clusterclitem",
    status = "ClusterContentLibraryItemStatus",
    printcolumn = r#"{"name": "ContentLibraryRefName", "type": "string", "jsonPath": ".spec.contentLibraryRefName"}"#,
    printcolumn = r#"{"name": "ItemName", "type": "string", "jsonPath": ".status.itemName"}"#,
    printcolumn = r#"{"name": "ItemUUID", "type": "string", "jsonPath": ".status.itemUUID"}"#,
    printcolumn = r#"{"name": "Age", "type": "date", "jsonPath": ".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct ClusterContentLibraryItemSpec {
    /// Name of the ContentLibrary resource this item belongs to
    pub content_library_ref_name: String,

    /// Human-readable description for this library item
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_description: Option<String>,
}

/// ClusterContentLibraryItemStatus defines the observed state of ClusterContentLibraryItem.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClusterContentLibraryItemStatus {
    /// Identifier of the item in the backend
    #[serde(default, rename = "itemUUID", skip_serializing_if = "Option::is_none")]
    pub item_uuid: Option<String>,

    /// Name of the item in the backend
    pub item_name: String,

    /// Version of the item metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_version: Option<String>,

    /// Version of the item content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_version: Option<String>,

    /// Free-form item type, for example "ovf"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,

    /// Whether all item files are on backend storage
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub cached: bool,

    /// Whether the item can be consumed
    pub ready: bool,

    /// Conditions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

impl ConditionedStatus for ClusterContentLibraryItemStatus {
    fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    fn conditions_mut(&mut self) -> &mut Vec<Condition> {
        &mut self.conditions
    }
}

impl ClusterContentLibraryItem {
    /// Name of the owning ContentLibrary resource
    pub fn library_name(&self) -> &str {
        &self.spec.content_library_ref_name
    }
}
