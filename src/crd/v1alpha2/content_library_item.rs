//! ContentLibraryItem and ClusterContentLibraryItem CRDs (v1alpha2)
//!
//! Both kinds are keyed by the backend item UUID. The owning library is a
//! name + kind back-reference in status, resolved by name lookup.

use chrono::{DateTime, Utc};
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::types::{
    immutable_uuid, CertVerificationStatus, CertificateVerificationInfo, ContentLibraryItemType,
    FileInfo, NameAndKindRef,
};
use crate::crd::conditions::{self, Condition, Conditioned, ConditionedStatus};

// =============================================================================
// ContentLibraryItem CRD
// =============================================================================

/// ContentLibraryItemSpec defines the desired state of a namespaced ContentLibraryItem.
#[derive(CustomResource, Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "imageregistry.vmware.com",
    version = "v1alpha2",
    kind = "ContentLibraryItem",
    plural = "contentlibraryitems",
    shortname = "clitem",
    status = "ContentLibraryItemStatus",
    printcolumn = r#"{"name": "vSphereName", "type": "string", "jsonPath": ".status.name"}"#,
    printcolumn = r#"{"name": "ContentLibraryRef", "type": "string", "jsonPath": ".status.contentLibraryRef.name"}"#,
    printcolumn = r#"{"name": "Type", "type": "string", "jsonPath": ".status.type"}"#,
    printcolumn = r#"{"name": "Ready", "type": "string", "jsonPath": ".status.conditions[?(.type=='Ready')].status"}"#,
    printcolumn = r#"{"name": "Cached", "type": "boolean", "jsonPath": ".status.cached"}"#,
    printcolumn = r#"{"name": "SecurityCompliance", "type": "boolean", "jsonPath": ".status.securityCompliance"}"#,
    printcolumn = r#"{"name": "LastSyncTime", "type": "date", "jsonPath": ".status.lastSyncTime"}"#,
    printcolumn = r#"{"name": "Age", "type": "date", "jsonPath": ".metadata.creationTimestamp"}"#,
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct ContentLibraryItemSpec {
    /// Identifier of the item in the backend, immutable once set
    #[schemars(schema_with = "immutable_uuid")]
    pub uuid: String,
}

// =============================================================================
// ClusterContentLibraryItem CRD
// =============================================================================

/// ClusterContentLibraryItemSpec defines the desired state of a ClusterContentLibraryItem.
#[derive(CustomResource, Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "imageregistry.vmware.com",
    version = "v1alpha2",
    kind = "ClusterContentLibraryItem",
    plural = "clustercontentlibraryitems",
    shortname = "clusterclitem",
    status = "ContentLibraryItemStatus",
    printcolumn = r#"{"name": "vSphereName", "type": "string", "jsonPath": ".status.name"}"#,
    printcolumn = r#"{"name": "ContentLibraryRef", "type": "string", "jsonPath": ".status.contentLibraryRef.name"}"#,
    printcolumn = r#"{"name": "Type", "type": "string", "jsonPath": ".status.type"}"#,
    printcolumn = r#"{"name": "Ready", "type": "string", "jsonPath": ".status.conditions[?(.type=='Ready')].status"}"#,
    printcolumn = r#"{"name": "Cached", "type": "boolean", "jsonPath": ".status.cached"}"#,
    printcolumn = r#"{"name": "LastSyncTime", "type": "date", "jsonPath": ".status.lastSyncTime"}"#,
    printcolumn = r#"{"name": "Age", "type": "date", "jsonPath": ".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct ClusterContentLibraryItemSpec {
    /// Identifier of the item in the backend, immutable once set
    #[schemars(schema_with = "immutable_uuid")]
    pub uuid: String,
}

// =============================================================================
// Status
// =============================================================================

/// Observed state of a library item, mirrored from the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContentLibraryItemStatus {
    /// Name of the item in the backend
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Library resource this item belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_library_ref: Option<NameAndKindRef>,

    /// Description of the item in the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// OVF or ISO
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#type: Option<ContentLibraryItemType>,

    /// Version of the item metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_version: Option<String>,

    /// Version of the item content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_version: Option<String>,

    /// Files that make up the item
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub file_info: Vec<FileInfo>,

    /// Signing certificate verification, for signed items
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_verification_info: Option<CertificateVerificationInfo>,

    /// Whether the item complies with the library security policy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_compliance: Option<bool>,

    /// Whether all item files are on backend storage
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub cached: bool,

    /// Total size of the item files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<String>")]
    pub size_in_bytes: Option<Quantity>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<String>")]
    pub creation_time: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<String>")]
    pub last_modified_time: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<String>")]
    pub last_sync_time: Option<DateTime<Utc>>,

    /// Conditions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

impl ConditionedStatus for ContentLibraryItemStatus {
    fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    fn conditions_mut(&mut self) -> &mut Vec<Condition> {
        &mut self.conditions
    }
}

impl ContentLibraryItemStatus {
    /// Check if the signing certificate was verified
    pub fn is_certificate_verified(&self) -> bool {
        self.certificate_verification_info
            .as_ref()
            .is_some_and(|info| info.status == CertVerificationStatus::Verified)
    }

    /// Files not yet on backend storage
    pub fn uncached_files(&self) -> Vec<&FileInfo> {
        self.file_info.iter().filter(|f| !f.cached).collect()
    }
}

// =============================================================================
// Implementations
// =============================================================================

impl ContentLibraryItem {
    /// Back-reference to the owning library, once observed
    pub fn library_ref(&self) -> Option<&NameAndKindRef> {
        self.status.as_ref()?.content_library_ref.as_ref()
    }

    /// Check if the Ready condition is True
    pub fn is_ready(&self) -> bool {
        conditions::is_condition_true(self.conditions(), conditions::READY)
    }

    pub fn item_type(&self) -> Option<ContentLibraryItemType> {
        self.status.as_ref().and_then(|s| s.r#type)
    }
}

impl ClusterContentLibraryItem {
    /// Back-reference to the owning library, once observed
    pub fn library_ref(&self) -> Option<&NameAndKindRef> {
        self.status.as_ref()?.content_library_ref.as_ref()
    }

    /// Check if the Ready condition is True
    pub fn is_ready(&self) -> bool {
        conditions::is_condition_true(self.conditions(), conditions::READY)
    }

    pub fn item_type(&self) -> Option<ContentLibraryItemType> {
        self.status.as_ref().and_then(|s| s.r#type)
    }
}
