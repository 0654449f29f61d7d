//! ContentLibrary and ClusterContentLibrary CRDs (v1alpha2)
//!
//! Both kinds are keyed by the backend library UUID and share one status
//! record, which the reconciler fills from the virtualization backend.

use chrono::{DateTime, Utc};
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::types::{
    immutable_uuid, ContentLibraryType, PublishInfo, StorageBacking, StorageBackingType,
    SubscriptionInfo,
};
use crate::crd::conditions::{self, Condition, Conditioned, ConditionedStatus};

// =============================================================================
// ContentLibrary CRD
// =============================================================================

/// ContentLibrarySpec defines the desired state of a namespaced ContentLibrary.
#[derive(CustomResource, Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "imageregistry.vmware.com",
    version = "v1alpha2",
    kind = "ContentLibrary",
    plural = "contentlibraries",
    shortname = "cl",
    status = "ContentLibraryStatus",
    printcolumn = r#"{"name": "vSphereName", "type": "string", "jsonPath": ".status.name"}"#,
    printcolumn = r#"{"name": "Type", "type": "string", "jsonPath": ".status.type"}"#,
    printcolumn = r#"{"name": "Writable", "type": "boolean", "jsonPath": ".spec.writable"}"#,
    printcolumn = r#"{"name": "StorageType", "type": "string", "jsonPath": ".status.storageBacking.type"}"#,
    printcolumn = r#"{"name": "LastSyncTime", "type": "date", "jsonPath": ".status.lastSyncTime"}"#,
    printcolumn = r#"{"name": "Age", "type": "date", "jsonPath": ".metadata.creationTimestamp"}"#,
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct ContentLibrarySpec {
    /// Identifier of the library in the backend, immutable once set
    #[schemars(schema_with = "immutable_uuid")]
    pub uuid: String,

    /// Whether items may be added to or removed from the library
    pub writable: bool,

    /// Whether content may be imported into the library from a URL
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub allow_import: bool,
}

// =============================================================================
// ClusterContentLibrary CRD
// =============================================================================

/// ClusterContentLibrarySpec defines the desired state of a ClusterContentLibrary.
#[derive(CustomResource, Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "imageregistry.vmware.com",
    version = "v1alpha2",
    kind = "ClusterContentLibrary",
    plural = "clustercontentlibraries",
    shortname = "ccl",
    status = "ContentLibraryStatus",
    printcolumn = r#"{"name": "vSphereName", "type": "string", "jsonPath": ".status.name"}"#,
    printcolumn = r#"{"name": "Type", "type": "string", "jsonPath": ".status.type"}"#,
    printcolumn = r#"{"name": "StorageType", "type": "string", "jsonPath": ".status.storageBacking.type"}"#,
    printcolumn = r#"{"name": "LastSyncTime", "type": "date", "jsonPath": ".status.lastSyncTime"}"#,
    printcolumn = r#"{"name": "Age", "type": "date", "jsonPath": ".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct ClusterContentLibrarySpec {
    /// Identifier of the library in the backend, immutable once set
    #[schemars(schema_with = "immutable_uuid")]
    pub uuid: String,
}

// =============================================================================
// Status
// =============================================================================

/// Observed state of a library, mirrored from the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContentLibraryStatus {
    /// Name of the library in the backend
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Description of the library in the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Local or Subscribed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#type: Option<ContentLibraryType>,

    /// Default storage backing of the library
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_backing: Option<StorageBacking>,

    /// Version number identifying metadata changes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Publishing settings, for published libraries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_info: Option<PublishInfo>,

    /// Subscription settings, for subscribed libraries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_info: Option<SubscriptionInfo>,

    /// Security policy applied to the library items
    #[serde(default, rename = "securityPolicyID", skip_serializing_if = "Option::is_none")]
    pub security_policy_id: Option<String>,

    /// When the library was created in the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<String>")]
    pub creation_time: Option<DateTime<Utc>>,

    /// When the library was last modified in the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<String>")]
    pub last_modified_time: Option<DateTime<Utc>>,

    /// When a subscribed library last synchronized with its publisher
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<String>")]
    pub last_sync_time: Option<DateTime<Utc>>,

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

impl ContentLibraryStatus {
    pub fn is_subscribed(&self) -> bool {
        self.r#type == Some(ContentLibraryType::Subscribed)
    }

    pub fn storage_type(&self) -> Option<StorageBackingType> {
        self.storage_backing.as_ref().map(|b| b.r#type)
    }
}

// =============================================================================
// Implementations
// =============================================================================

impl ContentLibrary {
    /// Name shown to users: the backend name once observed, else the resource name
    pub fn display_name(&self) -> &str {
        display_name(&self.metadata, self.status.as_ref())
    }

    /// Check if the Ready condition is True
    pub fn is_ready(&self) -> bool {
        conditions::is_condition_true(self.conditions(), conditions::READY)
    }
}

impl ClusterContentLibrary {
    /// Name shown to users: the backend name once observed, else the resource name
    pub fn display_name(&self) -> &str {
        display_name(&self.metadata, self.status.as_ref())
    }

    /// Check if the Ready condition is True
    pub fn is_ready(&self) -> bool {
        conditions::is_condition_true(self.conditions(), conditions::READY)
    }
}

fn display_name<'a>(
    meta: &'a kube::core::ObjectMeta,
    status: Option<&'a ContentLibraryStatus>,
) -> &'a str {
    status
        .map(|s| s.name.as_str())
        .filter(|n| !n.is_empty())
        .or(meta.name.as_deref())
        .unwrap_or("unknown")
}
