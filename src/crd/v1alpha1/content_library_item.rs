//! ContentLibraryItem CRD (v1alpha1)
//!
//! A namespaced mirror of a single item (OVF template, ISO image, ...) in a
//! content library. The owning library is referenced by resource name only.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::crd::conditions::{self, Condition, Conditioned, ConditionedStatus};

// =============================================================================
// ContentLibraryItem CRD
// =============================================================================

/// ContentLibraryItemSpec defines the desired state of a ContentLibraryItem.
#[derive(CustomResource, Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "imageregistry.vmware.com",
    version = "v1alpha1",
    kind = "ContentLibraryItem",
    plural = "contentlibraryitems",
    shortname = "clitem",
    status = "ContentLibraryItemStatus",
    printcolumn = r#"{"name": "ContentLibraryRefName", "type": "string", "jsonPath": ".spec.contentLibraryRefName"}"#,
    printcolumn = r#"{"name": "ItemName", "type": "string", "jsonPath": ".status.itemName"}"#,
    printcolumn = r#"{"name": "ItemUUID", "type": "string", "jsonPath": ".status.itemUUID"}"#,
    printcolumn = r#"{"name": "ItemType", "type": "string", "jsonPath": ".status.itemType"}"#,
    printcolumn = r#"{"name": "Age", "type": "date", "jsonPath": ".metadata.creationTimestamp"}"#,
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct ContentLibraryItemSpec {
    /// Name of the ContentLibrary resource this item belongs to
    pub content_library_ref_name: String,

    /// Human-readable description for this library item
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_description: Option<String>,
}

// =============================================================================
// Sub-Types
// =============================================================================

/// Lifecycle phase of a library item in the backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum ContentLibraryItemPhase {
    Creating,
    Created,
    Updating,
    Updated,
    Deleting,
    Deleted,
    #[default]
    Unknown,
}

impl std::fmt::Display for ContentLibraryItemPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentLibraryItemPhase::Creating => write!(f, "Creating"),
            ContentLibraryItemPhase::Created => write!(f, "Created"),
            ContentLibraryItemPhase::Updating => write!(f, "Updating"),
            ContentLibraryItemPhase::Updated => write!(f, "Updated"),
            ContentLibraryItemPhase::Deleting => write!(f, "Deleting"),
            ContentLibraryItemPhase::Deleted => write!(f, "Deleted"),
            ContentLibraryItemPhase::Unknown => write!(f, "Unknown"),
        }
    }
}

impl ContentLibraryItemPhase {
    /// A backend operation is still running
    pub fn is_in_progress(&self) -> bool {
        matches!(
            self,
            ContentLibraryItemPhase::Creating
                | ContentLibraryItemPhase::Updating
                | ContentLibraryItemPhase::Deleting
        )
    }
}

// =============================================================================
// Status
// =============================================================================

/// ContentLibraryItemStatus defines the observed state of ContentLibraryItem.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContentLibraryItemStatus {
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

    /// Type of the item in the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,

    /// Whether the files are on disk in the backend
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub cached: bool,

    /// Lifecycle phase
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<ContentLibraryItemPhase>,

    /// Whether the item is ready to be used
    pub ready: bool,

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

// =============================================================================
// Implementations
// =============================================================================

impl ContentLibraryItem {
    /// Get the name of this item resource
    pub fn name(&self) -> &str {
        self.metadata.name.as_deref().unwrap_or("unknown")
    }

    /// Name of the owning ContentLibrary resource
    pub fn library_name(&self) -> &str {
        &self.spec.content_library_ref_name
    }

    /// Current phase, Unknown until observed
    pub fn phase(&self) -> ContentLibraryItemPhase {
        self.status
            .as_ref()
            .and_then(|s| s.phase)
            .unwrap_or_default()
    }

    /// Check if the item is ready, either from the flag or the Ready condition
    pub fn is_ready(&self) -> bool {
        self.status.as_ref().is_some_and(|s| s.ready)
            || conditions::is_condition_true(self.conditions(), conditions::READY)
    }
}
