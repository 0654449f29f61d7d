//! Value types shared by the v1alpha2 library and item kinds

use schemars::gen::SchemaGenerator;
use schemars::schema::Schema;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// =============================================================================
// Enumerations
// =============================================================================

/// Type of a content library in the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum ContentLibraryType {
    Local,
    Subscribed,
}

impl std::fmt::Display for ContentLibraryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentLibraryType::Local => write!(f, "Local"),
            ContentLibraryType::Subscribed => write!(f, "Subscribed"),
        }
    }
}

/// Kind of storage backing a content library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum StorageBackingType {
    Datastore,
    Other,
}

impl std::fmt::Display for StorageBackingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackingType::Datastore => write!(f, "Datastore"),
            StorageBackingType::Other => write!(f, "Other"),
        }
    }
}

/// Type of a content library item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum ContentLibraryItemType {
    #[serde(rename = "OVF")]
    Ovf,
    #[serde(rename = "ISO")]
    Iso,
}

impl std::fmt::Display for ContentLibraryItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentLibraryItemType::Ovf => write!(f, "OVF"),
            ContentLibraryItemType::Iso => write!(f, "ISO"),
        }
    }
}

/// Result of verifying the signing certificate of an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CertVerificationStatus {
    Verified,
    VerificationFailure,
    VerificationNotSupported,
    Internal,
    NotAvailable,
}

/// Kind of library an item refers back to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum ContentLibraryRefKind {
    #[default]
    ContentLibrary,
    ClusterContentLibrary,
}

impl std::fmt::Display for ContentLibraryRefKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentLibraryRefKind::ContentLibrary => write!(f, "ContentLibrary"),
            ContentLibraryRefKind::ClusterContentLibrary => write!(f, "ClusterContentLibrary"),
        }
    }
}

// =============================================================================
// Records
// =============================================================================

/// Name and kind of the library resource an item belongs to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NameAndKindRef {
    pub kind: ContentLibraryRefKind,
    pub name: String,
}

/// Storage backing of a content library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StorageBacking {
    /// Where the library content lives
    pub r#type: StorageBackingType,

    /// Datastore holding the content, for the Datastore type
    #[serde(default, rename = "datastoreID", skip_serializing_if = "Option::is_none")]
    pub datastore_id: Option<String>,
}

/// Publishing settings of a library
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublishInfo {
    /// Whether the library is published for subscription
    pub published: bool,

    /// URL subscribers use to reach the published library
    #[serde(rename = "URL")]
    pub url: String,
}

/// Subscription settings of a subscribed library
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionInfo {
    /// URL of the published library this one subscribes to
    #[serde(rename = "URL")]
    pub url: String,

    /// Download content only when it is first used
    pub on_demand: bool,

    /// Synchronize with the publisher on a schedule
    pub automatic_sync: bool,
}

/// A file belonging to a library item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    pub name: String,

    /// File size as a resource quantity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<String>")]
    pub size_in_bytes: Option<k8s_openapi::apimachinery::pkg::api::resource::Quantity>,

    /// Version of the file content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Whether the file is on backend storage
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub cached: bool,
}

/// Certificate verification result of a signed item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CertificateVerificationInfo {
    pub status: CertVerificationStatus,

    /// PEM-encoded signing certificate chain
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cert_chain: Vec<String>,
}

// =============================================================================
// Schema Helpers
// =============================================================================

/// Schema for a backend UUID that cannot change after creation
pub(crate) fn immutable_uuid(gen: &mut SchemaGenerator) -> Schema {
    let mut schema = String::json_schema(gen).into_object();
    schema.extensions.insert(
        "x-kubernetes-validations".to_string(),
        serde_json::json!([{"rule": "self == oldSelf", "message": "uuid is immutable"}]),
    );
    Schema::Object(schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_item_type_wire_values() {
        assert_eq!(
            serde_json::to_value(ContentLibraryItemType::Ovf).unwrap(),
            json!("OVF")
        );
        assert_eq!(
            serde_json::from_value::<ContentLibraryItemType>(json!("ISO")).unwrap(),
            ContentLibraryItemType::Iso
        );
        assert!(serde_json::from_value::<ContentLibraryItemType>(json!("VMDK")).is_err());
        assert!(serde_json::from_value::<ContentLibraryItemType>(json!("ovf")).is_err());
    }

    #[test]
    fn test_library_and_backing_types() {
        assert!(serde_json::from_value::<ContentLibraryType>(json!("Subscribed")).is_ok());
        assert!(serde_json::from_value::<ContentLibraryType>(json!("Remote")).is_err());
        assert!(serde_json::from_value::<StorageBackingType>(json!("Other")).is_ok());
        assert!(serde_json::from_value::<StorageBackingType>(json!("NFS")).is_err());
        assert_eq!(ContentLibraryType::Subscribed.to_string(), "Subscribed");
        assert_eq!(StorageBackingType::Datastore.to_string(), "Datastore");
    }

    #[test]
    fn test_cert_verification_status() {
        assert_eq!(
            serde_json::to_value(CertVerificationStatus::VerificationNotSupported).unwrap(),
            json!("VERIFICATION_NOT_SUPPORTED")
        );
        let info: CertificateVerificationInfo =
            serde_json::from_value(json!({"status": "VERIFIED"})).unwrap();
        assert_eq!(info.status, CertVerificationStatus::Verified);
        assert!(info.cert_chain.is_empty());
    }

    #[test]
    fn test_storage_backing_wire_names() {
        let backing = StorageBacking {
            r#type: StorageBackingType::Datastore,
            datastore_id: Some("datastore-12".into()),
        };
        assert_eq!(
            serde_json::to_value(&backing).unwrap(),
            json!({"type": "Datastore", "datastoreID": "datastore-12"})
        );
    }

    #[test]
    fn test_file_info_quantity() {
        let info: FileInfo = serde_json::from_value(json!({
            "name": "disk-0.vmdk",
            "sizeInBytes": "2Gi",
            "cached": true,
        }))
        .unwrap();
        assert_eq!(info.size_in_bytes.as_ref().map(|q| q.0.as_str()), Some("2Gi"));
        assert!(info.cached);
    }
}
