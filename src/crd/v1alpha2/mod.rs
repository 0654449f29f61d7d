//! Current generation of the content library schemas (storage version)
//!
//! UUID-keyed: the spec carries the immutable backend identifier and
//! everything else is observed state in status.
//!
//! - ContentLibrary / ClusterContentLibrary
//! - ContentLibraryItem / ClusterContentLibraryItem

pub mod content_library;
pub mod content_library_item;
pub mod types;

pub use content_library::*;
pub use content_library_item::*;
pub use types::*;

use kube::core::ObjectList;

use crate::error::Result;
use crate::registry::TypeRegistry;

pub const VERSION: &str = "v1alpha2";

pub type ContentLibraryList = ObjectList<ContentLibrary>;
pub type ClusterContentLibraryList = ObjectList<ClusterContentLibrary>;
pub type ContentLibraryItemList = ObjectList<ContentLibraryItem>;
pub type ClusterContentLibraryItemList = ObjectList<ClusterContentLibraryItem>;

/// Register every v1alpha2 kind
pub fn register(registry: &mut TypeRegistry) -> Result<()> {
    registry.register::<ContentLibrary>()?;
    registry.register::<ClusterContentLibrary>()?;
    registry.register::<ContentLibraryItem>()?;
    registry.register::<ClusterContentLibraryItem>()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crd::conditions::{
        Condition, ConditionStatus, Conditioned, READY, REASON_NOT_FOUND, REASON_UPLOADING, SYNCED,
    };
    use chrono::{TimeZone, Utc};
    use kube::CustomResourceExt;
    use serde_json::{json, Value};

    fn sample_conditions() -> Vec<Condition> {
        vec![
            Condition::true_(SYNCED),
            Condition::false_(READY)
                .with_reason(REASON_UPLOADING)
                .with_message("2 of 3 files transferred"),
        ]
    }

    fn check_conditions<K: Conditioned>(mut resource: K) {
        assert!(resource.conditions().is_empty());

        let first = sample_conditions();
        resource.set_conditions(first.clone());
        assert_eq!(resource.conditions(), first.as_slice());

        let second = vec![Condition::true_(READY)];
        resource.set_conditions(second.clone());
        assert_eq!(resource.conditions(), second.as_slice());

        resource.set_conditions(Vec::new());
        assert!(resource.conditions().is_empty());
    }

    #[test]
    fn test_conditions_round_trip_on_every_kind() {
        check_conditions(ContentLibrary::new("golden", ContentLibrarySpec::default()));
        check_conditions(ClusterContentLibrary::new(
            "shared",
            ClusterContentLibrarySpec::default(),
        ));
        check_conditions(ContentLibraryItem::new("ubuntu", ContentLibraryItemSpec::default()));
        check_conditions(ClusterContentLibraryItem::new(
            "photon",
            ClusterContentLibraryItemSpec::default(),
        ));
    }

    #[test]
    fn test_set_conditions_replaces_whole_list() {
        let mut item = ContentLibraryItem::new(
            "ubuntu",
            ContentLibraryItemSpec {
                uuid: "abc-123".into(),
            },
        );
        assert!(item.conditions().is_empty());

        let uploading = Condition::false_(READY).with_reason(REASON_UPLOADING);
        item.set_conditions(vec![uploading.clone()]);
        assert_eq!(item.conditions(), &[uploading]);

        item.set_conditions(vec![Condition::true_(READY)]);
        let conditions = item.conditions();
        assert_eq!(conditions.len(), 1);
        assert_eq!(conditions[0].status, ConditionStatus::True);
        assert!(conditions[0].reason.is_none());
    }

    #[test]
    fn test_set_conditions_keeps_other_status_fields() {
        let mut item = ContentLibraryItem::new("ubuntu", ContentLibraryItemSpec::default());
        item.status = Some(ContentLibraryItemStatus {
            name: "ubuntu-22.04".into(),
            r#type: Some(ContentLibraryItemType::Iso),
            cached: true,
            ..Default::default()
        });

        item.set_conditions(sample_conditions());
        let status = item.status.as_ref().unwrap();
        assert_eq!(status.name, "ubuntu-22.04");
        assert_eq!(status.r#type, Some(ContentLibraryItemType::Iso));
        assert!(status.cached);
        assert_eq!(status.conditions.len(), 2);
    }

    #[test]
    fn test_set_conditions_on_fresh_resource_writes_only_conditions() {
        let not_found = Condition::false_(READY)
            .with_reason(REASON_NOT_FOUND)
            .with_transition_time(Utc.timestamp_opt(1_700_000_000, 0).single().unwrap());
        let expected = json!({
            "conditions": [{
                "type": "Ready",
                "status": "False",
                "lastTransitionTime": "2023-11-14T22:13:20Z",
                "reason": "NotFound",
            }]
        });

        let mut item = ContentLibraryItem::new("ubuntu", ContentLibraryItemSpec::default());
        item.set_conditions(vec![not_found.clone()]);
        assert_eq!(serde_json::to_value(item.status.as_ref().unwrap()).unwrap(), expected);
        assert!(item.item_type().is_none());

        let mut ccl = ClusterContentLibrary::new("shared", ClusterContentLibrarySpec::default());
        ccl.set_conditions(vec![not_found]);
        let status = ccl.status.as_ref().unwrap();
        assert_eq!(serde_json::to_value(status).unwrap(), expected);
        assert!(!status.is_subscribed());
    }

    #[test]
    fn test_duplicate_types_are_stored_as_given() {
        let mut cl = ContentLibrary::new("golden", ContentLibrarySpec::default());
        let dup = vec![Condition::true_(READY), Condition::false_(READY)];
        cl.set_conditions(dup.clone());
        assert_eq!(cl.conditions(), dup.as_slice());
    }

    fn collect_enums(value: &Value, out: &mut Vec<Vec<Value>>) {
        match value {
            Value::Object(map) => {
                if let Some(Value::Array(values)) = map.get("enum") {
                    out.push(values.clone());
                }
                map.values().for_each(|v| collect_enums(v, out));
            }
            Value::Array(values) => values.iter().for_each(|v| collect_enums(v, out)),
            _ => {}
        }
    }

    #[test]
    fn test_item_crd_declares_type_enum() {
        let crd = serde_json::to_value(ContentLibraryItem::crd()).unwrap();
        let mut enums = Vec::new();
        collect_enums(&crd, &mut enums);

        let item_types = enums
            .iter()
            .find(|values| values.contains(&Value::from("OVF")))
            .expect("item type enum in schema");
        assert!(item_types.contains(&Value::from("ISO")));
        assert!(!item_types.contains(&Value::from("VMDK")));
    }

    #[test]
    fn test_uuid_declared_immutable() {
        let crd = serde_json::to_value(ContentLibraryItem::crd()).unwrap();
        let uuid = &crd["spec"]["versions"][0]["schema"]["openAPIV3Schema"]["properties"]
            ["spec"]["properties"]["uuid"];
        assert_eq!(uuid["type"], "string");
        assert_eq!(
            uuid["x-kubernetes-validations"][0]["rule"],
            Value::from("self == oldSelf")
        );

        let spec = &crd["spec"]["versions"][0]["schema"]["openAPIV3Schema"]["properties"]["spec"];
        assert_eq!(spec["required"], serde_json::json!(["uuid"]));
    }

    #[test]
    fn test_scopes() {
        assert_eq!(ContentLibrary::crd().spec.scope, "Namespaced");
        assert_eq!(ContentLibraryItem::crd().spec.scope, "Namespaced");
        assert_eq!(ClusterContentLibrary::crd().spec.scope, "Cluster");
        assert_eq!(ClusterContentLibraryItem::crd().spec.scope, "Cluster");
    }
}
