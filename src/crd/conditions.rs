//! Status conditions shared by every content library resource
//!
//! A condition reports one observed aspect of a resource (for example
//! `Ready` or `Synced`) as a tri-state value plus optional diagnostics.
//! Every status record exposes its condition list through
//! [`ConditionedStatus`], and every resource kind whose status does so gets
//! [`Conditioned`] through a single blanket implementation.

use chrono::{DateTime, Utc};
use kube::core::object::HasStatus;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// =============================================================================
// Well-known Condition Types and Reasons
// =============================================================================

/// The resource is usable by consumers
pub const READY: &str = "Ready";

/// The resource reflects the latest state of the virtualization backend
pub const SYNCED: &str = "Synced";

/// The library item's files are present on backend storage
pub const CACHED: &str = "Cached";

/// Item content is still being transferred to the backend
pub const REASON_UPLOADING: &str = "Uploading";

/// The backing library or item no longer exists in the virtualization system
pub const REASON_NOT_FOUND: &str = "NotFound";

/// The backend could not be reached while syncing
pub const REASON_SYNC_FAILED: &str = "SyncFailed";

// =============================================================================
// Condition
// =============================================================================

/// Condition status values
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum ConditionStatus {
    True,
    False,
    #[default]
    Unknown,
}

impl std::fmt::Display for ConditionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConditionStatus::True => write!(f, "True"),
            ConditionStatus::False => write!(f, "False"),
            ConditionStatus::Unknown => write!(f, "Unknown"),
        }
    }
}

/// How severe a False condition is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum ConditionSeverity {
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for ConditionSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConditionSeverity::Error => write!(f, "Error"),
            ConditionSeverity::Warning => write!(f, "Warning"),
            ConditionSeverity::Info => write!(f, "Info"),
        }
    }
}

/// A single observation about a resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// Type of condition, unique within a resource
    pub r#type: String,

    /// Status: True, False, Unknown
    pub status: ConditionStatus,

    /// Severity, only set when status is False
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<ConditionSeverity>,

    /// Last time the status moved from one value to another
    #[schemars(with = "String")]
    pub last_transition_time: DateTime<Utc>,

    /// Machine-readable reason in CamelCase
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Human-readable message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Condition {
    /// Create a condition stamped with the current time
    pub fn new(r#type: impl Into<String>, status: ConditionStatus) -> Self {
        Self {
            r#type: r#type.into(),
            status,
            severity: None,
            last_transition_time: Utc::now(),
            reason: None,
            message: None,
        }
    }

    pub fn true_(r#type: impl Into<String>) -> Self {
        Self::new(r#type, ConditionStatus::True)
    }

    pub fn false_(r#type: impl Into<String>) -> Self {
        Self::new(r#type, ConditionStatus::False)
    }

    pub fn unknown(r#type: impl Into<String>) -> Self {
        Self::new(r#type, ConditionStatus::Unknown)
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_severity(mut self, severity: ConditionSeverity) -> Self {
        self.severity = Some(severity);
        self
    }

    pub fn with_transition_time(mut self, time: DateTime<Utc>) -> Self {
        self.last_transition_time = time;
        self
    }

    pub fn is_true(&self) -> bool {
        self.status == ConditionStatus::True
    }

    pub fn is_false(&self) -> bool {
        self.status == ConditionStatus::False
    }
}

// =============================================================================
// Capabilities
// =============================================================================

/// Implemented by status records that carry a condition list
pub trait ConditionedStatus {
    fn conditions(&self) -> &[Condition];

    fn conditions_mut(&mut self) -> &mut Vec<Condition>;
}

/// Get and replace the conditions of a resource.
///
/// `set_conditions` replaces the whole list in one assignment. It never
/// merges by type, deduplicates, or validates; callers that want
/// merge-by-type semantics use [`set_condition`] on a copy and write the
/// result back.
pub trait Conditioned {
    /// Conditions in stored order, empty when the resource has no status yet
    fn conditions(&self) -> &[Condition];

    /// Replace the full condition list
    fn set_conditions(&mut self, conditions: Vec<Condition>);
}

impl<K> Conditioned for K
where
    K: HasStatus,
    K::Status: ConditionedStatus + Default,
{
    fn conditions(&self) -> &[Condition] {
        self.status()
            .map(ConditionedStatus::conditions)
            .unwrap_or_default()
    }

    fn set_conditions(&mut self, conditions: Vec<Condition>) {
        *self
            .status_mut()
            .get_or_insert_with(Default::default)
            .conditions_mut() = conditions;
    }
}

// =============================================================================
// Caller-side Helpers
// =============================================================================

/// Find a condition by type
pub fn find_condition<'a>(conditions: &'a [Condition], r#type: &str) -> Option<&'a Condition> {
    conditions.iter().find(|c| c.r#type == r#type)
}

/// Check whether the condition of the given type exists and is True
pub fn is_condition_true(conditions: &[Condition], r#type: &str) -> bool {
    find_condition(conditions, r#type).is_some_and(Condition::is_true)
}

/// Set a condition, replacing existing if same type.
///
/// The previous transition time is kept when the status value is unchanged.
/// Returns true when the list changed.
pub fn set_condition(conditions: &mut Vec<Condition>, mut condition: Condition) -> bool {
    match conditions.iter_mut().find(|c| c.r#type == condition.r#type) {
        Some(existing) => {
            if existing.status == condition.status {
                condition.last_transition_time = existing.last_transition_time;
            }
            if *existing == condition {
                return false;
            }
            *existing = condition;
            true
        }
        None => {
            conditions.push(condition);
            true
        }
    }
}

/// Remove the condition of the given type, returning it if present
pub fn remove_condition(conditions: &mut Vec<Condition>, r#type: &str) -> Option<Condition> {
    let pos = conditions.iter().position(|c| c.r#type == r#type)?;
    Some(conditions.remove(pos))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).single().unwrap()
    }

    #[test]
    fn test_condition_serializes_camel_case_and_omits_unset() {
        let cond = Condition::false_(READY)
            .with_reason(REASON_UPLOADING)
            .with_transition_time(at(1_700_000_000));
        let value = serde_json::to_value(&cond).unwrap();

        assert_eq!(
            value,
            json!({
                "type": "Ready",
                "status": "False",
                "lastTransitionTime": "2023-11-14T22:13:20Z",
                "reason": "Uploading",
            })
        );
    }

    #[test]
    fn test_condition_status_rejects_unknown_values() {
        let res = serde_json::from_value::<Condition>(json!({
            "type": "Ready",
            "status": "Maybe",
            "lastTransitionTime": "2023-11-14T22:13:20Z",
        }));
        assert!(res.is_err());

        let cond: Condition = serde_json::from_value(json!({
            "type": "Ready",
            "status": "Unknown",
            "lastTransitionTime": "2023-11-14T22:13:20Z",
        }))
        .unwrap();
        assert_eq!(cond.status, ConditionStatus::Unknown);
        assert!(cond.reason.is_none());
        assert!(cond.message.is_none());
    }

    #[test]
    fn test_set_condition_keeps_transition_time_when_status_unchanged() {
        let mut conditions = vec![Condition::true_(READY).with_transition_time(at(100))];

        let changed = set_condition(
            &mut conditions,
            Condition::true_(READY)
                .with_message("still ready")
                .with_transition_time(at(200)),
        );
        assert!(changed);
        assert_eq!(conditions.len(), 1);
        assert_eq!(conditions[0].last_transition_time, at(100));
        assert_eq!(conditions[0].message.as_deref(), Some("still ready"));
    }

    #[test]
    fn test_set_condition_updates_transition_time_on_status_change() {
        let mut conditions = vec![
            Condition::true_(SYNCED).with_transition_time(at(50)),
            Condition::true_(READY).with_transition_time(at(100)),
        ];

        set_condition(
            &mut conditions,
            Condition::false_(READY)
                .with_reason(REASON_SYNC_FAILED)
                .with_severity(ConditionSeverity::Warning)
                .with_transition_time(at(300)),
        );

        assert_eq!(conditions.len(), 2);
        assert_eq!(conditions[0].r#type, SYNCED);
        assert_eq!(conditions[1].status, ConditionStatus::False);
        assert_eq!(conditions[1].last_transition_time, at(300));
    }

    #[test]
    fn test_set_condition_reports_no_change() {
        let mut conditions = vec![Condition::true_(READY).with_transition_time(at(100))];
        let changed = set_condition(
            &mut conditions,
            Condition::true_(READY).with_transition_time(at(999)),
        );
        assert!(!changed);
    }

    #[test]
    fn test_find_and_remove() {
        let mut conditions = vec![Condition::true_(READY), Condition::false_(CACHED)];

        assert!(is_condition_true(&conditions, READY));
        assert!(!is_condition_true(&conditions, CACHED));
        assert!(!is_condition_true(&conditions, SYNCED));
        assert!(find_condition(&conditions, CACHED).unwrap().is_false());

        let removed = remove_condition(&mut conditions, READY).unwrap();
        assert_eq!(removed.r#type, READY);
        assert!(find_condition(&conditions, READY).is_none());
        assert!(remove_condition(&mut conditions, READY).is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(ConditionStatus::True.to_string(), "True");
        assert_eq!(ConditionSeverity::Warning.to_string(), "Warning");
    }
}
