use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A row of the `programs` table. `id` and `created_at` are assigned by the
/// store and never written by this service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Program {
    pub id: i64,
    pub title: String,
    pub total_sessions: Option<i64>,
    pub status: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload. Optional fields that were absent from the request are not
/// serialized at all, so the store applies its own column defaults instead of
/// receiving explicit nulls.
#[derive(Debug, Clone, Serialize)]
pub struct NewProgram {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_sessions: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Partial update payload for a program.
///
/// Each field is double-wrapped so that a key absent from the request body
/// (outer `None`, not serialized) is distinct from a key explicitly set to
/// null (`Some(None)`, serialized as null and clearing the column). Only the
/// three recognized keys are ever forwarded to the store; anything else in
/// the body is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgramPatch {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub total_sessions: Option<Option<i64>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub status: Option<Option<String>>,
}

impl ProgramPatch {
    /// True when no recognized field was present in the request body.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.total_sessions.is_none() && self.status.is_none()
    }
}

// Marks a field as present even when its value is null.
fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_program_omits_absent_optionals() {
        let program = NewProgram {
            title: "Math 101".to_string(),
            total_sessions: None,
            status: None,
        };
        let value = serde_json::to_value(&program).unwrap();
        assert_eq!(value, json!({"title": "Math 101"}));
    }

    #[test]
    fn new_program_keeps_provided_optionals() {
        let program = NewProgram {
            title: "Math 101".to_string(),
            total_sessions: Some(12),
            status: Some("active".to_string()),
        };
        let value = serde_json::to_value(&program).unwrap();
        assert_eq!(
            value,
            json!({"title": "Math 101", "total_sessions": 12, "status": "active"})
        );
    }

    #[test]
    fn patch_tracks_field_presence() {
        let patch: ProgramPatch = serde_json::from_value(json!({"status": "archived"})).unwrap();
        assert!(patch.title.is_none());
        assert!(patch.total_sessions.is_none());
        assert_eq!(patch.status, Some(Some("archived".to_string())));
        assert!(!patch.is_empty());
    }

    #[test]
    fn patch_distinguishes_explicit_null_from_absent() {
        let patch: ProgramPatch = serde_json::from_value(json!({"status": null})).unwrap();
        assert_eq!(patch.status, Some(None));
        assert!(!patch.is_empty());

        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(value, json!({"status": null}));
    }

    #[test]
    fn patch_ignores_unrecognized_keys() {
        let patch: ProgramPatch =
            serde_json::from_value(json!({"owner": "someone", "priority": 3})).unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn empty_body_yields_empty_patch() {
        let patch: ProgramPatch = serde_json::from_value(json!({})).unwrap();
        assert!(patch.is_empty());
        assert_eq!(serde_json::to_value(&patch).unwrap(), json!({}));
    }
}
