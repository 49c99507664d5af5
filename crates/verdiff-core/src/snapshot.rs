//! Document snapshots and the set of tracked fields.
//!
//! A snapshot is a field-name → text map handed over by whatever stores
//! version history. Only [`TrackedField`]s take part in a document diff;
//! other keys are carried but ignored.

use crate::errors::{DiffError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Fields compared by a document diff, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackedField {
    Title,
    Description,
    Content,
    StateKey,
}

impl TrackedField {
    pub const ALL: [TrackedField; 4] = [
        TrackedField::Title,
        TrackedField::Description,
        TrackedField::Content,
        TrackedField::StateKey,
    ];

    /// Snapshot key of this field
    pub fn key(&self) -> &'static str {
        match self {
            TrackedField::Title => "title",
            TrackedField::Description => "description",
            TrackedField::Content => "content",
            TrackedField::StateKey => "state_key",
        }
    }

    /// Human-readable label shown by review UIs
    pub fn label(&self) -> &'static str {
        match self {
            TrackedField::Title => "Title",
            TrackedField::Description => "Description",
            TrackedField::Content => "Content",
            TrackedField::StateKey => "Status",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }
}

/// One version of a document, keyed by field name.
///
/// A missing key reads as the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentSnapshot {
    fields: BTreeMap<String, String>,
}

impl DocumentSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Text of a tracked field, empty when absent.
    pub fn text(&self, field: TrackedField) -> &str {
        self.get(field.key()).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Build a snapshot from a JSON object.
    ///
    /// Tracked fields must be strings or `null` (`null` reads as absent).
    /// Untracked keys are ignored whatever their type.
    ///
    /// # Errors
    ///
    /// `InvalidInput` naming `param` when the value is not an object, or
    /// `param.<field>` when a tracked field has any other JSON type.
    pub fn from_json(value: &Value, param: &str) -> Result<Self> {
        let obj = value.as_object().ok_or_else(|| {
            DiffError::invalid_input(
                param,
                format!("expected a JSON object, got {}", json_type(value)),
            )
        })?;

        let mut snapshot = DocumentSnapshot::new();
        for field in TrackedField::ALL {
            match obj.get(field.key()) {
                None | Some(Value::Null) => {}
                Some(Value::String(text)) => snapshot.insert(field.key(), text.clone()),
                Some(other) => {
                    return Err(DiffError::invalid_input(
                        format!("{}.{}", param, field.key()),
                        format!("expected a string or null, got {}", json_type(other)),
                    ));
                }
            }
        }
        Ok(snapshot)
    }
}

impl<K, V> FromIterator<(K, V)> for DocumentSnapshot
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_keys_and_labels() {
        assert_eq!(TrackedField::StateKey.key(), "state_key");
        assert_eq!(TrackedField::StateKey.label(), "Status");
        assert_eq!(TrackedField::from_key("content"), Some(TrackedField::Content));
        assert_eq!(TrackedField::from_key("body"), None);
    }

    #[test]
    fn test_missing_field_reads_empty() {
        let snap = DocumentSnapshot::new().with_field("title", "Hello");
        assert_eq!(snap.text(TrackedField::Title), "Hello");
        assert_eq!(snap.text(TrackedField::Content), "");
    }

    #[test]
    fn test_from_json_accepts_null_and_ignores_untracked() {
        let snap = DocumentSnapshot::from_json(
            &json!({"title": "T", "description": null, "views": 12}),
            "new_snapshot",
        )
        .unwrap();
        assert_eq!(snap.get("title"), Some("T"));
        assert_eq!(snap.get("description"), None);
        assert_eq!(snap.get("views"), None);
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        let err = DocumentSnapshot::from_json(&json!(["content"]), "old_snapshot").unwrap_err();
        assert_eq!(
            err,
            DiffError::InvalidInput {
                param: "old_snapshot".to_string(),
                reason: "expected a JSON object, got an array".to_string(),
            }
        );
    }

    #[test]
    fn test_from_json_rejects_wrong_field_type() {
        let err =
            DocumentSnapshot::from_json(&json!({"content": 42}), "new_snapshot").unwrap_err();
        match err {
            DiffError::InvalidInput { param, .. } => assert_eq!(param, "new_snapshot.content"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_collect_from_pairs() {
        let snap: DocumentSnapshot = [("title", "A"), ("content", "B")].into_iter().collect();
        assert_eq!(snap.len(), 2);
        assert!(!snap.is_empty());
    }
}
