use serde::Serialize;
use serde_json::Value;

use crate::error::{Result, WorkbaseError};
use crate::services::{FieldValues, Record};

/// A work item in the tracker.
///
/// Typed columns cover the persisted schema; field names outside the schema
/// are retained in `extra` so callers can attach ad-hoc values without this
/// layer validating them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Item {
    pub id: i64,
    pub subject: String,
    pub description: String,
    pub status: String,
    pub version: i64,
    #[serde(skip_serializing_if = "FieldValues::is_empty")]
    pub extra: FieldValues,
}

impl Item {
    pub fn new(id: i64, subject: &str) -> Self {
        Self {
            id,
            subject: subject.to_string(),
            status: "new".to_string(),
            version: 1,
            ..Default::default()
        }
    }
}

fn expect_str(field: &str, value: &Value) -> Result<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| WorkbaseError::Validation(format!("{} expects a string, got: {}", field, value)))
}

fn expect_int(field: &str, value: &Value) -> Result<i64> {
    value
        .as_i64()
        .ok_or_else(|| WorkbaseError::Validation(format!("{} expects an integer, got: {}", field, value)))
}

impl Record for Item {
    fn set_field(&mut self, field: &str, value: &Value) -> Result<()> {
        match field {
            "id" => self.id = expect_int(field, value)?,
            "subject" => self.subject = expect_str(field, value)?,
            "description" => self.description = expect_str(field, value)?,
            "status" => self.status = expect_str(field, value)?,
            "version" => self.version = expect_int(field, value)?,
            _ => {
                self.extra.insert(field.to_string(), value.clone());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_field_updates_typed_columns() {
        let mut item = Item::new(1, "fix login");
        item.set_field("status", &json!("closed")).unwrap();
        item.set_field("version", &json!(3)).unwrap();
        assert_eq!(item.status, "closed");
        assert_eq!(item.version, 3);
    }

    #[test]
    fn test_set_field_absorbs_unknown_fields() {
        let mut item = Item::new(1, "fix login");
        item.set_field("severity", &json!("high")).unwrap();
        assert_eq!(item.extra.get("severity"), Some(&json!("high")));
        assert_eq!(item.subject, "fix login");
    }

    #[test]
    fn test_set_field_rejects_mismatched_value_shapes() {
        let mut item = Item::new(1, "fix login");
        assert!(item.set_field("subject", &json!(42)).is_err());
        assert!(item.set_field("version", &json!("three")).is_err());
    }
}
