use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Message {
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Client-supplied fields of a new message. Absent and `null` fields
/// deserialize as empty strings so they surface as the field's "required"
/// error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateMessage {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub phone: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub message: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl CreateMessage {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            message: message.into(),
        }
    }

    /// Copy with surrounding whitespace removed from every field; this is the
    /// form that gets persisted.
    pub fn trimmed(&self) -> Self {
        Self::new(self.name.trim(), self.phone.trim(), self.message.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_and_absent_fields_become_empty() {
        let payload: CreateMessage =
            serde_json::from_str(r#"{"name":null,"phone":"80291234567"}"#).unwrap();
        assert_eq!(payload, CreateMessage::new("", "80291234567", ""));
    }

    #[test]
    fn non_string_fields_are_still_rejected() {
        assert!(serde_json::from_str::<CreateMessage>(r#"{"name":42}"#).is_err());
    }
}
