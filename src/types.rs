//! Core types for the contacts service

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Contact identifier type
pub type ContactId = String;

/// A stored contact record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[schema(example = "5f1b0c3e-8d7a-4a63-9d55-0b7e0a4f2c11")]
    pub id: ContactId,
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "+44 20 7946 0958")]
    pub phone_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
}

impl Contact {
    /// Build a stored contact from a validated payload
    pub fn from_payload(id: ContactId, payload: ContactPayload) -> Self {
        Self {
            id,
            name: payload.name,
            phone_number: payload.phone_number,
            email: payload.email,
        }
    }
}

/// Request body for create and update.
///
/// Missing fields deserialize to empty values so that validation can report
/// every failing field at once. A client-supplied `id` is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactPayload {
    #[serde(deserialize_with = "null_as_empty")]
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[serde(deserialize_with = "null_as_empty")]
    #[schema(example = "+44 20 7946 0958")]
    pub phone_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
}

/// Explicit `null` is treated like an absent field
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A single failed validation rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}
