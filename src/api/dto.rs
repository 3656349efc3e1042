//! Wire types for the REST backend.
//!
//! The backend is loose about shapes: identifiers arrive as strings or
//! numbers, and list endpoints answer either with a bare array or with the
//! usual `{success, data, message}` envelope. Everything is normalised here
//! so the rest of the crate sees one shape.

use super::ApiError;
use crate::draft::AdminDraft;
use crate::wizard_state::SchoolId;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

fn id_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    id_from_value(&value).ok_or_else(|| de::Error::custom("id must be a string or a number"))
}

fn deserialize_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| de::Error::custom("price out of range")),
        Value::String(s) => s.trim().parse().map_err(de::Error::custom),
        Value::Null => Ok(0.0),
        other => Err(de::Error::custom(format!("invalid price: {}", other))),
    }
}

/// A subscription plan offered on step 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_price")]
    pub price: f64,
}

impl Subscription {
    pub fn display_line(&self) -> String {
        format!("{} ({:.2})", self.name, self.price)
    }
}

/// A country offered on step 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
}

/// One row of the schools listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolSummary {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub email: String,
}

/// List endpoint payload: a bare array or an enveloped one.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListPayload<T> {
    Bare(Vec<T>),
    Enveloped {
        #[serde(default = "default_success")]
        success: bool,
        #[serde(default = "Vec::new")]
        data: Vec<T>,
        #[serde(default)]
        message: Option<String>,
    },
}

fn default_success() -> bool {
    true
}

impl<T> ListPayload<T> {
    pub fn into_items(self) -> Result<Vec<T>, ApiError> {
        match self {
            Self::Bare(items) => Ok(items),
            Self::Enveloped {
                success: true,
                data,
                ..
            } => Ok(data),
            Self::Enveloped {
                success: false,
                message,
                ..
            } => Err(ApiError::Rejected(
                message.unwrap_or_else(|| "request rejected".to_string()),
            )),
        }
    }
}

/// Response of `POST create-school`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CreateSchoolResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
}

impl CreateSchoolResponse {
    /// The created school's identifier.
    ///
    /// A response without an identifier is a failure even when `success`
    /// is true.
    pub fn school_id(&self) -> Result<SchoolId, ApiError> {
        if !self.success {
            return Err(ApiError::Rejected(
                self.message
                    .clone()
                    .unwrap_or_else(|| "school creation rejected".to_string()),
            ));
        }
        self.data
            .as_ref()
            .and_then(|data| data.get("id"))
            .and_then(id_from_value)
            .and_then(SchoolId::new)
            .ok_or(ApiError::MissingIdentifier)
    }
}

/// Response of `POST create-admin` and other message-only endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiResponse {
    /// Backend message on success, `Rejected` otherwise.
    pub fn into_result(self) -> Result<String, ApiError> {
        if self.success {
            Ok(self.message.unwrap_or_default())
        } else {
            Err(ApiError::Rejected(
                self.message.unwrap_or_else(|| "request rejected".to_string()),
            ))
        }
    }
}

/// Body of `POST create-admin`: the admin draft plus the owning school.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdminRequest<'a> {
    #[serde(flatten)]
    pub admin: &'a AdminDraft,
    pub school_id: &'a str,
}

/// Pull a human message out of an error body, if it is an envelope.
pub fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ApiResponse>(body)
        .ok()
        .and_then(|r| r.message)
        .filter(|m| !m.trim().is_empty())
}
