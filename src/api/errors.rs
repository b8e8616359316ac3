//! Error taxonomy for API calls and the message normalization used by every
//! user-facing notification. Response bodies come from a `FastAPI` backend, so
//! validation failures arrive as `{"detail": [{"loc": [...], "msg": ...}]}`
//! while other failures carry a string `detail` or a `message`.

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Message shown when no response was received at all.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection.";
/// Last-resort message when neither the body nor the status explain the failure.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred";

#[derive(Clone, Debug, Error)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Timeout: {0}")]
    Timeout(String),
    #[error("Request failed ({status}): {message}")]
    Http { status: u16, message: String },
    #[error("Response error: {0}")]
    Parse(String),
    #[error("Request error: {0}")]
    Serialization(String),
    #[error("{0}")]
    Validation(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

impl AppError {
    /// Returns the HTTP status when the server answered with an error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Http { status: 401, .. })
    }

    /// Single human-readable line for transient notifications.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) => NETWORK_ERROR_MESSAGE.to_string(),
            Self::Http { message, .. } | Self::Timeout(message) | Self::Validation(message) => {
                message.clone()
            }
            other => other.to_string(),
        }
    }
}

/// Normalizes an error response body into one message.
///
/// The body shape is inspected in order: a list of field errors, a string
/// `detail`, a string `message`, then the status reason phrase.
#[must_use]
pub fn api_error_message(body: &str, status: StatusCode) -> String {
    let data: Value = serde_json::from_str(body).unwrap_or(Value::Null);

    match data.get("detail") {
        Some(Value::Array(entries)) => return validation_message(entries),
        Some(Value::String(detail)) => return detail.clone(),
        _ => {}
    }

    if let Some(Value::String(message)) = data.get("message") {
        return message.clone();
    }

    status
        .canonical_reason()
        .map_or_else(|| UNEXPECTED_ERROR_MESSAGE.to_string(), ToString::to_string)
}

/// Builds the message for a `FastAPI` validation error list.
fn validation_message(entries: &[Value]) -> String {
    // Keeps first-seen field order; a repeated field replaces its message in place.
    let mut fields: Vec<(String, String)> = Vec::new();

    for entry in entries {
        let Some(Value::Array(loc)) = entry.get("loc") else {
            continue;
        };
        let Some(last) = loc.last() else {
            continue;
        };
        let field = match last {
            Value::String(name) => name.clone(),
            other => other.to_string(),
        };
        let msg = entry
            .get("msg")
            .and_then(Value::as_str)
            .filter(|msg| !msg.is_empty())
            .unwrap_or("Invalid input");
        let phrase = friendly_field_message(&field).map_or_else(|| msg.to_string(), str::to_string);

        if let Some(slot) = fields.iter_mut().find(|(name, _)| *name == field) {
            slot.1 = phrase;
        } else {
            fields.push((field, phrase));
        }
    }

    if !fields.is_empty() {
        return fields
            .into_iter()
            .map(|(_, phrase)| phrase)
            .collect::<Vec<_>>()
            .join("; ");
    }

    let joined = entries
        .iter()
        .map(|entry| {
            entry
                .get("msg")
                .and_then(Value::as_str)
                .filter(|msg| !msg.is_empty())
                .unwrap_or("Validation error")
        })
        .collect::<Vec<_>>()
        .join(", ");

    if joined.is_empty() {
        "Invalid input data".to_string()
    } else {
        joined
    }
}

/// Fixed phrasing for fields the dashboard forms know about.
fn friendly_field_message(field: &str) -> Option<&'static str> {
    match field {
        "phone" => Some("Phone number is required"),
        "password" => Some("Password is required"),
        "incident_date" => Some("Incident date must be a valid date"),
        "sum_insured" => Some("Sum insured must be a valid number"),
        "premium_amount" => Some("Premium amount must be a valid number"),
        "claimed_amount" => Some("Claimed amount must be a valid number"),
        _ => None,
    }
}
