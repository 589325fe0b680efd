//! Error types for the users client.
//!
//! # Design
//! Every failure is a set of `(code, message)` pairs, the shape the REST API
//! itself uses for errors. Protocol and decode failures carry a single fixed
//! pair; `Api` carries whatever the server's failure body contained, which
//! may be nothing at all.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::http::TransportError;

pub const INVALID_RESPONSE: &str = "invalid_response";
pub const INVALID_JSON: &str = "invalid_json";
pub const HTTP_REQUEST_FAILED: &str = "http_request_failed";

const INVALID_RESPONSE_MESSAGE: &str = "The content-type of the response needs to be \"application/json\"";
const INVALID_JSON_MESSAGE: &str = "The JSON response couldn't be decoded.";

/// A single `(code, message)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEntry {
    pub code: String,
    pub message: String,
}

impl ErrorEntry {
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
        }
    }
}

impl fmt::Display for ErrorEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// Errors returned by `WpClient::get_users` and `parse_response`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClientError {
    /// The response did not declare an `application/json` content type.
    #[error("{}", INVALID_RESPONSE_MESSAGE)]
    InvalidResponse,

    /// The body was not JSON, or decoded to `null`.
    #[error("{}", INVALID_JSON_MESSAGE)]
    InvalidJson,

    /// The server answered outside the 2xx range.
    #[error("{}", describe_api(.status, .errors))]
    Api {
        status: Option<u16>,
        errors: Vec<ErrorEntry>,
    },

    /// No response was produced.
    #[error("HTTP request failed: {0}")]
    Transport(#[from] TransportError),
}

impl ClientError {
    /// All `(code, message)` pairs carried by this error.
    pub fn entries(&self) -> Vec<ErrorEntry> {
        match self {
            ClientError::InvalidResponse => vec![ErrorEntry::new(INVALID_RESPONSE, INVALID_RESPONSE_MESSAGE)],
            ClientError::InvalidJson => vec![ErrorEntry::new(INVALID_JSON, INVALID_JSON_MESSAGE)],
            ClientError::Api { errors, .. } => errors.clone(),
            ClientError::Transport(err) => vec![ErrorEntry::new(HTTP_REQUEST_FAILED, &err.0)],
        }
    }

    /// The first error code, if any.
    pub fn code(&self) -> Option<&str> {
        match self {
            ClientError::InvalidResponse => Some(INVALID_RESPONSE),
            ClientError::InvalidJson => Some(INVALID_JSON),
            ClientError::Api { errors, .. } => errors.first().map(|e| e.code.as_str()),
            ClientError::Transport(_) => Some(HTTP_REQUEST_FAILED),
        }
    }

    /// The first error message, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            ClientError::InvalidResponse => Some(INVALID_RESPONSE_MESSAGE),
            ClientError::InvalidJson => Some(INVALID_JSON_MESSAGE),
            ClientError::Api { errors, .. } => errors.first().map(|e| e.message.as_str()),
            ClientError::Transport(err) => Some(err.0.as_str()),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => *status,
            _ => None,
        }
    }
}

fn describe_api(status: &Option<u16>, errors: &[ErrorEntry]) -> String {
    let status = status.map_or_else(|| "no status".to_string(), |s| format!("HTTP {s}"));
    if errors.is_empty() {
        return format!("{status}: request failed");
    }
    let joined: Vec<String> = errors.iter().map(ErrorEntry::to_string).collect();
    format!("{status}: {}", joined.join("; "))
}

/// Collect `(code, message)` pairs from a decoded failure body.
///
/// An object with a `code` or `message` member is one error. An array yields
/// one error per object element, any other object one error per object-valued
/// member. Missing fields become empty strings; everything else is ignored.
pub fn collect_error_entries(body: &Value) -> Vec<ErrorEntry> {
    match body {
        Value::Object(map) if map.contains_key("code") || map.contains_key("message") => {
            vec![entry_from(body)]
        }
        Value::Object(map) => map.values().filter(|v| v.is_object()).map(entry_from).collect(),
        Value::Array(items) => items.iter().filter(|v| v.is_object()).map(entry_from).collect(),
        _ => Vec::new(),
    }
}

fn entry_from(value: &Value) -> ErrorEntry {
    ErrorEntry {
        code: string_field(value, "code"),
        message: string_field(value, "message"),
    }
}

fn string_field(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
