//! Inbound validation for message payloads.
//!
//! Turns an untrusted JSON body into an [`IncomingMessage`], or reports the
//! first offending field. Fields are checked in declaration order
//! (`message_id`, `session_id`, `content`, `timestamp`, `sender`), so a
//! payload with several problems always reports the same one.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::message::{IncomingMessage, Sender};

/// Maximum message content length, in characters.
pub const MAX_CONTENT_CHARS: usize = 5000;

/// Validate a JSON request body into an [`IncomingMessage`].
pub fn validate_incoming(body: &Value) -> Result<IncomingMessage, ValidationError> {
    let obj = body
        .as_object()
        .ok_or_else(|| ValidationError::new("body", "must be a JSON object"))?;

    let message_id = non_empty_string(obj, "message_id")?;
    let session_id = non_empty_string(obj, "session_id")?;

    let content = required_string(obj, "content")?;
    let chars = content.chars().count();
    if chars == 0 {
        return Err(ValidationError::new("content", "must not be empty"));
    }
    if chars > MAX_CONTENT_CHARS {
        return Err(ValidationError::new(
            "content",
            format!("must be at most {MAX_CONTENT_CHARS} characters"),
        ));
    }

    let timestamp = required_string(obj, "timestamp")?;
    if !is_iso8601(timestamp) {
        return Err(ValidationError::new(
            "timestamp",
            "must be a valid ISO 8601 timestamp",
        ));
    }

    let sender = required_string(obj, "sender")?
        .parse::<Sender>()
        .map_err(|_| ValidationError::new("sender", "must be one of: user, system"))?;

    Ok(IncomingMessage {
        message_id: message_id.to_string(),
        session_id: session_id.to_string(),
        content: content.to_string(),
        timestamp: timestamp.to_string(),
        sender,
    })
}

fn required_string<'a>(
    obj: &'a Map<String, Value>,
    field: &str,
) -> Result<&'a str, ValidationError> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(ValidationError::new(field, "field required")),
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(_) => Err(ValidationError::new(field, "must be a string")),
    }
}

fn non_empty_string<'a>(
    obj: &'a Map<String, Value>,
    field: &str,
) -> Result<&'a str, ValidationError> {
    let value = required_string(obj, field)?;
    if value.is_empty() {
        return Err(ValidationError::new(field, "must not be empty"));
    }
    Ok(value)
}

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Whether `s` is an ISO-8601 date or date-time, with or without an offset.
///
/// A trailing `Z` is read as `+00:00`.
pub fn is_iso8601(s: &str) -> bool {
    let normalized = match s.strip_suffix('Z').or_else(|| s.strip_suffix('z')) {
        Some(rest) => format!("{rest}+00:00"),
        None => s.to_string(),
    };

    if DateTime::parse_from_rfc3339(&normalized).is_ok() {
        return true;
    }
    if OFFSET_FORMATS
        .iter()
        .any(|fmt| DateTime::parse_from_str(&normalized, fmt).is_ok())
    {
        return true;
    }
    if NAIVE_FORMATS
        .iter()
        .any(|fmt| NaiveDateTime::parse_from_str(&normalized, fmt).is_ok())
    {
        return true;
    }
    NaiveDate::parse_from_str(&normalized, "%Y-%m-%d").is_ok()
}
