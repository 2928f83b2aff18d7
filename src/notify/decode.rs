//! Turns a raw push message into a `NotificationDescriptor`.
use serde_json::{Map, Value};
use thiserror::Error;

use super::models::{NotificationAction, NotificationDescriptor, NotificationOptions};
use crate::core::WorkerConfig;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("payload is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),
    #[error("payload must be a JSON object, got {0}")]
    NotAnObject(&'static str),
    #[error("actions must be a list, got {0}")]
    ActionsNotAList(&'static str),
}

/// Build the descriptor for a push message.
///
/// Starts from the configured defaults and shallow merges the top level
/// fields of the payload over them. Payload fields win, except
/// `vibrate` which is always replaced by the configured pattern when
/// the runtime supports vibration. A `null` payload field counts as
/// absent. Field types are not validated: values are coerced the way
/// the browser coerces notification options.
///
/// `payload` is `None` when the push message carried no body at all.
pub fn decode(
    payload: Option<&[u8]>,
    now_ms: i64,
    config: &WorkerConfig,
) -> Result<NotificationDescriptor, DecodeError> {
    let mut fields = Map::new();

    if let Some(bytes) = payload {
        let parsed: Value = serde_json::from_slice(bytes).map_err(DecodeError::InvalidJson)?;
        match parsed {
            Value::Object(overrides) => {
                fields.extend(overrides.into_iter().filter(|(_, v)| !v.is_null()));
            }
            Value::Null => {}
            other => return Err(DecodeError::NotAnObject(kind_of(&other))),
        }
    }

    let actions = match fields.remove("actions") {
        Some(actions) if is_truthy(&actions) => Some(project_actions(actions)?),
        _ => None,
    };

    let vibrate = if config.vibration_supported {
        // Overwrites whatever the sender asked for
        Some(config.vibrate_pattern.clone())
    } else {
        fields.get("vibrate").and_then(vibrate_pattern)
    };

    let tag = fields
        .get("tag")
        .filter(|v| is_truthy(v))
        .map(text)
        .unwrap_or_else(|| config.default_tag.clone());

    Ok(NotificationDescriptor {
        title: field_text(&fields, "title", &config.default_title),
        options: NotificationOptions {
            body: field_text(&fields, "body", &config.default_body),
            icon: field_text(&fields, "icon", &config.default_icon),
            badge: field_text(&fields, "badge", &config.default_badge),
            timestamp: fields
                .get("timestamp")
                .and_then(epoch_millis)
                .unwrap_or(now_ms),
            require_interaction: fields.get("requireInteraction").is_none_or(is_truthy),
            vibrate,
            data: fields
                .remove("data")
                .unwrap_or_else(|| Value::Object(Map::new())),
            actions,
            tag,
            renotify: fields.get("renotify").is_some_and(is_truthy),
        },
    })
}

fn field_text(fields: &Map<String, Value>, key: &str, default: &str) -> String {
    fields
        .get(key)
        .map(text)
        .unwrap_or_else(|| default.to_string())
}

/// Strings as they are, anything else as its JSON text
fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// Fractional milliseconds are truncated. Values that are not numbers
// keep the current time.
fn epoch_millis(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse::<f64>().ok().map(|f| f.trunc() as i64),
        _ => None,
    }
}

// A vibration pattern is a list of durations or a single duration
fn vibrate_pattern(value: &Value) -> Option<Vec<u32>> {
    match value {
        Value::Array(items) => items.iter().map(duration).collect(),
        single => duration(single).map(|d| vec![d]),
    }
}

fn duration(value: &Value) -> Option<u32> {
    let f = value.as_f64()?;
    Some(f.trunc().clamp(0.0, u32::MAX as f64) as u32)
}

// Keep only `action`, `title` and `icon` from each entry
fn project_actions(actions: Value) -> Result<Vec<NotificationAction>, DecodeError> {
    let Value::Array(entries) = actions else {
        return Err(DecodeError::ActionsNotAList(kind_of(&actions)));
    };

    let present = |entry: &Value, key: &str| entry.get(key).filter(|v| !v.is_null()).map(text);

    Ok(entries
        .iter()
        .map(|entry| NotificationAction {
            action: present(entry, "action").unwrap_or_default(),
            title: present(entry, "title").unwrap_or_default(),
            icon: present(entry, "icon"),
        })
        .collect())
}

/// JavaScript truthiness, which is what senders of these payloads
/// assume for optional flags like `tag` and `renotify`.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
