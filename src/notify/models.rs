use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A button rendered on the notification. Only these three fields
/// survive decoding, anything else the sender attached is dropped.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NotificationAction {
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Options handed to the host alongside the title when showing a
/// notification. Field names follow the browser's notification options
/// dictionary so the serialized form can be passed straight through.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationOptions {
    pub body: String,
    pub icon: String,
    pub badge: String,
    // Epoch milliseconds
    pub timestamp: i64,
    pub require_interaction: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vibrate: Option<Vec<u32>>,
    // Free-form application data. The click handler reads `data.url`.
    #[serde(default)]
    pub data: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<NotificationAction>>,
    // When a tag is set, showing another notification with the same tag
    // replaces the one already on screen.
    pub tag: String,
    pub renotify: bool,
}

/// Normalized description of what to render for a single push message.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NotificationDescriptor {
    pub title: String,
    #[serde(flatten)]
    pub options: NotificationOptions,
}

/// The notification as delivered back to the worker in click and close
/// events.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct NotificationRef {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub data: Value,
}
