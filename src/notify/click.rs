//! Decides which browser tab a notification click should land on.
use serde::Serialize;
use serde_json::Value;

use crate::worker::{Client, ClientType};

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClickAction {
    /// Bring an already open tab to the foreground
    Focus { client_id: String },
    /// Open a new tab at the URL
    Open { url: String },
}

/// The URL a notification wants to navigate to, read from `data.url`.
/// Anything other than a non-empty string is treated as no URL.
pub fn target_url(data: &Value) -> Option<&str> {
    data.get("url")
        .and_then(Value::as_str)
        .filter(|url| !url.is_empty())
}

/// Pick the tab to focus or the URL to open.
///
/// With a target URL, an open window whose URL is exactly equal to it is
/// focused, otherwise a new window is opened at the target. Without one
/// the first window in enumeration order is focused, falling back to
/// opening `root_url` when there are no windows at all.
pub fn route_click(target: Option<&str>, clients: &[Client], root_url: &str) -> ClickAction {
    let mut windows = clients
        .iter()
        .filter(|c| c.client_type == ClientType::Window);

    match target {
        Some(url) => match windows.find(|c| c.url == url) {
            Some(client) => ClickAction::Focus {
                client_id: client.id.clone(),
            },
            None => ClickAction::Open {
                url: url.to_string(),
            },
        },
        None => match windows.next() {
            Some(client) => ClickAction::Focus {
                client_id: client.id.clone(),
            },
            None => ClickAction::Open {
                url: root_url.to_string(),
            },
        },
    }
}
