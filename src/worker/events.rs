use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::notify::{NotificationDescriptor, NotificationRef};

/// Events the host delivers to the worker.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WorkerEvent {
    Install,
    Activate,
    Push {
        // Raw message body, absent when the push carried no payload
        #[serde(default)]
        data: Option<String>,
    },
    NotificationClick {
        notification: NotificationRef,
        #[serde(default)]
        action: Option<String>,
    },
    NotificationClose {
        notification: NotificationRef,
    },
    Message {
        #[serde(default)]
        data: Value,
    },
    Sync {
        tag: String,
    },
}

impl WorkerEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            WorkerEvent::Install => "install",
            WorkerEvent::Activate => "activate",
            WorkerEvent::Push { .. } => "push",
            WorkerEvent::NotificationClick { .. } => "notificationclick",
            WorkerEvent::NotificationClose { .. } => "notificationclose",
            WorkerEvent::Message { .. } => "message",
            WorkerEvent::Sync { .. } => "sync",
        }
    }

    /// Events the host only delivers to an activated worker
    pub fn is_functional(&self) -> bool {
        matches!(
            self,
            WorkerEvent::Push { .. }
                | WorkerEvent::NotificationClick { .. }
                | WorkerEvent::NotificationClose { .. }
                | WorkerEvent::Sync { .. }
        )
    }
}

/// What handling an event resulted in.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Precached { cache: String, urls: Vec<String> },
    CachesPruned { deleted: Vec<String> },
    NotificationShown { descriptor: NotificationDescriptor },
    NotificationSuppressed { reason: String },
    ClientFocused { client_id: String },
    WindowOpened { url: String },
    ClickFailed { reason: String },
    NotificationClosed { tag: String },
    SkipWaiting,
    SkipWaitingFailed { reason: String },
    SyncNotImplemented { tag: String },
    Ignored { event: String, reason: String },
    /// The event failed and the host gave up on it
    Failed { event: String, reason: String },
}

impl Outcome {
    pub fn ignored(event: &str, reason: impl Into<String>) -> Self {
        Outcome::Ignored {
            event: event.to_string(),
            reason: reason.into(),
        }
    }

    pub fn failed(event: &str, reason: impl Into<String>) -> Self {
        Outcome::Failed {
            event: event.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn it_parses_events_by_type() {
        let event: WorkerEvent = serde_json::from_value(json!({"type": "install"})).unwrap();
        assert_eq!(event, WorkerEvent::Install);

        let event: WorkerEvent = serde_json::from_value(json!({"type": "push"})).unwrap();
        assert_eq!(event, WorkerEvent::Push { data: None });

        let event: WorkerEvent = serde_json::from_value(json!({
            "type": "notificationclick",
            "notification": {"tag": "x", "data": {"url": "/chat/1"}}
        }))
        .unwrap();
        assert_eq!(event.kind(), "notificationclick");
        assert!(event.is_functional());

        let event: WorkerEvent =
            serde_json::from_value(json!({"type": "message", "data": {"type": "SKIP_WAITING"}}))
                .unwrap();
        assert!(!event.is_functional());
    }

    #[test]
    fn it_serializes_outcomes_with_a_tag() {
        let value = serde_json::to_value(Outcome::WindowOpened {
            url: "/".to_string(),
        })
        .unwrap();
        assert_eq!(value, json!({"outcome": "window_opened", "url": "/"}));

        let value = serde_json::to_value(Outcome::SkipWaiting).unwrap();
        assert_eq!(value, json!({"outcome": "skip_waiting"}));

        let value = serde_json::to_value(Outcome::ignored("sync", "unknown sync tag x")).unwrap();
        assert_eq!(
            value,
            json!({"outcome": "ignored", "event": "sync", "reason": "unknown sync tag x"})
        );

        let value = serde_json::to_value(Outcome::failed("install", "fetch failed")).unwrap();
        assert_eq!(
            value,
            json!({"outcome": "failed", "event": "install", "reason": "fetch failed"})
        );
    }
}
