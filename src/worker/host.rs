//! What the worker needs from the runtime hosting it.
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::notify::{NotificationOptions, NotificationRef};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClientType {
    #[default]
    Window,
    Worker,
    SharedWorker,
}

/// A tab, window or worker in the worker's scope.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Client {
    pub id: String,
    pub url: String,
    #[serde(rename = "type", default)]
    pub client_type: ClientType,
    #[serde(default)]
    pub focused: bool,
    // Whether this worker controls the client
    #[serde(default)]
    pub controlled: bool,
}

impl Client {
    pub fn window(id: &str, url: &str) -> Self {
        Self {
            id: id.to_string(),
            url: url.to_string(),
            client_type: ClientType::Window,
            focused: false,
            controlled: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClientQuery {
    pub client_type: Option<ClientType>,
    pub include_uncontrolled: bool,
}

impl ClientQuery {
    /// Every window, controlled or not
    pub fn all_windows() -> Self {
        Self {
            client_type: Some(ClientType::Window),
            include_uncontrolled: true,
        }
    }

    pub fn matches(&self, client: &Client) -> bool {
        let type_matches = self.client_type.is_none_or(|t| t == client.client_type);
        type_matches && (self.include_uncontrolled || client.controlled)
    }
}

#[async_trait]
pub trait Notifications: Send + Sync {
    async fn show(&self, title: &str, options: &NotificationOptions) -> Result<()>;
    async fn close(&self, notification: &NotificationRef) -> Result<()>;
}

#[async_trait]
pub trait Clients: Send + Sync {
    async fn match_all(&self, query: ClientQuery) -> Result<Vec<Client>>;
    async fn focus(&self, client_id: &str) -> Result<()>;
    async fn open_window(&self, url: &str) -> Result<()>;
}

#[async_trait]
pub trait Lifecycle: Send + Sync {
    /// Ask the host to activate this worker without waiting for the
    /// previous version's clients to go away.
    async fn skip_waiting(&self) -> Result<()>;
}
