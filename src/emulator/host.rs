//! In-memory stand-in for the browser APIs the worker talks to.
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use crate::cache::{CacheStorage, MemoryCacheStorage};
use crate::notify::{NotificationOptions, NotificationRef};
use crate::worker::{Client, ClientQuery, ClientType, Clients, Lifecycle, Notifications};

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ShownNotification {
    pub id: String,
    pub title: String,
    pub options: NotificationOptions,
}

pub struct EmulatedHost {
    caches: MemoryCacheStorage,
    notifications: RwLock<Vec<ShownNotification>>,
    clients: RwLock<Vec<Client>>,
    skip_waiting: AtomicBool,
}

impl EmulatedHost {
    pub fn new(origin: Option<String>) -> Self {
        Self {
            caches: MemoryCacheStorage::new(origin),
            notifications: RwLock::new(Vec::new()),
            clients: RwLock::new(Vec::new()),
            skip_waiting: AtomicBool::new(false),
        }
    }

    pub fn caches(&self) -> &MemoryCacheStorage {
        &self.caches
    }

    pub fn notifications(&self) -> Vec<ShownNotification> {
        self.notifications
            .read()
            .expect("Unable to read notifications")
            .clone()
    }

    pub fn clients(&self) -> Vec<Client> {
        self.clients.read().expect("Unable to read clients").clone()
    }

    /// Simulate a tab (or worker) appearing in the worker's scope
    pub fn add_client(&self, url: &str, client_type: ClientType, controlled: bool) -> Client {
        let client = Client {
            id: Uuid::new_v4().to_string(),
            url: url.to_string(),
            client_type,
            focused: false,
            controlled,
        };
        self.clients
            .write()
            .expect("Unable to write clients")
            .push(client.clone());
        client
    }

    pub fn skip_waiting_requested(&self) -> bool {
        self.skip_waiting.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CacheStorage for EmulatedHost {
    async fn add_all(&self, cache_name: &str, urls: &[String]) -> Result<()> {
        self.caches.add_all(cache_name, urls).await
    }

    async fn keys(&self) -> Result<Vec<String>> {
        self.caches.keys().await
    }

    async fn delete(&self, cache_name: &str) -> Result<bool> {
        self.caches.delete(cache_name).await
    }
}

#[async_trait]
impl Notifications for EmulatedHost {
    async fn show(&self, title: &str, options: &NotificationOptions) -> Result<()> {
        let mut shown = self
            .notifications
            .write()
            .expect("Unable to write notifications");
        // Same tag replaces whatever is on screen
        shown.retain(|n| n.options.tag != options.tag);
        shown.push(ShownNotification {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            options: options.clone(),
        });
        Ok(())
    }

    async fn close(&self, notification: &NotificationRef) -> Result<()> {
        self.notifications
            .write()
            .expect("Unable to write notifications")
            .retain(|n| n.options.tag != notification.tag);
        Ok(())
    }
}

#[async_trait]
impl Clients for EmulatedHost {
    async fn match_all(&self, query: ClientQuery) -> Result<Vec<Client>> {
        let clients = self.clients.read().expect("Unable to read clients");
        Ok(clients.iter().filter(|c| query.matches(c)).cloned().collect())
    }

    async fn focus(&self, client_id: &str) -> Result<()> {
        let mut clients = self.clients.write().expect("Unable to write clients");
        if !clients.iter().any(|c| c.id == client_id) {
            return Err(anyhow!("No client with id {}", client_id));
        }
        for client in clients.iter_mut() {
            client.focused = client.id == client_id;
        }
        Ok(())
    }

    async fn open_window(&self, url: &str) -> Result<()> {
        let mut clients = self.clients.write().expect("Unable to write clients");
        for client in clients.iter_mut() {
            client.focused = false;
        }
        clients.push(Client {
            id: Uuid::new_v4().to_string(),
            url: url.to_string(),
            client_type: ClientType::Window,
            focused: true,
            controlled: true,
        });
        Ok(())
    }
}

#[async_trait]
impl Lifecycle for EmulatedHost {
    async fn skip_waiting(&self) -> Result<()> {
        self.skip_waiting.store(true, Ordering::SeqCst);
        Ok(())
    }
}
