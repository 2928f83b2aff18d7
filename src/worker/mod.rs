//! The service worker's event handlers.
//!
//! Each event is handled on its own: decisions are made by the pure
//! functions in `notify` and `cache`, then carried out through the host
//! traits. Nothing is carried over between events besides the config.
pub mod events;
pub mod host;
pub mod lifecycle;
pub use events::{Outcome, WorkerEvent};
pub use host::{Client, ClientQuery, ClientType, Clients, Lifecycle, Notifications};
pub use lifecycle::LifecycleState;

use std::sync::Arc;

use anyhow::Result;
use serde_json::Value;

use crate::cache::{self, CacheStorage};
use crate::core::WorkerConfig;
use crate::notify::{ClickAction, NotificationRef, decode, route_click, target_url};

type Clock = Arc<dyn Fn() -> i64 + Send + Sync>;

#[derive(Clone)]
pub struct ServiceWorker {
    config: WorkerConfig,
    caches: Arc<dyn CacheStorage>,
    notifications: Arc<dyn Notifications>,
    clients: Arc<dyn Clients>,
    lifecycle: Arc<dyn Lifecycle>,
    clock: Clock,
}

impl ServiceWorker {
    pub fn new<H>(config: WorkerConfig, host: Arc<H>) -> Self
    where
        H: CacheStorage + Notifications + Clients + Lifecycle + 'static,
    {
        Self {
            config,
            caches: host.clone(),
            notifications: host.clone(),
            clients: host.clone(),
            lifecycle: host,
            clock: Arc::new(|| chrono::Utc::now().timestamp_millis()),
        }
    }

    /// Replace the wall clock used for notification timestamps
    pub fn with_clock(mut self, clock: impl Fn() -> i64 + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn config(&self) -> &WorkerConfig {
        &self.config
    }

    /// Handle a single event. Only cache failures during install and
    /// activate are returned as errors so the host can fail that
    /// lifecycle stage. Everything else is logged and reported in the
    /// outcome.
    pub async fn handle(&self, event: WorkerEvent) -> Result<Outcome> {
        tracing::debug!("Handling {} event", event.kind());

        let outcome = match event {
            WorkerEvent::Install => {
                let cache = cache::install(self.caches.as_ref(), &self.config).await?;
                Outcome::Precached {
                    cache,
                    urls: self.config.precache_urls.clone(),
                }
            }
            WorkerEvent::Activate => {
                let deleted = cache::activate(self.caches.as_ref(), &self.config).await?;
                Outcome::CachesPruned { deleted }
            }
            WorkerEvent::Push { data } => self.on_push(data.as_deref()).await,
            WorkerEvent::NotificationClick {
                notification,
                action,
            } => self.on_notification_click(&notification, action).await,
            WorkerEvent::NotificationClose { notification } => {
                tracing::info!(
                    "Notification was closed: tag={} title={}",
                    notification.tag,
                    notification.title
                );
                Outcome::NotificationClosed {
                    tag: notification.tag,
                }
            }
            WorkerEvent::Message { data } => self.on_message(&data).await,
            WorkerEvent::Sync { tag } => {
                if tag == self.config.sync_tag {
                    if let Err(e) = sync_notifications().await {
                        tracing::error!("Error syncing notifications: {}", e);
                    }
                    Outcome::SyncNotImplemented { tag }
                } else {
                    Outcome::ignored("sync", format!("unknown sync tag {}", tag))
                }
            }
        };

        Ok(outcome)
    }

    async fn on_push(&self, data: Option<&str>) -> Outcome {
        let descriptor = match decode(data.map(str::as_bytes), (self.clock)(), &self.config) {
            Ok(descriptor) => descriptor,
            Err(e) => {
                tracing::error!("Error showing notification: {}", e);
                return Outcome::NotificationSuppressed {
                    reason: e.to_string(),
                };
            }
        };

        if let Err(e) = self
            .notifications
            .show(&descriptor.title, &descriptor.options)
            .await
        {
            tracing::error!("Error showing notification: {}", e);
            return Outcome::NotificationSuppressed {
                reason: e.to_string(),
            };
        }

        Outcome::NotificationShown { descriptor }
    }

    async fn on_notification_click(
        &self,
        notification: &NotificationRef,
        action: Option<String>,
    ) -> Outcome {
        if let Some(action) = action {
            tracing::debug!("Notification action clicked: {}", action);
        }

        match self.route(notification).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!("Error handling notification click: {}", e);
                Outcome::ClickFailed {
                    reason: e.to_string(),
                }
            }
        }
    }

    async fn route(&self, notification: &NotificationRef) -> Result<Outcome> {
        self.notifications.close(notification).await?;

        let windows = self.clients.match_all(ClientQuery::all_windows()).await?;
        let action = route_click(
            target_url(&notification.data),
            &windows,
            &self.config.root_url,
        );

        match action {
            ClickAction::Focus { client_id } => {
                self.clients.focus(&client_id).await?;
                Ok(Outcome::ClientFocused { client_id })
            }
            ClickAction::Open { url } => {
                self.clients.open_window(&url).await?;
                Ok(Outcome::WindowOpened { url })
            }
        }
    }

    async fn on_message(&self, data: &Value) -> Outcome {
        let is_skip_waiting = data.get("type").and_then(Value::as_str) == Some("SKIP_WAITING");
        if !is_skip_waiting {
            return Outcome::ignored("message", "unknown message type");
        }

        if let Err(e) = self.lifecycle.skip_waiting().await {
            tracing::error!("Error skipping waiting: {}", e);
            return Outcome::SkipWaitingFailed {
                reason: e.to_string(),
            };
        }
        Outcome::SkipWaiting
    }
}

/// Placeholder for replaying notifications that failed while offline.
/// There is no offline queue yet so there is nothing to replay.
async fn sync_notifications() -> Result<()> {
    Ok(())
}
