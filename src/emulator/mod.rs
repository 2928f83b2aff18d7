//! Runs the worker against an in-memory host and plays the host's part
//! in the install/activate lifecycle.
mod host;
pub use host::{EmulatedHost, ShownNotification};

use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::core::WorkerConfig;
use crate::worker::{LifecycleState, Outcome, ServiceWorker, WorkerEvent};

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Dispatch {
    pub outcomes: Vec<Outcome>,
    pub state: LifecycleState,
}

#[derive(Clone)]
pub struct Emulator {
    worker: ServiceWorker,
    host: Arc<EmulatedHost>,
    // Held for the whole dispatch so events run one at a time
    state: Arc<Mutex<LifecycleState>>,
    // A previous version is still active, so activation waits for
    // skip waiting or an explicit activate event
    waiting: bool,
}

impl Emulator {
    /// First registration: activates as soon as install succeeds
    pub fn new(config: WorkerConfig) -> Self {
        Self::build(config, false)
    }

    /// Installed alongside an active previous version
    pub fn replacing(config: WorkerConfig) -> Self {
        Self::build(config, true)
    }

    fn build(config: WorkerConfig, waiting: bool) -> Self {
        let host = Arc::new(EmulatedHost::new(config.origin.clone()));
        Self {
            worker: ServiceWorker::new(config, host.clone()),
            host,
            state: Arc::new(Mutex::new(LifecycleState::default())),
            waiting,
        }
    }

    pub fn with_clock(mut self, clock: impl Fn() -> i64 + Send + Sync + 'static) -> Self {
        self.worker = self.worker.with_clock(clock);
        self
    }

    pub fn host(&self) -> &EmulatedHost {
        &self.host
    }

    pub fn config(&self) -> &WorkerConfig {
        self.worker.config()
    }

    pub async fn state(&self) -> LifecycleState {
        *self.state.lock().await
    }

    /// Deliver an event and any lifecycle events it triggers. Install
    /// failures are returned after the worker has been marked redundant.
    pub async fn dispatch(&self, event: WorkerEvent) -> Result<Dispatch> {
        let mut state = self.state.lock().await;
        let mut outcomes = Vec::new();

        let triggers_activation = matches!(
            event,
            WorkerEvent::Install | WorkerEvent::Message { .. }
        );
        outcomes.push(self.run(&mut state, event).await?);

        let may_activate = !self.waiting || self.host.skip_waiting_requested();
        if triggers_activation && may_activate && state.can_activate() {
            outcomes.push(self.run(&mut state, WorkerEvent::Activate).await?);
        }

        Ok(Dispatch {
            outcomes,
            state: *state,
        })
    }

    async fn run(&self, state: &mut LifecycleState, event: WorkerEvent) -> Result<Outcome> {
        match event {
            WorkerEvent::Install => {
                if !state.can_install() {
                    return Ok(Outcome::ignored(event.kind(), "worker already installed"));
                }
                *state = LifecycleState::Installing;
                let result = self.worker.handle(event).await;
                *state = state.installed(result.is_ok());
                tracing::debug!("Worker is {:?}", state);
                result
            }
            WorkerEvent::Activate => {
                if !state.can_activate() {
                    return Ok(Outcome::ignored(event.kind(), "worker is not waiting to activate"));
                }
                *state = LifecycleState::Activating;
                let result = self.worker.handle(event).await;
                *state = state.activated();
                tracing::debug!("Worker is {:?}", state);
                result
            }
            _ if *state == LifecycleState::Redundant => {
                Ok(Outcome::ignored(event.kind(), "worker is redundant"))
            }
            _ if event.is_functional() && *state != LifecycleState::Activated => {
                tracing::warn!("Dropping {} event, worker is not active", event.kind());
                Ok(Outcome::ignored(event.kind(), "worker is not active"))
            }
            _ => self.worker.handle(event).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> WorkerConfig {
        WorkerConfig {
            version: "v1".to_string(),
            cache_prefix: "push-notifications-".to_string(),
            origin: None,
            ..WorkerConfig::default()
        }
    }

    #[tokio::test]
    async fn it_activates_a_first_install_immediately() -> Result<()> {
        let emulator = Emulator::new(config());
        let dispatch = emulator.dispatch(WorkerEvent::Install).await?;

        assert_eq!(dispatch.state, LifecycleState::Activated);
        assert_eq!(dispatch.outcomes.len(), 2);
        assert!(matches!(dispatch.outcomes[0], Outcome::Precached { .. }));
        assert!(matches!(dispatch.outcomes[1], Outcome::CachesPruned { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn it_waits_behind_a_previous_version_until_skip_waiting() -> Result<()> {
        let emulator = Emulator::replacing(config());

        let dispatch = emulator.dispatch(WorkerEvent::Install).await?;
        assert_eq!(dispatch.state, LifecycleState::Installed);
        assert_eq!(dispatch.outcomes.len(), 1);

        let dispatch = emulator
            .dispatch(WorkerEvent::Message {
                data: serde_json::json!({"type": "SKIP_WAITING"}),
            })
            .await?;
        assert_eq!(dispatch.state, LifecycleState::Activated);
        assert_eq!(dispatch.outcomes[0], Outcome::SkipWaiting);
        assert!(matches!(dispatch.outcomes[1], Outcome::CachesPruned { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn it_activates_right_after_install_when_skip_waiting_came_first() -> Result<()> {
        let emulator = Emulator::replacing(config());
        emulator
            .dispatch(WorkerEvent::Message {
                data: serde_json::json!({"type": "SKIP_WAITING"}),
            })
            .await?;

        let dispatch = emulator.dispatch(WorkerEvent::Install).await?;
        assert_eq!(dispatch.state, LifecycleState::Activated);
        Ok(())
    }

    #[tokio::test]
    async fn it_drops_functional_events_before_activation() -> Result<()> {
        let emulator = Emulator::replacing(config());
        let dispatch = emulator.dispatch(WorkerEvent::Push { data: None }).await?;

        assert!(matches!(dispatch.outcomes[0], Outcome::Ignored { .. }));
        assert!(emulator.host().notifications().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn it_marks_the_worker_redundant_when_install_fails() -> Result<()> {
        let mut server = mockito::Server::new_async().await;
        let _missing = server
            .mock("GET", mockito::Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let emulator = Emulator::new(WorkerConfig {
            origin: Some(server.url()),
            ..config()
        });

        let result = emulator.dispatch(WorkerEvent::Install).await;
        assert!(result.is_err());
        assert_eq!(emulator.state().await, LifecycleState::Redundant);
        assert!(emulator.host().caches().summaries().is_empty());

        let dispatch = emulator.dispatch(WorkerEvent::Install).await?;
        assert!(matches!(dispatch.outcomes[0], Outcome::Ignored { .. }));
        Ok(())
    }
}
