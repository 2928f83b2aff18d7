//! Public types for the events API
use serde::Serialize;

use crate::worker::{LifecycleState, Outcome};

/// Everything that happened while handling a delivered event, including
/// lifecycle events it triggered
#[derive(Serialize)]
pub struct EventResponse {
    pub outcomes: Vec<Outcome>,
    pub state: LifecycleState,
}
