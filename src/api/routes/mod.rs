//! API routes module

pub mod caches;
pub mod clients;
pub mod events;
mod lifecycle;
pub mod notifications;

use std::sync::{Arc, RwLock};

use crate::api::state::AppState;
use axum::Router;

type SharedState = Arc<RwLock<AppState>>;

/// Create the combined API router
pub fn router() -> Router<SharedState> {
    Router::new()
        // Deliver events to the worker
        .nest("/events", events::router())
        // Emulated browser state
        .nest("/notifications", notifications::router())
        .nest("/clients", clients::router())
        .nest("/caches", caches::router())
        .nest("/lifecycle", lifecycle::router())
}
