//! Router for notifications currently on screen

use std::sync::{Arc, RwLock};

use axum::{Json, Router, extract::State};

use crate::api::state::AppState;
use crate::emulator::ShownNotification;

type SharedState = Arc<RwLock<AppState>>;

async fn list_notifications(State(state): State<SharedState>) -> Json<Vec<ShownNotification>> {
    let emulator = state.read().unwrap().emulator.clone();
    Json(emulator.host().notifications())
}

/// Create the notifications router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", axum::routing::get(list_notifications))
}
