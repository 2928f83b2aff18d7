//! Router for inspecting cache storage

use std::sync::{Arc, RwLock};

use axum::{Json, Router, extract::State};

use crate::api::state::AppState;
use crate::cache::CacheSummary;

type SharedState = Arc<RwLock<AppState>>;

async fn list_caches(State(state): State<SharedState>) -> Json<Vec<CacheSummary>> {
    let emulator = state.read().unwrap().emulator.clone();
    Json(emulator.host().caches().summaries())
}

/// Create the caches router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", axum::routing::get(list_caches))
}
