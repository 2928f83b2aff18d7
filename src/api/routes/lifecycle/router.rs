//! Router for the worker's lifecycle state

use std::sync::{Arc, RwLock};

use axum::{Json, Router, extract::State};
use serde_json::Value;

use crate::api::state::AppState;

type SharedState = Arc<RwLock<AppState>>;

async fn get_lifecycle(State(state): State<SharedState>) -> Json<Value> {
    let (emulator, cache_name) = {
        let state = state.read().unwrap();
        (state.emulator.clone(), state.config.cache_name())
    };

    let lifecycle = emulator.state().await;
    Json(serde_json::json!({
        "state": lifecycle,
        "cache": cache_name,
    }))
}

/// Create the lifecycle router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", axum::routing::get(get_lifecycle))
}
