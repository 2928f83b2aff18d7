//! Router for emulated browser tabs

use std::sync::{Arc, RwLock};

use axum::{Json, Router, extract::State};

use super::public;
use crate::api::state::AppState;
use crate::worker::Client;

type SharedState = Arc<RwLock<AppState>>;

async fn list_clients(State(state): State<SharedState>) -> Json<Vec<Client>> {
    let emulator = state.read().unwrap().emulator.clone();
    Json(emulator.host().clients())
}

async fn open_client(
    State(state): State<SharedState>,
    Json(req): Json<public::OpenClientRequest>,
) -> Json<Client> {
    let emulator = state.read().unwrap().emulator.clone();
    let client = emulator
        .host()
        .add_client(&req.url, req.client_type, req.controlled);
    Json(client)
}

/// Create the clients router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", axum::routing::get(list_clients).post(open_client))
}
