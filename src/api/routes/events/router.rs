//! Router for delivering events to the worker

use std::sync::{Arc, RwLock};

use axum::{Json, Router, extract::State};

use super::public;
use crate::api::state::AppState;
use crate::worker::WorkerEvent;

type SharedState = Arc<RwLock<AppState>>;

async fn dispatch_event(
    State(state): State<SharedState>,
    Json(event): Json<WorkerEvent>,
) -> Result<Json<public::EventResponse>, crate::api::public::ApiError> {
    let emulator = state
        .read()
        .expect("Unable to read shared state")
        .emulator
        .clone();

    let dispatch = emulator.dispatch(event).await?;

    Ok(Json(public::EventResponse {
        outcomes: dispatch.outcomes,
        state: dispatch.state,
    }))
}

/// Create the events router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", axum::routing::post(dispatch_event))
}
