//! Public types for the clients API
use serde::Deserialize;

use crate::worker::ClientType;

fn default_controlled() -> bool {
    true
}

/// Simulates a tab opening in the worker's scope
#[derive(Deserialize)]
pub struct OpenClientRequest {
    pub url: String,
    #[serde(rename = "type", default)]
    pub client_type: ClientType,
    #[serde(default = "default_controlled")]
    pub controlled: bool,
}
