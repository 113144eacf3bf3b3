//! Public runtime configuration for the browser client.

use axum::extract::State;
use axum::response::Json;
use serde::Serialize;

use crate::state::AppState;

/// Public config body. Never carries the API secret.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct RuntimeConfigResponse {
    #[serde(rename = "apiBase")]
    pub api_base: String,
}

/// `GET /api/runtime-config`: expose the public half of the runtime config.
pub async fn runtime_config(State(state): State<AppState>) -> Json<RuntimeConfigResponse> {
    Json(RuntimeConfigResponse { api_base: state.config.public.api_base.clone() })
}

#[cfg(test)]
#[path = "runtime_test.rs"]
mod tests;
