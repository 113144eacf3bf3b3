//! Complaint helper routes.

use axum::extract::State;
use axum::response::Json;
use serde::Serialize;

use crate::services::reference;
use crate::state::AppState;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct NewRefResponse {
    #[serde(rename = "refNo")]
    pub ref_no: String,
}

/// `GET /api/complaints/new-ref`: issue a fresh complaint reference number.
///
/// Always answers 200; internal failures surface as a `TEMP-` reference.
pub async fn new_ref(State(state): State<AppState>) -> Json<NewRefResponse> {
    let reference = reference::generate(state.refs.as_ref());
    tracing::debug!(ref_no = reference.as_str(), degraded = reference.is_degraded(), "issued complaint reference");
    Json(NewRefResponse { ref_no: reference.into_string() })
}

#[cfg(test)]
#[path = "complaints_test.rs"]
mod tests;
