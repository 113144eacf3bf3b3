use super::*;
use crate::state::test_helpers::{test_app_state, test_app_state_degraded};

#[tokio::test]
async fn new_ref_returns_primary_reference() {
    let Json(body) = new_ref(State(test_app_state())).await;
    assert!(body.ref_no.starts_with("CMP-"));
    assert_eq!(body.ref_no.split('-').count(), 3);
}

#[tokio::test]
async fn new_ref_returns_fallback_when_source_fails() {
    let Json(body) = new_ref(State(test_app_state_degraded())).await;
    assert_eq!(body.ref_no, "TEMP-1700000000000");
}

#[test]
fn new_ref_response_serializes_as_ref_no() {
    let body = NewRefResponse { ref_no: "CMP-1-2".to_owned() };
    let json = serde_json::to_value(&body).unwrap();
    assert_eq!(json, serde_json::json!({ "refNo": "CMP-1-2" }));
}
