use std::sync::Arc;

use super::*;
use crate::config::{PublicConfig, ServerConfig};
use crate::services::reference::SystemSource;

#[tokio::test]
async fn runtime_config_exposes_api_base_only() {
    let config = ServerConfig {
        public: PublicConfig { api_base: "https://api.example.test".to_owned() },
        api_secret: Some("top-secret".to_owned()),
        ..ServerConfig::default()
    };
    let state = AppState::with_source(config, Arc::new(SystemSource));

    let Json(body) = runtime_config(State(state)).await;
    let json = serde_json::to_string(&body).unwrap();
    assert_eq!(json, r#"{"apiBase":"https://api.example.test"}"#);
    assert!(!json.contains("top-secret"));
}
