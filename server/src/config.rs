//! Server runtime configuration parsed from environment variables.
//!
//! SYSTEM CONTEXT
//! ==============
//! The public half (`api_base`) is handed to the browser through
//! `/api/runtime-config`; the private half (`api_secret`) stays on the server.

use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
pub const DEFAULT_API_BASE: &str = "https://ayodhya.water.live/api";

/// Errors produced while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `PORT` was set but is not a valid port number.
    #[error("invalid PORT value: {0:?}")]
    InvalidPort(String),
}

/// Configuration visible to browser code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicConfig {
    pub api_base: String,
}

#[derive(Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub port: u16,
    /// Directory holding the built client bundle (`index.html`, `pkg/`).
    pub site_dir: PathBuf,
    pub public: PublicConfig,
    /// Private secret for upstream calls. Never serialized to clients.
    pub api_secret: Option<String>,
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("bind_addr", &self.bind_addr)
            .field("port", &self.port)
            .field("site_dir", &self.site_dir)
            .field("public", &self.public)
            .field("api_secret", &self.api_secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl ServerConfig {
    /// Build typed server config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `BIND_ADDR`: default `0.0.0.0`
    /// - `SITE_DIR`: default `client/dist` next to this crate
    /// - `NUXT_PUBLIC_API_BASE`: default [`DEFAULT_API_BASE`]
    /// - `NUXT_API_SECRET`: unset by default
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPort`] if `PORT` does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = parse_port(std::env::var("PORT").ok().as_deref())?;
        let bind_addr = non_empty_var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
        let site_dir = non_empty_var("SITE_DIR")
            .map_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../client/dist"), PathBuf::from);
        let api_base = normalize_api_base(std::env::var("NUXT_PUBLIC_API_BASE").ok().as_deref());
        let api_secret = non_empty_var("NUXT_API_SECRET");

        Ok(Self { bind_addr, port, site_dir, public: PublicConfig { api_base }, api_secret })
    }

    /// Startup notice when no private secret is configured.
    #[must_use]
    pub fn missing_secret_notice(&self) -> Option<&'static str> {
        self.api_secret.is_none().then_some("NUXT_API_SECRET not set; private API secret is unset")
    }

    #[must_use]
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_owned(),
            port: DEFAULT_PORT,
            site_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../client/dist"),
            public: PublicConfig { api_base: DEFAULT_API_BASE.to_owned() },
            api_secret: None,
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

fn parse_port(raw: Option<&str>) -> Result<u16, ConfigError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(DEFAULT_PORT),
        Some(value) => value
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort(value.to_owned())),
    }
}

fn normalize_api_base(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(value) if !value.is_empty() => value.trim_end_matches('/').to_owned(),
        _ => DEFAULT_API_BASE.to_owned(),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
