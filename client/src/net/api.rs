//! REST helpers for the BFF server and the upstream auth API.
//!
//! Browser (csr): real HTTP calls via `gloo-net`.
//! Native builds: stubs, since these endpoints are only reachable from the
//! browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Option`/`Result` outputs instead of panics so a failed fetch
//! degrades the page rather than aborting it.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::{LoginRequest, LoginResponse, PublicConfig};
#[cfg(feature = "csr")]
use super::types::NewRefResponse;

pub const NEW_REF_ENDPOINT: &str = "/api/complaints/new-ref";
pub const RUNTIME_CONFIG_ENDPOINT: &str = "/api/runtime-config";
/// Login path, relative to the public API base.
pub const LOGIN_PATH: &str = "login";

/// Join the API base and a path without doubling slashes.
#[must_use]
pub fn api_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(any(test, feature = "csr"))]
fn new_ref_failed_message(status: u16) -> String {
    format!("reference request failed: {status}")
}

#[cfg(any(test, feature = "csr"))]
fn login_failed_message(status: u16) -> String {
    match status {
        401 | 403 => "invalid username or password".to_owned(),
        other => format!("login failed: {other}"),
    }
}

/// Fetch a fresh complaint reference number from the BFF.
///
/// `authorization` is sent as the `Authorization` header when present.
///
/// # Errors
///
/// Returns an error string if the request fails or the body is malformed.
pub async fn fetch_new_ref(authorization: Option<String>) -> Result<String, String> {
    #[cfg(feature = "csr")]
    {
        let mut request = gloo_net::http::Request::get(NEW_REF_ENDPOINT);
        if let Some(value) = authorization.as_deref() {
            request = request.header("Authorization", value);
        }
        let resp = request.send().await.map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(new_ref_failed_message(resp.status()));
        }
        let body: NewRefResponse = resp.json().await.map_err(|e| e.to_string())?;
        Ok(body.ref_no)
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = authorization;
        Err("not available outside the browser".to_owned())
    }
}

/// Exchange credentials for a token at `{api_base}/login`.
///
/// # Errors
///
/// Returns an error string if the request fails, the credentials are
/// rejected, or the body is not a login response.
pub async fn login(api_base: &str, credentials: &LoginRequest) -> Result<LoginResponse, String> {
    #[cfg(feature = "csr")]
    {
        let url = api_url(api_base, LOGIN_PATH);
        let resp = gloo_net::http::Request::post(&url)
            .json(credentials)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(login_failed_message(resp.status()));
        }
        resp.json::<LoginResponse>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (api_base, credentials);
        Err("not available outside the browser".to_owned())
    }
}

/// Fetch the public runtime config; `None` keeps the compiled-in default.
pub async fn fetch_runtime_config() -> Option<PublicConfig> {
    #[cfg(feature = "csr")]
    {
        let resp = gloo_net::http::Request::get(RUNTIME_CONFIG_ENDPOINT)
            .send()
            .await
            .ok()?;
        if !resp.ok() {
            return None;
        }
        resp.json::<PublicConfig>().await.ok()
    }
    #[cfg(not(feature = "csr"))]
    {
        None
    }
}
