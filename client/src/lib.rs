//! # complaint-client
//!
//! Leptos + WASM frontend for the complaint desk. Rendered entirely in the
//! browser (`csr` feature); the `server` crate serves the built bundle and
//! the `/api` routes it calls.
//!
//! This crate holds the auth session (token + user mirrored into
//! `localStorage`), wire types, REST helpers, and the route-level pages.

pub mod app;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install logging and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::mount_to_body(app::App);
}
