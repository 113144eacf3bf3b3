//! Public runtime config shared through context.
//!
//! Starts at the compiled-in default and is replaced once
//! `/api/runtime-config` answers.

use leptos::prelude::*;

use crate::net::types::PublicConfig;

/// Fetch the public runtime config provided by the root component.
pub fn use_public_config() -> RwSignal<PublicConfig> {
    expect_context::<RwSignal<PublicConfig>>()
}
