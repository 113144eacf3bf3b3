//! Root application component with routing and context providers.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Redirect, Route, Router, Routes},
};

use crate::net::types::PublicConfig;
use crate::pages::login::LoginPage;
use crate::pages::new_complaint::NewComplaintPage;
use crate::state::auth::AuthSession;
use crate::util::storage::LocalStorage;

/// Root application component.
///
/// Hydrates the auth session from `localStorage`, provides it and the public
/// runtime config as context, and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = AuthSession::restore(Arc::new(LocalStorage));
    let config = RwSignal::new(PublicConfig::default());

    provide_context(auth);
    provide_context(config);

    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move {
        if let Some(remote) = crate::net::api::fetch_runtime_config().await {
            log::info!("runtime config loaded: api_base={}", remote.api_base);
            config.set(remote);
        }
    });

    view! {
        <Title text="Complaint Desk"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=(StaticSegment("complaints"), StaticSegment("new")) view=NewComplaintPage/>
                <Route path=StaticSegment("") view=|| view! { <Redirect path="/complaints/new"/> }/>
            </Routes>
        </Router>
    }
}
