//! New-complaint screen: issues a reference number for the form.

#[cfg(test)]
#[path = "new_complaint_test.rs"]
mod new_complaint_test;

use leptos::prelude::*;

use crate::net::types::User;
use crate::state::auth::use_auth;

/// Header text for the signed-in user.
fn signed_in_label(user: Option<&User>) -> String {
    match user.and_then(|u| u.username.as_deref().or(u.email.as_deref())) {
        Some(name) => format!("Signed in as {name}"),
        None => "Not signed in".to_owned(),
    }
}

/// Text shown while the reference is pending or unavailable.
fn ref_placeholder(error: Option<&str>) -> String {
    match error {
        Some(e) => format!("Reference unavailable ({e})"),
        None => "Issuing reference...".to_owned(),
    }
}

#[component]
pub fn NewComplaintPage() -> impl IntoView {
    let auth = use_auth();
    let state = auth.state();
    let ref_no = RwSignal::new(None::<String>);
    let ref_error = RwSignal::new(None::<String>);

    #[cfg(feature = "csr")]
    let authorization = auth.authorization_header();
    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move {
        match crate::net::api::fetch_new_ref(authorization).await {
            Ok(value) => ref_no.set(Some(value)),
            Err(e) => {
                log::warn!("reference fetch failed: {e}");
                ref_error.set(Some(e));
            }
        }
    });

    let on_logout = move |_: leptos::ev::MouseEvent| {
        if let Err(e) = auth.clear_token() {
            log::debug!("logout left storage entries behind: {e}");
        }
    };

    view! {
        <div class="complaint-page">
            <header class="complaint-page__header">
                <span>{move || state.with(|s| signed_in_label(s.current_user.as_ref()))}</span>
                <Show
                    when=move || state.with(|s| s.access_token.is_some())
                    fallback=|| view! { <a class="complaint-page__login" href="/login">"Sign in"</a> }
                >
                    <button class="complaint-page__logout" on:click=on_logout.clone()>
                        "Log out"
                    </button>
                </Show>
            </header>
            <h1>"New complaint"</h1>
            <p class="complaint-page__ref">
                "Reference: "
                <span>
                    {move || ref_no.get().unwrap_or_else(|| ref_error.with(|e| ref_placeholder(e.as_deref())))}
                </span>
            </p>
        </div>
    }
}
