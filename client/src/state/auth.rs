//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! One `AuthSession` is created at app start, hydrated from persistent
//! storage, and provided through Leptos context. Components read the token
//! and user reactively; only `set_token` and `clear_token` mutate them.
//!
//! INVARIANTS
//! ==========
//! Token and user are set together and cleared together, in memory and in
//! storage (`access_token` holds the raw token, `user` the JSON record).
//!
//! ERROR HANDLING
//! ==============
//! A failed storage write during `set_token` rolls memory back to the
//! previous state and reports `AuthError::Persist`. `clear_token` always
//! clears memory, even when storage removal fails.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::Arc;

use leptos::prelude::*;

use crate::net::types::{LoginResponse, User};
use crate::util::storage::{KeyValueStore, StorageError};

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const USER_KEY: &str = "user";

/// Authentication state: the bearer token and the user it belongs to.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub access_token: Option<String>,
    pub current_user: Option<User>,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("access token must not be empty")]
    EmptyToken,

    #[error("user record could not be encoded: {0}")]
    Encode(String),

    #[error("auth state not persisted: {0}")]
    Persist(#[from] StorageError),
}

/// `Authorization` header value for `token`.
#[must_use]
pub fn bearer_value(token: &str) -> String {
    format!("Bearer {token}")
}

/// Shared login state plus the store it is mirrored into.
#[derive(Clone)]
pub struct AuthSession {
    state: RwSignal<AuthState>,
    store: Arc<dyn KeyValueStore>,
}

impl AuthSession {
    /// Create a session hydrated from `store`.
    ///
    /// Half-written or unreadable entries are discarded and the session
    /// starts logged out.
    pub fn restore(store: Arc<dyn KeyValueStore>) -> Self {
        let initial = load_persisted(store.as_ref());
        Self { state: RwSignal::new(initial), store }
    }

    /// Record a successful login.
    ///
    /// The user record is accepted as-is; only `extra` keys shadowed by a
    /// typed field are merged, so memory matches what a reload reads back.
    ///
    /// # Errors
    ///
    /// `EmptyToken` leaves everything untouched. `Persist` means storage
    /// rejected the write; memory has been rolled back.
    pub fn set_token(&self, token: impl Into<String>, user: User) -> Result<(), AuthError> {
        let token = token.into();
        if token.is_empty() {
            return Err(AuthError::EmptyToken);
        }
        let user = user.normalized();
        let user_json = encode_user(&user)?;

        let previous = self.state.get_untracked();
        self.state.set(AuthState { access_token: Some(token.clone()), current_user: Some(user) });

        if let Err(e) = self.persist(&token, &user_json) {
            log::warn!("auth state not persisted, rolling back: {e}");
            self.write_back(&previous);
            self.state.set(previous);
            return Err(e.into());
        }
        Ok(())
    }

    /// Record a login from the auth backend response.
    ///
    /// # Errors
    ///
    /// See [`AuthSession::set_token`].
    pub fn apply_login(&self, response: LoginResponse) -> Result<(), AuthError> {
        let (token, user) = response.into_parts();
        self.set_token(token, user)
    }

    /// Log out. Safe to call repeatedly.
    ///
    /// # Errors
    ///
    /// `Persist` if storage refused a removal; memory is cleared regardless.
    pub fn clear_token(&self) -> Result<(), AuthError> {
        self.state.set(AuthState::default());
        self.remove_persisted().map_err(|e| {
            log::warn!("persisted auth state not removed: {e}");
            AuthError::from(e)
        })
    }

    pub fn access_token(&self) -> Option<String> {
        self.state.with(|s| s.access_token.clone())
    }

    pub fn current_user(&self) -> Option<User> {
        self.state.with(|s| s.current_user.clone())
    }

    /// Read-only handle for views and effects.
    pub fn state(&self) -> ReadSignal<AuthState> {
        self.state.read_only()
    }

    /// `Bearer <token>` while logged in.
    pub fn authorization_header(&self) -> Option<String> {
        self.state.with(|s| s.access_token.as_deref().map(bearer_value))
    }

    fn persist(&self, token: &str, user_json: &str) -> Result<(), StorageError> {
        self.store.set(ACCESS_TOKEN_KEY, token)?;
        self.store.set(USER_KEY, user_json)
    }

    fn remove_persisted(&self) -> Result<(), StorageError> {
        let token = self.store.remove(ACCESS_TOKEN_KEY);
        let user = self.store.remove(USER_KEY);
        token.and(user)
    }

    /// Best-effort rewrite of storage to match `state`.
    fn write_back(&self, state: &AuthState) {
        let outcome = match (&state.access_token, &state.current_user) {
            (Some(token), Some(user)) => match encode_user(user) {
                Ok(json) => self.persist(token, &json),
                Err(e) => {
                    log::warn!("previous auth state not restored: {e}");
                    return;
                }
            },
            _ => self.remove_persisted(),
        };
        if let Err(e) = outcome {
            log::warn!("previous auth state not restored: {e}");
        }
    }
}

/// Fetch the session provided by the root component.
pub fn use_auth() -> AuthSession {
    expect_context::<AuthSession>()
}

fn encode_user(user: &User) -> Result<String, AuthError> {
    serde_json::to_string(user).map_err(|e| AuthError::Encode(e.to_string()))
}

fn read_entry(store: &dyn KeyValueStore, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(StorageError::Unavailable) => None,
        Err(e) => {
            log::warn!("persisted auth entry unreadable: {e}");
            None
        }
    }
}

fn load_persisted(store: &dyn KeyValueStore) -> AuthState {
    let token = read_entry(store, ACCESS_TOKEN_KEY).filter(|t| !t.is_empty());
    let user_json = read_entry(store, USER_KEY);

    let restored = match (token, user_json) {
        (None, None) => return AuthState::default(),
        (Some(token), Some(raw)) => match serde_json::from_str::<User>(&raw) {
            Ok(user) => Some(AuthState { access_token: Some(token), current_user: Some(user) }),
            Err(e) => {
                log::warn!("discarding unreadable persisted user: {e}");
                None
            }
        },
        _ => {
            log::warn!("discarding partial persisted auth state");
            None
        }
    };

    restored.unwrap_or_else(|| {
        let _ = store.remove(ACCESS_TOKEN_KEY);
        let _ = store.remove(USER_KEY);
        AuthState::default()
    })
}
