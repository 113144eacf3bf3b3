use super::*;

use serde_json::json;

use crate::net::types::UserId;
use crate::util::storage::MemoryStore;

// =============================================================
// Helpers
// =============================================================

fn alice() -> User {
    serde_json::from_value(json!({
        "username": "alice",
        "email": "a@x.com",
        "user_id": 7,
        "role": "admin",
        "permission": ["read", "write"],
    }))
    .unwrap()
}

fn bob() -> User {
    User { username: Some("bob".to_owned()), ..User::default() }
}

fn fresh() -> (Arc<MemoryStore>, AuthSession) {
    let store = Arc::new(MemoryStore::new());
    let session = AuthSession::restore(store.clone());
    (store, session)
}

fn stored(store: &MemoryStore, key: &str) -> Option<String> {
    store.get(key).unwrap()
}

// =============================================================
// set_token
// =============================================================

#[test]
fn set_token_updates_memory_and_storage() {
    let (store, session) = fresh();
    session.set_token("abc123", alice()).unwrap();

    assert_eq!(session.access_token().as_deref(), Some("abc123"));
    let user = session.current_user().unwrap();
    assert_eq!(user.username.as_deref(), Some("alice"));
    assert_eq!(user.user_id, Some(UserId::Number(7)));

    assert_eq!(stored(&store, ACCESS_TOKEN_KEY).as_deref(), Some("abc123"));
    let persisted: User = serde_json::from_str(&stored(&store, USER_KEY).unwrap()).unwrap();
    assert_eq!(persisted, alice());
}

#[test]
fn set_token_replaces_previous_login() {
    let (store, session) = fresh();
    session.set_token("first", alice()).unwrap();
    session.set_token("second", bob()).unwrap();

    assert_eq!(session.access_token().as_deref(), Some("second"));
    assert_eq!(session.current_user(), Some(bob()));
    assert_eq!(stored(&store, ACCESS_TOKEN_KEY).as_deref(), Some("second"));
}

#[test]
fn set_token_rejects_empty_token() {
    let (store, session) = fresh();
    let err = session.set_token("", alice()).unwrap_err();
    assert!(matches!(err, AuthError::EmptyToken));
    assert_eq!(session.state().get_untracked(), AuthState::default());
    assert!(store.is_empty());
}

#[test]
fn set_token_rolls_back_when_storage_write_fails() {
    let (store, session) = fresh();
    store.fail_writes(true);

    let err = session.set_token("abc123", alice()).unwrap_err();
    assert!(matches!(err, AuthError::Persist(StorageError::Write { .. })));
    assert_eq!(session.access_token(), None);
    assert_eq!(session.current_user(), None);
    assert!(store.is_empty());
}

#[test]
fn failed_relogin_keeps_previous_session() {
    let (store, session) = fresh();
    session.set_token("first", alice()).unwrap();
    store.fail_writes(true);

    assert!(session.set_token("second", bob()).is_err());
    assert_eq!(session.access_token().as_deref(), Some("first"));
    assert_eq!(session.current_user(), Some(alice()));
    assert_eq!(stored(&store, ACCESS_TOKEN_KEY).as_deref(), Some("first"));
}

#[test]
fn apply_login_uses_access_key_as_token() {
    let (store, session) = fresh();
    let response: LoginResponse = serde_json::from_value(json!({
        "access_key": "tok-9",
        "username": "alice",
        "role": "clerk",
    }))
    .unwrap();

    session.apply_login(response).unwrap();
    assert_eq!(session.access_token().as_deref(), Some("tok-9"));
    assert_eq!(session.current_user().and_then(|u| u.role).as_deref(), Some("clerk"));
    assert!(!stored(&store, USER_KEY).unwrap().contains("tok-9"));
}

#[test]
fn authorization_header_follows_token() {
    let (_store, session) = fresh();
    assert_eq!(session.authorization_header(), None);
    session.set_token("abc123", alice()).unwrap();
    assert_eq!(session.authorization_header().as_deref(), Some("Bearer abc123"));
}

#[test]
fn unusual_user_survives_reload() {
    let store = Arc::new(MemoryStore::new());
    let mut user = User { username: Some("carol".to_owned()), ..User::default() };
    user.extra.insert("permission".to_owned(), json!([{ "id": 1, "name": "read" }]));
    user.extra.insert("role".to_owned(), json!({ "name": "auditor" }));

    let session = AuthSession::restore(store.clone());
    session.set_token("tok", user.clone()).unwrap();

    let reloaded = AuthSession::restore(store.clone());
    assert_eq!(reloaded.access_token().as_deref(), Some("tok"));
    assert_eq!(reloaded.current_user(), Some(user));
    assert_eq!(reloaded.current_user(), session.current_user());
    assert_eq!(store.len(), 2);
}

#[test]
fn set_token_merges_shadowed_extra_keys() {
    let (store, session) = fresh();
    let mut user = bob();
    user.extra.insert("username".to_owned(), json!("shadow"));

    session.set_token("tok", user).unwrap();
    assert_eq!(session.current_user(), Some(bob()));
    assert_eq!(AuthSession::restore(store.clone()).current_user(), Some(bob()));
}

// =============================================================
// Reactive observers
// =============================================================

#[test]
fn derived_values_follow_mutations_in_the_same_tick() {
    let owner = Owner::new();
    owner.set();

    let (_store, session) = fresh();
    let state = session.state();
    let token = Memo::new(move |_| state.with(|s| s.access_token.clone()));
    let username = Memo::new(move |_| state.with(|s| s.current_user.as_ref().and_then(|u| u.username.clone())));
    assert_eq!(token.get_untracked(), None);

    session.set_token("abc123", alice()).unwrap();
    assert_eq!(token.get_untracked().as_deref(), Some("abc123"));
    assert_eq!(username.get_untracked().as_deref(), Some("alice"));

    session.clear_token().unwrap();
    assert_eq!(token.get_untracked(), None);
    assert_eq!(username.get_untracked(), None);
}

#[test]
fn derived_value_sees_rollback_after_failed_write() {
    let owner = Owner::new();
    owner.set();

    let (store, session) = fresh();
    let state = session.state();
    let logged_in = Memo::new(move |_| state.with(|s| s.access_token.is_some()));
    store.fail_writes(true);

    assert!(session.set_token("abc123", alice()).is_err());
    assert!(!logged_in.get_untracked());
}

// =============================================================
// clear_token
// =============================================================

#[test]
fn clear_token_empties_memory_and_storage() {
    let (store, session) = fresh();
    session.set_token("abc123", alice()).unwrap();
    session.clear_token().unwrap();

    assert_eq!(session.access_token(), None);
    assert_eq!(session.current_user(), None);
    assert_eq!(stored(&store, ACCESS_TOKEN_KEY), None);
    assert_eq!(stored(&store, USER_KEY), None);
}

#[test]
fn clear_token_is_idempotent() {
    let (store, session) = fresh();
    session.set_token("abc123", alice()).unwrap();
    session.clear_token().unwrap();
    let once = session.state().get_untracked();

    session.clear_token().unwrap();
    assert_eq!(session.state().get_untracked(), once);
    assert!(store.is_empty());
}

#[test]
fn set_then_clear_matches_clear_alone() {
    let (store_a, a) = fresh();
    a.set_token("abc123", alice()).unwrap();
    a.clear_token().unwrap();

    let (store_b, b) = fresh();
    b.clear_token().unwrap();

    assert_eq!(a.state().get_untracked(), b.state().get_untracked());
    assert_eq!(store_a.len(), store_b.len());
    assert!(store_a.is_empty());
}

#[test]
fn clear_token_clears_memory_when_storage_unavailable() {
    let session = AuthSession::restore(Arc::new(crate::util::storage::LocalStorage));
    let err = session.clear_token();
    #[cfg(not(feature = "csr"))]
    assert!(matches!(err, Err(AuthError::Persist(StorageError::Unavailable))));
    #[cfg(feature = "csr")]
    let _ = err;
    assert_eq!(session.access_token(), None);
}

// =============================================================
// restore
// =============================================================

#[test]
fn restore_hydrates_persisted_login() {
    let store = Arc::new(MemoryStore::new());
    AuthSession::restore(store.clone()).set_token("abc123", alice()).unwrap();

    let reloaded = AuthSession::restore(store.clone());
    assert_eq!(reloaded.access_token().as_deref(), Some("abc123"));
    assert_eq!(reloaded.current_user(), Some(alice()));
}

#[test]
fn restore_discards_token_without_user() {
    let store = Arc::new(MemoryStore::new());
    store.set(ACCESS_TOKEN_KEY, "orphan").unwrap();

    let session = AuthSession::restore(store.clone());
    assert_eq!(session.state().get_untracked(), AuthState::default());
    assert!(store.is_empty());
}

#[test]
fn restore_discards_unreadable_user() {
    let store = Arc::new(MemoryStore::new());
    store.set(ACCESS_TOKEN_KEY, "abc123").unwrap();
    store.set(USER_KEY, "{not json").unwrap();

    let session = AuthSession::restore(store.clone());
    assert_eq!(session.access_token(), None);
    assert!(store.is_empty());
}

#[test]
fn restore_from_empty_store_is_logged_out() {
    let (store, session) = fresh();
    assert_eq!(session.state().get_untracked(), AuthState::default());
    assert!(store.is_empty());
}

#[test]
fn bearer_value_prefixes_scheme() {
    assert_eq!(bearer_value("t"), "Bearer t");
}
