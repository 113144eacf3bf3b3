//! Wire DTOs shared between the client, the BFF server, and the auth backend.
//!
//! DESIGN
//! ======
//! The auth backend owns the user record shape. Known fields are typed and
//! optional, and only filled when the value has the expected shape; any other
//! key, or a known key with an unexpected shape, lands in `extra`. Reading a
//! record never fails and a serde round trip through `localStorage` loses
//! nothing.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default public API base used until the server config arrives.
pub const DEFAULT_API_BASE: &str = "https://ayodhya.water.live/api";

/// User identifier as issued by the auth backend (numeric or string).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

impl UserId {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(Self::Number),
            Value::String(s) => Some(Self::Text(s.clone())),
            _ => None,
        }
    }

    fn to_value(&self) -> Value {
        match self {
            Self::Number(n) => Value::from(*n),
            Self::Text(s) => Value::from(s.as_str()),
        }
    }
}

/// Logged-in user attributes.
///
/// Typed fields win over same-named `extra` keys when serialized.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct User {
    pub username: Option<String>,
    pub email: Option<String>,
    pub user_id: Option<UserId>,
    pub role: Option<String>,
    /// Permission names granted to the user.
    pub permission: Option<Vec<String>>,
    /// Attributes the client does not model, or models with another shape.
    pub extra: Map<String, Value>,
}

impl User {
    /// Merge colliding `extra` keys into the shape a stored copy reads back as.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self::from(Map::from(self))
    }
}

fn take_string(map: &mut Map<String, Value>, key: &str) -> Option<String> {
    match map.get(key) {
        Some(Value::String(_)) => match map.remove(key) {
            Some(Value::String(s)) => Some(s),
            _ => None,
        },
        _ => None,
    }
}

fn take_string_list(map: &mut Map<String, Value>, key: &str) -> Option<Vec<String>> {
    let list: Vec<String> = map
        .get(key)?
        .as_array()?
        .iter()
        .map(|v| v.as_str().map(str::to_owned))
        .collect::<Option<_>>()?;
    map.remove(key);
    Some(list)
}

fn take_user_id(map: &mut Map<String, Value>, key: &str) -> Option<UserId> {
    let id = UserId::from_value(map.get(key)?)?;
    map.remove(key);
    Some(id)
}

impl From<Map<String, Value>> for User {
    fn from(mut map: Map<String, Value>) -> Self {
        Self {
            username: take_string(&mut map, "username"),
            email: take_string(&mut map, "email"),
            user_id: take_user_id(&mut map, "user_id"),
            role: take_string(&mut map, "role"),
            permission: take_string_list(&mut map, "permission"),
            extra: map,
        }
    }
}

impl From<User> for Map<String, Value> {
    fn from(user: User) -> Self {
        let mut map = user.extra;
        if let Some(username) = user.username {
            map.insert("username".to_owned(), Value::String(username));
        }
        if let Some(email) = user.email {
            map.insert("email".to_owned(), Value::String(email));
        }
        if let Some(user_id) = user.user_id {
            map.insert("user_id".to_owned(), user_id.to_value());
        }
        if let Some(role) = user.role {
            map.insert("role".to_owned(), Value::String(role));
        }
        if let Some(permission) = user.permission {
            map.insert("permission".to_owned(), Value::from(permission));
        }
        map
    }
}

/// Credentials posted to the auth backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response from the auth backend: the user fields plus the token.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub access_key: String,
    #[serde(flatten)]
    pub user: User,
}

impl LoginResponse {
    /// Split into `(token, user)`.
    #[must_use]
    pub fn into_parts(self) -> (String, User) {
        (self.access_key, self.user)
    }
}

/// Body of `GET /api/complaints/new-ref`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRefResponse {
    #[serde(rename = "refNo")]
    pub ref_no: String,
}

/// Public runtime configuration served by `GET /api/runtime-config`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicConfig {
    #[serde(rename = "apiBase")]
    pub api_base: String,
}

impl Default for PublicConfig {
    fn default() -> Self {
        Self { api_base: DEFAULT_API_BASE.to_owned() }
    }
}
