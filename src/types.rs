//! Request/response DTOs for the backend endpoints.
//!
//! DESIGN
//! ======
//! Only the fields the client acts on are typed. Everything else the backend
//! returns is kept (`extra` on users, `payload` on auth
//! responses) so callers see the payload unchanged.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of the signup and login requests.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Identity returned alongside a token.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Success payload of signup and login.
///
/// The backend body is kept verbatim in `payload`; `token` and `user` are
/// lifted out of it when they have the expected shape.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthResponse {
    /// Bearer token issued by the backend, if any.
    pub token: Option<String>,
    pub user: Option<User>,
    pub payload: Value,
}

impl AuthResponse {
    /// Read a success body of any shape. Never fails: a missing or
    /// mistyped `token` or `user` is simply absent here and still present
    /// in `payload`.
    pub fn from_payload(payload: Value) -> Self {
        let token = payload.get("token").and_then(Value::as_str).map(ToOwned::to_owned);
        let user = match payload.get("user") {
            None | Some(Value::Null) => None,
            Some(raw) => match User::deserialize(raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    tracing::debug!(error = %e, "auth payload user has an unexpected shape");
                    None
                }
            },
        };
        Self { token, user, payload }
    }

    /// The issued token, treating an empty string as absent.
    pub fn issued_token(&self) -> Option<&str> {
        self.token.as_deref().filter(|token| !token.is_empty())
    }
}

/// Body of the save-conversation request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveConversation {
    pub conversation_id: String,
    pub transcript: String,
    pub ai_response: String,
    #[serde(default)]
    pub nuanced_options: Vec<Value>,
}

/// Body of the AI-reply request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiReplyRequest {
    pub conversation_id: String,
}
