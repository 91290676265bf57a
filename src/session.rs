//! Authenticated clinician session.
//!
//! A `Session` exists only between a successful login and the next logout.
//! Its absence in [`CoreState`](crate::core_state::CoreState) is the single
//! sentinel for "logged out" — every component gates on it.

use serde::{Deserialize, Serialize};

/// Token-authenticated session, as returned by `POST /login/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque bearer token issued by the backend.
    pub token: String,
    /// Clinician account name, shown in the sidebar user area.
    pub username: String,
}

impl Session {
    /// `Authorization` header value for every authenticated request.
    pub fn authorization_value(&self) -> String {
        authorization_value(&self.token)
    }
}

/// DRF token-auth scheme: `Token <key>`.
pub fn authorization_value(token: &str) -> String {
    format!("Token {token}")
}
