//! Request models for the API.

use serde::Deserialize;

/// Credentials submitted to /register and /login.
#[derive(Clone, Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

impl CredentialsRequest {
    /// Whether both fields meet the minimum length (measured in bytes).
    pub fn validate(&self, min_len: usize) -> bool {
        self.username.len() >= min_len && self.password.len() >= min_len
    }
}

impl std::fmt::Debug for CredentialsRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
