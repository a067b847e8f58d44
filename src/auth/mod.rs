//! Signing secret and session token service.

pub mod secret;
pub mod token;

/// Cookie carrying the session token.
pub const SESSION_COOKIE: &str = "jwt";

/// Cookie cleared by logout. It does not match [`SESSION_COOKIE`], so logout
/// never invalidates an active session token; the token stays valid until its
/// natural expiry.
pub const LOGOUT_COOKIE: &str = "username";
