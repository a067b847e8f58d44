//! API route handlers.

pub mod session;

use crate::auth::token::TokenService;
use crate::config::Config;
use crate::registry::CredentialStore;
use axum::{routing::any, routing::get, Router};
use std::sync::Arc;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<dyn CredentialStore>,
    pub tokens: Arc<TokenService>,
    pub config: Arc<Config>,
}

/// Build the API router with all endpoints.
///
/// Routes accept any method; each handler enforces its own method policy so
/// the 405 response carries the documented plain-text body.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/register", any(session::register))
        .route("/login", any(session::login))
        .route("/logout", any(session::logout))
        .route("/check", any(session::check))
}

/// Build the diagnostic router served on the secondary listener.
pub fn diag_router() -> Router {
    Router::new().route("/healthz", get(|| async { "ok" }))
}
