//! Authgate application entry point.
//!
//! Bootstraps the server:
//! 1. Load configuration from environment
//! 2. Generate the process-lifetime signing secret
//! 3. Build the registry, token service, and shared state
//! 4. Spawn the diagnostic listener
//! 5. Start the Axum server with security headers middleware

use authgate::{
    auth::secret::SigningSecret, auth::token::TokenService, config::Config,
    middleware::security_headers, registry::CredentialStore, registry::InMemoryRegistry, routes,
    routes::AppState,
};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    // Initialize tracing with env filter support (RUST_LOG)
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load config from environment
    let config = Arc::new(Config::from_env().expect("Failed to load config"));
    tracing::info!("Starting authgate on {}", config.bind_addr);

    // One signing secret per process lifetime
    let secret = SigningSecret::generate();
    let tokens = Arc::new(TokenService::new(secret, config.session_ttl_secs));
    let registry: Arc<dyn CredentialStore> = Arc::new(InMemoryRegistry::new());

    let state = AppState {
        registry,
        tokens,
        config: config.clone(),
    };

    // Diagnostic listener on its own port
    let diag_addr = config.diag_addr;
    tokio::spawn(async move {
        let listener = tokio::net::TcpListener::bind(diag_addr)
            .await
            .expect("Failed to bind diagnostic listener");
        tracing::info!("Diagnostic listener on {}", diag_addr);
        axum::serve(listener, routes::diag_router())
            .await
            .expect("Diagnostic server error");
    });

    let app = routes::api_router()
        .layer(axum::middleware::from_fn(security_headers))
        .with_state(state);

    // Bind to configured address
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind");
    tracing::info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app).await.expect("Server error");
}
