use std::env;
use std::net::SocketAddr;

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub bind_addr: SocketAddr,
    pub diag_addr: SocketAddr,

    // Sessions
    pub session_ttl_secs: u64,

    // Validation
    pub min_credential_len: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),

    #[error("Failed to parse {0}: {1}")]
    ParseError(String, String),
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Attempt to load .env file, but don't fail if it doesn't exist
        // (env vars may be set directly in production)
        let _ = dotenvy::dotenv();

        // Server
        let bind_addr_str = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let bind_addr = bind_addr_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::ParseError("BIND_ADDR".to_string(), e.to_string()))?;

        let diag_addr_str = env::var("DIAG_ADDR").unwrap_or_else(|_| "0.0.0.0:8081".to_string());
        let diag_addr = diag_addr_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::ParseError("DIAG_ADDR".to_string(), e.to_string()))?;

        // Sessions
        let session_ttl_secs = parse_env_or_default("SESSION_TTL_SECS", 300)?;
        if session_ttl_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "SESSION_TTL_SECS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        // Validation
        let min_credential_len = parse_env_or_default("MIN_CREDENTIAL_LEN", 8)?;

        Ok(Config {
            bind_addr,
            diag_addr,
            session_ttl_secs,
            min_credential_len,
        })
    }
}

/// Helper function to parse environment variable with a default value
fn parse_env_or_default<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(val) => val
            .parse::<T>()
            .map_err(|e| ConfigError::ParseError(key.to_string(), format!("{}: {}", e, val))),
        Err(_) => Ok(default),
    }
}
