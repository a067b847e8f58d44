//! Stateless session tokens.
//!
//! A token is three dot-separated base64url segments: a fixed HS256 header,
//! JSON claims `{username, exp}`, and an HMAC-SHA256 signature over
//! `header.claims` keyed by the process signing secret. Validity is decided
//! purely by the signature check and the expiry comparison at verification
//! time; nothing is stored server-side and nothing is revoked early.

use crate::auth::secret::SigningSecret;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

const HEADER_JSON: &str = r#"{"alg":"HS256","typ":"JWT"}"#;

/// Token verification and signing errors.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,

    #[error("token signature is invalid")]
    SignatureInvalid,

    #[error("token is expired")]
    Expired,

    #[error("failed to sign token: {0}")]
    Signing(String),
}

/// Claims embedded in a session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    pub exp: u64,
}

/// A freshly minted token together with its expiry, for cookie construction.
#[derive(Debug)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: u64,
}

/// Issues and verifies session tokens with a shared symmetric secret.
///
/// The service holds the only reference to the signing secret and touches no
/// other state, so it is safe to call from concurrent handlers without
/// locking.
pub struct TokenService {
    secret: SigningSecret,
    ttl_secs: u64,
}

impl TokenService {
    pub fn new(secret: SigningSecret, ttl_secs: u64) -> Self {
        TokenService { secret, ttl_secs }
    }

    /// Issue a token for `username`, expiring `ttl_secs` from now.
    pub fn issue(&self, username: &str) -> Result<IssuedToken, TokenError> {
        let expires_at = current_epoch_secs() + self.ttl_secs;
        let claims = Claims {
            username: username.to_string(),
            exp: expires_at,
        };
        let token = self.encode(&claims)?;
        Ok(IssuedToken { token, expires_at })
    }

    /// Verify a token and return the embedded username.
    ///
    /// Accepts exactly the tokens produced by [`issue`](Self::issue) with this
    /// service's secret whose expiry has not passed.
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        let parts: Vec<&str> = token.split('.').collect();
        let &[header_b64, claims_b64, signature_b64] = parts.as_slice() else {
            return Err(TokenError::Malformed);
        };

        // Signature first: nothing else about the token is trusted until the
        // MAC checks out. verify_slice compares in constant time.
        let signature = URL_SAFE_NO_PAD
            .decode(signature_b64)
            .map_err(|_| TokenError::Malformed)?;
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .map_err(|e| TokenError::Signing(e.to_string()))?;
        mac.update(header_b64.as_bytes());
        mac.update(b".");
        mac.update(claims_b64.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::SignatureInvalid)?;

        let header = URL_SAFE_NO_PAD
            .decode(header_b64)
            .map_err(|_| TokenError::Malformed)?;
        let header: serde_json::Value =
            serde_json::from_slice(&header).map_err(|_| TokenError::Malformed)?;
        if header["alg"] != "HS256" {
            return Err(TokenError::Malformed);
        }

        let claims = URL_SAFE_NO_PAD
            .decode(claims_b64)
            .map_err(|_| TokenError::Malformed)?;
        let claims: Claims =
            serde_json::from_slice(&claims).map_err(|_| TokenError::Malformed)?;

        if claims.exp <= current_epoch_secs() {
            return Err(TokenError::Expired);
        }

        Ok(claims.username)
    }

    fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        let claims_json =
            serde_json::to_string(claims).map_err(|e| TokenError::Signing(e.to_string()))?;

        let signing_input = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(HEADER_JSON),
            URL_SAFE_NO_PAD.encode(claims_json)
        );

        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .map_err(|e| TokenError::Signing(e.to_string()))?;
        mac.update(signing_input.as_bytes());
        let signature = mac.finalize().into_bytes();

        Ok(format!(
            "{}.{}",
            signing_input,
            URL_SAFE_NO_PAD.encode(signature)
        ))
    }
}

/// Get the current epoch time in seconds.
fn current_epoch_secs() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
