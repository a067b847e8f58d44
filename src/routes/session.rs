//! Session API endpoints: register, login, logout, check.
//!
//! Each handler validates the request shape, touches the registry under its
//! lock, and then mints or verifies a token. Token and cookie work happens
//! outside the lock; the only shared state it reads is the signing secret.

use crate::auth::token::IssuedToken;
use crate::auth::{LOGOUT_COOKIE, SESSION_COOKIE};
use crate::error::AppError;
use crate::models::CredentialsRequest;
use crate::routes::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode},
    response::IntoResponse,
};
use chrono::{DateTime, Utc};

/// POST /register — Create an account and start a session
pub async fn register(
    State(state): State<AppState>,
    method: Method,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    if method != Method::POST {
        return Err(AppError::MethodNotAllowed);
    }

    let req: CredentialsRequest =
        serde_json::from_slice(&body).map_err(|_| AppError::InvalidPayload)?;

    let min_len = state.config.min_credential_len;
    if !req.validate(min_len) {
        return Err(AppError::Validation(format!(
            "Username and password must be at least {} characters",
            min_len
        )));
    }

    state.registry.create(&req.username, &req.password)?;

    let issued = state.tokens.issue(&req.username)?;

    tracing::info!(action = "user_registered", username = %req.username, "New user registered");

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, session_cookie(&issued))],
    ))
}

/// POST /login — Authenticate credentials and start a session
pub async fn login(
    State(state): State<AppState>,
    method: Method,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    if method != Method::POST {
        return Err(AppError::MethodNotAllowed);
    }

    let req: CredentialsRequest =
        serde_json::from_slice(&body).map_err(|_| AppError::InvalidPayload)?;

    if let Err(err) = state.registry.verify_credentials(&req.username, &req.password) {
        tracing::warn!(action = "auth_failed", username = %req.username, error = %err, "Login rejected");
        return Err(err.into());
    }

    let issued = state.tokens.issue(&req.username)?;

    tracing::info!(action = "auth_success", username = %req.username, "User logged in");

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, session_cookie(&issued))],
    ))
}

/// /logout — Ask the client to drop a cookie
///
/// Stateless sessions have nothing to delete server-side, so this cannot
/// fail. The cleared cookie is [`LOGOUT_COOKIE`], not the session cookie; an
/// issued token stays valid until its expiry.
pub async fn logout() -> impl IntoResponse {
    tracing::info!(action = "logout", "Cookie clear requested");

    (
        StatusCode::OK,
        [(header::SET_COOKIE, clearing_cookie(LOGOUT_COOKIE))],
    )
}

/// /check — Validate the session cookie
pub async fn check(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let token = extract_cookie(&headers, SESSION_COOKIE).ok_or(AppError::NoSessionCookie)?;

    let username = state.tokens.verify(&token)?;

    Ok((StatusCode::OK, format!("Welcome, {}", username)))
}

/// Build the Set-Cookie value carrying a freshly issued session token.
fn session_cookie(issued: &IssuedToken) -> String {
    format!(
        "{}={}; Path=/; Expires={}",
        SESSION_COOKIE,
        issued.token,
        http_date(issued.expires_at)
    )
}

/// Build a Set-Cookie value that clears `name` with an already-past expiry.
fn clearing_cookie(name: &str) -> String {
    let now = Utc::now().timestamp().max(0) as u64;
    format!("{}=; Path=/; Expires={}", name, http_date(now))
}

/// Find a cookie by name in the request's Cookie header.
fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    raw.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then(|| value.to_string())
    })
}

/// Format a unix timestamp as an RFC 7231 HTTP date.
fn http_date(epoch_secs: u64) -> String {
    let date = DateTime::<Utc>::from_timestamp(epoch_secs as i64, 0)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
    date.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_http_date_format() {
        assert_eq!(http_date(0), "Thu, 01 Jan 1970 00:00:00 GMT");
        assert_eq!(http_date(1_700_000_000), "Tue, 14 Nov 2023 22:13:20 GMT");
    }

    #[test]
    fn test_session_cookie_shape() {
        let issued = IssuedToken {
            token: "aaa.bbb.ccc".to_string(),
            expires_at: 1_700_000_000,
        };
        assert_eq!(
            session_cookie(&issued),
            "jwt=aaa.bbb.ccc; Path=/; Expires=Tue, 14 Nov 2023 22:13:20 GMT"
        );
    }

    #[test]
    fn test_clearing_cookie_empties_value() {
        let cookie = clearing_cookie(LOGOUT_COOKIE);
        assert!(cookie.starts_with("username=; Path=/; Expires="));
    }

    #[test]
    fn test_extract_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("foo=1; jwt=aaa.bbb.ccc; bar=2"),
        );

        assert_eq!(
            extract_cookie(&headers, "jwt"),
            Some("aaa.bbb.ccc".to_string())
        );
        assert_eq!(extract_cookie(&headers, "missing"), None);
    }

    #[test]
    fn test_extract_cookie_no_header() {
        let headers = HeaderMap::new();
        assert_eq!(extract_cookie(&headers, "jwt"), None);
    }
}
