//! Error types and Axum response conversions.

use crate::auth::token::TokenError;
use crate::registry::RegistryError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Application error types.
///
/// Every error is handled at the endpoint boundary and turned directly into a
/// status code plus a plain-text body (the literal message followed by a
/// newline). Token failures map to 500 rather than 401; that is the observed
/// contract of the /check endpoint and clients depend on it.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Request is not a POST")]
    MethodNotAllowed,

    #[error("Invalid JSON payload")]
    InvalidPayload,

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("session cookie not present")]
    NoSessionCookie,

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::InvalidPayload | AppError::Validation(_) | AppError::Registry(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NoSessionCookie | AppError::Token(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, format!("{}\n", self)).into_response()
    }
}
