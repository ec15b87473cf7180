//! Error taxonomy for token handling and session authentication.

use axum::http::StatusCode;
use rollcall_core::AppError;
use thiserror::Error;

use crate::claims::Role;

/// Issuance-side failure. Practically unreachable for the claim sets used here.
#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("failed to encode token: {0}")]
    Encode(#[from] jsonwebtoken::errors::Error),

    #[error("token expiry is out of range")]
    ExpiryOutOfRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VerifyError {
    #[error("token has expired")]
    Expired,

    #[error("token is malformed")]
    Malformed,

    #[error("token signature does not match")]
    BadSignature,

    #[error("token was issued for a different purpose")]
    WrongPurpose,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Missing authorization header")]
    MissingHeader,

    #[error("Authorization header must be in the format 'Bearer <token>'")]
    MalformedHeader,

    #[error("Invalid or expired token")]
    InvalidToken(#[source] VerifyError),

    #[error("Token has been revoked. Please log in again.")]
    Revoked,

    #[error("Token carries no role claim")]
    MissingRoleClaim,

    #[error("Access denied. Required role: {required}")]
    Forbidden { required: Role },
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        let status = match err {
            AuthError::MissingRoleClaim => StatusCode::BAD_REQUEST,
            AuthError::Forbidden { .. } => StatusCode::FORBIDDEN,
            _ => StatusCode::UNAUTHORIZED,
        };
        AppError::new(status, err)
    }
}

impl From<EncodingError> for AppError {
    fn from(err: EncodingError) -> Self {
        AppError::internal(err)
    }
}
