//! Credential codec: signed, time-boxed tokens.
//!
//! Both session tokens and attendance codes are compact HS256 JWTs produced
//! here. A token is `base64url(header).base64url(payload).base64url(sig)`
//! where the payload is a [`Signed`] envelope.
//!
//! Verification order:
//!
//! 1. structure and signature (constant-time HMAC comparison in `jsonwebtoken`)
//! 2. expiry against the supplied clock; a token is live while `now < exp`
//! 3. purpose
//!
//! The `*_at` variants take an explicit `now` so callers and tests can pin
//! the clock; the plain variants use [`Utc::now`].
//!
//! # Example
//!
//! ```ignore
//! use rollcall_auth::{AttendanceClaims, TokenPurpose, issue_token, verify_token};
//!
//! let code = issue_token(
//!     AttendanceClaims { course_id: 5 },
//!     TokenPurpose::Attendance,
//!     b"secret",
//!     chrono::Duration::minutes(10),
//! )?;
//! let signed = verify_token::<AttendanceClaims>(&code, TokenPurpose::Attendance, b"secret")?;
//! assert_eq!(signed.claims.course_id, 5);
//! ```

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Serialize, de::DeserializeOwned};

use rollcall_config::JwtConfig;

use crate::claims::{Role, SessionClaims, Signed, TokenPurpose};
use crate::error::{EncodingError, VerifyError};

/// Signs `claims` for `purpose`, valid for `ttl` from now.
pub fn issue_token<C: Serialize>(
    claims: C,
    purpose: TokenPurpose,
    secret: &[u8],
    ttl: Duration,
) -> Result<String, EncodingError> {
    issue_token_at(claims, purpose, secret, ttl, Utc::now())
}

pub fn issue_token_at<C: Serialize>(
    claims: C,
    purpose: TokenPurpose,
    secret: &[u8],
    ttl: Duration,
    now: DateTime<Utc>,
) -> Result<String, EncodingError> {
    let expires_at = now
        .checked_add_signed(ttl)
        .ok_or(EncodingError::ExpiryOutOfRange)?;

    let signed = Signed {
        claims,
        purpose,
        iat: now.timestamp(),
        exp: expires_at.timestamp(),
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &signed,
        &EncodingKey::from_secret(secret),
    )?)
}

/// Verifies `token` was signed with `secret`, is still live, and was issued
/// for `purpose`.
pub fn verify_token<C: DeserializeOwned>(
    token: &str,
    purpose: TokenPurpose,
    secret: &[u8],
) -> Result<Signed<C>, VerifyError> {
    verify_token_at(token, purpose, secret, Utc::now())
}

pub fn verify_token_at<C: DeserializeOwned>(
    token: &str,
    purpose: TokenPurpose,
    secret: &[u8],
    now: DateTime<Utc>,
) -> Result<Signed<C>, VerifyError> {
    let signed = decode::<Signed<C>>(token, &DecodingKey::from_secret(secret), &validation())
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::InvalidSignature => VerifyError::BadSignature,
            ErrorKind::ExpiredSignature => VerifyError::Expired,
            _ => VerifyError::Malformed,
        })?;

    if now.timestamp() >= signed.exp {
        return Err(VerifyError::Expired);
    }

    if signed.purpose != purpose {
        return Err(VerifyError::WrongPurpose);
    }

    Ok(signed)
}

fn validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    // expiry is checked against the caller's clock
    validation.validate_exp = false;
    validation.leeway = 0;
    validation
}

/// Creates a session token for a logged-in user.
pub fn create_session_token(
    user_id: i64,
    role: Role,
    jwt_config: &JwtConfig,
) -> Result<String, EncodingError> {
    issue_token(
        SessionClaims {
            sub: user_id.to_string(),
            role: Some(role),
        },
        TokenPurpose::Session,
        jwt_config.session_key(),
        Duration::seconds(jwt_config.access_token_expiry),
    )
}
