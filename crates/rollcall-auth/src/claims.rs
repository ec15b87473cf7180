//! Claim structures carried inside signed tokens.
//!
//! Every token is a [`Signed`] envelope around a purpose-specific claim set:
//!
//! - [`SessionClaims`]: who the caller is and which role they hold
//! - [`AttendanceClaims`]: which course an attendance code opens
//!
//! The envelope adds the `purpose`, `iat` and `exp` claims so that one codec
//! serves both token kinds while a session token can never pass as an
//! attendance code (or the reverse).

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// The two static roles a user can hold.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum Role {
    Teacher,
    Student,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Teacher => "teacher",
            Role::Student => "student",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a token may be used for. Checked on every verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenPurpose {
    Session,
    Attendance,
}

/// Claims for session (bearer) tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User ID (subject claim)
    pub sub: String,
    /// Role of the user; absent only on tokens minted without one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

/// Claims for attendance codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceClaims {
    pub course_id: i64,
}

/// A verified (or about to be signed) claim set with its time box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signed<C> {
    #[serde(flatten)]
    pub claims: C,
    pub purpose: TokenPurpose,
    /// Issued-at (Unix timestamp, seconds)
    pub iat: i64,
    /// Expiry (Unix timestamp, seconds)
    pub exp: i64,
}
