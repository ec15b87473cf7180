//! # Rollcall Auth
//!
//! Signed, time-boxed credentials for the Rollcall API.
//!
//! - [`claims`]: claim sets for session tokens and attendance codes
//! - [`jwt`]: the credential codec (issue and verify)
//! - [`authenticator`]: bearer header parsing and role checks
//! - [`error`]: the error taxonomy and its mapping onto [`rollcall_core::AppError`]
//!
//! # Token Types
//!
//! - **Session token** ([`SessionClaims`]): identifies a user and their role
//! - **Attendance code** ([`AttendanceClaims`]): opens attendance for one course
//!
//! Both carry a `purpose` claim, and a token is only accepted for the purpose
//! it was issued for.
//!
//! # Example
//!
//! ```ignore
//! use rollcall_auth::{Role, authenticate, check_permission, create_session_token};
//!
//! let token = create_session_token(7, Role::Teacher, &jwt_config)?;
//! let header = format!("Bearer {}", token);
//!
//! let principal = authenticate(Some(&header), jwt_config.session_key())?;
//! check_permission(Role::Teacher, &principal)?;
//! ```

pub mod authenticator;
pub mod claims;
pub mod error;
pub mod jwt;

pub use authenticator::{
    Principal, authenticate, authenticate_at, bearer_token, check_permission,
};
pub use claims::{AttendanceClaims, Role, SessionClaims, Signed, TokenPurpose};
pub use error::{AuthError, EncodingError, VerifyError};
pub use jwt::{
    create_session_token, issue_token, issue_token_at, verify_token, verify_token_at,
};
