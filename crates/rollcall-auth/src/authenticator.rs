//! Session authentication and role checks.
//!
//! These functions are pure: they look only at the header, the secret and
//! the clock. Revocation is layered on top by the HTTP middleware.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::claims::{Role, SessionClaims, TokenPurpose};
use crate::error::{AuthError, VerifyError};
use crate::jwt::verify_token_at;

/// The authenticated caller, derived from a valid session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct Principal {
    pub id: i64,
    pub role: Option<Role>,
}

/// Extracts the token from an `Authorization: Bearer <token>` header value.
///
/// The header must be exactly two space-separated parts and the scheme is
/// matched case-insensitively.
pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let header = match header {
        Some(value) if !value.is_empty() => value,
        _ => return Err(AuthError::MissingHeader),
    };

    let parts: Vec<&str> = header.split(' ').collect();
    if parts.len() != 2 || !parts[0].eq_ignore_ascii_case("bearer") {
        return Err(AuthError::MalformedHeader);
    }

    Ok(parts[1])
}

pub fn authenticate(header: Option<&str>, secret: &[u8]) -> Result<Principal, AuthError> {
    authenticate_at(header, secret, Utc::now())
}

pub fn authenticate_at(
    header: Option<&str>,
    secret: &[u8],
    now: DateTime<Utc>,
) -> Result<Principal, AuthError> {
    let token = bearer_token(header)?;

    let signed = verify_token_at::<SessionClaims>(token, TokenPurpose::Session, secret, now)
        .map_err(AuthError::InvalidToken)?;

    let id = signed
        .claims
        .sub
        .parse::<i64>()
        .map_err(|_| AuthError::InvalidToken(VerifyError::Malformed))?;

    Ok(Principal {
        id,
        role: signed.claims.role,
    })
}

/// Fails unless `principal` holds exactly `required`.
pub fn check_permission(required: Role, principal: &Principal) -> Result<(), AuthError> {
    match principal.role {
        None => Err(AuthError::MissingRoleClaim),
        Some(role) if role == required => Ok(()),
        Some(_) => Err(AuthError::Forbidden { required }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::issue_token;
    use chrono::Duration;

    const SECRET: &[u8] = b"test-secret-key-at-least-32-characters-long";

    fn bearer(role: Option<Role>, id: &str) -> String {
        let token = issue_token(
            SessionClaims {
                sub: id.to_string(),
                role,
            },
            TokenPurpose::Session,
            SECRET,
            Duration::minutes(60),
        )
        .unwrap();
        format!("Bearer {}", token)
    }

    #[test]
    fn test_authenticate_teacher() {
        let header = bearer(Some(Role::Teacher), "7");
        let principal = authenticate(Some(&header), SECRET).unwrap();
        assert_eq!(
            principal,
            Principal {
                id: 7,
                role: Some(Role::Teacher)
            }
        );
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        let header = bearer(Some(Role::Student), "3").replacen("Bearer", "bEaReR", 1);
        assert!(authenticate(Some(&header), SECRET).is_ok());
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(
            authenticate(None, SECRET).unwrap_err(),
            AuthError::MissingHeader
        );
        assert_eq!(
            authenticate(Some(""), SECRET).unwrap_err(),
            AuthError::MissingHeader
        );
    }

    #[test]
    fn test_malformed_headers() {
        for header in ["Basic xyz", "Bearer", "Bearer a b", "Token abc", "Bearer  abc"] {
            assert_eq!(
                authenticate(Some(header), SECRET).unwrap_err(),
                AuthError::MalformedHeader,
                "header: {header:?}"
            );
        }
    }

    #[test]
    fn test_garbage_token_is_invalid() {
        assert_eq!(
            authenticate(Some("Bearer not-a-token"), SECRET).unwrap_err(),
            AuthError::InvalidToken(VerifyError::Malformed)
        );
    }

    #[test]
    fn test_expired_session_is_invalid() {
        let header = bearer(Some(Role::Teacher), "7");
        let later = Utc::now() + Duration::hours(2);
        assert_eq!(
            authenticate_at(Some(&header), SECRET, later).unwrap_err(),
            AuthError::InvalidToken(VerifyError::Expired)
        );
    }

    #[test]
    fn test_non_numeric_subject_is_invalid() {
        let header = bearer(Some(Role::Teacher), "abc");
        assert!(matches!(
            authenticate(Some(&header), SECRET).unwrap_err(),
            AuthError::InvalidToken(_)
        ));
    }

    #[test]
    fn test_check_permission() {
        let teacher = Principal {
            id: 1,
            role: Some(Role::Teacher),
        };
        let student = Principal {
            id: 2,
            role: Some(Role::Student),
        };
        let roleless = Principal { id: 3, role: None };

        assert!(check_permission(Role::Teacher, &teacher).is_ok());
        assert_eq!(
            check_permission(Role::Teacher, &student).unwrap_err(),
            AuthError::Forbidden {
                required: Role::Teacher
            }
        );
        assert_eq!(
            check_permission(Role::Student, &roleless).unwrap_err(),
            AuthError::MissingRoleClaim
        );
    }

    #[test]
    fn test_token_without_role_claim_authenticates_but_fails_permission() {
        let header = bearer(None, "9");
        let principal = authenticate(Some(&header), SECRET).unwrap();
        assert_eq!(principal.role, None);
        assert_eq!(
            check_permission(Role::Teacher, &principal).unwrap_err(),
            AuthError::MissingRoleClaim
        );
    }
}
