use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use rollcall_auth::{AuthError, Principal, authenticate, bearer_token};
use rollcall_core::AppError;
use rollcall_db::RevocationStore;

use crate::security_event;
use crate::state::AppState;

/// An authenticated caller together with the token it presented.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub principal: Principal,
    pub token: String,
}

impl AuthUser {
    pub fn id(&self) -> i64 {
        self.principal.id
    }
}

/// Reads the `Authorization` header. A value that is not visible ASCII is
/// malformed, not missing.
pub fn authorization_header(headers: &HeaderMap) -> Result<Option<&str>, AuthError> {
    headers
        .get(header::AUTHORIZATION)
        .map(|value| value.to_str().map_err(|_| AuthError::MalformedHeader))
        .transpose()
}

/// Authenticates an `Authorization` header value and rejects revoked tokens.
pub async fn authenticate_request<R: RevocationStore>(
    header: Option<&str>,
    secret: &[u8],
    revocations: &R,
) -> Result<AuthUser, AppError> {
    let principal = authenticate(header, secret).inspect_err(|err| {
        security_event!("auth.rejected", reason = %err, "Authentication failed");
    })?;

    let token = bearer_token(header)?;

    if revocations.is_revoked(token).await? {
        security_event!("auth.revoked", user.id = principal.id, "Revoked token presented");
        return Err(AuthError::Revoked.into());
    }

    Ok(AuthUser {
        principal,
        token: token.to_string(),
    })
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // a role guard earlier in the stack already did the work
        if let Some(auth_user) = parts.extensions.get::<AuthUser>() {
            return Ok(auth_user.clone());
        }

        let header = authorization_header(&parts.headers)?;

        let auth_user =
            authenticate_request(header, state.jwt_config.session_key(), &state.store).await?;

        parts.extensions.insert(auth_user.clone());

        Ok(auth_user)
    }
}
