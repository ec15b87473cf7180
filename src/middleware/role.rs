//! Role-based authorization.
//!
//! Two forms of the same check:
//! 1. route middleware ([`require_teacher`], [`require_student`]) layered
//!    with `axum::middleware::from_fn_with_state`
//! 2. extractors ([`RequireTeacher`], [`RequireStudent`]) that hand the
//!    authenticated user to the handler

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use rollcall_auth::{Role, check_permission};
use rollcall_core::AppError;
use rollcall_db::RevocationStore;

use crate::middleware::auth::{AuthUser, authenticate_request, authorization_header};
use crate::security_event;
use crate::state::AppState;

/// Authenticates, checks revocation, then requires exactly `required`.
pub async fn authorize_request<R: RevocationStore>(
    header: Option<&str>,
    secret: &[u8],
    revocations: &R,
    required: Role,
) -> Result<AuthUser, AppError> {
    let auth_user = authenticate_request(header, secret, revocations).await?;

    check_permission(required, &auth_user.principal).inspect_err(|err| {
        security_event!(
            "auth.forbidden",
            user.id = auth_user.principal.id,
            required = %required,
            reason = %err,
            "Role check failed"
        );
    })?;

    Ok(auth_user)
}

pub async fn require_role(
    State(state): State<AppState>,
    req: Request,
    next: Next,
    required: Role,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let header = authorization_header(&parts.headers)?;
    let auth_user =
        authorize_request(header, state.jwt_config.session_key(), &state.store, required).await?;
    parts.extensions.insert(auth_user);

    let req = Request::from_parts(parts, body);
    Ok(next.run(req).await)
}

pub async fn require_teacher(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_role(State(state), req, next, Role::Teacher).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

pub async fn require_student(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_role(State(state), req, next, Role::Student).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// Generates an extractor that only succeeds for callers holding `$role`.
#[macro_export]
macro_rules! require_role {
    ($name:ident, $role:expr) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub $crate::middleware::auth::AuthUser);

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = rollcall_core::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                let auth_user = <$crate::middleware::auth::AuthUser as axum::extract::FromRequestParts<
                    $crate::state::AppState,
                >>::from_request_parts(parts, state)
                .await?;

                rollcall_auth::check_permission($role, &auth_user.principal)?;

                Ok($name(auth_user))
            }
        }
    };
}

require_role!(RequireTeacher, Role::Teacher);
require_role!(RequireStudent, Role::Student);
