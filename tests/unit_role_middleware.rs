use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use chrono::Duration;
use rollcall::middleware::auth::{authenticate_request, authorization_header};
use rollcall::middleware::role::authorize_request;
use rollcall_auth::{AuthError, Role, SessionClaims, TokenPurpose, issue_token};
use rollcall_core::AppError;
use rollcall_db::{MemoryStore, RevocationStore};

const SECRET: &[u8] = b"test_session_secret_for_testing_purposes";

fn bearer(id: i64, role: Option<Role>) -> String {
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

#[tokio::test]
async fn test_matching_role_is_admitted() {
    let store = MemoryStore::new();
    let header = bearer(7, Some(Role::Teacher));

    let auth_user = authorize_request(Some(&header), SECRET, &store, Role::Teacher)
        .await
        .unwrap();

    assert_eq!(auth_user.id(), 7);
    assert_eq!(auth_user.principal.role, Some(Role::Teacher));
    assert_eq!(format!("Bearer {}", auth_user.token), header);
}

#[tokio::test]
async fn test_other_role_is_forbidden() {
    let store = MemoryStore::new();

    let student = bearer(3, Some(Role::Student));
    let err = authorize_request(Some(&student), SECRET, &store, Role::Teacher)
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::FORBIDDEN);

    let teacher = bearer(4, Some(Role::Teacher));
    let err = authorize_request(Some(&teacher), SECRET, &store, Role::Student)
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_token_without_role_is_bad_request() {
    let store = MemoryStore::new();
    let header = bearer(3, None);

    // authentication alone succeeds
    assert!(authenticate_request(Some(&header), SECRET, &store).await.is_ok());

    let err = authorize_request(Some(&header), SECRET, &store, Role::Student)
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_header_problems_are_unauthorized() {
    let store = MemoryStore::new();
    let token = bearer(3, Some(Role::Student));
    let raw = token.trim_start_matches("Bearer ");

    let cases = [
        None,
        Some(String::new()),
        Some(raw.to_string()),
        Some(format!("Token {}", raw)),
        Some(format!("Bearer  {}", raw)),
        Some("Bearer not.a.token".to_string()),
    ];

    for header in cases {
        let err = authenticate_request(header.as_deref(), SECRET, &store)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED, "header {header:?}");
    }
}

#[tokio::test]
async fn test_wrong_secret_is_unauthorized() {
    let store = MemoryStore::new();
    let header = bearer(3, Some(Role::Student));

    let err = authenticate_request(Some(&header), b"another-secret-entirely", &store)
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_revoked_token_is_rejected() {
    let store = MemoryStore::new();
    let header = bearer(9, Some(Role::Teacher));
    let token = header.trim_start_matches("Bearer ");

    store.revoke(token).await.unwrap();

    let err = authorize_request(Some(&header), SECRET, &store, Role::Teacher)
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    assert!(err.to_string().contains("revoked"));
}

#[test]
fn test_non_ascii_authorization_header_is_malformed() {
    let mut headers = HeaderMap::new();
    assert_eq!(authorization_header(&headers), Ok(None));

    headers.insert(
        header::AUTHORIZATION,
        HeaderValue::from_bytes(b"Bearer \xfftoken").unwrap(),
    );
    assert_eq!(
        authorization_header(&headers),
        Err(AuthError::MalformedHeader)
    );

    let err: AppError = AuthError::MalformedHeader.into();
    assert_eq!(err.status, StatusCode::UNAUTHORIZED);
}
