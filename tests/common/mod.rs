#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use rollcall::router::init_router;
use rollcall::state::AppState;
use rollcall_auth::{Role, create_session_token};
use rollcall_config::{CorsConfig, JwtConfig};
use rollcall_core::hash_password;
use serde_json::Value;
use sqlx::{PgPool, Postgres, Transaction};
use tower::ServiceExt;
use uuid::Uuid;

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_session_secret_for_testing_purposes".to_string(),
        attendance_secret: "test_attendance_secret_for_testing_purposes".to_string(),
        access_token_expiry: 3600,
    }
}

pub fn setup_test_app(pool: PgPool) -> Router {
    let state = AppState::new(
        pool,
        test_jwt_config(),
        CorsConfig {
            allowed_origins: vec!["http://localhost:5173".to_string()],
        },
    );
    init_router(state)
}

pub struct TestUser {
    pub id: i64,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub university_id: Option<String>,
    pub token: String,
}

impl TestUser {
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

pub struct TestCourse {
    pub id: i64,
    pub name: String,
    pub code: String,
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

pub fn generate_unique_code() -> String {
    format!("C-{}", &Uuid::new_v4().simple().to_string()[..12])
}

/// Inserts a user directly. Students get a fresh university id.
pub async fn create_test_user(tx: &mut Transaction<'_, Postgres>, role: Role) -> TestUser {
    let email = generate_unique_email();
    let password = "testpass123".to_string();
    let hashed = hash_password(&password).unwrap();
    let university_id = match role {
        Role::Student => Some(format!("U-{}", Uuid::new_v4().simple())),
        Role::Teacher => None,
    };

    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO users (first_name, last_name, email, role, university_id, password)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id
        "#,
    )
    .bind("Test")
    .bind("User")
    .bind(&email)
    .bind(role)
    .bind(&university_id)
    .bind(&hashed)
    .fetch_one(&mut **tx)
    .await
    .unwrap();

    let token = create_session_token(id, role, &test_jwt_config()).unwrap();

    TestUser {
        id,
        email,
        password,
        role,
        university_id,
        token,
    }
}

pub async fn create_test_course(
    tx: &mut Transaction<'_, Postgres>,
    teacher_id: i64,
) -> TestCourse {
    let code = generate_unique_code();
    let name = format!("Course {}", code);

    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO courses (name, code, teacher_id)
        VALUES ($1, $2, $3)
        RETURNING id
        "#,
    )
    .bind(&name)
    .bind(&code)
    .bind(teacher_id)
    .fetch_one(&mut **tx)
    .await
    .unwrap();

    TestCourse { id, name, code }
}

/// Sends a request and returns the status with the decoded JSON body
/// (`Value::Null` when the body is empty).
pub async fn send(
    app: Router,
    method: &str,
    uri: &str,
    bearer: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(bearer) = bearer {
        builder = builder.header("authorization", bearer);
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, body)
}
