//! User models and authentication payloads.
//!
//! Teachers and students share one `users` table and are told apart by
//! [`Role`]. Only students carry a `university_id`.

use chrono::{DateTime, Utc};
use rollcall_auth::Role;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: Role,
    pub university_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Registration payload. Supplying a `university_id` registers a student,
/// omitting it registers a teacher.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SignupRequest {
    #[validate(length(min = 1, message = "first_name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "last_name is required"))]
    pub last_name: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    pub phone: Option<String>,
    #[validate(length(min = 1, message = "university_id must not be empty"))]
    pub university_id: Option<String>,
}

impl SignupRequest {
    pub fn role(&self) -> Role {
        if self.university_id.is_some() {
            Role::Student
        } else {
            Role::Teacher
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    #[schema(example = "password123")]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthResponse {
    pub auth_token: String,
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
