//! Course, enrollment and attendance-code models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub grade: Option<String>,
    pub teacher_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCourseDto {
    #[validate(length(min = 1, max = 200, message = "name must be between 1 and 200 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 50, message = "code must be between 1 and 50 characters"))]
    #[schema(example = "CS101")]
    pub code: String,
    pub grade: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct StudentRef {
    pub university_id: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct EnrollStudentsDto {
    #[validate(length(min = 1, message = "students must not be empty"))]
    pub students: Vec<StudentRef>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EnrollmentResponse {
    pub course_id: i64,
    pub enrolled: usize,
}

/// Request for a fresh attendance code.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct GenerateAttendanceDto {
    /// How long the code stays redeemable
    #[validate(range(min = 1, max = 1440, message = "time_in_minutes must be between 1 and 1440"))]
    #[schema(example = 10)]
    pub time_in_minutes: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AttendanceCodeResponse {
    pub course_id: i64,
    pub attendance_token: String,
    pub expires_at: DateTime<Utc>,
}
