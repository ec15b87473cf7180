//! Attendance records and redemption payloads.
//!
//! A record is keyed by `(student_id, course_id)`: a student can be marked
//! present for a course once, not once per class meeting.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct AttendanceRecord {
    pub student_id: i64,
    pub course_id: i64,
    pub submitted_at: DateTime<Utc>,
    pub attendance_token: String,
}

/// A record about to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttendanceRecord {
    pub student_id: i64,
    pub course_id: i64,
    pub submitted_at: DateTime<Utc>,
    pub attendance_token: String,
}

impl From<NewAttendanceRecord> for AttendanceRecord {
    fn from(record: NewAttendanceRecord) -> Self {
        Self {
            student_id: record.student_id,
            course_id: record.course_id,
            submitted_at: record.submitted_at,
            attendance_token: record.attendance_token,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AttendClassDto {
    #[validate(length(min = 1, message = "attendance_token is required"))]
    pub attendance_token: String,
    /// When supplied, must match the course the code was issued for
    pub course_id: Option<i64>,
    /// Client-side submission time; defaults to the server clock
    pub submitted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AttendanceResponse {
    pub message: String,
    pub record: AttendanceRecord,
}
