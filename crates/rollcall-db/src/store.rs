//! Record-store seams consumed by the attendance and session layers.
//!
//! Only the operations that carry invariants sit behind traits; plain CRUD
//! lives in the feature services and queries the pool directly.

use std::future::Future;

use rollcall_models::{AttendanceRecord, NewAttendanceRecord};
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use tracing::{Instrument, info_span};

use crate::error::StoreError;

/// Attendance records keyed by `(student_id, course_id)`.
///
/// `insert_attendance_record` must fail with [`StoreError::UniqueViolation`]
/// when a record for the pair already exists, atomically with the insert.
pub trait AttendanceStore {
    fn find_attendance_record(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> impl Future<Output = Result<Option<AttendanceRecord>, StoreError>> + Send;

    fn insert_attendance_record(
        &self,
        record: NewAttendanceRecord,
    ) -> impl Future<Output = Result<AttendanceRecord, StoreError>> + Send;
}

/// Explicitly invalidated session tokens.
pub trait RevocationStore {
    fn is_revoked(&self, token: &str) -> impl Future<Output = Result<bool, StoreError>> + Send;

    fn revoke(&self, token: &str) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// Revoked tokens are stored by SHA-256 digest, never verbatim.
pub fn token_digest(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl AttendanceStore for PgStore {
    async fn find_attendance_record(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<Option<AttendanceRecord>, StoreError> {
        let record = sqlx::query_as::<_, AttendanceRecord>(
            r#"
            SELECT student_id, course_id, submitted_at, attendance_token
            FROM attendance_records
            WHERE student_id = $1 AND course_id = $2
            "#,
        )
        .bind(student_id)
        .bind(course_id)
        .fetch_optional(&self.pool)
        .instrument(info_span!(
            "db.query",
            db.operation = "SELECT",
            db.sql.table = "attendance_records"
        ))
        .await?;

        Ok(record)
    }

    async fn insert_attendance_record(
        &self,
        record: NewAttendanceRecord,
    ) -> Result<AttendanceRecord, StoreError> {
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query_as::<_, AttendanceRecord>(
            r#"
            INSERT INTO attendance_records (student_id, course_id, submitted_at, attendance_token)
            VALUES ($1, $2, $3, $4)
            RETURNING student_id, course_id, submitted_at, attendance_token
            "#,
        )
        .bind(record.student_id)
        .bind(record.course_id)
        .bind(record.submitted_at)
        .bind(&record.attendance_token)
        .fetch_one(&mut *tx)
        .instrument(info_span!(
            "db.query",
            db.operation = "INSERT",
            db.sql.table = "attendance_records"
        ))
        .await?;

        tx.commit().await?;

        Ok(inserted)
    }
}

impl RevocationStore for PgStore {
    async fn is_revoked(&self, token: &str) -> Result<bool, StoreError> {
        let revoked = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM revoked_tokens WHERE token_digest = $1)",
        )
        .bind(token_digest(token))
        .fetch_one(&self.pool)
        .await?;

        Ok(revoked)
    }

    async fn revoke(&self, token: &str) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO revoked_tokens (token_digest, revoked_at)
            VALUES ($1, NOW())
            ON CONFLICT (token_digest) DO NOTHING
            "#,
        )
        .bind(token_digest(token))
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
