use chrono::{DateTime, Duration, Utc};
use rollcall_auth::{
    AttendanceClaims, EncodingError, TokenPurpose, VerifyError, issue_token_at, verify_token_at,
};
use rollcall_db::{AttendanceStore, StoreError};
use rollcall_models::{AttendanceRecord, NewAttendanceRecord};
use tracing::instrument;

use crate::modules::attendance::error::RedemptionError;
use crate::{audit_event, security_event};

pub struct AttendanceService;

impl AttendanceService {
    /// Issues an attendance code for `course_id`, redeemable for
    /// `duration_minutes`.
    pub fn open_window(
        course_id: i64,
        duration_minutes: i64,
        secret: &[u8],
    ) -> Result<String, EncodingError> {
        Self::open_window_at(course_id, duration_minutes, secret, Utc::now())
    }

    pub fn open_window_at(
        course_id: i64,
        duration_minutes: i64,
        secret: &[u8],
        now: DateTime<Utc>,
    ) -> Result<String, EncodingError> {
        let ttl = Duration::try_minutes(duration_minutes).ok_or(EncodingError::ExpiryOutOfRange)?;
        issue_token_at(
            AttendanceClaims { course_id },
            TokenPurpose::Attendance,
            secret,
            ttl,
            now,
        )
    }

    /// Records `student_id` as present for the course named in `token`.
    pub async fn redeem<S: AttendanceStore>(
        store: &S,
        token: &str,
        student_id: i64,
        submitted_at: DateTime<Utc>,
        secret: &[u8],
    ) -> Result<AttendanceRecord, RedemptionError> {
        Self::redeem_at(store, token, student_id, None, submitted_at, secret, Utc::now()).await
    }

    /// Like [`AttendanceService::redeem`], but rejects a code issued for any
    /// course other than `course_id`.
    pub async fn redeem_for_course<S: AttendanceStore>(
        store: &S,
        token: &str,
        student_id: i64,
        course_id: i64,
        submitted_at: DateTime<Utc>,
        secret: &[u8],
    ) -> Result<AttendanceRecord, RedemptionError> {
        Self::redeem_at(
            store,
            token,
            student_id,
            Some(course_id),
            submitted_at,
            secret,
            Utc::now(),
        )
        .await
    }

    #[instrument(skip(store, token, secret))]
    pub async fn redeem_at<S: AttendanceStore>(
        store: &S,
        token: &str,
        student_id: i64,
        expected_course: Option<i64>,
        submitted_at: DateTime<Utc>,
        secret: &[u8],
        now: DateTime<Utc>,
    ) -> Result<AttendanceRecord, RedemptionError> {
        let signed = verify_token_at::<AttendanceClaims>(
            token,
            TokenPurpose::Attendance,
            secret,
            now,
        )
        .map_err(|err| {
            security_event!("attendance.code_rejected", student.id = student_id, reason = %err, "Attendance code rejected");
            match err {
                VerifyError::Expired => RedemptionError::Expired,
                _ => RedemptionError::Invalid,
            }
        })?;

        let course_id = signed.claims.course_id;

        if expected_course.is_some_and(|expected| expected != course_id) {
            security_event!(
                "attendance.course_mismatch",
                student.id = student_id,
                course.id = course_id,
                "Attendance code used for a different course"
            );
            return Err(RedemptionError::Invalid);
        }

        if store
            .find_attendance_record(student_id, course_id)
            .await
            .map_err(RedemptionError::Store)?
            .is_some()
        {
            return Err(RedemptionError::AlreadyRedeemed);
        }

        // the (student_id, course_id) key settles concurrent redemptions
        let record = store
            .insert_attendance_record(NewAttendanceRecord {
                student_id,
                course_id,
                submitted_at,
                attendance_token: token.to_string(),
            })
            .await
            .map_err(|err| match err {
                StoreError::UniqueViolation(_) => RedemptionError::AlreadyRedeemed,
                other => RedemptionError::Store(other),
            })?;

        audit_event!(
            "attendance.recorded",
            "attendance_records",
            student.id = student_id,
            course.id = course_id
        );

        Ok(record)
    }
}
