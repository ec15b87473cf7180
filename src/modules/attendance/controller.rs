use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use rollcall_core::AppError;
use rollcall_models::{AttendClassDto, AttendanceResponse};
use tracing::instrument;

use crate::middleware::role::RequireStudent;
use crate::modules::attendance::service::AttendanceService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = AttendClassDto,
    responses(
        (status = 201, description = "Attendance recorded", body = AttendanceResponse),
        (status = 400, description = "Malformed request or token without a role"),
        (status = 401, description = "Missing session, or attendance code expired or invalid"),
        (status = 403, description = "Caller is not a student"),
        (status = 409, description = "Attendance already recorded for this course"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Attendance",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, dto), fields(student.id = auth_user.id()))]
pub async fn attend_class(
    State(state): State<AppState>,
    RequireStudent(auth_user): RequireStudent,
    ValidatedJson(dto): ValidatedJson<AttendClassDto>,
) -> Result<(StatusCode, Json<AttendanceResponse>), AppError> {
    let submitted_at = dto.submitted_at.unwrap_or_else(Utc::now);
    let secret = state.jwt_config.attendance_key();

    let record = match dto.course_id {
        Some(course_id) => {
            AttendanceService::redeem_for_course(
                &state.store,
                &dto.attendance_token,
                auth_user.id(),
                course_id,
                submitted_at,
                secret,
            )
            .await?
        }
        None => {
            AttendanceService::redeem(
                &state.store,
                &dto.attendance_token,
                auth_user.id(),
                submitted_at,
                secret,
            )
            .await?
        }
    };

    Ok((
        StatusCode::CREATED,
        Json(AttendanceResponse {
            message: "Attendance recorded".to_string(),
            record,
        }),
    ))
}
