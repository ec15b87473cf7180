use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{Duration, Utc};
use rollcall_core::AppError;
use rollcall_models::{
    AttendanceCodeResponse, Course, CreateCourseDto, EnrollStudentsDto, EnrollmentResponse,
    GenerateAttendanceDto,
};
use tracing::instrument;

use crate::audit_event;
use crate::middleware::role::RequireTeacher;
use crate::modules::attendance::service::AttendanceService;
use crate::modules::courses::service::CourseService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = CreateCourseDto,
    responses(
        (status = 201, description = "Course created", body = Course),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not a teacher"),
        (status = 409, description = "Course name or code already taken"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, dto), fields(teacher.id = auth_user.id()))]
pub async fn create_course(
    State(state): State<AppState>,
    RequireTeacher(auth_user): RequireTeacher,
    ValidatedJson(dto): ValidatedJson<CreateCourseDto>,
) -> Result<(StatusCode, Json<Course>), AppError> {
    let course = CourseService::create_course(&state.db, auth_user.id(), dto).await?;

    Ok((StatusCode::CREATED, Json(course)))
}

#[utoipa::path(
    post,
    path = "/api/courses/{id}/students",
    params(
        ("id" = i64, Path, description = "Course ID")
    ),
    request_body = EnrollStudentsDto,
    responses(
        (status = 200, description = "Students enrolled", body = EnrollmentResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller does not teach this course"),
        (status = 404, description = "Course or student not found"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, dto), fields(teacher.id = auth_user.id()))]
pub async fn enroll_students(
    State(state): State<AppState>,
    RequireTeacher(auth_user): RequireTeacher,
    Path(course_id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<EnrollStudentsDto>,
) -> Result<Json<EnrollmentResponse>, AppError> {
    let course = CourseService::find_owned_course(&state.db, course_id, auth_user.id()).await?;
    let response = CourseService::enroll_students(&state.db, course.id, dto).await?;

    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/courses/{id}/attendance-code",
    params(
        ("id" = i64, Path, description = "Course ID")
    ),
    request_body = GenerateAttendanceDto,
    responses(
        (status = 201, description = "Attendance window opened", body = AttendanceCodeResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller does not teach this course"),
        (status = 404, description = "Course not found"),
        (status = 422, description = "Window length out of range")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, dto), fields(teacher.id = auth_user.id()))]
pub async fn generate_attendance_code(
    State(state): State<AppState>,
    RequireTeacher(auth_user): RequireTeacher,
    Path(course_id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<GenerateAttendanceDto>,
) -> Result<(StatusCode, Json<AttendanceCodeResponse>), AppError> {
    let course = CourseService::find_owned_course(&state.db, course_id, auth_user.id()).await?;

    let now = Utc::now();
    let attendance_token = AttendanceService::open_window_at(
        course.id,
        dto.time_in_minutes,
        state.jwt_config.attendance_key(),
        now,
    )?;

    audit_event!(
        "attendance.window_opened",
        "courses",
        course.id = course.id,
        minutes = dto.time_in_minutes
    );

    Ok((
        StatusCode::CREATED,
        Json(AttendanceCodeResponse {
            course_id: course.id,
            attendance_token,
            expires_at: now + Duration::minutes(dto.time_in_minutes),
        }),
    ))
}
