use axum::{Router, routing::post};

use crate::state::AppState;

use super::controller::{create_course, enroll_students, generate_attendance_code};

pub fn init_courses_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_course))
        .route("/{id}/students", post(enroll_students))
        .route("/{id}/attendance-code", post(generate_attendance_code))
}
