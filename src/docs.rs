use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use rollcall_models::{
    AttendClassDto, AttendanceCodeResponse, AttendanceRecord, AttendanceResponse, AuthResponse,
    Course, CreateCourseDto, EnrollStudentsDto, EnrollmentResponse, GenerateAttendanceDto,
    LoginRequest, MessageResponse, Role, SignupRequest, StudentRef, User,
};

use crate::modules::auth::controller::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::router::health_check,
        crate::modules::auth::controller::signup,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::logout,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::enroll_students,
        crate::modules::courses::controller::generate_attendance_code,
        crate::modules::attendance::controller::attend_class,
    ),
    components(
        schemas(
            User,
            Role,
            SignupRequest,
            LoginRequest,
            AuthResponse,
            MessageResponse,
            ErrorResponse,
            Course,
            CreateCourseDto,
            StudentRef,
            EnrollStudentsDto,
            EnrollmentResponse,
            GenerateAttendanceDto,
            AttendanceCodeResponse,
            AttendanceRecord,
            AttendClassDto,
            AttendanceResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Signup, login and logout"),
        (name = "Courses", description = "Course management and attendance windows"),
        (name = "Attendance", description = "Attendance code redemption"),
        (name = "Health", description = "Liveness probe")
    ),
    info(
        title = "Rollcall API",
        version = "0.1.0",
        description = "Classroom attendance with signed, time-boxed attendance codes.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
