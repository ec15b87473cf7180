//! # Rollcall Models
//!
//! Database entities and request/response DTOs for the Rollcall API.
//!
//! - [`users`]: users, signup and login payloads
//! - [`courses`]: courses, enrollment and attendance-code payloads
//! - [`attendance`]: attendance records and redemption payloads

pub mod attendance;
pub mod courses;
pub mod users;

pub use rollcall_auth::Role;

pub use attendance::{AttendClassDto, AttendanceRecord, AttendanceResponse, NewAttendanceRecord};
pub use courses::{
    AttendanceCodeResponse, Course, CreateCourseDto, EnrollStudentsDto, EnrollmentResponse,
    GenerateAttendanceDto, StudentRef,
};
pub use users::{AuthResponse, LoginRequest, MessageResponse, SignupRequest, User};
