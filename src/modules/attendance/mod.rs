//! Attendance windows and code redemption.
//!
//! A teacher opens a window by issuing an attendance code, a token signed
//! with the attendance key and carrying the course id. A student redeems the
//! code to be marked present. Each student is recorded at most once per
//! course, no matter how many codes are issued for it.

pub mod controller;
pub mod error;
pub mod router;
pub mod service;

pub use error::RedemptionError;
pub use service::AttendanceService;
