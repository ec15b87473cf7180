//! # Rollcall
//!
//! Classroom attendance over HTTP. Teachers open short-lived attendance
//! windows for their courses by issuing signed codes; students redeem a code
//! once per course to be marked present.
//!
//! ## Layout
//!
//! - [`modules::auth`]: signup, login and logout
//! - [`modules::courses`]: course creation, enrollment and attendance codes
//! - [`modules::attendance`]: code redemption
//! - [`middleware`]: bearer authentication, revocation and role guards
//! - [`router`]: route tree, CORS and request logging
//!
//! Token handling lives in `rollcall-auth`, storage in `rollcall-db`.

pub mod docs;
pub mod logging;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod utils;
pub mod validator;
