//! # Rollcall Core
//!
//! Core types shared by every Rollcall crate.
//!
//! - [`errors`]: the HTTP boundary error type and its response rendering
//! - [`password`]: salted bcrypt hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use rollcall_core::{AppError, hash_password, verify_password};
//!
//! let hash = hash_password("correct horse")?;
//! if !verify_password("correct horse", &hash)? {
//!     return Err(AppError::unauthorized("Invalid email or password"));
//! }
//! ```

pub mod errors;
pub mod password;

pub use errors::AppError;
pub use password::{hash_password, verify_password};
