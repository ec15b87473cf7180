//! Request guards.
//!
//! - [`auth`]: the [`auth::AuthUser`] extractor (bearer token, signature,
//!   expiry, revocation)
//! - [`role`]: role guards as route middleware and as extractors
//!
//! Guards run in a fixed order: authenticate, check revocation, authorize.
//! Resource lookups happen in the handler afterwards, so an unauthorized
//! caller never learns whether a course exists.

pub mod auth;
pub mod role;
