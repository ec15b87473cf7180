//! Signing configuration for session and attendance tokens.
//!
//! # Environment Variables
//!
//! - `JWT_SECRET`: key for session tokens
//! - `ATTENDANCE_SECRET`: key for attendance codes (falls back to `JWT_SECRET`)
//! - `JWT_ACCESS_EXPIRY`: session token lifetime in seconds (default: 3600)

use std::env;
use std::fmt;

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub attendance_secret: String,
    pub access_token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        let secret = env::var("JWT_SECRET")
            .unwrap_or_else(|_| "your-secret-key-change-in-production".to_string());
        let attendance_secret = env::var("ATTENDANCE_SECRET").unwrap_or_else(|_| secret.clone());

        Self {
            secret,
            attendance_secret,
            access_token_expiry: env::var("JWT_ACCESS_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3600), // 1 hour
        }
    }

    pub fn session_key(&self) -> &[u8] {
        self.secret.as_bytes()
    }

    pub fn attendance_key(&self) -> &[u8] {
        self.attendance_secret.as_bytes()
    }
}

// Secrets never reach span fields or log lines.
impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[REDACTED]")
            .field("attendance_secret", &"[REDACTED]")
            .field("access_token_expiry", &self.access_token_expiry)
            .finish()
    }
}
