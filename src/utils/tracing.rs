//! Structured event macros for security and audit trails.

/// Logs a security-relevant event at WARN level: rejected credentials,
/// denied roles, replayed codes.
#[macro_export]
macro_rules! security_event {
    ($event:expr, $($field:tt)*) => {
        ::tracing::warn!(
            security.event = $event,
            $($field)*
        )
    };
}

/// Logs a state-changing business operation at INFO level.
#[macro_export]
macro_rules! audit_event {
    ($action:expr, $resource:expr, $($field:tt)*) => {
        ::tracing::info!(
            audit.action = $action,
            audit.resource = $resource,
            $($field)*
        )
    };
}
