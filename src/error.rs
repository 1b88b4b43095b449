//! Shared error plumbing.

/// Grepable error code, stable across releases, for hosts that map errors to
/// user-facing messages.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;
}
