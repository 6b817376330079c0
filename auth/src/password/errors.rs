use thiserror::Error;

/// Error type for password operations.
///
/// Verification never produces an error: a mismatch or an unreadable stored
/// hash both verify as `false`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Invalid password hashing parameters: {0}")]
    InvalidParams(String),

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}
