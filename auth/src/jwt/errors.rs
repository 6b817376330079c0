use thiserror::Error;

/// Error type for session token operations.
///
/// `MissingSecret`, `SigningFailed` and `InvalidLifetime` come from the issuing
/// side's configuration. The remaining variants describe why a presented token
/// was rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Signing secret is missing or empty")]
    MissingSecret,

    #[error("Failed to sign token: {0}")]
    SigningFailed(String),

    #[error("Token lifetime must be positive, got {0} seconds")]
    InvalidLifetime(i64),

    #[error("Token is malformed: {0}")]
    MalformedToken(String),

    #[error("Token algorithm is not accepted: {0}")]
    AlgorithmMismatch(String),

    #[error("Token signature is invalid")]
    BadSignature,

    #[error("Token is expired")]
    Expired,

    #[error("Token claims are malformed: {0}")]
    MalformedClaims(String),
}
