//! Authentication utilities library
//!
//! Provides the credential and session-token core used by the cloud service:
//! - Password hashing (Argon2id)
//! - Session token issuance and validation (HS256 only)
//! - Authentication coordination
//!
//! The library performs no I/O. Looking up and persisting users is left to
//! the service, which adapts these implementations behind its own ports.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("other_password", &hash));
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{SessionIdentity, SigningSecret, TokenIssuer, TokenValidator};
//! use chrono::Duration;
//!
//! let secret = SigningSecret::new("secret_key_at_least_32_bytes_long!").unwrap();
//! let identity = SessionIdentity {
//!     subject_id: "user123".to_string(),
//!     email: "alice@example.com".to_string(),
//!     display_name: "Alice".to_string(),
//!     is_admin: false,
//! };
//!
//! let issued = TokenIssuer::new(&secret).issue(&identity, Duration::hours(24)).unwrap();
//! let claims = TokenValidator::new(&secret).validate(&issued.access_token).unwrap();
//! assert_eq!(claims.email, "alice@example.com");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, PasswordHasher, SessionIdentity, SigningSecret};
//!
//! let secret = SigningSecret::new("secret_key_at_least_32_bytes_long!").unwrap();
//! let auth = Authenticator::new(&secret, PasswordHasher::new()).unwrap();
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let identity = SessionIdentity {
//!     subject_id: "user123".to_string(),
//!     email: "alice@example.com".to_string(),
//!     display_name: "Alice".to_string(),
//!     is_admin: false,
//! };
//! let issued = auth.authenticate("password123", &hash, &identity, false).unwrap();
//!
//! // Validate token
//! let claims = auth.validate_token(&issued.access_token).unwrap();
//! assert_eq!(claims.sub, "user123");
//! ```

pub mod authenticator;
pub mod clock;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use clock::Clock;
pub use clock::FixedClock;
pub use clock::SystemClock;
pub use jwt::IssuedToken;
pub use jwt::SessionClaims;
pub use jwt::SessionIdentity;
pub use jwt::SigningSecret;
pub use jwt::TokenError;
pub use jwt::TokenIssuer;
pub use jwt::TokenLifetimes;
pub use jwt::TokenValidator;
pub use password::PasswordError;
pub use password::PasswordHasher;
