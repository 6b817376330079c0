use std::sync::Arc;

use chrono::Duration;

use crate::clock::Clock;
use crate::clock::SystemClock;
use crate::jwt::IssuedToken;
use crate::jwt::SessionClaims;
use crate::jwt::SessionIdentity;
use crate::jwt::SigningSecret;
use crate::jwt::TokenError;
use crate::jwt::TokenIssuer;
use crate::jwt::TokenLifetimes;
use crate::jwt::TokenValidator;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token handling.
///
/// Provides high-level authentication operations by coordinating
/// password hashing, token issuance and token validation.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
    token_validator: TokenValidator,
    lifetimes: TokenLifetimes,
    decoy_hash: String,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator reading time from the system clock.
    ///
    /// # Arguments
    /// * `secret` - Shared token signing secret
    /// * `password_hasher` - Configured password hasher
    ///
    /// # Errors
    /// * `PasswordError` - The hasher cannot produce hashes with its parameters
    pub fn new(
        secret: &SigningSecret,
        password_hasher: PasswordHasher,
    ) -> Result<Self, AuthenticationError> {
        Self::with_clock(secret, password_hasher, Arc::new(SystemClock))
    }

    pub fn with_clock(
        secret: &SigningSecret,
        password_hasher: PasswordHasher,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, AuthenticationError> {
        // Verified against when the email is unknown so that both login
        // failure paths pay for one hash verification.
        let decoy_hash = password_hasher.hash("decoy-password-never-issued")?;

        Ok(Self {
            password_hasher,
            token_issuer: TokenIssuer::with_clock(secret, Arc::clone(&clock)),
            token_validator: TokenValidator::with_clock(secret, clock),
            lifetimes: TokenLifetimes::default(),
            decoy_hash,
        })
    }

    pub fn with_lifetimes(mut self, lifetimes: TokenLifetimes) -> Self {
        self.lifetimes = lifetimes;
        self
    }

    pub fn lifetimes(&self) -> &TokenLifetimes {
        &self.lifetimes
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a session token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `identity` - Identity to embed in the token
    /// * `keep_alive` - Issue with the extended lifetime
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match (or stored hash is unreadable)
    /// * `TokenError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        identity: &SessionIdentity,
        keep_alive: bool,
    ) -> Result<IssuedToken, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let issued = self
            .token_issuer
            .issue(identity, self.lifetimes.select(keep_alive))?;

        Ok(issued)
    }

    /// Reject a login attempt for an unknown account.
    ///
    /// Burns one password verification against the decoy hash so the
    /// response costs as much as a wrong password would.
    pub fn reject_unknown(&self, password: &str) -> AuthenticationError {
        let _ = self.password_hasher.verify(password, &self.decoy_hash);
        AuthenticationError::InvalidCredentials
    }

    /// Issue a token without password verification.
    ///
    /// # Errors
    /// * `TokenError` - Token generation failed
    pub fn generate_token(
        &self,
        identity: &SessionIdentity,
        ttl: Duration,
    ) -> Result<IssuedToken, TokenError> {
        self.token_issuer.issue(identity, ttl)
    }

    /// Validate a token and decode its claims.
    ///
    /// # Errors
    /// * `TokenError` - Token validation or decoding failed
    pub fn validate_token(&self, token: &str) -> Result<SessionClaims, TokenError> {
        self.token_validator.validate(token)
    }
}
