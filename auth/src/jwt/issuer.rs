use std::sync::Arc;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::encode;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;

use super::claims::SessionClaims;
use super::claims::SessionIdentity;
use super::errors::TokenError;
use super::secret::SigningSecret;
use super::ALGORITHM;
use crate::clock::Clock;
use crate::clock::SystemClock;

/// Token lifetimes offered to callers at login.
///
/// Both lifetimes are positive and fit the date range once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLifetimes {
    standard: Duration,
    /// Used when the caller asks to stay signed in
    extended: Duration,
}

impl TokenLifetimes {
    /// # Errors
    /// * `InvalidLifetime` - A lifetime is zero, negative, or puts the expiry
    ///   past the representable date range
    pub fn new(standard: Duration, extended: Duration) -> Result<Self, TokenError> {
        check_lifetime(standard)?;
        check_lifetime(extended)?;

        Ok(Self { standard, extended })
    }

    pub fn select(&self, keep_alive: bool) -> Duration {
        if keep_alive {
            self.extended
        } else {
            self.standard
        }
    }
}

impl Default for TokenLifetimes {
    fn default() -> Self {
        Self {
            standard: Duration::hours(24),
            extended: Duration::days(30),
        }
    }
}

fn check_lifetime(ttl: Duration) -> Result<(), TokenError> {
    if ttl <= Duration::zero() || Utc::now().checked_add_signed(ttl).is_none() {
        return Err(TokenError::InvalidLifetime(ttl.num_seconds()));
    }
    Ok(())
}

/// A freshly signed token together with the claims it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub access_token: String,
    pub claims: SessionClaims,
}

impl IssuedToken {
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.claims.expires_at()
    }
}

/// Signs session tokens with the shared secret.
///
/// Always signs with HS256. Issuing is CPU bound and performs no I/O.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    clock: Arc<dyn Clock>,
}

impl TokenIssuer {
    /// Create an issuer reading time from the system clock.
    pub fn new(secret: &SigningSecret) -> Self {
        Self::with_clock(secret, Arc::new(SystemClock))
    }

    pub fn with_clock(secret: &SigningSecret, clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            clock,
        }
    }

    /// Issue a token for `identity` that expires `ttl` from now.
    ///
    /// # Errors
    /// * `InvalidLifetime` - `ttl` is zero, negative or overflows the expiry
    /// * `SigningFailed` - Token encoding failed
    pub fn issue(
        &self,
        identity: &SessionIdentity,
        ttl: Duration,
    ) -> Result<IssuedToken, TokenError> {
        if ttl <= Duration::zero() {
            return Err(TokenError::InvalidLifetime(ttl.num_seconds()));
        }

        let claims = SessionClaims::new(identity, self.clock.now(), ttl)?;
        let header = Header::new(ALGORITHM);

        let access_token = encode(&header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::SigningFailed(e.to_string()))?;

        Ok(IssuedToken {
            access_token,
            claims,
        })
    }
}
