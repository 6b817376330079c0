use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::TokenError;

/// Identity facts a session token is issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub subject_id: String,
    pub email: String,
    pub display_name: String,
    pub is_admin: bool,
}

/// Payload of a session token.
///
/// Every field is required: a token missing any of them, or carrying one with
/// the wrong JSON type, fails to decode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// Subject (user identifier)
    pub sub: String,

    pub email: String,

    /// Display name
    pub name: String,

    pub is_admin: bool,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl SessionClaims {
    /// Build claims for an identity issued at `issued_at` and living for `ttl`.
    ///
    /// # Errors
    /// * `InvalidLifetime` - The expiry falls outside the representable range
    pub fn new(
        identity: &SessionIdentity,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, TokenError> {
        let expiration = issued_at
            .checked_add_signed(ttl)
            .ok_or(TokenError::InvalidLifetime(ttl.num_seconds()))?;

        Ok(Self {
            sub: identity.subject_id.clone(),
            email: identity.email.clone(),
            name: identity.display_name.clone(),
            is_admin: identity.is_admin,
            iat: issued_at.timestamp(),
            exp: expiration.timestamp(),
        })
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.iat, 0).unwrap_or_default()
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_default()
    }

    /// Check if token is expired.
    ///
    /// A token is only live while `exp` is strictly in the future.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp <= current_timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> SessionIdentity {
        SessionIdentity {
            subject_id: "user123".to_string(),
            email: "alice@example.com".to_string(),
            display_name: "Alice".to_string(),
            is_admin: false,
        }
    }

    #[test]
    fn test_new_claims() {
        let issued_at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let claims = SessionClaims::new(&identity(), issued_at, Duration::hours(24)).unwrap();

        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.name, "Alice");
        assert!(!claims.is_admin);
        assert_eq!(claims.iat, 1_700_000_000);
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
        assert_eq!(claims.issued_at(), issued_at);
        assert_eq!(claims.expires_at(), issued_at + Duration::hours(24));
    }

    #[test]
    fn test_is_expired() {
        let issued_at = DateTime::from_timestamp(0, 0).unwrap();
        let claims = SessionClaims::new(&identity(), issued_at, Duration::seconds(1000)).unwrap();

        assert!(!claims.is_expired(999));
        assert!(claims.is_expired(1000)); // Exactly at expiration
        assert!(claims.is_expired(1001));
    }

    #[test]
    fn test_unrepresentable_expiry_rejected() {
        let issued_at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let ttl = Duration::days(100_000_000);

        assert_eq!(
            SessionClaims::new(&identity(), issued_at, ttl).unwrap_err(),
            TokenError::InvalidLifetime(ttl.num_seconds())
        );
    }

    #[test]
    fn test_missing_field_rejected() {
        let payload = serde_json::json!({
            "sub": "user123",
            "email": "alice@example.com",
            "is_admin": false,
            "iat": 0,
            "exp": 10,
        });

        assert!(serde_json::from_value::<SessionClaims>(payload).is_err());
    }

    #[test]
    fn test_mistyped_field_rejected() {
        let payload = serde_json::json!({
            "sub": "user123",
            "email": "alice@example.com",
            "name": "Alice",
            "is_admin": "false",
            "iat": 0,
            "exp": 10,
        });

        assert!(serde_json::from_value::<SessionClaims>(payload).is_err());
    }
}
