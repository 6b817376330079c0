use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::user::errors::EmailError;
use crate::user::errors::UserError;
use crate::user::errors::UserIdError;

/// User aggregate entity.
///
/// Carries the login credential (email and password hash) together with the
/// profile fields returned to clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub last_name: String,
    pub email: EmailAddress,
    pub password_hash: String,
    pub status: UserStatus,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Identity embedded in the session tokens issued to this user.
    pub fn session_identity(&self) -> auth::SessionIdentity {
        auth::SessionIdentity {
            subject_id: self.id.to_string(),
            email: self.email.as_str().to_string(),
            display_name: self.name.clone(),
            is_admin: self.is_admin,
        }
    }
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Serialize for UserId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser. The address is
/// kept exactly as given: lookups are case sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `Empty` - Email is empty
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        if email.is_empty() {
            return Err(EmailError::Empty);
        }

        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Account status; stored as 0 (active) or 1 (not active).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Active,
    Inactive,
}

impl UserStatus {
    pub fn code(self) -> i16 {
        match self {
            UserStatus::Active => 0,
            UserStatus::Inactive => 1,
        }
    }

    pub fn from_code(code: i16) -> Result<Self, UserError> {
        match code {
            0 => Ok(UserStatus::Active),
            1 => Ok(UserStatus::Inactive),
            other => Err(UserError::DatabaseError(format!(
                "Unknown user status code: {}",
                other
            ))),
        }
    }
}

/// Command to register a new user.
///
/// Fields are raw input; the service validates them.
#[derive(Debug, Clone)]
pub struct RegisterCommand {
    pub email: String,
    pub password: String,
    pub name: String,
    pub last_name: String,
}

/// Command to log a user in.
#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
    pub keep_alive: bool,
}

/// Successful login: the bearer token and the user it was issued for.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
    pub user: UserView,
}

/// User projection without the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserView {
    pub id: String,
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub status: UserStatus,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.as_str().to_string(),
            status: user.status,
            is_admin: user.is_admin,
            created_at: user.created_at,
        }
    }
}

/// Caller identity established from a validated bearer token.
///
/// Lives for one request; handlers receive it as an explicit parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionContext {
    pub user_id: UserId,
    pub email: String,
    pub name: String,
    pub is_admin: bool,
    pub expires_at: DateTime<Utc>,
}

impl TryFrom<auth::SessionClaims> for SessionContext {
    type Error = UserIdError;

    fn try_from(claims: auth::SessionClaims) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: UserId::from_string(&claims.sub)?,
            expires_at: claims.expires_at(),
            email: claims.email,
            name: claims.name,
            is_admin: claims.is_admin,
        })
    }
}
