use async_trait::async_trait;

use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::LoginOutcome;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::SessionContext;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserView;
use crate::user::errors::UserError;

/// Port for registration, login and request authorization.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user. Does not log the user in.
    ///
    /// # Arguments
    /// * `command` - Raw email, password and profile names
    ///
    /// # Returns
    /// Sanitized view of the created user
    ///
    /// # Errors
    /// * `Validation` - Email or password is empty
    /// * `InvalidEmail` - Email is not a valid address
    /// * `DuplicateEmail` - Email is already registered
    /// * `Hashing` - Password hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterCommand) -> Result<UserView, UserError>;

    /// Verify credentials and issue a session token.
    ///
    /// # Arguments
    /// * `command` - Email, password and keep-alive flag
    ///
    /// # Returns
    /// Token, its expiry and the sanitized user
    ///
    /// # Errors
    /// * `Validation` - Email or password is empty
    /// * `InvalidCredentials` - Unknown email, wrong password or inactive account
    /// * `Token` - Token signing failed
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, UserError>;

    /// Authorize a request from its bearer token.
    ///
    /// # Errors
    /// * `Unauthorized` - Token is rejected for any reason
    fn authorize(&self, token: &str) -> Result<SessionContext, UserError>;

    /// Load the user behind an authorized session.
    ///
    /// # Errors
    /// * `NotFound` - User no longer exists
    /// * `DatabaseError` - Database operation failed
    async fn current_user(&self, session: &SessionContext) -> Result<UserView, UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `DuplicateEmail` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by email address (exact, case-sensitive match).
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Check whether an email address is already registered.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn exists_by_email(&self, email: &str) -> Result<bool, UserError>;
}
