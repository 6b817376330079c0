use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::LoginOutcome;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::SessionContext;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserStatus;
use crate::domain::user::models::UserView;
use crate::user::errors::UserError;
use crate::user::ports::AuthServicePort;
use crate::user::ports::UserRepository;

/// Domain service implementation for registration, login and authorization.
///
/// Argon2 work runs on the blocking thread pool so request dispatch is not
/// stalled. If the caller drops the request, the pending hash result is
/// discarded with nothing to undo.
pub struct AuthService<UR>
where
    UR: UserRepository + ?Sized,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository + ?Sized,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password and token coordinator
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    /// Verify against the decoy hash and fail with the generic rejection.
    async fn reject_login(&self, password: String) -> Result<LoginOutcome, UserError> {
        let authenticator = Arc::clone(&self.authenticator);
        let err = tokio::task::spawn_blocking(move || authenticator.reject_unknown(&password))
            .await?;
        Err(err.into())
    }
}

fn require(value: &str, field: &'static str) -> Result<(), UserError> {
    if value.is_empty() {
        Err(UserError::Validation(field))
    } else {
        Ok(())
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository + ?Sized,
{
    async fn register(&self, command: RegisterCommand) -> Result<UserView, UserError> {
        require(&command.email, "Email")?;
        require(&command.password, "Password")?;

        let email = EmailAddress::new(command.email)?;

        if self.repository.exists_by_email(email.as_str()).await? {
            tracing::info!(email = %email, "Registration rejected: email already exists");
            return Err(UserError::DuplicateEmail(email.to_string()));
        }

        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;
        let password_hash =
            tokio::task::spawn_blocking(move || authenticator.hash_password(&password))
                .await?
                .map_err(|e| {
                    tracing::error!(error = %e, "Password hashing failed");
                    UserError::Hashing(e.to_string())
                })?;

        let user = User {
            id: UserId::new(),
            name: command.name,
            last_name: command.last_name,
            email,
            password_hash,
            status: UserStatus::Active,
            is_admin: false,
            created_at: Utc::now(),
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(user_id = %created_user.id, "User registered");

        Ok(UserView::from(&created_user))
    }

    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, UserError> {
        require(&command.email, "Email")?;
        require(&command.password, "Password")?;

        let user = match self.repository.find_by_email(&command.email).await? {
            Some(user) if user.status == UserStatus::Active => user,
            Some(user) => {
                tracing::info!(user_id = %user.id, "Login rejected: account not active");
                return self.reject_login(command.password).await;
            }
            None => {
                tracing::info!("Login rejected: unknown email");
                return self.reject_login(command.password).await;
            }
        };

        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;
        let stored_hash = user.password_hash.clone();
        let identity = user.session_identity();
        let keep_alive = command.keep_alive;

        let issued = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(&password, &stored_hash, &identity, keep_alive)
        })
        .await?
        .map_err(|e| {
            match &e {
                auth::AuthenticationError::InvalidCredentials => {
                    tracing::info!(user_id = %user.id, "Login rejected: wrong password")
                }
                other => tracing::error!(error = %other, "Token issuance failed"),
            }
            UserError::from(e)
        })?;

        tracing::info!(
            user_id = %user.id,
            keep_alive,
            expires_at = %issued.expires_at(),
            "User logged in"
        );

        Ok(LoginOutcome {
            expires_at: issued.expires_at(),
            access_token: issued.access_token,
            user: UserView::from(&user),
        })
    }

    fn authorize(&self, token: &str) -> Result<SessionContext, UserError> {
        let claims = self.authenticator.validate_token(token).map_err(|e| {
            tracing::warn!(error = %e, "Bearer token rejected");
            UserError::Unauthorized
        })?;

        SessionContext::try_from(claims).map_err(|e| {
            tracing::warn!(error = %e, "Bearer token carries an invalid subject");
            UserError::Unauthorized
        })
    }

    async fn current_user(&self, session: &SessionContext) -> Result<UserView, UserError> {
        self.repository
            .find_by_id(&session.user_id)
            .await?
            .map(|ref user| UserView::from(user))
            .ok_or(UserError::NotFound(session.user_id.to_string()))
    }
}
