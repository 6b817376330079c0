use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

/// Process-local user store.
///
/// Used when no database is configured. Email uniqueness is enforced under
/// the write lock, so concurrent registrations of one address leave exactly
/// one record.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;

        if users.values().any(|existing| existing.email == user.email) {
            return Err(UserError::DuplicateEmail(user.email.to_string()));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.email.as_str() == email)
            .cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, UserError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .any(|user| user.email.as_str() == email))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;

    use super::*;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::UserStatus;

    fn user(email: &str) -> User {
        User {
            id: UserId::new(),
            name: "A".to_string(),
            last_name: "B".to_string(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            password_hash: "$argon2id$test_hash".to_string(),
            status: UserStatus::Active,
            is_admin: false,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repository = InMemoryUserRepository::new();
        assert!(repository.is_empty().await);

        let created = repository.create(user("a@x.com")).await.unwrap();
        assert!(!repository.is_empty().await);

        assert_eq!(
            repository.find_by_id(&created.id).await.unwrap(),
            Some(created.clone())
        );
        assert_eq!(
            repository.find_by_email("a@x.com").await.unwrap(),
            Some(created)
        );
        assert!(repository.exists_by_email("a@x.com").await.unwrap());
        assert!(repository.find_by_email("b@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_email_lookup_is_case_sensitive() {
        let repository = InMemoryUserRepository::new();
        repository.create(user("a@x.com")).await.unwrap();

        assert!(!repository.exists_by_email("A@X.COM").await.unwrap());
        assert!(repository.create(user("A@x.com")).await.is_ok());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let repository = InMemoryUserRepository::new();
        repository.create(user("a@x.com")).await.unwrap();

        let result = repository.create(user("a@x.com")).await;
        assert_eq!(
            result.unwrap_err(),
            UserError::DuplicateEmail("a@x.com".to_string())
        );
        assert_eq!(repository.len().await, 1);
    }

    #[tokio::test]
    async fn test_concurrent_creates_keep_one_record() {
        let repository = Arc::new(InMemoryUserRepository::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let repository = Arc::clone(&repository);
                tokio::spawn(async move { repository.create(user("a@x.com")).await })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                created += 1;
            }
        }

        assert_eq!(created, 1);
        assert_eq!(repository.len().await, 1);
    }
}
