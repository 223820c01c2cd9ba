//! In-memory user repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::user::{NewUser, User, UserId, UserRepository};
use crate::domain::DomainError;

/// In-memory implementation of UserRepository
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<i64, User>>>,
    /// Index for email -> user ID lookup
    email_index: Arc<RwLock<HashMap<String, i64>>>,
    next_id: AtomicI64,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            email_index: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id.value()).cloned())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let index = self.email_index.read().await;
        let users = self.users.read().await;

        Ok(index.get(email).and_then(|id| users.get(id)).cloned())
    }

    async fn create(&self, new_user: NewUser) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        let mut index = self.email_index.write().await;

        if index.contains_key(&new_user.email) {
            return Err(DomainError::conflict("Email already in use"));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let user = User::new(
            UserId::new(id),
            new_user.email,
            new_user.name,
            new_user.org,
            new_user.password_hash,
        );

        index.insert(user.email().to_string(), id);
        users.insert(id, user.clone());

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            name: "Test".to_string(),
            org: "Acme".to_string(),
            password_hash: "hash".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repo = InMemoryUserRepository::new();

        let first = repo.create(new_user("a@example.com")).await.unwrap();
        let second = repo.create(new_user("b@example.com")).await.unwrap();

        assert_eq!(first.id().value(), 1);
        assert_eq!(second.id().value(), 2);
    }

    #[tokio::test]
    async fn test_get_by_email() {
        let repo = InMemoryUserRepository::new();
        repo.create(new_user("a@example.com")).await.unwrap();

        let found = repo.get_by_email("a@example.com").await.unwrap();
        assert!(found.is_some());
        assert_eq!(found.unwrap().email(), "a@example.com");

        let missing = repo.get_by_email("b@example.com").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let repo = InMemoryUserRepository::new();
        let first = repo.create(new_user("a@example.com")).await.unwrap();

        let result = repo.create(new_user("a@example.com")).await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));

        // First user is unaffected
        let kept = repo.get(first.id()).await.unwrap();
        assert!(kept.is_some());
    }

    #[tokio::test]
    async fn test_email_is_case_sensitive() {
        let repo = InMemoryUserRepository::new();
        repo.create(new_user("a@example.com")).await.unwrap();

        let found = repo.get_by_email("A@example.com").await.unwrap();
        assert!(found.is_none());
    }
}
