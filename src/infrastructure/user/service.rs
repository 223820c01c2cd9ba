//! User service for registration and authentication

use std::sync::Arc;

use tracing::info;

use crate::domain::user::{
    validate_email, validate_name, validate_password, NewUser, User, UserId, UserRepository,
};
use crate::domain::DomainError;

use super::password::PasswordHasher;

/// Request for registering a new user
#[derive(Debug, Clone)]
pub struct RegisterUserRequest {
    pub email: String,
    pub name: String,
    pub org: String,
    pub password: String,
}

/// User service for registration and authentication
#[derive(Debug)]
pub struct UserService<R: UserRepository, H: PasswordHasher> {
    repository: Arc<R>,
    hasher: Arc<H>,
}

impl<R: UserRepository, H: PasswordHasher> UserService<R, H> {
    /// Create a new user service
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self { repository, hasher }
    }

    /// Register a new user. The raw password is hashed before persistence
    /// and never stored or logged.
    pub async fn register(&self, request: RegisterUserRequest) -> Result<User, DomainError> {
        validate_email(&request.email).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_name(&request.name).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_password(&request.password)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        if self.repository.email_exists(&request.email).await? {
            return Err(DomainError::conflict("Email already in use"));
        }

        let password_hash = self.hasher.hash(&request.password)?;

        let user = self
            .repository
            .create(NewUser {
                email: request.email,
                name: request.name,
                org: request.org,
                password_hash,
            })
            .await?;

        info!(user_id = %user.id(), "User registered");

        Ok(user)
    }

    /// Authenticate a user with email and password.
    ///
    /// Returns `None` for both unknown email and wrong password so the
    /// caller cannot distinguish the two.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError> {
        let user = match self.repository.get_by_email(email).await? {
            Some(u) => u,
            None => return Ok(None),
        };

        if !self.hasher.verify(password, user.password_hash()) {
            return Ok(None);
        }

        Ok(Some(user))
    }

    /// Get a user by ID
    pub async fn get(&self, id: UserId) -> Result<Option<User>, DomainError> {
        self.repository.get(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::user::password::Argon2Hasher;
    use crate::infrastructure::user::repository::InMemoryUserRepository;

    fn create_service() -> UserService<InMemoryUserRepository, Argon2Hasher> {
        let repository = Arc::new(InMemoryUserRepository::new());
        let hasher = Arc::new(Argon2Hasher::new());
        UserService::new(repository, hasher)
    }

    fn make_request(email: &str, password: &str) -> RegisterUserRequest {
        RegisterUserRequest {
            email: email.to_string(),
            name: "Test User".to_string(),
            org: "Acme".to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_user() {
        let service = create_service();

        let user = service
            .register(make_request("alice@example.com", "secure_password123"))
            .await
            .unwrap();

        assert_eq!(user.email(), "alice@example.com");
        assert_ne!(user.password_hash(), "secure_password123");
    }

    #[tokio::test]
    async fn test_register_invalid_email() {
        let service = create_service();

        let result = service
            .register(make_request("not-an-email", "secure_password123"))
            .await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_register_short_password() {
        let service = create_service();

        let result = service
            .register(make_request("alice@example.com", "short"))
            .await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let service = create_service();

        let first = service
            .register(make_request("a@x.com", "secure_password123"))
            .await
            .unwrap();

        let result = service
            .register(make_request("a@x.com", "other_password456"))
            .await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));

        // First registration is unaffected
        let kept = service.get(first.id()).await.unwrap();
        assert!(kept.is_some());
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let service = create_service();

        service
            .register(make_request("alice@example.com", "secure_password123"))
            .await
            .unwrap();

        let user = service
            .authenticate("alice@example.com", "secure_password123")
            .await
            .unwrap();

        assert!(user.is_some());
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let service = create_service();

        service
            .register(make_request("alice@example.com", "secure_password123"))
            .await
            .unwrap();

        let user = service
            .authenticate("alice@example.com", "wrong_password")
            .await
            .unwrap();

        assert!(user.is_none());
    }

    #[tokio::test]
    async fn test_authenticate_unknown_email() {
        let service = create_service();

        let user = service
            .authenticate("nobody@example.com", "password123")
            .await
            .unwrap();

        assert!(user.is_none());
    }
}
