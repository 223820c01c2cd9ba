//! PostgreSQL user repository implementation

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::user::{NewUser, User, UserId, UserRepository};
use crate::domain::DomainError;

/// PostgreSQL implementation of UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, name, org, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get user: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_user(&row))),
            None => Ok(None),
        }
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, name, org, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get user by email: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_user(&row))),
            None => Ok(None),
        }
    }

    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let row = sqlx::query(
            r#"
            INSERT INTO users (email, name, org, password_hash, created_at)
            VALUES ($1, $2, $3, $4, NOW())
            RETURNING id, email, name, org, password_hash, created_at
            "#,
        )
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.org)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            let msg = e.to_string();

            if msg.contains("duplicate key") || msg.contains("unique constraint") {
                DomainError::conflict("Email already in use")
            } else {
                DomainError::storage(format!("Failed to create user: {}", e))
            }
        })?;

        Ok(row_to_user(&row))
    }
}

fn row_to_user(row: &sqlx::postgres::PgRow) -> User {
    let id: i64 = row.get("id");
    let email: String = row.get("email");
    let name: String = row.get("name");
    let org: String = row.get("org");
    let password_hash: String = row.get("password_hash");
    let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");

    User::from_parts(UserId::new(id), email, name, org, password_hash, created_at)
}
