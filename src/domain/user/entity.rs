//! User entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Numeric user identifier, assigned by the store on creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner numeric value
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// User entity for authentication and model ownership
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    id: UserId,
    /// Email used for login, unique across users
    email: String,
    /// Display name
    name: String,
    /// Organization the user belongs to
    org: String,
    /// Argon2 password hash - never exposed in serialization
    #[serde(skip_serializing, default)]
    password_hash: String,
    /// Creation timestamp
    created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user
    pub fn new(
        id: UserId,
        email: impl Into<String>,
        name: impl Into<String>,
        org: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id,
            email: email.into(),
            name: name.into(),
            org: org.into(),
            password_hash: password_hash.into(),
            created_at: Utc::now(),
        }
    }

    /// Restore a user from persisted state
    pub fn from_parts(
        id: UserId,
        email: impl Into<String>,
        name: impl Into<String>,
        org: impl Into<String>,
        password_hash: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email: email.into(),
            name: name.into(),
            org: org.into(),
            password_hash: password_hash.into(),
            created_at,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn org(&self) -> &str {
        &self.org
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
