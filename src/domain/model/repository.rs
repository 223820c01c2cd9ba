//! Model record repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{ModelId, ModelRecord, NewModelRecord};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Repository trait for model record storage.
///
/// Every lookup and mutation is scoped to an owner in a single query, so a
/// record that exists under a different owner is indistinguishable from one
/// that does not exist at all.
#[async_trait]
pub trait ModelRepository: Send + Sync + Debug {
    /// Persist a new record owned by `owner_id`, assigning an id and the
    /// baseline version
    async fn create(
        &self,
        owner_id: UserId,
        fields: NewModelRecord,
    ) -> Result<ModelRecord, DomainError>;

    /// Scoped lookup matching both the record id and the owner
    async fn find_owned(
        &self,
        id: ModelId,
        owner_id: UserId,
    ) -> Result<Option<ModelRecord>, DomainError>;

    /// All records owned by `owner_id`, ordered by id
    async fn list_owned(&self, owner_id: UserId) -> Result<Vec<ModelRecord>, DomainError>;

    /// Persist an updated record atomically, guarded by the version the
    /// caller read before patching. Returns `false` if the record no longer
    /// exists under its owner or its stored version is no longer
    /// `expected_version` (a concurrent update won the race).
    async fn update(
        &self,
        record: &ModelRecord,
        expected_version: i32,
    ) -> Result<bool, DomainError>;

    /// Delete a record scoped to its owner. Returns `false` if no record
    /// matched.
    async fn delete(&self, id: ModelId, owner_id: UserId) -> Result<bool, DomainError>;
}
