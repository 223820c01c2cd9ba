//! In-memory model record repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::model::{ModelId, ModelRecord, ModelRepository, NewModelRecord};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// In-memory implementation of ModelRepository
#[derive(Debug, Default)]
pub struct InMemoryModelRepository {
    records: Arc<RwLock<HashMap<i64, ModelRecord>>>,
    next_id: AtomicI64,
}

impl InMemoryModelRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl ModelRepository for InMemoryModelRepository {
    async fn create(
        &self,
        owner_id: UserId,
        fields: NewModelRecord,
    ) -> Result<ModelRecord, DomainError> {
        let mut records = self.records.write().await;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let record = ModelRecord::new(ModelId::new(id), owner_id, fields);

        records.insert(id, record.clone());

        Ok(record)
    }

    async fn find_owned(
        &self,
        id: ModelId,
        owner_id: UserId,
    ) -> Result<Option<ModelRecord>, DomainError> {
        let records = self.records.read().await;

        // Single scoped lookup: a record under another owner is treated
        // exactly like a missing one.
        Ok(records
            .get(&id.value())
            .filter(|r| r.owner_id() == owner_id)
            .cloned())
    }

    async fn list_owned(&self, owner_id: UserId) -> Result<Vec<ModelRecord>, DomainError> {
        let records = self.records.read().await;

        let mut owned: Vec<ModelRecord> = records
            .values()
            .filter(|r| r.owner_id() == owner_id)
            .cloned()
            .collect();
        owned.sort_by_key(|r| r.id().value());

        Ok(owned)
    }

    async fn update(
        &self,
        record: &ModelRecord,
        expected_version: i32,
    ) -> Result<bool, DomainError> {
        let mut records = self.records.write().await;

        match records.get(&record.id().value()) {
            Some(existing)
                if existing.owner_id() == record.owner_id()
                    && existing.version() == expected_version =>
            {
                records.insert(record.id().value(), record.clone());
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete(&self, id: ModelId, owner_id: UserId) -> Result<bool, DomainError> {
        let mut records = self.records.write().await;

        match records.get(&id.value()) {
            Some(existing) if existing.owner_id() == owner_id => {
                records.remove(&id.value());
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
