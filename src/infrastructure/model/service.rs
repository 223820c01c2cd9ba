//! Model service - ownership-scoped lifecycle of model records

use std::sync::Arc;

use tracing::info;

use crate::domain::model::{
    validate_model_patch, validate_new_model, ModelId, ModelPatch, ModelRecord, ModelRepository,
    NewModelRecord,
};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Attempts before an update gives up under sustained write contention
const UPDATE_RETRY_LIMIT: usize = 3;

/// Model service for create/read/update/delete over model records.
///
/// Every operation takes the resolved caller identity; anything but create
/// goes through the scoped ownership lookup, so records of other users are
/// reported as missing rather than forbidden.
#[derive(Debug)]
pub struct ModelService<R: ModelRepository> {
    repository: Arc<R>,
}

impl<R: ModelRepository> ModelService<R> {
    /// Create a new model service
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Register a new model record owned by the caller
    pub async fn create(
        &self,
        caller_id: UserId,
        fields: NewModelRecord,
    ) -> Result<ModelRecord, DomainError> {
        validate_new_model(&fields).map_err(|e| DomainError::validation(e.to_string()))?;

        let record = self.repository.create(caller_id, fields).await?;

        info!(model_id = %record.id(), caller_id = %caller_id, "Model created");

        Ok(record)
    }

    /// Get a model record owned by the caller
    pub async fn get(&self, caller_id: UserId, id: ModelId) -> Result<ModelRecord, DomainError> {
        self.find_owned(caller_id, id).await
    }

    /// All model records owned by the caller; empty when there are none
    pub async fn list(&self, caller_id: UserId) -> Result<Vec<ModelRecord>, DomainError> {
        self.repository.list_owned(caller_id).await
    }

    /// Apply a partial update to a model record owned by the caller,
    /// bumping its version by exactly one
    pub async fn update(
        &self,
        caller_id: UserId,
        id: ModelId,
        patch: ModelPatch,
    ) -> Result<ModelRecord, DomainError> {
        validate_model_patch(&patch).map_err(|e| DomainError::validation(e.to_string()))?;

        // Compare-and-set loop: each attempt re-reads the record, patches
        // it, and writes guarded by the version it read. A lost race
        // re-reads so every successful update advances the version by
        // exactly one. Deletion between read and write surfaces as
        // NotFound on the next read.
        for _ in 0..UPDATE_RETRY_LIMIT {
            let mut record = self.find_owned(caller_id, id).await?;
            let read_version = record.version();
            record.apply_patch(patch.clone());

            if self.repository.update(&record, read_version).await? {
                info!(
                    model_id = %id,
                    caller_id = %caller_id,
                    version = record.version(),
                    "Model updated"
                );

                return Ok(record);
            }
        }

        Err(DomainError::storage(format!(
            "Update contention on model {}",
            id
        )))
    }

    /// Delete a model record owned by the caller. Predictions logged
    /// against the record are kept as an audit trail.
    pub async fn delete(&self, caller_id: UserId, id: ModelId) -> Result<(), DomainError> {
        self.find_owned(caller_id, id).await?;

        if !self.repository.delete(id, caller_id).await? {
            return Err(not_found(id));
        }

        info!(model_id = %id, caller_id = %caller_id, "Model deleted");

        Ok(())
    }

    /// Scoped ownership lookup shared by the read, update and delete paths.
    /// An id that exists under another owner yields the same error as one
    /// that does not exist at all.
    async fn find_owned(
        &self,
        caller_id: UserId,
        id: ModelId,
    ) -> Result<ModelRecord, DomainError> {
        self.repository
            .find_owned(id, caller_id)
            .await?
            .ok_or_else(|| not_found(id))
    }
}

fn not_found(id: ModelId) -> DomainError {
    DomainError::not_found(format!("Model with id {} does not exist", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::INITIAL_MODEL_VERSION;
    use crate::infrastructure::model::InMemoryModelRepository;

    fn create_service() -> ModelService<InMemoryModelRepository> {
        ModelService::new(Arc::new(InMemoryModelRepository::new()))
    }

    fn alice() -> UserId {
        UserId::new(1)
    }

    fn bob() -> UserId {
        UserId::new(2)
    }

    fn fields() -> NewModelRecord {
        NewModelRecord {
            tags: "v1".to_string(),
            pre_processing_order: vec!["norm".to_string()],
            post_processing_order: vec!["round".to_string()],
            predict_function: "f".to_string(),
            ..Default::default()
        }
    }

    fn patch_tags(tags: &str) -> ModelPatch {
        ModelPatch {
            tags: Some(tags.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_starts_at_baseline_version() {
        let service = create_service();

        let record = service.create(alice(), fields()).await.unwrap();

        assert_eq!(record.version(), INITIAL_MODEL_VERSION);
        assert_eq!(record.owner_id(), alice());
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_payload() {
        let service = create_service();

        let mut bad = fields();
        bad.predict_function = String::new();

        let result = service.create(alice(), bad).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_ownership_isolation() {
        let service = create_service();
        let record = service.create(alice(), fields()).await.unwrap();
        let id = record.id();

        // Read, update and delete by another user all fail identically
        let read = service.get(bob(), id).await;
        assert!(matches!(read, Err(DomainError::NotFound { .. })));

        let update = service.update(bob(), id, patch_tags("v2")).await;
        assert!(matches!(update, Err(DomainError::NotFound { .. })));

        let delete = service.delete(bob(), id).await;
        assert!(matches!(delete, Err(DomainError::NotFound { .. })));

        // The record is untouched for its owner
        let kept = service.get(alice(), id).await.unwrap();
        assert_eq!(kept.tags(), "v1");
        assert_eq!(kept.version(), INITIAL_MODEL_VERSION);
    }

    #[tokio::test]
    async fn test_not_found_matches_foreign_owner_error() {
        let service = create_service();
        let record = service.create(alice(), fields()).await.unwrap();

        let missing = service.get(alice(), ModelId::new(999)).await.unwrap_err();
        let foreign = service.get(bob(), record.id()).await.unwrap_err();

        // Collapsed signal: missing id and foreign-owned id are identical
        assert_eq!(
            format!("{}", missing).replace("999", "X"),
            format!("{}", foreign).replace(&record.id().to_string(), "X")
        );
    }

    #[tokio::test]
    async fn test_version_monotonicity() {
        let service = create_service();
        let record = service.create(alice(), fields()).await.unwrap();
        let id = record.id();

        for n in 1..=5 {
            let updated = service
                .update(alice(), id, patch_tags(&format!("v{}", n)))
                .await
                .unwrap();
            assert_eq!(updated.version(), INITIAL_MODEL_VERSION + n);
        }
    }

    #[derive(Debug, Default)]
    struct ContendedRepository {
        inner: InMemoryModelRepository,
    }

    #[async_trait::async_trait]
    impl ModelRepository for ContendedRepository {
        async fn create(
            &self,
            owner_id: UserId,
            fields: NewModelRecord,
        ) -> Result<ModelRecord, DomainError> {
            self.inner.create(owner_id, fields).await
        }

        async fn find_owned(
            &self,
            id: ModelId,
            owner_id: UserId,
        ) -> Result<Option<ModelRecord>, DomainError> {
            self.inner.find_owned(id, owner_id).await
        }

        async fn list_owned(&self, owner_id: UserId) -> Result<Vec<ModelRecord>, DomainError> {
            self.inner.list_owned(owner_id).await
        }

        // Every write loses the race
        async fn update(
            &self,
            _record: &ModelRecord,
            _expected_version: i32,
        ) -> Result<bool, DomainError> {
            Ok(false)
        }

        async fn delete(&self, id: ModelId, owner_id: UserId) -> Result<bool, DomainError> {
            self.inner.delete(id, owner_id).await
        }
    }

    #[tokio::test]
    async fn test_update_under_sustained_contention_fails_loudly() {
        let repository = Arc::new(ContendedRepository::default());
        let service = ModelService::new(repository.clone());
        let record = service.create(alice(), fields()).await.unwrap();

        // The update never claims success, so no increment can be lost
        let result = service.update(alice(), record.id(), patch_tags("v2")).await;
        assert!(matches!(result, Err(DomainError::Storage { .. })));

        let kept = service.get(alice(), record.id()).await.unwrap();
        assert_eq!(kept.version(), INITIAL_MODEL_VERSION);
        assert_eq!(kept.tags(), "v1");
    }

    #[tokio::test]
    async fn test_partial_update_is_non_destructive() {
        let service = create_service();
        let record = service.create(alice(), fields()).await.unwrap();
        let id = record.id();

        let updated = service.update(alice(), id, patch_tags("v2")).await.unwrap();

        assert_eq!(updated.tags(), "v2");
        assert_eq!(updated.pre_processing_order(), record.pre_processing_order());
        assert_eq!(
            updated.post_processing_order(),
            record.post_processing_order()
        );
        assert_eq!(updated.predict_function(), record.predict_function());
        assert_eq!(updated.storage_options(), record.storage_options());
        assert_eq!(updated.metadata(), record.metadata());
        assert_eq!(updated.input_schema(), record.input_schema());
        assert_eq!(updated.created_at(), record.created_at());
    }

    #[tokio::test]
    async fn test_delete_then_read_fails() {
        let service = create_service();
        let record = service.create(alice(), fields()).await.unwrap();
        let id = record.id();

        service.delete(alice(), id).await.unwrap();

        let read = service.get(alice(), id).await;
        assert!(matches!(read, Err(DomainError::NotFound { .. })));

        // A second delete also reports not found
        let second = service.delete(alice(), id).await;
        assert!(matches!(second, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_list_returns_empty_for_no_records() {
        let service = create_service();

        let records = service.list(alice()).await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_list_only_owned_records() {
        let service = create_service();
        service.create(alice(), fields()).await.unwrap();
        service.create(bob(), fields()).await.unwrap();
        service.create(alice(), fields()).await.unwrap();

        let owned = service.list(alice()).await.unwrap();
        assert_eq!(owned.len(), 2);
        assert!(owned.iter().all(|r| r.owner_id() == alice()));
    }

    #[tokio::test]
    async fn test_lifecycle_scenario() {
        let service = create_service();

        // alice creates a model
        let created = service.create(alice(), fields()).await.unwrap();
        assert_eq!(created.id().value(), 1);

        // Patch only the tags
        let updated = service
            .update(alice(), created.id(), patch_tags("v2"))
            .await
            .unwrap();
        assert_eq!(updated.id().value(), 1);
        assert_eq!(updated.version(), INITIAL_MODEL_VERSION + 1);

        // alice reads back the patched record
        let read = service.get(alice(), created.id()).await.unwrap();
        assert_eq!(read.tags(), "v2");
        assert_eq!(read.pre_processing_order(), ["norm".to_string()].as_slice());

        // bob gets a 404-shaped error
        let foreign = service.get(bob(), created.id()).await;
        assert!(matches!(foreign, Err(DomainError::NotFound { .. })));
    }
}
