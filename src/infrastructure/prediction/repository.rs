//! In-memory prediction log for tests and local development

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::model::ModelId;
use crate::domain::prediction::{
    NewPrediction, PredictionId, PredictionRecord, PredictionRepository,
};
use crate::domain::DomainError;

/// In-memory prediction repository keyed by prediction id
#[derive(Debug, Default)]
pub struct InMemoryPredictionRepository {
    records: Arc<RwLock<HashMap<i64, PredictionRecord>>>,
    next_id: AtomicI64,
}

impl InMemoryPredictionRepository {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl PredictionRepository for InMemoryPredictionRepository {
    async fn append(
        &self,
        model_id: ModelId,
        version: i32,
        prediction: NewPrediction,
    ) -> Result<PredictionRecord, DomainError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let record = PredictionRecord::new(
            PredictionId::new(id),
            model_id,
            version,
            prediction.input,
            prediction.output,
        );

        let mut records = self.records.write().await;
        records.insert(id, record.clone());

        Ok(record)
    }

    async fn list_for_model(
        &self,
        model_id: ModelId,
    ) -> Result<Vec<PredictionRecord>, DomainError> {
        let records = self.records.read().await;

        let mut found: Vec<PredictionRecord> = records
            .values()
            .filter(|r| r.model_id() == model_id)
            .cloned()
            .collect();
        found.sort_by_key(|r| r.id().value());

        Ok(found)
    }
}
