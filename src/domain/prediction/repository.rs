//! Prediction log repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::PredictionRecord;
use crate::domain::model::ModelId;
use crate::domain::prediction::NewPrediction;
use crate::domain::DomainError;

/// Repository trait for the append-only prediction log.
///
/// Entries are never updated or deleted through this interface; records
/// outlive the model they reference.
#[async_trait]
pub trait PredictionRepository: Send + Sync + Debug {
    /// Append a prediction for a model at the given version, assigning an id
    async fn append(
        &self,
        model_id: ModelId,
        version: i32,
        prediction: NewPrediction,
    ) -> Result<PredictionRecord, DomainError>;

    /// All predictions recorded for a model, ordered by id
    async fn list_for_model(&self, model_id: ModelId) -> Result<Vec<PredictionRecord>, DomainError>;
}
