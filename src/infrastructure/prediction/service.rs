//! Prediction service - append-only logging tied to owned models

use std::sync::Arc;

use tracing::info;

use crate::domain::model::{ModelId, ModelRepository};
use crate::domain::prediction::{NewPrediction, PredictionRecord, PredictionRepository};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Prediction service. Both operations resolve the referenced model
/// through the caller-scoped lookup before touching the log, so callers
/// can only record and read predictions against their own models.
#[derive(Debug)]
pub struct PredictionService<P: PredictionRepository, M: ModelRepository> {
    repository: Arc<P>,
    models: Arc<M>,
}

impl<P: PredictionRepository, M: ModelRepository> PredictionService<P, M> {
    /// Create a new prediction service
    pub fn new(repository: Arc<P>, models: Arc<M>) -> Self {
        Self { repository, models }
    }

    /// Append a prediction against a model owned by the caller, stamped
    /// with the model's current version
    pub async fn record(
        &self,
        caller_id: UserId,
        model_id: ModelId,
        prediction: NewPrediction,
    ) -> Result<PredictionRecord, DomainError> {
        let model = self
            .models
            .find_owned(model_id, caller_id)
            .await?
            .ok_or_else(|| model_not_found(model_id))?;

        let record = self
            .repository
            .append(model_id, model.version(), prediction)
            .await?;

        info!(
            prediction_id = %record.id(),
            model_id = %model_id,
            version = record.version(),
            "Prediction recorded"
        );

        Ok(record)
    }

    /// All predictions for a model owned by the caller
    pub async fn list(
        &self,
        caller_id: UserId,
        model_id: ModelId,
    ) -> Result<Vec<PredictionRecord>, DomainError> {
        self.models
            .find_owned(model_id, caller_id)
            .await?
            .ok_or_else(|| model_not_found(model_id))?;

        self.repository.list_for_model(model_id).await
    }
}

fn model_not_found(id: ModelId) -> DomainError {
    DomainError::not_found(format!("Model with id {} does not exist", id))
}
