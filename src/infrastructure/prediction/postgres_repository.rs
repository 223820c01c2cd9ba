//! PostgreSQL prediction log repository implementation

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{PgPool, Row};

use crate::domain::model::ModelId;
use crate::domain::prediction::{
    NewPrediction, PredictionId, PredictionRecord, PredictionRepository,
};
use crate::domain::DomainError;

const SELECT_COLUMNS: &str = "id, model_id, version, input, output, timestamp";

/// PostgreSQL implementation of PredictionRepository.
///
/// The predictions table carries no foreign key to models; entries stay
/// behind as an audit trail when a model is deleted.
#[derive(Debug, Clone)]
pub struct PostgresPredictionRepository {
    pool: PgPool,
}

impl PostgresPredictionRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PredictionRepository for PostgresPredictionRepository {
    async fn append(
        &self,
        model_id: ModelId,
        version: i32,
        prediction: NewPrediction,
    ) -> Result<PredictionRecord, DomainError> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO predictions (model_id, version, input, output, timestamp)
            VALUES ($1, $2, $3, $4, NOW())
            RETURNING {SELECT_COLUMNS}
            "#
        ))
        .bind(model_id.value())
        .bind(version)
        .bind(Json(&prediction.input))
        .bind(Json(&prediction.output))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to record prediction: {}", e)))?;

        Ok(row_to_record(&row))
    }

    async fn list_for_model(
        &self,
        model_id: ModelId,
    ) -> Result<Vec<PredictionRecord>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM predictions WHERE model_id = $1 ORDER BY id"
        ))
        .bind(model_id.value())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list predictions: {}", e)))?;

        Ok(rows.iter().map(row_to_record).collect())
    }
}

fn row_to_record(row: &sqlx::postgres::PgRow) -> PredictionRecord {
    let id: i64 = row.get("id");
    let model_id: i64 = row.get("model_id");
    let version: i32 = row.get("version");
    let timestamp: chrono::DateTime<chrono::Utc> = row.get("timestamp");

    let Json(input): Json<HashMap<String, serde_json::Value>> = row.get("input");
    let Json(output): Json<HashMap<String, serde_json::Value>> = row.get("output");

    PredictionRecord::from_parts(
        PredictionId::new(id),
        ModelId::new(model_id),
        version,
        input,
        output,
        timestamp,
    )
}
