//! PostgreSQL model record repository implementation

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{PgPool, Row};

use crate::domain::model::{ModelId, ModelRecord, ModelRepository, NewModelRecord};
use crate::domain::user::UserId;
use crate::domain::DomainError;

const SELECT_COLUMNS: &str = "id, owner_id, tags, pre_processing_order, post_processing_order, \
     predict_function, storage_options, container_options, metadata, version, \
     input_schema, output_schema, created_at, updated_at";

/// PostgreSQL implementation of ModelRepository
#[derive(Debug, Clone)]
pub struct PostgresModelRepository {
    pool: PgPool,
}

impl PostgresModelRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ModelRepository for PostgresModelRepository {
    async fn create(
        &self,
        owner_id: UserId,
        fields: NewModelRecord,
    ) -> Result<ModelRecord, DomainError> {
        let record = ModelRecord::new(ModelId::new(0), owner_id, fields);

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO models (owner_id, tags, pre_processing_order, post_processing_order,
                                predict_function, storage_options, container_options, metadata,
                                version, input_schema, output_schema, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING {SELECT_COLUMNS}
            "#
        ))
        .bind(owner_id.value())
        .bind(record.tags())
        .bind(record.pre_processing_order())
        .bind(record.post_processing_order())
        .bind(record.predict_function())
        .bind(Json(record.storage_options()))
        .bind(Json(record.container_options()))
        .bind(Json(record.metadata()))
        .bind(record.version())
        .bind(Json(record.input_schema()))
        .bind(Json(record.output_schema()))
        .bind(record.created_at())
        .bind(record.updated_at())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create model: {}", e)))?;

        Ok(row_to_record(&row))
    }

    async fn find_owned(
        &self,
        id: ModelId,
        owner_id: UserId,
    ) -> Result<Option<ModelRecord>, DomainError> {
        // Single scoped query; never fetch-then-filter
        let row = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM models WHERE id = $1 AND owner_id = $2"
        ))
        .bind(id.value())
        .bind(owner_id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get model: {}", e)))?;

        Ok(row.as_ref().map(row_to_record))
    }

    async fn list_owned(&self, owner_id: UserId) -> Result<Vec<ModelRecord>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM models WHERE owner_id = $1 ORDER BY id"
        ))
        .bind(owner_id.value())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list models: {}", e)))?;

        Ok(rows.iter().map(row_to_record).collect())
    }

    async fn update(
        &self,
        record: &ModelRecord,
        expected_version: i32,
    ) -> Result<bool, DomainError> {
        // The version guard makes this a compare-and-set: a concurrent
        // update that committed first leaves rows_affected at zero
        let result = sqlx::query(
            r#"
            UPDATE models
            SET tags = $3, pre_processing_order = $4, post_processing_order = $5,
                predict_function = $6, storage_options = $7, container_options = $8,
                metadata = $9, version = $10, input_schema = $11, output_schema = $12,
                updated_at = $13
            WHERE id = $1 AND owner_id = $2 AND version = $14
            "#,
        )
        .bind(record.id().value())
        .bind(record.owner_id().value())
        .bind(record.tags())
        .bind(record.pre_processing_order())
        .bind(record.post_processing_order())
        .bind(record.predict_function())
        .bind(Json(record.storage_options()))
        .bind(Json(record.container_options()))
        .bind(Json(record.metadata()))
        .bind(record.version())
        .bind(Json(record.input_schema()))
        .bind(Json(record.output_schema()))
        .bind(record.updated_at())
        .bind(expected_version)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to update model: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: ModelId, owner_id: UserId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM models WHERE id = $1 AND owner_id = $2")
            .bind(id.value())
            .bind(owner_id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete model: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_record(row: &sqlx::postgres::PgRow) -> ModelRecord {
    let id: i64 = row.get("id");
    let owner_id: i64 = row.get("owner_id");
    let version: i32 = row.get("version");
    let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");
    let updated_at: chrono::DateTime<chrono::Utc> = row.get("updated_at");

    let Json(storage_options): Json<HashMap<String, String>> = row.get("storage_options");
    let Json(container_options): Json<HashMap<String, String>> = row.get("container_options");
    let Json(metadata): Json<HashMap<String, serde_json::Value>> = row.get("metadata");
    let Json(input_schema): Json<HashMap<String, String>> = row.get("input_schema");
    let Json(output_schema): Json<HashMap<String, String>> = row.get("output_schema");

    let fields = NewModelRecord {
        tags: row.get("tags"),
        pre_processing_order: row.get("pre_processing_order"),
        post_processing_order: row.get("post_processing_order"),
        predict_function: row.get("predict_function"),
        storage_options,
        container_options,
        metadata,
        input_schema,
        output_schema,
    };

    ModelRecord::from_parts(
        ModelId::new(id),
        UserId::new(owner_id),
        fields,
        version,
        created_at,
        updated_at,
    )
}
