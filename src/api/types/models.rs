//! Wire types for the model record and prediction endpoints

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::model::{ModelRecord, NewModelRecord};
use crate::domain::prediction::PredictionRecord;

/// Model registration payload.
///
/// A caller-supplied `model_version` is accepted for compatibility but
/// ignored; versions are assigned by the store and only ever move through
/// updates.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateModelRequest {
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub pre_processing_order: Vec<String>,
    #[serde(default)]
    pub post_processing_order: Vec<String>,
    pub predict_function: String,
    #[serde(default)]
    pub storage_options: HashMap<String, String>,
    #[serde(default)]
    pub container_options: HashMap<String, String>,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub input_schema: HashMap<String, String>,
    #[serde(default)]
    pub output_schema: HashMap<String, String>,
    #[serde(default)]
    pub model_version: Option<i32>,
}

impl CreateModelRequest {
    pub fn into_fields(self) -> NewModelRecord {
        NewModelRecord {
            tags: self.tags,
            pre_processing_order: self.pre_processing_order,
            post_processing_order: self.post_processing_order,
            predict_function: self.predict_function,
            storage_options: self.storage_options,
            container_options: self.container_options,
            metadata: self.metadata,
            input_schema: self.input_schema,
            output_schema: self.output_schema,
        }
    }
}

/// Response to a successful model registration
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateModelResponse {
    pub model_id: i64,
}

/// Response to a successful partial update
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateModelResponse {
    pub id: i64,
    pub model_version: i32,
}

/// Response to a successful deletion
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteModelResponse {
    pub detail: String,
}

/// Full model record representation
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelResponse {
    pub id: i64,
    pub tags: String,
    pub pre_processing_order: Vec<String>,
    pub post_processing_order: Vec<String>,
    pub predict_function: String,
    pub storage_options: HashMap<String, String>,
    pub container_options: HashMap<String, String>,
    pub metadata: HashMap<String, serde_json::Value>,
    pub model_version: i32,
    pub input_schema: HashMap<String, String>,
    pub output_schema: HashMap<String, String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ModelResponse {
    pub fn from_record(record: &ModelRecord) -> Self {
        Self {
            id: record.id().value(),
            tags: record.tags().to_string(),
            pre_processing_order: record.pre_processing_order().to_vec(),
            post_processing_order: record.post_processing_order().to_vec(),
            predict_function: record.predict_function().to_string(),
            storage_options: record.storage_options().clone(),
            container_options: record.container_options().clone(),
            metadata: record.metadata().clone(),
            model_version: record.version(),
            input_schema: record.input_schema().clone(),
            output_schema: record.output_schema().clone(),
            created_at: record.created_at(),
            updated_at: record.updated_at(),
        }
    }
}

/// Prediction log entry representation
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub id: i64,
    pub model_id: i64,
    pub version: i32,
    pub input: HashMap<String, serde_json::Value>,
    pub output: HashMap<String, serde_json::Value>,
    pub timestamp: DateTime<Utc>,
}

impl PredictionResponse {
    pub fn from_record(record: &PredictionRecord) -> Self {
        Self {
            id: record.id().value(),
            model_id: record.model_id().value(),
            version: record.version(),
            input: record.input().clone(),
            output: record.output().clone(),
            timestamp: record.timestamp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_ignores_supplied_version() {
        let request: CreateModelRequest = serde_json::from_str(
            r#"{"tags": "v1", "predict_function": "f", "model_version": 99}"#,
        )
        .unwrap();

        assert_eq!(request.model_version, Some(99));

        // Version is not part of the stored fields
        let fields = request.into_fields();
        assert_eq!(fields.tags, "v1");
        assert_eq!(fields.predict_function, "f");
    }

    #[test]
    fn test_create_request_defaults_optional_fields() {
        let request: CreateModelRequest =
            serde_json::from_str(r#"{"predict_function": "f"}"#).unwrap();

        assert!(request.tags.is_empty());
        assert!(request.pre_processing_order.is_empty());
        assert!(request.storage_options.is_empty());
    }
}
