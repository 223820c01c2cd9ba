//! Prediction record entity: an append-only log entry tied to a model

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::model::ModelId;

/// Numeric prediction identifier, assigned by the store on creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PredictionId(i64);

impl PredictionId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for PredictionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Caller-supplied input/output pair for a prediction log entry
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewPrediction {
    pub input: HashMap<String, serde_json::Value>,
    pub output: HashMap<String, serde_json::Value>,
}

/// An immutable prediction log entry. Never updated after creation; its
/// lifetime is independent of the model it references.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRecord {
    id: PredictionId,
    model_id: ModelId,
    /// The model version that was active at prediction time
    version: i32,
    input: HashMap<String, serde_json::Value>,
    output: HashMap<String, serde_json::Value>,
    /// Creation time, set once
    timestamp: DateTime<Utc>,
}

impl PredictionRecord {
    pub fn new(
        id: PredictionId,
        model_id: ModelId,
        version: i32,
        input: HashMap<String, serde_json::Value>,
        output: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self {
            id,
            model_id,
            version,
            input,
            output,
            timestamp: Utc::now(),
        }
    }

    /// Rebuild a record from stored values, keeping the original timestamp
    pub fn from_parts(
        id: PredictionId,
        model_id: ModelId,
        version: i32,
        input: HashMap<String, serde_json::Value>,
        output: HashMap<String, serde_json::Value>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            model_id,
            version,
            input,
            output,
            timestamp,
        }
    }

    pub fn id(&self) -> PredictionId {
        self.id
    }

    pub fn model_id(&self) -> ModelId {
        self.model_id
    }

    pub fn version(&self) -> i32 {
        self.version
    }

    pub fn input(&self) -> &HashMap<String, serde_json::Value> {
        &self.input
    }

    pub fn output(&self) -> &HashMap<String, serde_json::Value> {
        &self.output
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prediction_creation() {
        let mut input = HashMap::new();
        input.insert("x".to_string(), serde_json::json!(1.5));
        let mut output = HashMap::new();
        output.insert("y".to_string(), serde_json::json!(0.7));

        let record = PredictionRecord::new(
            PredictionId::new(1),
            ModelId::new(3),
            2,
            input.clone(),
            output.clone(),
        );

        assert_eq!(record.id().value(), 1);
        assert_eq!(record.model_id().value(), 3);
        assert_eq!(record.version(), 2);
        assert_eq!(record.input(), &input);
        assert_eq!(record.output(), &output);
    }
}
