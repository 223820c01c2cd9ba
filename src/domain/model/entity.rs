//! Model record entity: versioned metadata describing one ML model

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::user::UserId;

/// Version assigned to a model record at creation, before any update.
/// Callers never set the version directly.
pub const INITIAL_MODEL_VERSION: i32 = 0;

/// Numeric model record identifier, assigned by the store on creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelId(i64);

impl ModelId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for ModelId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ModelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fields supplied by the caller when registering a model. The store assigns
/// the id, owner and version.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewModelRecord {
    pub tags: String,
    pub pre_processing_order: Vec<String>,
    pub post_processing_order: Vec<String>,
    pub predict_function: String,
    pub storage_options: HashMap<String, String>,
    pub container_options: HashMap<String, String>,
    pub metadata: HashMap<String, serde_json::Value>,
    pub input_schema: HashMap<String, String>,
    pub output_schema: HashMap<String, String>,
}

/// Partial update for a model record. Only fields that are `Some` are
/// applied; absent fields leave the stored value untouched. Updatable
/// fields are enumerated explicitly - the owner and version are not among
/// them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelPatch {
    pub tags: Option<String>,
    pub pre_processing_order: Option<Vec<String>>,
    pub post_processing_order: Option<Vec<String>>,
    pub predict_function: Option<String>,
    pub storage_options: Option<HashMap<String, String>>,
    pub container_options: Option<HashMap<String, String>>,
    pub metadata: Option<HashMap<String, serde_json::Value>>,
    pub input_schema: Option<HashMap<String, String>>,
    pub output_schema: Option<HashMap<String, String>>,
}

/// A versioned metadata record for one ML model, owned by a single user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRecord {
    id: ModelId,
    /// Owning user; immutable after creation
    owner_id: UserId,
    tags: String,
    pre_processing_order: Vec<String>,
    post_processing_order: Vec<String>,
    predict_function: String,
    storage_options: HashMap<String, String>,
    container_options: HashMap<String, String>,
    metadata: HashMap<String, serde_json::Value>,
    /// Incremented by exactly one on every successful update
    version: i32,
    input_schema: HashMap<String, String>,
    output_schema: HashMap<String, String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ModelRecord {
    /// Create a record from caller-supplied fields at the baseline version
    pub fn new(id: ModelId, owner_id: UserId, fields: NewModelRecord) -> Self {
        let now = Utc::now();

        Self {
            id,
            owner_id,
            tags: fields.tags,
            pre_processing_order: fields.pre_processing_order,
            post_processing_order: fields.post_processing_order,
            predict_function: fields.predict_function,
            storage_options: fields.storage_options,
            container_options: fields.container_options,
            metadata: fields.metadata,
            version: INITIAL_MODEL_VERSION,
            input_schema: fields.input_schema,
            output_schema: fields.output_schema,
            created_at: now,
            updated_at: now,
        }
    }

    /// Restore a record from persisted state
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: ModelId,
        owner_id: UserId,
        fields: NewModelRecord,
        version: i32,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner_id,
            tags: fields.tags,
            pre_processing_order: fields.pre_processing_order,
            post_processing_order: fields.post_processing_order,
            predict_function: fields.predict_function,
            storage_options: fields.storage_options,
            container_options: fields.container_options,
            metadata: fields.metadata,
            version,
            input_schema: fields.input_schema,
            output_schema: fields.output_schema,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> ModelId {
        self.id
    }

    pub fn owner_id(&self) -> UserId {
        self.owner_id
    }

    pub fn tags(&self) -> &str {
        &self.tags
    }

    pub fn pre_processing_order(&self) -> &[String] {
        &self.pre_processing_order
    }

    pub fn post_processing_order(&self) -> &[String] {
        &self.post_processing_order
    }

    pub fn predict_function(&self) -> &str {
        &self.predict_function
    }

    pub fn storage_options(&self) -> &HashMap<String, String> {
        &self.storage_options
    }

    pub fn container_options(&self) -> &HashMap<String, String> {
        &self.container_options
    }

    pub fn metadata(&self) -> &HashMap<String, serde_json::Value> {
        &self.metadata
    }

    pub fn version(&self) -> i32 {
        self.version
    }

    pub fn input_schema(&self) -> &HashMap<String, String> {
        &self.input_schema
    }

    pub fn output_schema(&self) -> &HashMap<String, String> {
        &self.output_schema
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Apply a partial update: overwrite the fields present in the patch,
    /// leave the rest untouched, and bump the version by exactly one.
    pub fn apply_patch(&mut self, patch: ModelPatch) {
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }

        if let Some(pre) = patch.pre_processing_order {
            self.pre_processing_order = pre;
        }

        if let Some(post) = patch.post_processing_order {
            self.post_processing_order = post;
        }

        if let Some(predict_function) = patch.predict_function {
            self.predict_function = predict_function;
        }

        if let Some(storage_options) = patch.storage_options {
            self.storage_options = storage_options;
        }

        if let Some(container_options) = patch.container_options {
            self.container_options = container_options;
        }

        if let Some(metadata) = patch.metadata {
            self.metadata = metadata;
        }

        if let Some(input_schema) = patch.input_schema {
            self.input_schema = input_schema;
        }

        if let Some(output_schema) = patch.output_schema {
            self.output_schema = output_schema;
        }

        self.version += 1;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_record() -> ModelRecord {
        let fields = NewModelRecord {
            tags: "v1".to_string(),
            pre_processing_order: vec!["norm".to_string()],
            post_processing_order: vec!["round".to_string()],
            predict_function: "f".to_string(),
            ..Default::default()
        };

        ModelRecord::new(ModelId::new(1), UserId::new(10), fields)
    }

    #[test]
    fn test_new_record_starts_at_baseline_version() {
        let record = create_test_record();

        assert_eq!(record.version(), INITIAL_MODEL_VERSION);
        assert_eq!(record.id().value(), 1);
        assert_eq!(record.owner_id().value(), 10);
    }

    #[test]
    fn test_apply_patch_increments_version_by_one() {
        let mut record = create_test_record();

        record.apply_patch(ModelPatch {
            tags: Some("v2".to_string()),
            ..Default::default()
        });
        assert_eq!(record.version(), INITIAL_MODEL_VERSION + 1);

        record.apply_patch(ModelPatch::default());
        assert_eq!(record.version(), INITIAL_MODEL_VERSION + 2);
    }

    #[test]
    fn test_apply_patch_leaves_absent_fields_untouched() {
        let mut record = create_test_record();
        let before_pre = record.pre_processing_order().to_vec();
        let before_post = record.post_processing_order().to_vec();
        let before_predict = record.predict_function().to_string();

        record.apply_patch(ModelPatch {
            tags: Some("v2".to_string()),
            ..Default::default()
        });

        assert_eq!(record.tags(), "v2");
        assert_eq!(record.pre_processing_order(), before_pre.as_slice());
        assert_eq!(record.post_processing_order(), before_post.as_slice());
        assert_eq!(record.predict_function(), before_predict);
    }

    #[test]
    fn test_apply_patch_overwrites_present_fields() {
        let mut record = create_test_record();

        record.apply_patch(ModelPatch {
            pre_processing_order: Some(vec!["scale".to_string(), "norm".to_string()]),
            predict_function: Some("predict_v2".to_string()),
            ..Default::default()
        });

        assert_eq!(
            record.pre_processing_order(),
            ["scale".to_string(), "norm".to_string()].as_slice()
        );
        assert_eq!(record.predict_function(), "predict_v2");
    }

    #[test]
    fn test_patch_deserialization_partial() {
        let patch: ModelPatch = serde_json::from_str(r#"{"tags": "v2"}"#).unwrap();

        assert_eq!(patch.tags, Some("v2".to_string()));
        assert!(patch.pre_processing_order.is_none());
        assert!(patch.predict_function.is_none());
        assert!(patch.metadata.is_none());
    }
}
