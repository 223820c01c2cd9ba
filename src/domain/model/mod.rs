//! Model record domain: the ownership-scoped, versioned metadata store core

mod entity;
mod repository;
mod validation;

pub use entity::{ModelId, ModelPatch, ModelRecord, NewModelRecord, INITIAL_MODEL_VERSION};
pub use repository::ModelRepository;
pub use validation::{validate_model_patch, validate_new_model, ModelValidationError};
