//! Domain layer: entities, repository traits and validation rules

mod error;

pub mod model;
pub mod prediction;
pub mod user;

pub use error::DomainError;
pub use model::{ModelId, ModelPatch, ModelRecord, NewModelRecord, INITIAL_MODEL_VERSION};
pub use prediction::{NewPrediction, PredictionId, PredictionRecord};
pub use user::{NewUser, User, UserId};
