//! Wire types shared across the API layer

pub mod error;
pub mod json;
pub mod models;

pub use error::{ApiError, ApiErrorResponse};
pub use json::Json;
pub use models::{
    CreateModelRequest, CreateModelResponse, DeleteModelResponse, ModelResponse,
    PredictionResponse, UpdateModelResponse,
};
