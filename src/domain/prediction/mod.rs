//! Prediction domain: immutable log entries referencing model records

mod entity;
mod repository;

pub use entity::{NewPrediction, PredictionId, PredictionRecord};
pub use repository::PredictionRepository;
