//! Prediction infrastructure: repositories and service

mod postgres_repository;
mod repository;
mod service;

pub use postgres_repository::PostgresPredictionRepository;
pub use repository::InMemoryPredictionRepository;
pub use service::PredictionService;
