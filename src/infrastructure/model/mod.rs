//! Model infrastructure: repositories and service

mod postgres_repository;
mod repository;
mod service;

pub use postgres_repository::PostgresModelRepository;
pub use repository::InMemoryModelRepository;
pub use service::ModelService;
