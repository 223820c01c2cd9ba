//! Model Store API
//!
//! An authenticated metadata store for machine-learning models:
//! - User registration and JWT-based authentication
//! - Ownership-scoped CRUD over versioned model records
//! - An append-only per-model prediction log

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use tracing::info;

use api::state::AppState;
use infrastructure::auth::{JwtConfig, JwtService};
use infrastructure::model::{InMemoryModelRepository, ModelService, PostgresModelRepository};
use infrastructure::prediction::{
    InMemoryPredictionRepository, PostgresPredictionRepository, PredictionService,
};
use infrastructure::user::{
    Argon2Hasher, InMemoryUserRepository, PostgresUserRepository, UserService,
};

/// Create the application state with all services initialized.
///
/// With a database url configured, repositories run on PostgreSQL over a
/// shared connection pool; otherwise everything is held in memory.
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let jwt_secret = config
        .auth
        .jwt_secret
        .clone()
        .ok_or_else(|| anyhow::anyhow!("APP__AUTH__JWT_SECRET is required"))?;

    let jwt_service = Arc::new(JwtService::new(JwtConfig::new(
        jwt_secret,
        config.auth.token_type.clone(),
        config.auth.expiration_hours,
    )));
    let hasher = Arc::new(Argon2Hasher::new());

    match &config.database.url {
        Some(database_url) => {
            info!("Connecting to PostgreSQL...");
            let pool = sqlx::PgPool::connect(database_url)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to connect to PostgreSQL: {}", e))?;
            info!("PostgreSQL connection established");

            let user_repository = Arc::new(PostgresUserRepository::new(pool.clone()));
            let model_repository = Arc::new(PostgresModelRepository::new(pool.clone()));
            let prediction_repository = Arc::new(PostgresPredictionRepository::new(pool));

            Ok(AppState::new(
                Arc::new(UserService::new(user_repository, hasher)),
                Arc::new(ModelService::new(model_repository.clone())),
                Arc::new(PredictionService::new(
                    prediction_repository,
                    model_repository,
                )),
                jwt_service,
            ))
        }
        None => {
            info!("No database url configured, using in-memory repositories");

            let user_repository = Arc::new(InMemoryUserRepository::new());
            let model_repository = Arc::new(InMemoryModelRepository::new());
            let prediction_repository = Arc::new(InMemoryPredictionRepository::new());

            Ok(AppState::new(
                Arc::new(UserService::new(user_repository, hasher)),
                Arc::new(ModelService::new(model_repository.clone())),
                Arc::new(PredictionService::new(
                    prediction_repository,
                    model_repository,
                )),
                jwt_service,
            ))
        }
    }
}
