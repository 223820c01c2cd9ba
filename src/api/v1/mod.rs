//! v1 API endpoints

pub mod models;
pub mod predictions;

use axum::{
    routing::{get, post},
    Router,
};

use super::state::AppState;

/// Create v1 API router
pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route(
            "/models",
            post(models::create_model).get(models::list_models),
        )
        .route(
            "/models/{model_id}",
            get(models::get_model)
                .patch(models::update_model)
                .delete(models::delete_model),
        )
        .route(
            "/models/{model_id}/predictions",
            post(predictions::record_prediction).get(predictions::list_predictions),
        )
}
