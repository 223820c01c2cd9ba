//! Prediction log endpoints

use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, PredictionResponse};
use crate::domain::model::ModelId;
use crate::domain::prediction::NewPrediction;

/// Record a prediction against one of the caller's models
///
/// POST /v1/models/{model_id}/predictions
///
/// The entry is stamped with the model's current version.
pub async fn record_prediction(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(model_id): Path<i64>,
    Json(prediction): Json<NewPrediction>,
) -> Result<(StatusCode, Json<PredictionResponse>), ApiError> {
    let record = state
        .prediction_service
        .record(user.id(), ModelId::new(model_id), prediction)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(PredictionResponse::from_record(&record)),
    ))
}

/// List predictions recorded against one of the caller's models
///
/// GET /v1/models/{model_id}/predictions
pub async fn list_predictions(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(model_id): Path<i64>,
) -> Result<Json<Vec<PredictionResponse>>, ApiError> {
    let records = state
        .prediction_service
        .list(user.id(), ModelId::new(model_id))
        .await?;

    Ok(Json(
        records.iter().map(PredictionResponse::from_record).collect(),
    ))
}
