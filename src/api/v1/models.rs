//! Model record endpoints

use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::debug;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{
    ApiError, CreateModelRequest, CreateModelResponse, DeleteModelResponse, Json, ModelResponse,
    UpdateModelResponse,
};
use crate::domain::model::{ModelId, ModelPatch};

/// Register a new model record
///
/// POST /v1/models
pub async fn create_model(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(request): Json<CreateModelRequest>,
) -> Result<(StatusCode, Json<CreateModelResponse>), ApiError> {
    let record = state
        .model_service
        .create(user.id(), request.into_fields())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateModelResponse {
            model_id: record.id().value(),
        }),
    ))
}

/// List the caller's model records
///
/// GET /v1/models
pub async fn list_models(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<Vec<ModelResponse>>, ApiError> {
    let records = state.model_service.list(user.id()).await?;

    debug!(count = records.len(), "Listed models");

    Ok(Json(records.iter().map(ModelResponse::from_record).collect()))
}

/// Get one of the caller's model records
///
/// GET /v1/models/{model_id}
pub async fn get_model(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(model_id): Path<i64>,
) -> Result<Json<ModelResponse>, ApiError> {
    let record = state
        .model_service
        .get(user.id(), ModelId::new(model_id))
        .await?;

    Ok(Json(ModelResponse::from_record(&record)))
}

/// Partially update one of the caller's model records
///
/// PATCH /v1/models/{model_id}
///
/// Absent fields keep their stored values; the version moves up by one.
pub async fn update_model(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(model_id): Path<i64>,
    Json(patch): Json<ModelPatch>,
) -> Result<Json<UpdateModelResponse>, ApiError> {
    let record = state
        .model_service
        .update(user.id(), ModelId::new(model_id), patch)
        .await?;

    Ok(Json(UpdateModelResponse {
        id: record.id().value(),
        model_version: record.version(),
    }))
}

/// Delete one of the caller's model records
///
/// DELETE /v1/models/{model_id}
pub async fn delete_model(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(model_id): Path<i64>,
) -> Result<Json<DeleteModelResponse>, ApiError> {
    state
        .model_service
        .delete(user.id(), ModelId::new(model_id))
        .await?;

    Ok(Json(DeleteModelResponse {
        detail: format!("Model {} deleted", model_id),
    }))
}
