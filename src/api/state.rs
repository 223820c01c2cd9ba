//! Application state for shared services

use std::sync::Arc;

use crate::domain::model::{ModelId, ModelPatch, ModelRecord, ModelRepository, NewModelRecord};
use crate::domain::prediction::{NewPrediction, PredictionRecord, PredictionRepository};
use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::auth::JwtGenerator;
use crate::infrastructure::model::ModelService;
use crate::infrastructure::prediction::PredictionService;
use crate::infrastructure::user::{PasswordHasher, RegisterUserRequest, UserService};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub model_service: Arc<dyn ModelServiceTrait>,
    pub prediction_service: Arc<dyn PredictionServiceTrait>,
    pub jwt_service: Arc<dyn JwtGenerator>,
}

/// Trait for user service operations
#[async_trait::async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn register(&self, request: RegisterUserRequest) -> Result<User, DomainError>;
    async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError>;
    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError>;
}

/// Trait for model service operations
#[async_trait::async_trait]
pub trait ModelServiceTrait: Send + Sync {
    async fn create(
        &self,
        caller_id: UserId,
        fields: NewModelRecord,
    ) -> Result<ModelRecord, DomainError>;
    async fn get(&self, caller_id: UserId, id: ModelId) -> Result<ModelRecord, DomainError>;
    async fn list(&self, caller_id: UserId) -> Result<Vec<ModelRecord>, DomainError>;
    async fn update(
        &self,
        caller_id: UserId,
        id: ModelId,
        patch: ModelPatch,
    ) -> Result<ModelRecord, DomainError>;
    async fn delete(&self, caller_id: UserId, id: ModelId) -> Result<(), DomainError>;
}

/// Trait for prediction service operations
#[async_trait::async_trait]
pub trait PredictionServiceTrait: Send + Sync {
    async fn record(
        &self,
        caller_id: UserId,
        model_id: ModelId,
        prediction: NewPrediction,
    ) -> Result<PredictionRecord, DomainError>;
    async fn list(
        &self,
        caller_id: UserId,
        model_id: ModelId,
    ) -> Result<Vec<PredictionRecord>, DomainError>;
}

// Implement traits for the actual services

#[async_trait::async_trait]
impl<R: UserRepository + 'static, H: PasswordHasher + 'static> UserServiceTrait
    for UserService<R, H>
{
    async fn register(&self, request: RegisterUserRequest) -> Result<User, DomainError> {
        UserService::register(self, request).await
    }

    async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError> {
        UserService::authenticate(self, email, password).await
    }

    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError> {
        UserService::get(self, id).await
    }
}

#[async_trait::async_trait]
impl<R: ModelRepository + 'static> ModelServiceTrait for ModelService<R> {
    async fn create(
        &self,
        caller_id: UserId,
        fields: NewModelRecord,
    ) -> Result<ModelRecord, DomainError> {
        ModelService::create(self, caller_id, fields).await
    }

    async fn get(&self, caller_id: UserId, id: ModelId) -> Result<ModelRecord, DomainError> {
        ModelService::get(self, caller_id, id).await
    }

    async fn list(&self, caller_id: UserId) -> Result<Vec<ModelRecord>, DomainError> {
        ModelService::list(self, caller_id).await
    }

    async fn update(
        &self,
        caller_id: UserId,
        id: ModelId,
        patch: ModelPatch,
    ) -> Result<ModelRecord, DomainError> {
        ModelService::update(self, caller_id, id, patch).await
    }

    async fn delete(&self, caller_id: UserId, id: ModelId) -> Result<(), DomainError> {
        ModelService::delete(self, caller_id, id).await
    }
}

#[async_trait::async_trait]
impl<P: PredictionRepository + 'static, M: ModelRepository + 'static> PredictionServiceTrait
    for PredictionService<P, M>
{
    async fn record(
        &self,
        caller_id: UserId,
        model_id: ModelId,
        prediction: NewPrediction,
    ) -> Result<PredictionRecord, DomainError> {
        PredictionService::record(self, caller_id, model_id, prediction).await
    }

    async fn list(
        &self,
        caller_id: UserId,
        model_id: ModelId,
    ) -> Result<Vec<PredictionRecord>, DomainError> {
        PredictionService::list(self, caller_id, model_id).await
    }
}

impl AppState {
    /// Create new application state with provided services
    pub fn new(
        user_service: Arc<dyn UserServiceTrait>,
        model_service: Arc<dyn ModelServiceTrait>,
        prediction_service: Arc<dyn PredictionServiceTrait>,
        jwt_service: Arc<dyn JwtGenerator>,
    ) -> Self {
        Self {
            user_service,
            model_service,
            prediction_service,
            jwt_service,
        }
    }
}
