//! Authentication API endpoints
//!
//! Registration, token issuance and current-user info for JWT-based
//! authentication.

use axum::{
    extract::{Form, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::infrastructure::user::RegisterUserRequest;

/// Create the authentication router
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/users", post(register))
        .route("/users/me", get(get_current_user))
        .route("/token", post(token))
}

/// Registration request
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub org: String,
    pub password: String,
}

/// Token issuance form, also used by the login endpoint
#[derive(Debug, Deserialize)]
pub struct TokenForm {
    pub username: String,
    pub password: String,
}

/// Bearer token response
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// User response (safe to expose)
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub org: String,
    pub created_at: String,
}

impl UserResponse {
    fn from_user(user: &crate::domain::user::User) -> Self {
        Self {
            id: user.id().value(),
            email: user.email().to_string(),
            name: user.name().to_string(),
            org: user.org().to_string(),
            created_at: user.created_at().to_rfc3339(),
        }
    }
}

/// Register a new user
///
/// POST /auth/users
///
/// Creates the account and immediately returns a bearer token for it.
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<TokenResponse>), ApiError> {
    let user = state
        .user_service
        .register(RegisterUserRequest {
            email: request.email,
            name: request.name,
            org: request.org,
            password: request.password,
        })
        .await?;

    let access_token = state.jwt_service.generate(&user)?;

    Ok((
        StatusCode::CREATED,
        Json(TokenResponse {
            access_token,
            token_type: state.jwt_service.token_type().to_string(),
        }),
    ))
}

/// Exchange credentials for a bearer token
///
/// POST /auth/token
///
/// Accepts a form-encoded username (the email) and password. Unknown
/// email and wrong password are indistinguishable to the caller.
pub async fn token(
    State(state): State<AppState>,
    Form(form): Form<TokenForm>,
) -> Result<Json<TokenResponse>, ApiError> {
    let user = state
        .user_service
        .authenticate(&form.username, &form.password)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid Credentials"))?;

    let access_token = state.jwt_service.generate(&user)?;

    Ok(Json(TokenResponse {
        access_token,
        token_type: state.jwt_service.token_type().to_string(),
    }))
}

/// Get current authenticated user
///
/// GET /auth/users/me
pub async fn get_current_user(
    RequireUser(user): RequireUser,
) -> Result<Json<UserResponse>, ApiError> {
    Ok(Json(UserResponse::from_user(&user)))
}
