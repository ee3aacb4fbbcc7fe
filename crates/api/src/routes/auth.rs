//! User registration and session routes.

use std::sync::Arc;

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use crate::{AppState, error::ApiResult};
use bizdesk_core::auth::{CreateUserInput, UserService};
use bizdesk_db::UserRepository;
use bizdesk_shared::auth::{LoginRequest, LoginResponse, UserInfo};

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(create_user))
        .route("/sessions", post(create_session))
}

/// Request body for registering a user.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Display name.
    #[validate(length(max = 255, message = "Name is too long!"))]
    pub name: String,
    /// Login email.
    #[validate(email(message = "Email is invalid!"))]
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

fn service(state: &AppState) -> UserService<UserRepository> {
    UserService::new(
        Arc::new(UserRepository::new((*state.db).clone())),
        state.jwt_service.clone(),
    )
}

/// POST /users - Register a regular user.
///
/// Administrators are only created by the seeder.
async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<UserInfo>)> {
    payload.validate()?;

    let user = service(&state)
        .create_user(CreateUserInput {
            name: payload.name,
            email: payload.email,
            password: payload.password,
            is_admin: false,
        })
        .await?;

    info!(user_id = %user.id, "User registered");
    Ok((StatusCode::CREATED, Json(UserInfo::from(&user))))
}

/// POST /sessions - Exchange email and password for an access token.
async fn create_session(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let response = service(&state)
        .authenticate(&payload.email, &payload.password)
        .await?;

    info!(user_id = %response.user.id, "Session created");
    Ok(Json(response))
}
