//! User handlers: listing, registration, and login.

use actix_web::{HttpResponse, web};
use std::sync::Arc;

use quill_core::domain::NewUser;
use quill_core::ports::{PasswordService, TokenService};
use quill_shared::dto::{AuthResponse, LoginRequest, RegisterRequest, UsersEnvelope};

use crate::middleware::error::{ApiError, ApiResult};
use crate::state::AppState;

/// GET /api/users
pub async fn list_users(state: web::Data<AppState>) -> ApiResult<HttpResponse> {
    let users = state.users.all_users().await?;

    Ok(HttpResponse::Ok().json(UsersEnvelope { users }))
}

/// POST /api/users/register
pub async fn register(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let req = body.into_inner();

    if req.username.is_empty() || req.password.is_empty() {
        return Err(ApiError::MissingCredentials);
    }

    let password_hash = password_service.hash(&req.password)?;

    let created = state
        .users
        .create_user(NewUser {
            username: req.username,
            password_hash,
            name: req.name,
            location: req.location,
        })
        .await?;

    // Conflict-ignore insert: no row back means the username is taken.
    let Some(user) = created else {
        return Err(ApiError::UserExists);
    };

    let token = token_service.generate_token(user.id, &user.username)?;

    Ok(HttpResponse::Created().json(AuthResponse {
        message: "Thanks for signing up!".to_string(),
        token,
    }))
}

/// POST /api/users/login
pub async fn login(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let req = body.into_inner();

    if req.username.is_empty() || req.password.is_empty() {
        return Err(ApiError::MissingCredentials);
    }

    let Some(user) = state.users.user_by_username(&req.username).await? else {
        return Err(ApiError::IncorrectCredentials);
    };

    if !password_service.verify(&req.password, &user.password_hash)? {
        return Err(ApiError::IncorrectCredentials);
    }

    let token = token_service.generate_token(user.id, &user.username)?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        message: "You're logged in!".to_string(),
        token,
    }))
}
