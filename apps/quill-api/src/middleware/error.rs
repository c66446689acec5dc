//! The single translation layer from domain failures to HTTP responses.
//!
//! Every failure a handler can produce is one of these variants; each maps
//! to exactly one status code and one `{name, message}` payload. Handlers
//! never build error responses by hand.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use std::fmt;

use quill_core::error::RepoError;
use quill_core::ports::AuthError;
use quill_shared::ErrorBody;

/// Application-level error type.
#[derive(Debug)]
pub enum ApiError {
    MissingCredentials,
    IncorrectCredentials,
    UserExists,
    PostCreate,
    PostNotFound,
    UnauthorizedUser(&'static str),
    AuthorizationHeader(String),
    Storage(RepoError),
    Internal(String),
}

impl ApiError {
    /// Stable machine-readable identifier carried in the payload.
    fn name(&self) -> &'static str {
        match self {
            ApiError::MissingCredentials => "MissingCredentialsError",
            ApiError::IncorrectCredentials => "IncorrectCredentialsError",
            ApiError::UserExists => "UserExistsError",
            ApiError::PostCreate => "PostCreateError",
            ApiError::PostNotFound => "PostNotFoundError",
            ApiError::UnauthorizedUser(_) => "UnauthorizedUserError",
            ApiError::AuthorizationHeader(_) => "AuthorizationHeaderError",
            ApiError::Storage(_) => "StorageError",
            ApiError::Internal(_) => "InternalServerError",
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::MissingCredentials => {
                "Please supply both a username and password.".to_string()
            }
            ApiError::IncorrectCredentials => "Username or password is incorrect.".to_string(),
            ApiError::UserExists => "A user by that username already exists.".to_string(),
            ApiError::PostCreate => "Error creating the post.".to_string(),
            ApiError::PostNotFound => "That post does not exist.".to_string(),
            ApiError::UnauthorizedUser(msg) => (*msg).to_string(),
            ApiError::AuthorizationHeader(msg) => msg.clone(),
            // Storage and internal details stay in the logs, not the payload.
            ApiError::Storage(_) => "An unexpected database error occurred.".to_string(),
            ApiError::Internal(_) => "An unexpected error occurred.".to_string(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name(), self.message())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingCredentials => StatusCode::BAD_REQUEST,
            ApiError::IncorrectCredentials => StatusCode::UNAUTHORIZED,
            ApiError::AuthorizationHeader(_) => StatusCode::UNAUTHORIZED,
            ApiError::UnauthorizedUser(_) => StatusCode::FORBIDDEN,
            ApiError::PostNotFound => StatusCode::NOT_FOUND,
            ApiError::UserExists => StatusCode::CONFLICT,
            ApiError::PostCreate => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::Storage(e) => tracing::error!(error = %e, "storage failure"),
            ApiError::Internal(msg) => tracing::error!("internal error: {msg}"),
            _ => {}
        }

        HttpResponse::build(self.status_code()).json(ErrorBody::new(self.name(), self.message()))
    }
}

impl From<RepoError> for ApiError {
    fn from(err: RepoError) -> Self {
        ApiError::Storage(err)
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::TokenExpired => {
                ApiError::AuthorizationHeader("Your token has expired. Please log in again.".into())
            }
            AuthError::InvalidToken(msg) => ApiError::AuthorizationHeader(msg),
            AuthError::MissingAuth => {
                ApiError::AuthorizationHeader("You must be logged in to perform this action.".into())
            }
            AuthError::HashingError(msg) => ApiError::Internal(msg),
        }
    }
}

/// Result type alias for handlers.
pub type ApiResult<T> = Result<T, ApiError>;
