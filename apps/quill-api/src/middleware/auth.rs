//! Authentication extractors.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use std::future::{Ready, ready};
use std::sync::Arc;

use quill_core::ports::TokenService;

use super::error::ApiError;

/// Authenticated caller identity, decoded from the bearer token.
///
/// Use this in handlers to require authentication; requests without a valid
/// token are rejected before the handler runs.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: i64,
    pub username: String,
}

/// Optional identity: a missing Authorization header means an anonymous
/// request, but a present-and-broken one is still an error.
pub struct MaybeIdentity(pub Option<Identity>);

impl MaybeIdentity {
    pub fn user_id(&self) -> Option<i64> {
        self.0.as_ref().map(|i| i.user_id)
    }
}

fn extract_identity(req: &HttpRequest) -> Result<Option<Identity>, ApiError> {
    // No header at all: anonymous.
    let Some(auth_header) = req.headers().get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let token_service = req
        .app_data::<web::Data<Arc<dyn TokenService>>>()
        .ok_or_else(|| {
            tracing::error!("TokenService not found in app data");
            ApiError::Internal("token service not configured".into())
        })?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::AuthorizationHeader("Invalid authorization header.".into()))?;

    let token = auth_str.strip_prefix("Bearer ").ok_or_else(|| {
        ApiError::AuthorizationHeader("Authorization header must use the Bearer scheme.".into())
    })?;

    let claims = token_service.validate_token(token)?;

    Ok(Some(Identity {
        user_id: claims.user_id,
        username: claims.username,
    }))
}

impl FromRequest for Identity {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract_identity(req).and_then(|identity| {
            identity.ok_or_else(|| {
                ApiError::AuthorizationHeader(
                    "You must be logged in to perform this action.".into(),
                )
            })
        }))
    }
}

impl FromRequest for MaybeIdentity {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract_identity(req).map(MaybeIdentity))
    }
}
