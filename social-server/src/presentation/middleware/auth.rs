use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::presentation::AppState;
use crate::presentation::app_error::AppError;

/// Caller identity attached by [`jwt_auth_middleware`]. The raw token is
/// kept because follow/unfollow re-verify the actor themselves.
#[derive(Debug, Clone)]
pub(crate) struct AuthenticatedUser {
    pub(crate) profile_id: String,
    pub(crate) token: String,
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

fn bearer_token(value: &str) -> Option<&str> {
    let mut parts = value.split_whitespace();
    let scheme = parts.next()?;
    let token = parts.next()?;
    if parts.next().is_some() || !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    Some(token)
}

pub(crate) async fn jwt_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token)
        .ok_or(AppError::Unauthorized)?
        .to_string();

    let claims = state
        .jwt
        .verify_token(&token)
        .map_err(|_| AppError::Unauthorized)?;
    if claims.sub.trim().is_empty() {
        return Err(AppError::Unauthorized);
    }

    request.extensions_mut().insert(AuthenticatedUser {
        profile_id: claims.sub,
        token,
    });

    Ok(next.run(request).await)
}
