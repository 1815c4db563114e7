use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};

use super::user::extract_bearer_token;
use crate::{
    domain::auth::entity::AuthUser,
    presentation::http::{errors::AppError, state::AppState},
};

/// The authorized admin, inserted by [`require_admin`].
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthUser);

pub async fn require_admin(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_bearer_token(req.headers()).ok_or(AppError::Unauthorized)?;
    let admin = state.auth.authorize_admin(&token).await?;

    req.extensions_mut().insert(AdminUser(admin));

    Ok(next.run(req).await)
}

impl<S: Send + Sync> FromRequestParts<S> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AdminUser>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}
