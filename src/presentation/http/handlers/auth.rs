use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
};

use crate::{
    application::auth::dto::{CurrentUserResponse, LoginRequest, LoginResponse},
    presentation::http::{
        errors::AppError,
        middleware::user::{MaybeUser, extract_bearer_token},
        state::AppState,
    },
};

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let session = state.auth.login(body).await?;
    Ok(Json(LoginResponse {
        token: session.access_token,
        token_type: session.token_type,
        expires_in: session.expires_in,
        user: session.user,
    }))
}

pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    let token = extract_bearer_token(&headers).ok_or(AppError::Unauthorized)?;
    state.auth.logout(&token).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn me(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
) -> Json<CurrentUserResponse> {
    let is_admin = user.as_ref().is_some_and(|u| state.auth.is_authorized(u));
    Json(CurrentUserResponse { user, is_admin })
}
