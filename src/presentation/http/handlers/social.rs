use crate::{
    application::social::dto::{AddCommentRequest, LikeStatus},
    domain::social::{
        comment::{Comment, NewComment},
        like::LikeIdentity,
    },
    infrastructure::throttle::traits::SubmitThrottle,
    presentation::http::{
        errors::AppError,
        middleware::{user::MaybeUser, visitor::VisitorId},
        state::AppState,
    },
};
use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
};
use uuid::Uuid;

fn extract_client_ip(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|s| !s.is_empty())
        })
        .unwrap_or("127.0.0.1")
        .to_string()
}

pub fn viewer_identity(user: &MaybeUser, visitor: VisitorId) -> LikeIdentity {
    LikeIdentity::for_viewer(user.user_id(), visitor.0)
}

pub async fn get_likes(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    user: MaybeUser,
    visitor: VisitorId,
) -> Result<Json<LikeStatus>, AppError> {
    let viewer = viewer_identity(&user, visitor);
    Ok(Json(state.social.like_status(id, viewer).await?))
}

pub async fn like_media(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    user: MaybeUser,
    visitor: VisitorId,
) -> Result<Json<LikeStatus>, AppError> {
    let viewer = viewer_identity(&user, visitor);
    state.social.like(id, viewer).await?;
    Ok(Json(state.social.like_status(id, viewer).await?))
}

pub async fn unlike_media(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    user: MaybeUser,
    visitor: VisitorId,
) -> Result<Json<LikeStatus>, AppError> {
    let viewer = viewer_identity(&user, visitor);
    state.social.unlike(id, viewer).await?;
    Ok(Json(state.social.like_status(id, viewer).await?))
}

pub async fn toggle_like(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    user: MaybeUser,
    visitor: VisitorId,
) -> Result<Json<LikeStatus>, AppError> {
    let viewer = viewer_identity(&user, visitor);
    Ok(Json(state.social.toggle_like(id, viewer).await?))
}

pub async fn get_comments(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Comment>>, AppError> {
    Ok(Json(state.social.get_comments(id).await?))
}

pub async fn add_comment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    user: MaybeUser,
    headers: HeaderMap,
    Json(body): Json<AddCommentRequest>,
) -> Result<(StatusCode, Json<Comment>), AppError> {
    let comment = NewComment::new(id, &body.content, user.user_id(), body.name.as_deref())?;

    let submitter = user
        .user_id()
        .map(|uid| uid.to_string())
        .unwrap_or_else(|| extract_client_ip(&headers));
    if !state
        .throttle
        .try_acquire(&format!("comment:{}:{}", id, submitter))
        .await
    {
        return Err(AppError::RateLimited);
    }

    let comment = state.social.add_comment(comment).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}
