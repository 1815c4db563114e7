//! One request per page: each returns everything the page renders.

use crate::{
    application::social::dto::LikeStatus,
    domain::{
        media::entity::{FileType, MediaItem, MediaStats},
        preferences::quote::{DailyQuote, quote_for_day},
        social::comment::Comment,
    },
    presentation::http::{
        errors::AppError,
        handlers::{media::MediaQuery, social::viewer_identity},
        middleware::{user::MaybeUser, visitor::VisitorId},
        state::AppState,
    },
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct HomePage {
    pub media: Vec<MediaItem>,
    /// Counts over all posts, regardless of the filter.
    pub stats: MediaStats,
    pub filter: Option<FileType>,
    pub quote: DailyQuote,
}

#[derive(Debug, Serialize)]
pub struct MediaDetailPage {
    pub media: MediaItem,
    pub likes: LikeStatus,
    pub comments: Vec<Comment>,
}

pub async fn home(
    State(state): State<AppState>,
    Query(query): Query<MediaQuery>,
) -> Result<Json<HomePage>, AppError> {
    let filter = query.filter()?;
    let all = state.media.list(None).await?;
    let stats = MediaStats::from_items(&all);
    let media = match filter {
        Some(ft) => all.into_iter().filter(|m| m.file_type == ft).collect(),
        None => all,
    };

    Ok(Json(HomePage {
        media,
        stats,
        filter,
        quote: quote_for_day(Utc::now().date_naive()),
    }))
}

pub async fn media_detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    user: MaybeUser,
    visitor: VisitorId,
) -> Result<Json<MediaDetailPage>, AppError> {
    let viewer = viewer_identity(&user, visitor);
    let (media, likes, comments) = tokio::try_join!(
        state.media.get(id),
        state.social.like_status(id, viewer),
        state.social.get_comments(id),
    )?;

    Ok(Json(MediaDetailPage {
        media,
        likes,
        comments,
    }))
}
