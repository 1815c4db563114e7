use crate::{
    domain::media::entity::{FileType, MediaItem},
    presentation::http::{errors::AppError, state::AppState},
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Default, Deserialize)]
pub struct MediaQuery {
    pub file_type: Option<String>,
}

impl MediaQuery {
    /// `None` for a missing, blank or `all` filter.
    pub fn filter(&self) -> Result<Option<FileType>, AppError> {
        match self.file_type.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) if raw.eq_ignore_ascii_case("all") => Ok(None),
            Some(raw) => Ok(Some(raw.parse()?)),
        }
    }
}

pub async fn list_media(
    State(state): State<AppState>,
    Query(query): Query<MediaQuery>,
) -> Result<Json<Vec<MediaItem>>, AppError> {
    let items = state.media.list(query.filter()?).await?;
    Ok(Json(items))
}

pub async fn get_media(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MediaItem>, AppError> {
    Ok(Json(state.media.get(id).await?))
}
