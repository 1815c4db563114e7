use crate::{
    application::media::dto::{MediaDraftRequest, PublishUploadRequest, UploadFile, UploadResponse},
    domain::{
        auth::entity::AuthUser,
        media::entity::{FileType, MediaDraft, MediaItem, MediaStats},
    },
    presentation::http::{errors::AppError, middleware::admin::AdminUser, state::AppState},
};
use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};
use serde::Serialize;
use ts_rs::TS;
use uuid::Uuid;

#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct DashboardResponse {
    pub admin: AuthUser,
    pub stats: MediaStats,
    pub media: Vec<MediaItem>,
}

/// Fields of the dashboard's upload form.
#[derive(Debug, Default)]
struct UploadForm {
    title: Option<String>,
    description: Option<String>,
    file_type: Option<FileType>,
    file: Option<UploadFile>,
}

async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await? {
        match field.name().unwrap_or("") {
            "file" => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field.content_type().unwrap_or("").to_string();
                let data = field.bytes().await?;
                form.file = Some(UploadFile {
                    file_name,
                    content_type,
                    data,
                });
            }
            "title" => form.title = Some(field.text().await?),
            "description" => form.description = Some(field.text().await?),
            "file_type" => {
                let raw = field.text().await?;
                if !raw.trim().is_empty() {
                    form.file_type = Some(raw.parse()?);
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

pub async fn dashboard(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
) -> Result<Json<DashboardResponse>, AppError> {
    let media = state.media.list(None).await?;
    Ok(Json(DashboardResponse {
        admin,
        stats: MediaStats::from_items(&media),
        media,
    }))
}

pub async fn create_media(
    State(state): State<AppState>,
    Json(body): Json<MediaDraftRequest>,
) -> Result<(StatusCode, Json<MediaItem>), AppError> {
    let draft = MediaDraft::try_from(body)?;
    let item = state.media.create(draft).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn update_media(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<MediaDraftRequest>,
) -> Result<Json<MediaItem>, AppError> {
    let draft = MediaDraft::try_from(body)?;
    Ok(Json(state.media.update(id, draft).await?))
}

pub async fn delete_media(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.media.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Stores a file and returns its public URL without creating a post.
pub async fn upload_file(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let form = read_upload_form(multipart).await?;
    let file = form
        .file
        .ok_or_else(|| AppError::BadRequest("Missing file".into()))?;
    let file_type = form
        .file_type
        .or_else(|| FileType::from_mime(&file.content_type))
        .ok_or_else(|| AppError::ValidationError("file_type is required".into()))?;

    let url = state.media.upload_file(file, file_type).await?;
    Ok(Json(UploadResponse { url }))
}

/// Uploads a file and creates the post in one request.
pub async fn upload_and_publish(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<MediaItem>), AppError> {
    let form = read_upload_form(multipart).await?;
    let file = form
        .file
        .ok_or_else(|| AppError::BadRequest("Missing file".into()))?;

    let item = state
        .media
        .publish_upload(PublishUploadRequest {
            title: form.title.unwrap_or_default(),
            description: form.description,
            file_type: form.file_type,
            file,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(item)))
}
