use super::dto::{PublishUploadRequest, UploadFile};
use crate::{
    domain::{
        errors::DomainError,
        media::{
            entity::{FileType, MediaContent, MediaDraft, MediaItem},
            repository::MediaRepository,
            value_objects::ObjectName,
        },
    },
    infrastructure::storage::traits::StorageService,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

/// Post management: listing, admin CRUD and file uploads.
///
/// Storage and the table store are separate systems, so upload-then-create is
/// not atomic. When the insert fails after a successful upload the object is
/// deleted again, and deleting or replacing a post removes the file it no
/// longer references. Both cleanups are best effort and only logged on failure.
pub struct MediaUseCase {
    repository: Box<dyn MediaRepository>,
    storage: Arc<dyn StorageService>,
}

impl MediaUseCase {
    pub fn new(repository: Box<dyn MediaRepository>, storage: Arc<dyn StorageService>) -> Self {
        Self {
            repository,
            storage,
        }
    }

    /// All posts, newest first, optionally of one kind.
    pub async fn list(&self, file_type: Option<FileType>) -> Result<Vec<MediaItem>, DomainError> {
        self.repository.find_all(file_type).await
    }

    pub async fn get(&self, id: Uuid) -> Result<MediaItem, DomainError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("media {}", id)))
    }

    #[instrument(skip(self, draft), fields(file_type = %draft.content.file_type()))]
    pub async fn create(&self, draft: MediaDraft) -> Result<MediaItem, DomainError> {
        let item = MediaItem::from_draft(Uuid::now_v7(), draft, Utc::now());
        let saved = self.repository.create(&item).await?;
        info!(id = %saved.id, "Media created");
        Ok(saved)
    }

    /// Replaces every field of the post. Last write wins.
    #[instrument(skip(self, draft))]
    pub async fn update(&self, id: Uuid, draft: MediaDraft) -> Result<MediaItem, DomainError> {
        let mut item = self.get(id).await?;
        let previous_url = item.url.clone();
        item.apply(draft);
        let saved = self.repository.update(&item).await?;
        if previous_url != saved.url {
            self.remove_stored_file(&previous_url).await;
        }
        Ok(saved)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let removed = self.repository.delete(id).await?;
        self.remove_stored_file(&removed.url).await;
        info!(%id, "Media deleted");
        Ok(())
    }

    /// Stores a file in the bucket of its kind and returns the public URL.
    #[instrument(skip(self, file), fields(file_name = %file.file_name, size = file.data.len()))]
    pub async fn upload_file(
        &self,
        file: UploadFile,
        file_type: FileType,
    ) -> Result<String, DomainError> {
        let bucket = file_type.bucket().ok_or_else(|| {
            DomainError::ValidationError("text posts do not take a file".into())
        })?;
        if file.data.is_empty() {
            return Err(DomainError::ValidationError("uploaded file is empty".into()));
        }
        if file_type == FileType::Image && image::guess_format(&file.data).is_err() {
            return Err(DomainError::ValidationError("Invalid image data".into()));
        }

        let name = ObjectName::new(Utc::now().timestamp_millis(), &file.file_name);
        let content_type = if file.content_type.is_empty() {
            "application/octet-stream"
        } else {
            file.content_type.as_str()
        };
        self.storage
            .upload(bucket, name.as_str(), file.data, content_type)
            .await
            .map_err(|e| {
                error!(error = %e, "Upload failed");
                DomainError::StorageError(format!("upload failed: {}", e))
            })
    }

    /// Uploads the file, then creates the post pointing at it.
    #[instrument(skip(self, request), fields(title = %request.title))]
    pub async fn publish_upload(
        &self,
        request: PublishUploadRequest,
    ) -> Result<MediaItem, DomainError> {
        let file_type = match request.file_type {
            Some(ft) => ft,
            None => FileType::from_mime(&request.file.content_type).ok_or_else(|| {
                DomainError::ValidationError("could not tell the file type, pick one".into())
            })?,
        };
        // Reject bad text fields before anything reaches storage.
        let mut draft = MediaDraft::new(
            &request.title,
            request.description.as_deref(),
            MediaContent::Text,
        )?;

        let url = self.upload_file(request.file, file_type).await?;
        draft.content = MediaContent::new(file_type, Some(url.clone()))?;

        match self.create(draft).await {
            Ok(item) => Ok(item),
            Err(e) => {
                warn!(error = %e, "Record creation failed, removing uploaded file");
                self.remove_stored_file(&url).await;
                Err(e)
            }
        }
    }

    pub async fn ping(&self) -> Result<(), DomainError> {
        self.repository.ping().await
    }

    async fn remove_stored_file(&self, url: &str) {
        let Some(object) = self.storage.locate(url) else {
            return;
        };
        if let Err(e) = self.storage.delete(object.bucket, &object.name).await {
            warn!(error = %e, bucket = %object.bucket, name = %object.name, "Could not remove stored file");
        }
    }
}
