use super::entity::{FileType, MediaItem};
use crate::domain::errors::DomainError;
use async_trait::async_trait;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaRepository: Send + Sync {
    /// Newest first, optionally restricted to one kind.
    async fn find_all(&self, file_type: Option<FileType>) -> Result<Vec<MediaItem>, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<MediaItem>, DomainError>;
    async fn create(&self, item: &MediaItem) -> Result<MediaItem, DomainError>;
    /// Full replacement. `NotFound` when the row is gone.
    async fn update(&self, item: &MediaItem) -> Result<MediaItem, DomainError>;
    /// Removes the row together with its likes and comments. Returns the removed item.
    async fn delete(&self, id: Uuid) -> Result<MediaItem, DomainError>;
    async fn ping(&self) -> Result<(), DomainError>;
}
