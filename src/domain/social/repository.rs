use super::{
    comment::{Comment, NewComment},
    like::{Like, LikeIdentity},
};
use crate::domain::errors::DomainError;
use async_trait::async_trait;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SocialRepository: Send + Sync {
    /// Records a like. A repeated like by the same signed-in user is a no-op.
    async fn like(&self, media_id: Uuid, identity: LikeIdentity) -> Result<Like, DomainError>;
    /// Removes one matching like. Returns whether a row was removed.
    async fn unlike(&self, media_id: Uuid, identity: LikeIdentity) -> Result<bool, DomainError>;
    async fn count_likes(&self, media_id: Uuid) -> Result<i64, DomainError>;
    async fn has_liked(&self, media_id: Uuid, identity: LikeIdentity) -> Result<bool, DomainError>;
    async fn add_comment(&self, comment: NewComment) -> Result<Comment, DomainError>;
    /// Oldest first.
    async fn comments_for(&self, media_id: Uuid) -> Result<Vec<Comment>, DomainError>;
}
