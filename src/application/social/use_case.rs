use super::dto::LikeStatus;
use crate::domain::{
    errors::DomainError,
    social::{
        comment::{Comment, NewComment},
        like::{Like, LikeIdentity},
        repository::SocialRepository,
        toggle::{LikeToggle, ToggleAction, ToggleError},
    },
};
use std::{collections::HashSet, sync::Mutex};
use tracing::{debug, instrument};
use uuid::Uuid;

type ToggleKey = (Uuid, LikeIdentity);

pub struct SocialUseCase {
    repository: Box<dyn SocialRepository>,
    in_flight: Mutex<HashSet<ToggleKey>>,
}

/// Holds a (post, viewer) slot in the in-flight set until dropped.
struct InFlight<'a> {
    set: &'a Mutex<HashSet<ToggleKey>>,
    key: ToggleKey,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if let Ok(mut set) = self.set.lock() {
            set.remove(&self.key);
        }
    }
}

impl SocialUseCase {
    pub fn new(repository: Box<dyn SocialRepository>) -> Self {
        Self {
            repository,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    pub async fn like(&self, media_id: Uuid, identity: LikeIdentity) -> Result<Like, DomainError> {
        self.repository.like(media_id, identity).await
    }

    /// Removing a like that does not exist is not an error.
    pub async fn unlike(&self, media_id: Uuid, identity: LikeIdentity) -> Result<(), DomainError> {
        let removed = self.repository.unlike(media_id, identity).await?;
        if !removed {
            debug!(%media_id, "Nothing to unlike");
        }
        Ok(())
    }

    pub async fn likes_count(&self, media_id: Uuid) -> Result<i64, DomainError> {
        self.repository.count_likes(media_id).await
    }

    pub async fn is_liked(&self, media_id: Uuid, identity: LikeIdentity) -> Result<bool, DomainError> {
        self.repository.has_liked(media_id, identity).await
    }

    pub async fn like_status(
        &self,
        media_id: Uuid,
        identity: LikeIdentity,
    ) -> Result<LikeStatus, DomainError> {
        Ok(LikeStatus {
            liked: self.is_liked(media_id, identity).await?,
            likes_count: self.likes_count(media_id).await?,
        })
    }

    /// Flips the caller's like and returns the state read back from the store.
    ///
    /// A second toggle for the same post and viewer is refused with `Conflict`
    /// while the first is still running.
    #[instrument(skip(self))]
    pub async fn toggle_like(
        &self,
        media_id: Uuid,
        identity: LikeIdentity,
    ) -> Result<LikeStatus, DomainError> {
        let _slot = self.claim(media_id, identity)?;

        let mut toggle = LikeToggle::new();
        let current = self.like_status(media_id, identity).await?;
        toggle.resolve(current.liked, current.likes_count);

        let written = match toggle.begin()? {
            ToggleAction::Like => self.repository.like(media_id, identity).await.map(|_| ()),
            ToggleAction::Unlike => self.repository.unlike(media_id, identity).await.map(|_| ()),
        };
        if let Err(e) = written {
            toggle.abort();
            return Err(e);
        }

        let confirmed = self.like_status(media_id, identity).await?;
        toggle.confirm(confirmed.liked, confirmed.likes_count)?;
        Ok(LikeStatus {
            liked: confirmed.liked,
            likes_count: toggle.count(),
        })
    }

    /// Stores a comment already checked by [`NewComment::new`].
    #[instrument(skip(self, comment), fields(media_id = %comment.media_id))]
    pub async fn add_comment(&self, comment: NewComment) -> Result<Comment, DomainError> {
        self.repository.add_comment(comment).await
    }

    /// Oldest first.
    pub async fn get_comments(&self, media_id: Uuid) -> Result<Vec<Comment>, DomainError> {
        self.repository.comments_for(media_id).await
    }

    fn claim(&self, media_id: Uuid, identity: LikeIdentity) -> Result<InFlight<'_>, DomainError> {
        let key = (media_id, identity);
        let mut set = self
            .in_flight
            .lock()
            .map_err(|_| DomainError::InfrastructureError("toggle registry poisoned".into()))?;
        if !set.insert(key) {
            return Err(ToggleError::AlreadyPending.into());
        }
        Ok(InFlight {
            set: &self.in_flight,
            key,
        })
    }
}
