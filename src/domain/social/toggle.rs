//! Client-visible like state for one (post, viewer) pair.
//!
//! The state starts `Unknown`, is resolved from an existence check, and flips
//! only once the server has confirmed the write. While a toggle is pending a
//! second one is refused, so a double click cannot produce two writes.

use thiserror::Error;

use crate::domain::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeState {
    Unknown,
    Liked,
    NotLiked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ToggleError {
    #[error("like state has not been resolved yet")]
    Unresolved,
    #[error("a like toggle is already in flight")]
    AlreadyPending,
    #[error("no like toggle is in flight")]
    NotPending,
}

/// The write a toggle must perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    Like,
    Unlike,
}

impl From<ToggleError> for DomainError {
    fn from(err: ToggleError) -> Self {
        match err {
            ToggleError::AlreadyPending => DomainError::Conflict(err.to_string()),
            ToggleError::Unresolved | ToggleError::NotPending => {
                DomainError::InfrastructureError(err.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikeToggle {
    state: LikeState,
    count: i64,
    pending: bool,
}

impl Default for LikeToggle {
    fn default() -> Self {
        Self::new()
    }
}

impl LikeToggle {
    pub fn new() -> Self {
        Self {
            state: LikeState::Unknown,
            count: 0,
            pending: false,
        }
    }

    pub fn state(&self) -> LikeState {
        self.state
    }

    pub fn count(&self) -> i64 {
        self.count
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Initialize from the existence check and the server count.
    pub fn resolve(&mut self, liked: bool, count: i64) {
        self.state = if liked {
            LikeState::Liked
        } else {
            LikeState::NotLiked
        };
        self.count = count.max(0);
    }

    /// Start a toggle and return the write to perform.
    pub fn begin(&mut self) -> Result<ToggleAction, ToggleError> {
        if self.pending {
            return Err(ToggleError::AlreadyPending);
        }
        let action = match self.state {
            LikeState::Unknown => return Err(ToggleError::Unresolved),
            LikeState::Liked => ToggleAction::Unlike,
            LikeState::NotLiked => ToggleAction::Like,
        };
        self.pending = true;
        Ok(action)
    }

    /// Apply the server-confirmed result of the pending toggle.
    pub fn confirm(&mut self, liked: bool, count: i64) -> Result<LikeState, ToggleError> {
        if !self.pending {
            return Err(ToggleError::NotPending);
        }
        self.pending = false;
        self.resolve(liked, count);
        Ok(self.state)
    }

    /// The write failed; keep the previous state.
    pub fn abort(&mut self) {
        self.pending = false;
    }
}
