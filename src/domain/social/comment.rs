use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::domain::errors::DomainError;

pub const GUEST_NAME: &str = "Guest";
pub const MAX_COMMENT_CHARS: usize = 1000;
pub const MAX_NAME_CHARS: usize = 80;

#[derive(Debug, Clone, Serialize, Deserialize, TS, sqlx::FromRow, PartialEq, Eq)]
#[ts(export)]
pub struct Comment {
    pub id: Uuid,
    pub media_id: Uuid,
    pub user_id: Option<Uuid>,
    pub name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A comment that passed validation and is ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub media_id: Uuid,
    pub user_id: Option<Uuid>,
    pub name: String,
    pub content: String,
}

impl NewComment {
    pub fn new(
        media_id: Uuid,
        content: &str,
        user_id: Option<Uuid>,
        name: Option<&str>,
    ) -> Result<Self, DomainError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(DomainError::ValidationError(
                "Comment cannot be empty".into(),
            ));
        }
        if content.chars().count() > MAX_COMMENT_CHARS {
            return Err(DomainError::ValidationError(format!(
                "Comment must be {} characters or less",
                MAX_COMMENT_CHARS
            )));
        }

        let name = name.map(str::trim).filter(|n| !n.is_empty()).unwrap_or(GUEST_NAME);
        if name.chars().count() > MAX_NAME_CHARS {
            return Err(DomainError::ValidationError(format!(
                "Name must be {} characters or less",
                MAX_NAME_CHARS
            )));
        }

        Ok(Self {
            media_id,
            user_id,
            name: name.to_string(),
            content: content.to_string(),
        })
    }
}
