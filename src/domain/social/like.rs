use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, TS, sqlx::FromRow, PartialEq, Eq)]
#[ts(export)]
pub struct Like {
    pub id: Uuid,
    pub media_id: Uuid,
    pub user_id: Option<Uuid>,
    #[serde(skip)]
    #[ts(skip)]
    pub visitor_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Who a like belongs to.
///
/// Signed-in users are matched on their account. Everyone else is matched on
/// the browser-scoped visitor id, so each browser holds at most one like per post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LikeIdentity {
    User(Uuid),
    Visitor(Uuid),
}

impl LikeIdentity {
    /// The account wins over the visitor cookie when both are present.
    pub fn for_viewer(user_id: Option<Uuid>, visitor_id: Uuid) -> Self {
        user_id.map_or(LikeIdentity::Visitor(visitor_id), LikeIdentity::User)
    }

    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            LikeIdentity::User(id) => Some(*id),
            LikeIdentity::Visitor(_) => None,
        }
    }

    pub fn visitor_id(&self) -> Option<Uuid> {
        match self {
            LikeIdentity::User(_) => None,
            LikeIdentity::Visitor(id) => Some(*id),
        }
    }

    pub fn owns(&self, like: &Like) -> bool {
        like.user_id == self.user_id() && like.visitor_id == self.visitor_id()
    }
}
