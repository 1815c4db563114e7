use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
pub struct AddCommentRequest {
    pub content: String,
    pub name: Option<String>,
}

/// Server-confirmed like state for the caller.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS, PartialEq, Eq)]
#[ts(export)]
pub struct LikeStatus {
    pub liked: bool,
    pub likes_count: i64,
}
