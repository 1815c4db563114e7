use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use ts_rs::TS;
use uuid::Uuid;

use crate::domain::errors::DomainError;

/// A post in the gallery.
///
/// Text posts carry their body in `description` and have an empty `url`.
/// Every other kind points at an object in the public bucket for its type.
#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq, Eq)]
#[ts(export)]
pub struct MediaItem {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub file_type: FileType,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

impl MediaItem {
    pub fn from_draft(id: Uuid, draft: MediaDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            file_type: draft.content.file_type(),
            url: draft.content.url().to_string(),
            title: draft.title,
            description: draft.description,
            created_at,
        }
    }

    /// Replace every mutable field, keeping identity and creation time.
    pub fn apply(&mut self, draft: MediaDraft) {
        self.file_type = draft.content.file_type();
        self.url = draft.content.url().to_string();
        self.title = draft.title;
        self.description = draft.description;
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum FileType {
    Image,
    Video,
    Audio,
    Text,
}

impl FileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Image => "image",
            FileType::Video => "video",
            FileType::Audio => "audio",
            FileType::Text => "text",
        }
    }

    /// Storage bucket for uploaded files of this kind. Text posts have none.
    pub fn bucket(&self) -> Option<Bucket> {
        match self {
            FileType::Image => Some(Bucket::Images),
            FileType::Video => Some(Bucket::Videos),
            FileType::Audio => Some(Bucket::Audios),
            FileType::Text => None,
        }
    }

    /// Guess the kind from an upload's MIME type (`image/png` -> image).
    pub fn from_mime(content_type: &str) -> Option<Self> {
        let top = content_type.split('/').next()?.trim().to_ascii_lowercase();
        match top.as_str() {
            "image" => Some(FileType::Image),
            "video" => Some(FileType::Video),
            "audio" => Some(FileType::Audio),
            _ => None,
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "image" => Ok(FileType::Image),
            "video" => Ok(FileType::Video),
            "audio" => Ok(FileType::Audio),
            "text" => Ok(FileType::Text),
            other => Err(DomainError::ValidationError(format!(
                "unknown file type '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    Images,
    Videos,
    Audios,
}

impl Bucket {
    pub const ALL: [Bucket; 3] = [Bucket::Images, Bucket::Videos, Bucket::Audios];

    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::Images => "images",
            Bucket::Videos => "videos",
            Bucket::Audios => "audios",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.as_str() == name)
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a post holds, tagged by kind so a media post cannot exist without a url.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaContent {
    Text,
    Image { url: String },
    Video { url: String },
    Audio { url: String },
}

impl MediaContent {
    pub fn new(file_type: FileType, url: Option<String>) -> Result<Self, DomainError> {
        let url = url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty());
        match (file_type, url) {
            (FileType::Text, _) => Ok(MediaContent::Text),
            (_, None) => Err(DomainError::ValidationError(format!(
                "a {} post needs an uploaded file url",
                file_type
            ))),
            (FileType::Image, Some(url)) => Ok(MediaContent::Image { url }),
            (FileType::Video, Some(url)) => Ok(MediaContent::Video { url }),
            (FileType::Audio, Some(url)) => Ok(MediaContent::Audio { url }),
        }
    }

    pub fn file_type(&self) -> FileType {
        match self {
            MediaContent::Text => FileType::Text,
            MediaContent::Image { .. } => FileType::Image,
            MediaContent::Video { .. } => FileType::Video,
            MediaContent::Audio { .. } => FileType::Audio,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            MediaContent::Text => "",
            MediaContent::Image { url } | MediaContent::Video { url } | MediaContent::Audio { url } => {
                url
            }
        }
    }
}

pub const MAX_TITLE_CHARS: usize = 200;
pub const MAX_DESCRIPTION_CHARS: usize = 5000;

/// Validated input for creating or replacing a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaDraft {
    pub title: String,
    pub description: Option<String>,
    pub content: MediaContent,
}

impl MediaDraft {
    pub fn new(
        title: &str,
        description: Option<&str>,
        content: MediaContent,
    ) -> Result<Self, DomainError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(DomainError::ValidationError("title is required".into()));
        }
        if title.chars().count() > MAX_TITLE_CHARS {
            return Err(DomainError::ValidationError(format!(
                "title must be at most {} characters",
                MAX_TITLE_CHARS
            )));
        }
        let description = description
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);
        if description
            .as_deref()
            .is_some_and(|d| d.chars().count() > MAX_DESCRIPTION_CHARS)
        {
            return Err(DomainError::ValidationError(format!(
                "description must be at most {} characters",
                MAX_DESCRIPTION_CHARS
            )));
        }
        Ok(Self {
            title: title.to_string(),
            description,
            content,
        })
    }
}

/// Per-kind post counts shown on the home page and dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS, PartialEq, Eq)]
#[ts(export)]
pub struct MediaStats {
    pub total: usize,
    pub images: usize,
    pub videos: usize,
    pub audios: usize,
    pub texts: usize,
}

impl MediaStats {
    pub fn from_items(items: &[MediaItem]) -> Self {
        items.iter().fold(Self::default(), |mut stats, item| {
            stats.total += 1;
            match item.file_type {
                FileType::Image => stats.images += 1,
                FileType::Video => stats.videos += 1,
                FileType::Audio => stats.audios += 1,
                FileType::Text => stats.texts += 1,
            }
            stats
        })
    }
}
