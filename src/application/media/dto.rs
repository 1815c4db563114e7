use crate::domain::{
    errors::DomainError,
    media::entity::{FileType, MediaContent, MediaDraft},
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use validator::Validate;

/// Wire form of a post as sent by the dashboard forms.
#[derive(Debug, Clone, Deserialize, Validate, TS)]
#[ts(export)]
pub struct MediaDraftRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    pub file_type: FileType,
    #[validate(length(max = 2048))]
    pub url: Option<String>,
}

impl TryFrom<MediaDraftRequest> for MediaDraft {
    type Error = DomainError;

    fn try_from(request: MediaDraftRequest) -> Result<Self, Self::Error> {
        request.validate()?;
        let content = MediaContent::new(request.file_type, request.url)?;
        MediaDraft::new(&request.title, request.description.as_deref(), content)
    }
}

/// A file received from a multipart form.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

/// Upload a file and create the post that points at it.
#[derive(Debug, Clone)]
pub struct PublishUploadRequest {
    pub title: String,
    pub description: Option<String>,
    /// Guessed from the file's MIME type when absent.
    pub file_type: Option<FileType>,
    pub file: UploadFile,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct UploadResponse {
    pub url: String,
}
