use crate::domain::{
    errors::DomainError,
    media::{
        entity::{FileType, MediaItem},
        repository::MediaRepository,
    },
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{debug, instrument};
use uuid::Uuid;

const MEDIA_COLUMNS: &str = "id, title, description, file_type, url, created_at";

#[derive(FromRow)]
struct MediaRow {
    id: Uuid,
    title: String,
    description: Option<String>,
    file_type: String,
    url: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<MediaRow> for MediaItem {
    type Error = DomainError;

    fn try_from(r: MediaRow) -> Result<Self, Self::Error> {
        Ok(MediaItem {
            id: r.id,
            title: r.title,
            description: r.description,
            file_type: r.file_type.parse::<FileType>()?,
            url: r.url,
            created_at: r.created_at,
        })
    }
}

fn into_items(rows: Vec<MediaRow>) -> Result<Vec<MediaItem>, DomainError> {
    rows.into_iter().map(MediaItem::try_from).collect()
}

pub struct SqlxMediaRepository {
    pool: PgPool,
}

impl SqlxMediaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MediaRepository for SqlxMediaRepository {
    #[instrument(skip(self))]
    async fn find_all(&self, file_type: Option<FileType>) -> Result<Vec<MediaItem>, DomainError> {
        let rows = match file_type {
            Some(ft) => {
                sqlx::query_as::<_, MediaRow>(&format!(
                    "SELECT {} FROM media WHERE file_type = $1 ORDER BY created_at DESC, id DESC",
                    MEDIA_COLUMNS
                ))
                .bind(ft.as_str())
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, MediaRow>(&format!(
                    "SELECT {} FROM media ORDER BY created_at DESC, id DESC",
                    MEDIA_COLUMNS
                ))
                .fetch_all(&self.pool)
                .await?
            }
        };
        debug!(count = rows.len(), "Fetched media");
        into_items(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<MediaItem>, DomainError> {
        sqlx::query_as::<_, MediaRow>(&format!("SELECT {} FROM media WHERE id = $1", MEDIA_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(MediaItem::try_from)
            .transpose()
    }

    #[instrument(skip(self, item), fields(id = %item.id, file_type = %item.file_type))]
    async fn create(&self, item: &MediaItem) -> Result<MediaItem, DomainError> {
        let row = sqlx::query_as::<_, MediaRow>(&format!(
            "INSERT INTO media (id, title, description, file_type, url, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            MEDIA_COLUMNS
        ))
        .bind(item.id)
        .bind(&item.title)
        .bind(&item.description)
        .bind(item.file_type.as_str())
        .bind(&item.url)
        .bind(item.created_at)
        .fetch_one(&self.pool)
        .await?;
        row.try_into()
    }

    #[instrument(skip(self, item), fields(id = %item.id))]
    async fn update(&self, item: &MediaItem) -> Result<MediaItem, DomainError> {
        sqlx::query_as::<_, MediaRow>(&format!(
            "UPDATE media SET title = $2, description = $3, file_type = $4, url = $5 \
             WHERE id = $1 RETURNING {}",
            MEDIA_COLUMNS
        ))
        .bind(item.id)
        .bind(&item.title)
        .bind(&item.description)
        .bind(item.file_type.as_str())
        .bind(&item.url)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("media {}", item.id)))?
        .try_into()
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> Result<MediaItem, DomainError> {
        sqlx::query_as::<_, MediaRow>(&format!(
            "DELETE FROM media WHERE id = $1 RETURNING {}",
            MEDIA_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("media {}", id)))?
        .try_into()
    }

    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
