use crate::domain::{
    errors::DomainError,
    social::{
        comment::{Comment, NewComment},
        like::{Like, LikeIdentity},
        repository::SocialRepository,
    },
};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};
use uuid::Uuid;

const FOREIGN_KEY_VIOLATION: &str = "23503";

pub struct SqlxSocialRepository {
    pool: PgPool,
}

impl SqlxSocialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn missing_media(err: sqlx::Error, media_id: Uuid) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(FOREIGN_KEY_VIOLATION) {
            return DomainError::NotFound(format!("media {}", media_id));
        }
    }
    err.into()
}

#[async_trait]
impl SocialRepository for SqlxSocialRepository {
    #[instrument(skip(self))]
    async fn like(&self, media_id: Uuid, identity: LikeIdentity) -> Result<Like, DomainError> {
        let inserted = sqlx::query_as::<_, Like>(
            "INSERT INTO likes (id, media_id, user_id, visitor_id) VALUES ($1, $2, $3, $4) \
             ON CONFLICT DO NOTHING \
             RETURNING id, media_id, user_id, visitor_id, created_at",
        )
        .bind(Uuid::now_v7())
        .bind(media_id)
        .bind(identity.user_id())
        .bind(identity.visitor_id())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| missing_media(e, media_id))?;

        if let Some(like) = inserted {
            return Ok(like);
        }

        debug!("Like already recorded for this viewer");
        let existing = sqlx::query_as::<_, Like>(
            "SELECT id, media_id, user_id, visitor_id, created_at FROM likes \
             WHERE media_id = $1 \
               AND user_id IS NOT DISTINCT FROM $2 \
               AND visitor_id IS NOT DISTINCT FROM $3",
        )
        .bind(media_id)
        .bind(identity.user_id())
        .bind(identity.visitor_id())
        .fetch_one(&self.pool)
        .await?;
        Ok(existing)
    }

    #[instrument(skip(self))]
    async fn unlike(&self, media_id: Uuid, identity: LikeIdentity) -> Result<bool, DomainError> {
        let result = sqlx::query(
            "DELETE FROM likes \
             WHERE media_id = $1 \
               AND user_id IS NOT DISTINCT FROM $2 \
               AND visitor_id IS NOT DISTINCT FROM $3",
        )
        .bind(media_id)
        .bind(identity.user_id())
        .bind(identity.visitor_id())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count_likes(&self, media_id: Uuid) -> Result<i64, DomainError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM likes WHERE media_id = $1")
            .bind(media_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn has_liked(&self, media_id: Uuid, identity: LikeIdentity) -> Result<bool, DomainError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM likes \
             WHERE media_id = $1 \
               AND user_id IS NOT DISTINCT FROM $2 \
               AND visitor_id IS NOT DISTINCT FROM $3)",
        )
        .bind(media_id)
        .bind(identity.user_id())
        .bind(identity.visitor_id())
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    #[instrument(skip(self, comment), fields(media_id = %comment.media_id))]
    async fn add_comment(&self, comment: NewComment) -> Result<Comment, DomainError> {
        let media_id = comment.media_id;
        let row = sqlx::query_as::<_, Comment>(
            "INSERT INTO comments (id, media_id, user_id, name, content) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, media_id, user_id, name, content, created_at",
        )
        .bind(Uuid::now_v7())
        .bind(comment.media_id)
        .bind(comment.user_id)
        .bind(comment.name)
        .bind(comment.content)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| missing_media(e, media_id))?;
        Ok(row)
    }

    async fn comments_for(&self, media_id: Uuid) -> Result<Vec<Comment>, DomainError> {
        let rows = sqlx::query_as::<_, Comment>(
            "SELECT id, media_id, user_id, name, content, created_at FROM comments \
             WHERE media_id = $1 ORDER BY created_at ASC, id ASC",
        )
        .bind(media_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
