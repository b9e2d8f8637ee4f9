use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::Video;
use crate::recs::VideoCatalog;

/// Postgres-backed video catalog.
///
/// Rows are owned by the upload pipeline; this store only reads them.
pub struct PgVideoCatalog {
    pool: PgPool,
}

impl PgVideoCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VideoCatalog for PgVideoCatalog {
    /// Fetches the whole catalog in a stable order.
    ///
    /// `ORDER BY id` pins the index↔id mapping that feature extraction and
    /// ranking share within a batch run.
    async fn fetch_all(&self) -> AppResult<Vec<Video>> {
        let videos = sqlx::query_as::<_, Video>(
            r#"
            SELECT id, title, description, tags, category, created_at
            FROM videos
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!(video_count = videos.len(), "Fetched video catalog");

        Ok(videos)
    }

    async fn fetch_one(&self, id: Uuid) -> AppResult<Option<Video>> {
        let video = sqlx::query_as::<_, Video>(
            r#"
            SELECT id, title, description, tags, category, created_at
            FROM videos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(video)
    }
}
