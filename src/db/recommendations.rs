use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::RecommendationList;
use crate::recs::RecommendationSink;

/// Postgres-backed recommendation store
pub struct PgRecommendationStore {
    pool: PgPool,
}

impl PgRecommendationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecommendationSink for PgRecommendationStore {
    /// Upserts the list for one source video, replacing any prior list
    async fn store(&self, video_id: Uuid, recommended: &[Uuid]) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO recommendations (video_id, recommended_ids, updated_at)
            VALUES ($1, $2, now())
            ON CONFLICT (video_id)
            DO UPDATE SET recommended_ids = EXCLUDED.recommended_ids, updated_at = now()
            "#,
        )
        .bind(video_id)
        .bind(recommended)
        .execute(&self.pool)
        .await?;

        tracing::debug!(
            video_id = %video_id,
            recommended_count = recommended.len(),
            "Stored recommendation list"
        );

        Ok(())
    }

    async fn fetch(&self, video_id: Uuid) -> AppResult<Option<Vec<Uuid>>> {
        let list = sqlx::query_as::<_, RecommendationList>(
            r#"
            SELECT video_id, recommended_ids, updated_at
            FROM recommendations
            WHERE video_id = $1
            "#,
        )
        .bind(video_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(list.map(|l| l.recommended_ids))
    }
}
