use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::Video;
use crate::recs::features::feature_text;
use crate::recs::ranking;
use crate::recs::recency::recency_weight;
use crate::recs::vector_space::VectorSpace;
use crate::recs::{RecommendationSink, VideoCatalog};

/// Summary of a whole-catalog generation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOutcome {
    pub videos_processed: usize,
    pub recommendations_stored: usize,
}

/// Generates and stores recommendations for every video in the catalog.
///
/// The catalog is fetched once and the vector space fit exactly once over
/// it; refitting per video would waste work and break determinism within
/// the run. Recency is likewise evaluated once per candidate against a
/// single instant. Per-video ranking then fans out as independent tasks
/// over the shared immutable space.
///
/// Every list is computed before anything is written, so a failure while
/// ranking leaves the stored set untouched. A failure while writing aborts
/// the run with an error; since `store` is an upsert the caller can simply
/// rerun the whole batch.
pub async fn generate_all(
    catalog: &dyn VideoCatalog,
    sink: &dyn RecommendationSink,
    top_k: usize,
) -> AppResult<BatchOutcome> {
    let videos = catalog.fetch_all().await?;
    if videos.is_empty() {
        return Err(AppError::EmptyCatalog);
    }

    tracing::info!(video_count = videos.len(), "Starting batch generation");

    let space = Arc::new(fit_space(&videos)?);
    let recency = Arc::new(recency_of(&videos));

    let mut tasks = Vec::with_capacity(videos.len());
    for index in 0..videos.len() {
        let space = Arc::clone(&space);
        let recency = Arc::clone(&recency);
        tasks.push(tokio::spawn(async move {
            ranking::rank(&space, index, &recency, top_k)
        }));
    }

    let mut ranked = Vec::with_capacity(videos.len());
    for task in tasks {
        let indices = task
            .await
            .map_err(|e| AppError::Internal(format!("Ranking task failed: {}", e)))??;
        ranked.push(indices);
    }

    let mut stored = 0;
    for (index, indices) in ranked.iter().enumerate() {
        let recommended: Vec<Uuid> = indices.iter().map(|&j| videos[j].id).collect();
        sink.store(videos[index].id, &recommended).await?;
        stored += 1;
    }

    tracing::info!(
        videos_processed = videos.len(),
        recommendations_stored = stored,
        "Batch generation completed"
    );

    Ok(BatchOutcome {
        videos_processed: videos.len(),
        recommendations_stored: stored,
    })
}

/// Generates and stores recommendations for one video, typically right
/// after upload.
///
/// The full catalog, including the new video, is refetched and the space
/// refit from scratch: there is no incremental vector-space update, and
/// always-fresh refit-on-demand is the deliberate freshness policy for this
/// path. Returns the recommended ids in ranked order.
pub async fn generate_for_video(
    catalog: &dyn VideoCatalog,
    sink: &dyn RecommendationSink,
    video_id: Uuid,
    top_k: usize,
) -> AppResult<Vec<Uuid>> {
    let videos = catalog.fetch_all().await?;

    let source_index = videos
        .iter()
        .position(|v| v.id == video_id)
        .ok_or_else(|| AppError::NotFound(format!("Video {} not in catalog", video_id)))?;

    let space = fit_space(&videos)?;
    let recency = recency_of(&videos);

    let indices = ranking::rank(&space, source_index, &recency, top_k)?;
    let recommended: Vec<Uuid> = indices.iter().map(|&j| videos[j].id).collect();

    sink.store(video_id, &recommended).await?;

    tracing::info!(
        video_id = %video_id,
        recommended_count = recommended.len(),
        "Generated recommendations for video"
    );

    Ok(recommended)
}

fn fit_space(videos: &[Video]) -> AppResult<VectorSpace> {
    let corpus: Vec<String> = videos.iter().map(feature_text).collect();
    VectorSpace::fit(&corpus)
}

/// One recency weight per video, all evaluated at the same instant
fn recency_of(videos: &[Video]) -> Vec<f64> {
    let now = Utc::now();
    videos
        .iter()
        .map(|v| recency_weight(v.created_at.as_deref(), now))
        .collect()
}
