use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::cached;
use crate::db::CacheKey;
use crate::error::{AppError, AppResult};
use crate::recs::{engine, RecommendationSink};

use super::AppState;

// Request/Response types

#[derive(Debug, Serialize)]
pub struct GenerateAllResponse {
    pub message: String,
    pub videos_processed: usize,
    pub recommendations_count: usize,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct GenerateOneResponse {
    pub message: String,
    pub video_id: Uuid,
    pub recommended_ids: Vec<Uuid>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub video_id: Uuid,
    pub recommended_ids: Vec<Uuid>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Regenerates recommendations for the whole catalog
pub async fn generate_all(State(state): State<AppState>) -> AppResult<Json<GenerateAllResponse>> {
    let outcome =
        engine::generate_all(&*state.catalog, &*state.sink, state.settings.top_k).await?;

    Ok(Json(GenerateAllResponse {
        message: "Recommendations generated and stored successfully".to_string(),
        videos_processed: outcome.videos_processed,
        recommendations_count: outcome.recommendations_stored,
        timestamp: Utc::now(),
    }))
}

/// Generates recommendations for one video, typically right after upload
///
/// The video must already be in the catalog; the vector space is refit over
/// the full catalog so the new video's text participates in term weighting.
pub async fn generate_for_video(
    State(state): State<AppState>,
    Path(video_id): Path<Uuid>,
) -> AppResult<Json<GenerateOneResponse>> {
    if state.catalog.fetch_one(video_id).await?.is_none() {
        return Err(AppError::NotFound(format!(
            "Video {} not found in catalog",
            video_id
        )));
    }

    let recommended_ids =
        engine::generate_for_video(&*state.catalog, &*state.sink, video_id, state.settings.top_k)
            .await?;

    Ok(Json(GenerateOneResponse {
        message: "Recommendations generated and stored successfully for video".to_string(),
        video_id,
        recommended_ids,
        timestamp: Utc::now(),
    }))
}

/// Returns the stored recommendation list for a video, best first
///
/// Reads through the Redis cache when one is configured. The full stored
/// list is cached; `limit` truncation happens per request.
pub async fn get_recommendations(
    State(state): State<AppState>,
    Path(video_id): Path<Uuid>,
    Query(query): Query<LookupQuery>,
) -> AppResult<Json<RecommendationsResponse>> {
    let limit = query.limit.unwrap_or(state.settings.fetch_limit);

    let ids: Vec<Uuid> = match &state.cache {
        Some(cache) => {
            let key = CacheKey::Recommendations(video_id);
            let ttl = state.settings.cache_ttl_secs;
            let cached_ids: AppResult<Vec<Uuid>> =
                cached!(cache, key, ttl, fetch_stored(&*state.sink, video_id));
            cached_ids?
        }
        None => fetch_stored(&*state.sink, video_id).await?,
    };

    let recommended_ids: Vec<Uuid> = ids.into_iter().take(limit).collect();

    Ok(Json(RecommendationsResponse {
        video_id,
        recommended_ids,
    }))
}

async fn fetch_stored(sink: &dyn RecommendationSink, video_id: Uuid) -> AppResult<Vec<Uuid>> {
    sink.fetch(video_id).await?.ok_or_else(|| {
        AppError::NotFound(format!("No recommendations stored for video {}", video_id))
    })
}
