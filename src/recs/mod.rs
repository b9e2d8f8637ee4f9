use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::Video;

pub mod engine;
pub mod features;
pub mod ranking;
pub mod recency;
pub mod similarity;
pub mod stopwords;
pub mod vector_space;

pub use engine::{generate_all, generate_for_video, BatchOutcome};
pub use features::feature_text;
pub use ranking::{rank, DEFAULT_TOP_K, RECENCY_WEIGHT, SIMILARITY_WEIGHT};
pub use recency::{recency_weight, recency_weight_now};
pub use similarity::similarity_row;
pub use stopwords::StopWords;
pub use vector_space::VectorSpace;

/// Read-side catalog of videos.
///
/// `fetch_all` must return a stable order across the calls made within one
/// batch run; the engine's index↔id mapping depends on it.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait VideoCatalog: Send + Sync {
    async fn fetch_all(&self) -> AppResult<Vec<Video>>;

    async fn fetch_one(&self, id: Uuid) -> AppResult<Option<Video>>;
}

/// Write/read store for generated recommendation lists.
///
/// `store` has upsert semantics: it replaces any prior list for the source
/// video and does not fail when none existed.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RecommendationSink: Send + Sync {
    async fn store(&self, video_id: Uuid, recommended: &[Uuid]) -> AppResult<()>;

    async fn fetch(&self, video_id: Uuid) -> AppResult<Option<Vec<Uuid>>>;
}
