use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A video as stored in the catalog.
///
/// Metadata fields arrive from the upload pipeline as-is and may be missing.
/// `created_at` is kept as the raw timestamp text supplied at upload; it may
/// be absent or malformed, in which case the video simply earns no recency
/// credit during ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Video {
    pub id: Uuid,
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub category: Option<String>,
    pub created_at: Option<String>,
}

impl Video {
    /// Creates a video with a fresh id and no metadata
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            title: None,
            description: None,
            tags: Vec::new(),
            category: None,
            created_at: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_created_at(mut self, created_at: impl Into<String>) -> Self {
        self.created_at = Some(created_at.into());
        self
    }
}

impl Default for Video {
    fn default() -> Self {
        Self::new()
    }
}

/// A stored recommendation list for one source video
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RecommendationList {
    pub video_id: Uuid,
    pub recommended_ids: Vec<Uuid>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_builder() {
        let video = Video::new()
            .with_title("Intro to Rust")
            .with_tags(["rust", "tutorial"])
            .with_category("education");

        assert_eq!(video.title.as_deref(), Some("Intro to Rust"));
        assert_eq!(video.tags, vec!["rust", "tutorial"]);
        assert_eq!(video.category.as_deref(), Some("education"));
        assert_eq!(video.description, None);
        assert_eq!(video.created_at, None);
    }

    #[test]
    fn test_video_ids_are_unique() {
        assert_ne!(Video::new().id, Video::new().id);
    }
}
