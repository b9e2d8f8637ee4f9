use crate::models::Video;

/// Builds the text blob a video is vectorized from.
///
/// Title, description, tags and category are concatenated with single spaces,
/// in that order, with tags joined by spaces first. Missing fields degrade to
/// empty strings; this function never fails. The blob order must stay fixed
/// so that refitting an unchanged catalog reproduces identical vectors.
pub fn feature_text(video: &Video) -> String {
    let title = video.title.as_deref().unwrap_or("");
    let description = video.description.as_deref().unwrap_or("");
    let tags = video.tags.join(" ");
    let category = video.category.as_deref().unwrap_or("");

    format!("{} {} {} {}", title, description, tags, category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_fields_present() {
        let video = Video::new()
            .with_title("Rocket launch")
            .with_description("Falcon heavy liftoff")
            .with_tags(["space", "rockets"])
            .with_category("science");

        assert_eq!(
            feature_text(&video),
            "Rocket launch Falcon heavy liftoff space rockets science"
        );
    }

    #[test]
    fn test_missing_fields_degrade_to_empty() {
        let video = Video::new().with_title("Only a title");
        assert_eq!(feature_text(&video), "Only a title   ");
    }

    #[test]
    fn test_fully_empty_video() {
        let video = Video::new();
        assert_eq!(feature_text(&video), "   ");
    }

    #[test]
    fn test_tags_joined_with_spaces() {
        let video = Video::new().with_tags(["a", "b", "c"]);
        assert_eq!(feature_text(&video), "  a b c ");
    }
}
