//! Image category detection.

use serde::{Deserialize, Serialize};

/// Detected image category for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ImageType {
    Logo,
    Presentation,
    SocialMedia,
    Portrait,
    Landscape,
    Product,
    Abstract,
    Illustration,
    #[default]
    General,
}

/// Ordered detection rules, evaluated top to bottom.
///
/// Order matters because the keyword sets overlap: "instagram post with
/// abstract art" must classify as social media, not abstract, and
/// "abstract logo" as abstract, not logo. First rule with any substring
/// match wins.
const DETECTION_RULES: &[(ImageType, &[&str])] = &[
    (
        ImageType::SocialMedia,
        &["instagram", "facebook", "twitter", "social media", "social post"],
    ),
    (
        ImageType::Abstract,
        &["abstract art", "abstract geometric", "abstract painting", "abstract"],
    ),
    (
        ImageType::Presentation,
        &["presentation", "slide", "deck", "powerpoint"],
    ),
    (ImageType::Logo, &["logo", "brand", "icon", "emblem", "mark"]),
    (
        ImageType::Portrait,
        &["portrait", "headshot", "person", "face", "selfie"],
    ),
    (
        ImageType::Landscape,
        &["landscape", "scenery", "vista", "horizon"],
    ),
    (
        ImageType::Product,
        &["product", "merchandise", "item", "commercial"],
    ),
    (
        ImageType::Illustration,
        &["illustration", "drawing", "artwork", "sketch"],
    ),
];

impl ImageType {
    /// Classifies a request by case-insensitive substring match against
    /// the ordered rule table. Unmatched prompts are `General`.
    pub fn detect(prompt: &str) -> Self {
        let prompt_lower = prompt.to_lowercase();
        for (image_type, words) in DETECTION_RULES {
            if words.iter().any(|w| prompt_lower.contains(w)) {
                return *image_type;
            }
        }
        ImageType::General
    }

    /// Returns the canonical string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Logo => "logo",
            Self::Presentation => "presentation",
            Self::SocialMedia => "social_media",
            Self::Portrait => "portrait",
            Self::Landscape => "landscape",
            Self::Product => "product",
            Self::Abstract => "abstract",
            Self::Illustration => "illustration",
            Self::General => "general",
        }
    }
}

impl std::fmt::Display for ImageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instagram_post_is_social_media_not_abstract() {
        // Order-sensitivity: "post" alone is not a keyword, "instagram" is,
        // and social media is checked before every other bucket.
        assert_eq!(
            ImageType::detect("Create an Instagram post"),
            ImageType::SocialMedia
        );
        assert_eq!(
            ImageType::detect("instagram post with abstract art"),
            ImageType::SocialMedia
        );
    }

    #[test]
    fn abstract_wins_over_logo() {
        assert_eq!(
            ImageType::detect("an abstract logo concept"),
            ImageType::Abstract
        );
    }

    #[test]
    fn presentation_wins_over_logo() {
        assert_eq!(
            ImageType::detect("slide with our brand"),
            ImageType::Presentation
        );
    }

    #[test]
    fn detection_is_case_insensitive() {
        assert_eq!(ImageType::detect("A LOGO for my shop"), ImageType::Logo);
    }

    #[test]
    fn each_bucket_matches_its_keywords() {
        assert_eq!(ImageType::detect("a headshot of me"), ImageType::Portrait);
        assert_eq!(ImageType::detect("mountain scenery"), ImageType::Landscape);
        assert_eq!(ImageType::detect("product shot"), ImageType::Product);
        assert_eq!(ImageType::detect("pencil sketch"), ImageType::Illustration);
    }

    #[test]
    fn unmatched_prompt_is_general() {
        assert_eq!(ImageType::detect("a quiet cup of coffee"), ImageType::General);
    }

    #[test]
    fn empty_prompt_is_general() {
        assert_eq!(ImageType::detect(""), ImageType::General);
    }

    #[test]
    fn serializes_to_snake_case() {
        let json = serde_json::to_string(&ImageType::SocialMedia).unwrap();
        assert_eq!(json, "\"social_media\"");
    }
}
