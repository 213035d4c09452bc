//! Prompt quality assessment.
//!
//! Five independent boolean checks over the prompt text. Subject
//! presence uses a coarse word-count proxy and, unlike the other four
//! criteria, never contributes to the missing-elements list or the
//! suggestions; only the score reflects it.

use serde::{Deserialize, Serialize};

/// Style descriptors recognized in prompt text.
pub(crate) const STYLE_KEYWORDS: &[&str] = &[
    "photorealistic",
    "artistic",
    "painterly",
    "minimalist",
    "abstract",
    "cinematic",
    "dramatic",
    "professional",
    "modern",
    "vintage",
    "contemporary",
    "traditional",
    "futuristic",
    "rustic",
];

/// Mood descriptors recognized in prompt text.
pub(crate) const MOOD_KEYWORDS: &[&str] = &[
    "calm", "peaceful", "energetic", "dramatic", "mysterious", "cheerful", "moody", "bright",
    "dark", "warm", "cool", "inviting", "bold", "subtle", "intense", "serene",
];

/// Color vocabulary recognized in prompt text.
pub(crate) const COLOR_KEYWORDS: &[&str] = &[
    "red",
    "blue",
    "green",
    "yellow",
    "purple",
    "orange",
    "pink",
    "warm",
    "cool",
    "vibrant",
    "muted",
    "pastel",
    "neon",
    "monochrome",
    "colorful",
    "black",
    "white",
    "gray",
];

/// Composition vocabulary recognized in prompt text.
pub(crate) const COMPOSITION_KEYWORDS: &[&str] = &[
    "centered",
    "rule of thirds",
    "close-up",
    "wide angle",
    "symmetrical",
    "asymmetrical",
    "balanced",
    "dynamic",
    "foreground",
    "background",
    "depth of field",
];

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Quality assessment of a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityScore {
    /// 0-100, in steps of 20 (five equally weighted criteria).
    pub score: u8,
    /// Criterion tags for the unmet optional criteria.
    pub missing_elements: Vec<String>,
    /// Human-readable improvement suggestions, one per missing element.
    pub suggestions: Vec<String>,
    pub has_subject: bool,
    pub has_style: bool,
    pub has_mood: bool,
    pub has_colors: bool,
    pub has_composition: bool,
}

impl QualityScore {
    /// Assesses the descriptive completeness of a prompt.
    ///
    /// An empty prompt scores 0. The subject check is a word-count
    /// heuristic (three or more words) and is intentionally absent from
    /// `missing_elements` and `suggestions` even when it fails.
    pub fn assess(prompt: &str) -> Self {
        let prompt_lower = prompt.to_lowercase();

        let has_subject = prompt.split_whitespace().count() >= 3;
        let has_style = contains_any(&prompt_lower, STYLE_KEYWORDS);
        let has_mood = contains_any(&prompt_lower, MOOD_KEYWORDS);
        let has_colors = contains_any(&prompt_lower, COLOR_KEYWORDS);
        let has_composition = contains_any(&prompt_lower, COMPOSITION_KEYWORDS);

        let criteria_met = [has_subject, has_style, has_mood, has_colors, has_composition]
            .iter()
            .filter(|&&met| met)
            .count();
        let score = (criteria_met * 100 / 5) as u8;

        let mut missing_elements = Vec::new();
        let mut suggestions = Vec::new();
        if !has_style {
            missing_elements.push("style_keywords".to_string());
            suggestions.push(
                "Consider adding visual style (photorealistic, artistic, minimalist)".to_string(),
            );
        }
        if !has_mood {
            missing_elements.push("mood_descriptors".to_string());
            suggestions
                .push("Specify the mood or atmosphere (dramatic, peaceful, energetic)".to_string());
        }
        if !has_colors {
            missing_elements.push("color_palette".to_string());
            suggestions
                .push("Add color preferences (warm tones, vibrant colors, monochrome)".to_string());
        }
        if !has_composition {
            missing_elements.push("composition_details".to_string());
            suggestions
                .push("Describe composition (centered, rule of thirds, close-up)".to_string());
        }

        Self {
            score,
            missing_elements,
            suggestions,
            has_subject,
            has_style,
            has_mood,
            has_colors,
            has_composition,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_noun_scores_below_fifty() {
        let q = QualityScore::assess("cat");
        assert!(q.score < 50, "score was {}", q.score);
        assert!(!q.has_subject);
    }

    #[test]
    fn empty_prompt_scores_zero() {
        let q = QualityScore::assess("");
        assert_eq!(q.score, 0);
        assert_eq!(q.missing_elements.len(), 4);
    }

    #[test]
    fn rich_prompt_scores_at_least_eighty() {
        let q = QualityScore::assess(
            "a minimalist poster of a calm lake in muted blue tones, centered composition",
        );
        assert!(q.score >= 80, "score was {}", q.score);
        assert!(q.has_style);
        assert!(q.has_mood);
        assert!(q.has_colors);
        assert!(q.has_composition);
    }

    #[test]
    fn subject_needs_three_words() {
        assert!(!QualityScore::assess("red logo").has_subject);
        assert!(QualityScore::assess("a red logo").has_subject);
    }

    #[test]
    fn missing_subject_is_not_reported_as_missing() {
        // Deliberate asymmetry: the subject heuristic only affects the score.
        let q = QualityScore::assess("hi");
        assert!(!q.has_subject);
        assert!(!q.missing_elements.iter().any(|m| m.contains("subject")));
        assert!(!q.suggestions.iter().any(|s| s.to_lowercase().contains("subject")));
    }

    #[test]
    fn suggestions_mirror_missing_elements() {
        let q = QualityScore::assess("a photorealistic castle on a hill");
        assert_eq!(q.missing_elements.len(), q.suggestions.len());
        assert!(q.missing_elements.contains(&"mood_descriptors".to_string()));
        assert!(!q.missing_elements.contains(&"style_keywords".to_string()));
    }

    #[test]
    fn score_is_a_multiple_of_twenty() {
        for prompt in ["", "cat", "a red logo", "calm warm centered artistic scene"] {
            assert_eq!(QualityScore::assess(prompt).score % 20, 0);
        }
    }
}
