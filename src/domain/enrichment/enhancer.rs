//! Prompt enrichment engine.
//!
//! Classifies requests, scores their descriptive completeness, and
//! deterministically folds collected dialogue answers (or heuristic
//! defaults) into one coherent descriptive prompt.

use crate::domain::dialogue::{keys, AnswerMap};

use super::image_type::ImageType;
use super::quality::QualityScore;
use super::size::ImageSize;

/// A category rule: if the answer contains any trigger word, the clause
/// is appended. First matching rule wins within a table.
type CategoryRule = (&'static [&'static str], &'static str);

const STYLE_RULES: &[CategoryRule] = &[
    (&["photorealistic"], "photorealistic style, high detail, professional photography"),
    (&["artistic", "painterly"], "artistic painting style, expressive brushwork"),
    (&["minimalist"], "minimalist design, clean lines, simple composition"),
    (&["detailed", "complex"], "highly detailed, rich with elements"),
    (&["abstract"], "abstract conceptual style, symbolic interpretation"),
];

const MOOD_RULES: &[CategoryRule] = &[
    (&["professional"], "professional polished aesthetic"),
    (&["energetic"], "energetic dynamic atmosphere"),
    (&["calm", "peaceful"], "calm peaceful serene mood"),
    (&["dramatic"], "bold dramatic lighting"),
    (&["warm", "inviting"], "warm inviting atmosphere"),
    (&["modern"], "modern cutting-edge aesthetic"),
];

const COLOR_RULES: &[CategoryRule] = &[
    (&["warm"], "warm color palette with reds, oranges, and yellows"),
    (&["cool"], "cool color palette with blues, greens, and purples"),
    (&["neutral", "monochrome"], "neutral monochromatic color scheme"),
    (&["vibrant", "saturated"], "vibrant saturated colors, bold and energetic"),
    (&["muted", "pastel"], "muted pastel tones, soft and subtle"),
];

const COMPOSITION_RULES: &[CategoryRule] = &[
    (&["centered"], "centered composition, balanced framing"),
    (&["rule of thirds"], "rule of thirds composition, dynamic placement"),
    (&["close-up", "intimate"], "close-up intimate view, focus on details"),
    (&["wide"], "wide establishing shot, contextual view"),
];

const DETAIL_LEVEL_RULES: &[CategoryRule] = &[
    (&["highly detailed"], "highly detailed, intricate elements"),
    (&["minimalist"], "minimalist approach, focus on essentials"),
];

const USE_CASE_RULES: &[CategoryRule] = &[
    (&["web", "digital"], "optimized for digital display"),
    (&["print"], "high contrast suitable for print"),
    (&["social"], "eye-catching for social media"),
];

fn match_category(answer: &str, rules: &[CategoryRule]) -> Option<&'static str> {
    let answer_lower = answer.to_lowercase();
    rules
        .iter()
        .find(|(triggers, _)| triggers.iter().any(|t| answer_lower.contains(t)))
        .map(|(_, clause)| *clause)
}

/// Classifier, scorer, and text-merge engine for image prompts.
///
/// Stateless; construct one per process and pass it to callers.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptEnricher;

impl PromptEnricher {
    /// Creates a new enricher.
    pub fn new() -> Self {
        Self
    }

    /// Classifies the request into an [`ImageType`].
    pub fn detect_type(&self, prompt: &str) -> ImageType {
        ImageType::detect(prompt)
    }

    /// Scores the descriptive completeness of the prompt.
    pub fn score(&self, prompt: &str) -> QualityScore {
        QualityScore::assess(prompt)
    }

    /// Folds dialogue answers into the original prompt.
    ///
    /// An ordered pipeline of independent rules (style, mood, colors,
    /// composition, detail level, specific elements, use case); each
    /// triggered rule appends exactly one clause. A clause already
    /// present in the accumulated text (case-insensitively) is not
    /// appended again, so re-merging the output with the same answer
    /// map is a fixpoint.
    pub fn merge(&self, original_prompt: &str, answers: &AnswerMap) -> String {
        let mut parts: Vec<String> = vec![original_prompt.to_string()];

        if let Some(style) = answers.get(keys::STYLE) {
            if let Some(clause) = match_category(style, STYLE_RULES) {
                push_unique(&mut parts, clause);
            }
        }

        if let Some(mood) = answers.get(keys::MOOD) {
            if let Some(clause) = match_category(mood, MOOD_RULES) {
                push_unique(&mut parts, clause);
            }
        }

        // Colors may live under "colors" or the legacy "color_mood" key.
        let color_info = answers
            .get(keys::COLORS)
            .or_else(|| answers.get(keys::COLOR_MOOD));
        if let Some(color_info) = color_info {
            match match_category(color_info, COLOR_RULES) {
                Some(clause) => push_unique(&mut parts, clause),
                // The user named specific colors; carry them verbatim.
                None if !color_info.trim().is_empty() => {
                    push_unique(&mut parts, &format!("color palette: {}", color_info.trim()))
                }
                None => {}
            }
        }

        if let Some(composition) = answers.get(keys::COMPOSITION) {
            if let Some(clause) = match_category(composition, COMPOSITION_RULES) {
                push_unique(&mut parts, clause);
            }
        }

        if let Some(detail) = answers.get(keys::DETAIL_LEVEL) {
            if let Some(clause) = match_category(detail, DETAIL_LEVEL_RULES) {
                push_unique(&mut parts, clause);
            }
        }

        if let Some(elements) = answers.get(keys::SPECIFIC_ELEMENTS) {
            if !elements.trim().is_empty() {
                push_unique(&mut parts, &format!("include: {}", elements.trim()));
            }
        }

        if let Some(use_case) = answers.get(keys::INITIAL) {
            if let Some(clause) = match_category(use_case, USE_CASE_RULES) {
                push_unique(&mut parts, clause);
            }
        }

        let mut enhanced = parts.join(", ");
        // Collapse doubled commas to a fixpoint; a single pass can
        // create a fresh pair out of a triple.
        while enhanced.contains(",,") {
            enhanced = enhanced.replace(",,", ",");
        }
        enhanced.trim().to_string()
    }

    /// Enriches a prompt without dialogue answers.
    ///
    /// When the quality score is below 60, appends type-aware defaults
    /// for the criteria that are missing, then applies the type
    /// optimization pass.
    pub fn enrich_without_dialogue(&self, prompt: &str) -> String {
        let image_type = self.detect_type(prompt);
        let quality = self.score(prompt);

        let mut parts: Vec<String> = vec![prompt.to_string()];

        if quality.score < 60 {
            if !quality.has_style {
                let clause = match image_type {
                    ImageType::Logo => "modern professional design",
                    ImageType::Product | ImageType::Presentation => {
                        "photorealistic professional quality"
                    }
                    _ => "high quality professional aesthetic",
                };
                parts.push(clause.to_string());
            }
            if !quality.has_composition {
                parts.push("well-composed balanced framing".to_string());
            }
            if !quality.has_mood {
                parts.push("professional lighting".to_string());
            }
        }

        let enhanced = parts.join(", ");
        self.apply_type_optimizations(&enhanced, image_type)
    }

    /// Appends category-appropriate clauses for types with well-known
    /// requirements, unless a near-synonym is already present.
    ///
    /// The synonym check is best-effort, not guaranteed duplicate-free.
    pub fn apply_type_optimizations(&self, prompt: &str, image_type: ImageType) -> String {
        let mut out = prompt.to_string();

        match image_type {
            ImageType::Logo => {
                // Logos need to be clean, scalable, and simple.
                append_unless(&mut out, &["clean"], "clean design");
                append_unless(&mut out, &["scalable"], "scalable");
                append_unless(&mut out, &["professional"], "professional");
            }
            ImageType::Presentation => {
                // Presentations need high contrast and clarity.
                append_unless(&mut out, &["high contrast"], "high contrast");
                append_unless(&mut out, &["clear"], "clear composition");
            }
            ImageType::SocialMedia => {
                append_unless(&mut out, &["eye-catching", "attention"], "eye-catching");
                append_unless(&mut out, &["vibrant", "bold"], "engaging visual");
            }
            ImageType::Product => {
                append_unless(&mut out, &["professional"], "professional product photography");
                append_unless(&mut out, &["lighting"], "studio lighting");
            }
            _ => {}
        }

        out
    }

    /// Suggests output dimensions for the request.
    ///
    /// Explicit orientation keywords in the prompt win outright over the
    /// per-type defaults.
    pub fn suggest_size(&self, image_type: ImageType, prompt: &str) -> ImageSize {
        let prompt_lower = prompt.to_lowercase();

        if prompt_lower.contains("story") || prompt_lower.contains("stories") {
            return ImageSize::Portrait;
        }
        if prompt_lower.contains("portrait") || prompt_lower.contains("vertical") {
            return ImageSize::Portrait;
        }
        if prompt_lower.contains("landscape")
            || prompt_lower.contains("wide")
            || prompt_lower.contains("horizontal")
        {
            return ImageSize::Landscape;
        }

        match image_type {
            ImageType::Logo => ImageSize::Square,
            ImageType::Presentation => ImageSize::Landscape,
            ImageType::SocialMedia => ImageSize::Square,
            ImageType::Portrait => ImageSize::Portrait,
            ImageType::Landscape => ImageSize::Landscape,
            _ => ImageSize::Square,
        }
    }

    /// Returns fixed per-type tips shown alongside the first question.
    pub fn contextual_suggestions(&self, image_type: ImageType) -> Vec<&'static str> {
        match image_type {
            ImageType::Logo => vec![
                "Consider: What does your brand represent?",
                "Logo tip: Simpler designs are more memorable and scalable",
                "Think about: How will it look in black and white?",
            ],
            ImageType::Presentation => vec![
                "Presentation tip: Leave space for text overlay",
                "Consider: High contrast works better on projectors",
                "Think about: Landscape orientation (1536x1024) works best",
            ],
            ImageType::SocialMedia => vec![
                "Social media tip: Bold colors grab attention in feeds",
                "Consider: Mobile viewers see smaller images",
                "Think about: Platform requirements (Instagram 1:1, Stories 9:16)",
            ],
            ImageType::Product => vec![
                "Product photo tip: Clean background highlights the product",
                "Consider: Professional lighting shows quality",
                "Think about: Multiple angles for e-commerce",
            ],
            ImageType::Portrait => vec![
                "Portrait tip: Vertical orientation (1024x1536) works best",
                "Consider: Lighting direction affects mood",
                "Think about: Background should complement, not distract",
            ],
            _ => Vec::new(),
        }
    }
}

/// Appends `clause` unless it is already present (case-insensitively)
/// in the accumulated parts.
fn push_unique(parts: &mut Vec<String>, clause: &str) {
    let combined = parts.join(", ").to_lowercase();
    if !combined.contains(&clause.to_lowercase()) {
        parts.push(clause.to_string());
    }
}

/// Appends `, clause` unless any of `needles` already appears in the
/// text (case-insensitively).
fn append_unless(out: &mut String, needles: &[&str], clause: &str) {
    let lower = out.to_lowercase();
    if !needles.iter().any(|n| lower.contains(n)) {
        out.push_str(", ");
        out.push_str(clause);
    }
}
