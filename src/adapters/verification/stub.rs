//! Stub verifier - Always-pass verification with narrative feedback.
//!
//! Builds a checklist of what a real vision-based verifier would
//! inspect and reports it as narrative text, but performs no actual
//! image analysis: every artifact passes with fixed confidence. The
//! checklist keeps the report useful for a human reviewer.

use crate::domain::dialogue::{keys, AnswerMap};
use crate::domain::enrichment::ImageType;
use crate::domain::foundation::Timestamp;
use crate::ports::{ImageVerifier, Verification, VerificationRequest};

/// Confidence reported without an actual vision check.
const STUB_CONFIDENCE: f32 = 0.85;

/// One checklist entry in the narrative.
struct ChecklistItem {
    item: &'static str,
    requirement: String,
    critical: bool,
}

/// Verifier that always passes.
#[derive(Debug, Clone)]
pub struct StubVerifier {
    enabled: bool,
}

impl StubVerifier {
    /// Creates an enabled stub verifier.
    pub fn new() -> Self {
        Self { enabled: true }
    }

    /// Creates a disabled verifier that reports full confidence and an
    /// empty analysis.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    fn checklist(request: &VerificationRequest<'_>) -> Vec<ChecklistItem> {
        let mut items = vec![ChecklistItem {
            item: "Subject Matter",
            requirement: format!("Image contains: {}", request.original_prompt),
            critical: true,
        }];

        match request.image_type {
            Some(ImageType::Logo) => items.push(ChecklistItem {
                item: "Logo Quality",
                requirement: "Clean, scalable design suitable for branding".to_string(),
                critical: false,
            }),
            Some(ImageType::Presentation) => items.push(ChecklistItem {
                item: "Presentation Suitability",
                requirement: "High contrast, clear composition for slides".to_string(),
                critical: false,
            }),
            Some(ImageType::SocialMedia) => items.push(ChecklistItem {
                item: "Social Media Appeal",
                requirement: "Eye-catching, engaging for social feeds".to_string(),
                critical: false,
            }),
            _ => {}
        }

        for requirement in Self::dialogue_requirements(request.answers) {
            items.push(ChecklistItem {
                item: "Dialogue Requirement",
                requirement,
                critical: false,
            });
        }

        items.push(ChecklistItem {
            item: "Overall Quality",
            requirement: "Professional quality, no artifacts or errors".to_string(),
            critical: false,
        });

        items
    }

    fn dialogue_requirements(answers: Option<&AnswerMap>) -> Vec<String> {
        let Some(answers) = answers else {
            return Vec::new();
        };

        let mut requirements = Vec::new();
        if let Some(style) = answers.get(keys::STYLE) {
            requirements.push(format!("Style: {}", style));
        }
        if let Some(mood) = answers.get(keys::MOOD) {
            requirements.push(format!("Mood: {}", mood));
        }
        if let Some(colors) = answers
            .get(keys::COLORS)
            .or_else(|| answers.get(keys::COLOR_MOOD))
        {
            requirements.push(format!("Colors: {}", colors));
        }
        if let Some(composition) = answers.get(keys::COMPOSITION) {
            requirements.push(format!("Composition: {}", composition));
        }
        requirements
    }

    fn narrative(request: &VerificationRequest<'_>) -> String {
        let mut lines = vec![
            "Image generated successfully".to_string(),
            String::new(),
            "**Verification Checklist:**".to_string(),
        ];

        for entry in Self::checklist(request) {
            let priority = if entry.critical { "critical" } else { "high" };
            lines.push(format!("[{}] {}: {}", priority, entry.item, entry.requirement));
        }

        let requirements = Self::dialogue_requirements(request.answers);
        if !requirements.is_empty() {
            lines.push(String::new());
            lines.push("**Your Requirements:**".to_string());
            for requirement in requirements {
                lines.push(format!("  - {}", requirement));
            }
        }

        lines.push(String::new());
        lines.push(
            "Tip: Review the image to ensure it matches your vision. \
             If not satisfied, just describe what to change and it will be refined."
                .to_string(),
        );

        lines.join("\n")
    }
}

impl Default for StubVerifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageVerifier for StubVerifier {
    fn verify(&self, request: VerificationRequest<'_>) -> Verification {
        if !self.enabled {
            return Verification {
                passed: true,
                confidence: 1.0,
                issues: Vec::new(),
                suggestions: Vec::new(),
                narrative: "Verification disabled".to_string(),
                verified_at: Timestamp::now(),
            };
        }

        // Conservative approach: never block delivery, but hand back a
        // structured checklist and refinement suggestions.
        Verification {
            passed: true,
            confidence: STUB_CONFIDENCE,
            issues: Vec::new(),
            suggestions: vec![
                "Verify the image matches your original intent".to_string(),
                "Check colors, composition, and overall quality".to_string(),
                "Request refinements if needed".to_string(),
            ],
            narrative: Self::narrative(&request),
            verified_at: Timestamp::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn answers(pairs: &[(&str, &str)]) -> AnswerMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn request<'a>(
        answers: Option<&'a AnswerMap>,
        image_type: Option<ImageType>,
    ) -> VerificationRequest<'a> {
        VerificationRequest {
            artifact_path: Path::new("/tmp/image.png"),
            original_prompt: "a bakery logo",
            enhanced_prompt: "a bakery logo, clean design, scalable",
            answers,
            image_type,
        }
    }

    #[test]
    fn always_passes_with_fixed_confidence() {
        let verifier = StubVerifier::new();
        let verification = verifier.verify(request(None, None));
        assert!(verification.passed);
        assert!((verification.confidence - 0.85).abs() < f32::EPSILON);
        assert!(verification.issues.is_empty());
        assert_eq!(verification.suggestions.len(), 3);
    }

    #[test]
    fn narrative_includes_subject_and_overall_quality() {
        let verifier = StubVerifier::new();
        let verification = verifier.verify(request(None, None));
        assert!(verification.narrative.contains("Image contains: a bakery logo"));
        assert!(verification.narrative.contains("Overall Quality"));
        assert!(verification.narrative.contains("[critical] Subject Matter"));
    }

    #[test]
    fn logo_type_adds_branding_checklist_item() {
        let verifier = StubVerifier::new();
        let verification = verifier.verify(request(None, Some(ImageType::Logo)));
        assert!(verification.narrative.contains("Logo Quality"));
    }

    #[test]
    fn dialogue_answers_become_requirements() {
        let verifier = StubVerifier::new();
        let map = answers(&[
            ("style", "minimalist"),
            ("mood", "warm"),
            ("color_mood", "earth tones"),
            ("composition", "centered"),
        ]);
        let verification = verifier.verify(request(Some(&map), None));
        assert!(verification.narrative.contains("Style: minimalist"));
        assert!(verification.narrative.contains("Mood: warm"));
        // Legacy colors key is picked up.
        assert!(verification.narrative.contains("Colors: earth tones"));
        assert!(verification.narrative.contains("Composition: centered"));
    }

    #[test]
    fn disabled_verifier_reports_full_confidence() {
        let verifier = StubVerifier::disabled();
        let verification = verifier.verify(request(None, None));
        assert!(verification.passed);
        assert_eq!(verification.confidence, 1.0);
        assert_eq!(verification.narrative, "Verification disabled");
    }
}
