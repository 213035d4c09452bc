//! Image verifier port - Post-generation quality check contract.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::dialogue::AnswerMap;
use crate::domain::enrichment::ImageType;
use crate::domain::foundation::Timestamp;

/// Everything the verifier gets to look at for one artifact.
#[derive(Debug, Clone, Copy)]
pub struct VerificationRequest<'a> {
    /// Path to the saved artifact.
    pub artifact_path: &'a Path,
    /// The user's original request text.
    pub original_prompt: &'a str,
    /// The enriched prompt actually used for generation.
    pub enhanced_prompt: &'a str,
    /// Dialogue answers, when the artifact came from a guided session.
    pub answers: Option<&'a AnswerMap>,
    /// Detected image category, when known.
    pub image_type: Option<ImageType>,
}

/// Outcome of a verification pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verification {
    pub passed: bool,
    /// 0.0 to 1.0.
    pub confidence: f32,
    pub issues: Vec<String>,
    pub suggestions: Vec<String>,
    /// Free-form narrative describing what was checked.
    pub narrative: String,
    pub verified_at: Timestamp,
}

impl Verification {
    /// Formats the outcome as a markdown report.
    pub fn to_markdown_report(&self, include_narrative: bool) -> String {
        let mut lines = Vec::new();

        if self.passed {
            lines.push("### Quality Verification Passed".to_string());
        } else {
            lines.push("### Quality Verification Issues Detected".to_string());
        }
        lines.push(format!(
            "**Confidence:** {}%",
            (self.confidence * 100.0).round() as u32
        ));
        lines.push(String::new());

        if !self.issues.is_empty() {
            lines.push("**Issues Found:**".to_string());
            for issue in &self.issues {
                lines.push(format!("  - {}", issue));
            }
            lines.push(String::new());
        }

        if !self.suggestions.is_empty() {
            lines.push("**Suggestions:**".to_string());
            for suggestion in &self.suggestions {
                lines.push(format!("  - {}", suggestion));
            }
            lines.push(String::new());
        }

        if include_narrative && !self.narrative.is_empty() {
            lines.push("**Detailed Analysis:**".to_string());
            lines.push(self.narrative.clone());
        }

        lines.join("\n")
    }
}

/// Port for verifying a generated artifact against the user's intent.
pub trait ImageVerifier: Send + Sync {
    /// Verifies the artifact and reports the outcome.
    fn verify(&self, request: VerificationRequest<'_>) -> Verification;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verification(passed: bool) -> Verification {
        Verification {
            passed,
            confidence: 0.85,
            issues: vec!["color palette drifted".to_string()],
            suggestions: vec!["request a refinement".to_string()],
            narrative: "checked subject and palette".to_string(),
            verified_at: Timestamp::now(),
        }
    }

    #[test]
    fn passed_report_leads_with_success() {
        let report = verification(true).to_markdown_report(true);
        assert!(report.starts_with("### Quality Verification Passed"));
        assert!(report.contains("**Confidence:** 85%"));
        assert!(report.contains("checked subject and palette"));
    }

    #[test]
    fn failed_report_leads_with_issues() {
        let report = verification(false).to_markdown_report(false);
        assert!(report.starts_with("### Quality Verification Issues Detected"));
        assert!(report.contains("color palette drifted"));
        assert!(!report.contains("checked subject and palette"));
    }
}
