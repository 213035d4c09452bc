//! Dialogue depth profiles.

use serde::{Deserialize, Serialize};

use super::stage::DialogueStage;

/// How deep the refinement conversation goes before generation.
///
/// Each mode maps to a fixed, ordered stage sequence. Explorer shares
/// Guided's sequence; its extra depth comes from additional sub-questions
/// inside the `Details` stage, not from extra stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DialogueMode {
    /// 1-2 questions, fast path.
    Quick,
    /// 3-5 questions, balanced.
    #[default]
    Guided,
    /// Deep exploration with follow-up sub-questions.
    Explorer,
    /// Direct generation, no dialogue.
    Skip,
}

const QUICK_SEQUENCE: &[DialogueStage] = &[DialogueStage::Initial, DialogueStage::Style];

const FULL_SEQUENCE: &[DialogueStage] = &[
    DialogueStage::Initial,
    DialogueStage::Style,
    DialogueStage::ColorMood,
    DialogueStage::Details,
];

impl DialogueMode {
    /// Returns the fixed stage sequence for this mode.
    pub fn stage_sequence(&self) -> &'static [DialogueStage] {
        match self {
            Self::Quick => QUICK_SEQUENCE,
            Self::Guided | Self::Explorer => FULL_SEQUENCE,
            Self::Skip => &[],
        }
    }

    /// Parses a mode string, falling back to `Guided` for anything
    /// unrecognized (including the empty string).
    pub fn from_str_lossy(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "quick" => Self::Quick,
            "guided" => Self::Guided,
            "explorer" => Self::Explorer,
            "skip" => Self::Skip,
            _ => Self::Guided,
        }
    }

    /// Returns the canonical string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Quick => "quick",
            Self::Guided => "guided",
            Self::Explorer => "explorer",
            Self::Skip => "skip",
        }
    }
}

impl std::fmt::Display for DialogueMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_mode_is_guided() {
        assert_eq!(DialogueMode::default(), DialogueMode::Guided);
    }

    #[test]
    fn quick_has_two_stages() {
        assert_eq!(
            DialogueMode::Quick.stage_sequence(),
            &[DialogueStage::Initial, DialogueStage::Style]
        );
    }

    #[test]
    fn guided_and_explorer_share_the_full_sequence() {
        assert_eq!(
            DialogueMode::Guided.stage_sequence(),
            DialogueMode::Explorer.stage_sequence()
        );
        assert_eq!(DialogueMode::Guided.stage_sequence().len(), 4);
    }

    #[test]
    fn skip_has_no_stages() {
        assert!(DialogueMode::Skip.stage_sequence().is_empty());
    }

    #[test]
    fn sequences_never_contain_ready() {
        for mode in [
            DialogueMode::Quick,
            DialogueMode::Guided,
            DialogueMode::Explorer,
            DialogueMode::Skip,
        ] {
            assert!(!mode.stage_sequence().contains(&DialogueStage::Ready));
        }
    }

    #[test]
    fn lossy_parse_accepts_known_modes() {
        assert_eq!(DialogueMode::from_str_lossy("quick"), DialogueMode::Quick);
        assert_eq!(DialogueMode::from_str_lossy("  EXPLORER "), DialogueMode::Explorer);
        assert_eq!(DialogueMode::from_str_lossy("skip"), DialogueMode::Skip);
    }

    #[test]
    fn lossy_parse_falls_back_to_guided() {
        assert_eq!(DialogueMode::from_str_lossy("turbo"), DialogueMode::Guided);
        assert_eq!(DialogueMode::from_str_lossy(""), DialogueMode::Guided);
    }

    #[test]
    fn serializes_to_snake_case() {
        let json = serde_json::to_string(&DialogueMode::Explorer).unwrap();
        assert_eq!(json, "\"explorer\"");
    }
}
