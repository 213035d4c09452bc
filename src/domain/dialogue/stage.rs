//! Stages of the refinement conversation.

use serde::{Deserialize, Serialize};

/// Well-known answer map keys.
///
/// The answer map is caller-maintained: each key is recorded when the
/// user answers the corresponding question. `COLOR_MOOD` is both the
/// quick-mode combined answer and the legacy spelling older records used
/// for the colors answer; readers must accept either.
pub mod keys {
    /// Use-case answer from the initial stage.
    pub const INITIAL: &str = "initial";
    /// Visual style answer.
    pub const STYLE: &str = "style";
    /// Color palette answer (guided/explorer).
    pub const COLORS: &str = "colors";
    /// Combined colors+mood answer (quick mode) or legacy colors key.
    pub const COLOR_MOOD: &str = "color_mood";
    /// Mood/atmosphere answer (guided/explorer).
    pub const MOOD: &str = "mood";
    /// Level-of-detail answer.
    pub const DETAIL_LEVEL: &str = "detail_level";
    /// Composition preference answer.
    pub const COMPOSITION: &str = "composition";
    /// Whole-stage marker a caller may record to close the details
    /// stage after its first question.
    pub const DETAILS_MARKER: &str = "details";
    /// Free-text elements to include/avoid (explorer only).
    pub const SPECIFIC_ELEMENTS: &str = "specific_elements";
}

/// A named step in the guided conversation.
///
/// `Ready` is terminal: it is never asked, only reported once every
/// stage in the mode's sequence is satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogueStage {
    /// First understanding of the request and its use case.
    Initial,
    /// Visual style preferences.
    Style,
    /// Colors and atmosphere.
    ColorMood,
    /// Composition specifics.
    Details,
    /// All questions answered, ready to generate.
    Ready,
}

impl DialogueStage {
    /// Returns a short label for UI display.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Initial => "Understanding",
            Self::Style => "Style",
            Self::ColorMood => "Colors & Mood",
            Self::Details => "Details",
            Self::Ready => "Ready",
        }
    }

    /// Returns true if this is the terminal stage.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Ready)
    }
}
