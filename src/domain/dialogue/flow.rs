//! Dialogue flow state machine.
//!
//! Decides the next question to ask and signals completion. The flow is
//! a pure function of (mode, prompt, answer map) plus one piece of
//! running state: the current stage, updated as a side effect of each
//! call and used only for progress reporting.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::mode::DialogueMode;
use super::question::DialogueQuestion;
use super::stage::{keys, DialogueStage};

/// Caller-maintained record of what the user has answered so far.
///
/// Keys are stage or sub-question names (see [`keys`]); presence of a
/// key marks that slot answered. Insertion order is irrelevant.
pub type AnswerMap = HashMap<String, String>;

/// Completion sub-state for a single stage.
///
/// `ColorMood` and `Details` hold several answers; their completion is
/// computed from the individual sub-slots rather than inferred from one
/// flat key. Callers that instead record a whole-stage marker key
/// (`color_mood`, `details`) after the stage's first question still
/// complete the stage: the marker short-circuits the sub-slot check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageStatus {
    /// Stage with a single answer slot.
    Single { answered: bool },
    /// Colors-then-mood stage (guided/explorer). `combined_done` is the
    /// quick-mode combined answer or a whole-stage marker under the
    /// legacy `color_mood` key; it satisfies the stage on its own.
    ColorMood {
        combined_done: bool,
        colors_done: bool,
        mood_done: bool,
    },
    /// Detail sub-questions in priority order. `elements_done` is
    /// vacuously true outside explorer mode; `marker_done` is a
    /// whole-stage marker under the `details` key.
    Details {
        marker_done: bool,
        detail_level_done: bool,
        composition_done: bool,
        elements_done: bool,
    },
}

impl StageStatus {
    /// Computes the sub-state of `stage` for the given mode and answers.
    pub fn of(stage: DialogueStage, mode: DialogueMode, answers: &AnswerMap) -> Self {
        let has = |key: &str| answers.contains_key(key);
        match stage {
            DialogueStage::Initial => Self::Single {
                answered: has(keys::INITIAL),
            },
            DialogueStage::Style => Self::Single {
                answered: has(keys::STYLE),
            },
            DialogueStage::ColorMood => {
                if mode == DialogueMode::Quick {
                    // One combined question, recorded under either key.
                    Self::Single {
                        answered: has(keys::COLOR_MOOD) || has(keys::COLORS),
                    }
                } else {
                    Self::ColorMood {
                        combined_done: has(keys::COLOR_MOOD),
                        colors_done: has(keys::COLORS),
                        mood_done: has(keys::MOOD),
                    }
                }
            }
            DialogueStage::Details => Self::Details {
                marker_done: has(keys::DETAILS_MARKER),
                detail_level_done: has(keys::DETAIL_LEVEL),
                composition_done: has(keys::COMPOSITION),
                elements_done: mode != DialogueMode::Explorer || has(keys::SPECIFIC_ELEMENTS),
            },
            DialogueStage::Ready => Self::Single { answered: true },
        }
    }

    /// Returns true when no sub-question remains for the stage.
    pub fn is_satisfied(&self) -> bool {
        match *self {
            Self::Single { answered } => answered,
            Self::ColorMood {
                combined_done,
                colors_done,
                mood_done,
            } => combined_done || (colors_done && mood_done),
            Self::Details {
                marker_done,
                detail_level_done,
                composition_done,
                elements_done,
            } => marker_done || (detail_level_done && composition_done && elements_done),
        }
    }
}

/// Progress through the mode's stage sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueProgress {
    /// The stage the flow is currently on.
    pub current_stage: DialogueStage,
    /// Index of the current stage within the sequence (0 if not found).
    pub completed_stages: usize,
    /// Length of the mode's stage sequence.
    pub total_stages: usize,
    /// floor(completed / total * 100), 0 when the sequence is empty.
    pub percent: u8,
}

/// Orchestrates the refinement conversation for one request.
///
/// Scans the mode's stage sequence in order and asks the first
/// unsatisfied stage. A stage that has an answer is never re-asked
/// within the same flow run.
#[derive(Debug, Clone)]
pub struct DialogueFlow {
    mode: DialogueMode,
    current_stage: DialogueStage,
}

impl DialogueFlow {
    /// Creates a flow for the given mode, starting at the initial stage.
    pub fn new(mode: DialogueMode) -> Self {
        Self {
            mode,
            current_stage: DialogueStage::Initial,
        }
    }

    /// Returns the flow's mode.
    pub fn mode(&self) -> DialogueMode {
        self.mode
    }

    /// Returns the stage the flow is currently on.
    pub fn current_stage(&self) -> DialogueStage {
        self.current_stage
    }

    /// Returns the next question, or `None` when the conversation is
    /// complete.
    ///
    /// `Skip` mode returns `None` immediately without touching the
    /// current stage. Otherwise the first stage whose sub-state is
    /// unsatisfied produces the question and becomes the current stage;
    /// when every stage is satisfied the flow moves to `Ready`.
    pub fn next_question(
        &mut self,
        original_prompt: &str,
        answers: &AnswerMap,
    ) -> Option<DialogueQuestion> {
        if self.mode == DialogueMode::Skip {
            return None;
        }

        for &stage in self.mode.stage_sequence() {
            if StageStatus::of(stage, self.mode, answers).is_satisfied() {
                continue;
            }
            self.current_stage = stage;
            if let Some(question) = self.question_for(stage, original_prompt, answers) {
                return Some(question);
            }
            // No sub-question left despite the unsatisfied flat key:
            // treat the stage as done and keep scanning.
        }

        self.current_stage = DialogueStage::Ready;
        None
    }

    /// Reports progress through the stage sequence.
    pub fn progress(&self) -> DialogueProgress {
        let sequence = self.mode.stage_sequence();
        let total_stages = sequence.len();
        let completed_stages = sequence
            .iter()
            .position(|&s| s == self.current_stage)
            .unwrap_or(0);
        let percent = if total_stages == 0 {
            0
        } else {
            (completed_stages * 100 / total_stages) as u8
        };

        DialogueProgress {
            current_stage: self.current_stage,
            completed_stages,
            total_stages,
            percent,
        }
    }

    fn question_for(
        &self,
        stage: DialogueStage,
        original_prompt: &str,
        answers: &AnswerMap,
    ) -> Option<DialogueQuestion> {
        match stage {
            DialogueStage::Initial => Some(self.initial_question(original_prompt)),
            DialogueStage::Style => Some(self.style_question()),
            DialogueStage::ColorMood => Some(self.color_mood_question(answers)),
            DialogueStage::Details => self.detail_question(answers),
            DialogueStage::Ready => None,
        }
    }

    /// Initial understanding question, tailored to the request by an
    /// ordered keyword match over four buckets.
    fn initial_question(&self, prompt: &str) -> DialogueQuestion {
        let prompt_lower = prompt.to_lowercase();
        let mentions = |words: &[&str]| words.iter().any(|w| prompt_lower.contains(w));

        if mentions(&["logo", "brand", "icon"]) {
            DialogueQuestion::new(
                DialogueStage::Initial,
                "Tell me about what this logo represents. What should it communicate?",
            )
            .with_context("Understanding your brand helps create a logo that resonates")
        } else if mentions(&["presentation", "slide", "deck"]) {
            DialogueQuestion::new(
                DialogueStage::Initial,
                "What's the presentation about? Who's the audience?",
            )
            .with_options([
                "Corporate/professional audience",
                "Academic/educational setting",
                "Public/general audience",
            ])
            .with_context("Presentation context affects visual style")
        } else if mentions(&["social", "instagram", "post", "twitter", "facebook"]) {
            DialogueQuestion::new(
                DialogueStage::Initial,
                "What's the goal of this social media post?",
            )
            .with_options([
                "Eye-catching and shareable",
                "Professional brand content",
                "Personal/authentic vibe",
            ])
            .with_context("Social media images need to grab attention quickly")
        } else {
            DialogueQuestion::new(DialogueStage::Initial, "How will you use this image?")
                .with_options([
                    "Web/digital display",
                    "Print material",
                    "Personal art/creative project",
                    "Reference/concept exploration",
                ])
                .with_context("Use case helps optimize the image")
        }
    }

    /// The style question is the same fixed question in every mode.
    fn style_question(&self) -> DialogueQuestion {
        DialogueQuestion::new(DialogueStage::Style, "What visual style appeals to you?")
            .with_options([
                "Photorealistic (like a photograph)",
                "Artistic/Painterly (expressive, creative)",
                "Minimalist (clean, simple lines)",
                "Detailed/Complex (rich with elements)",
                "Abstract/Conceptual (symbolic, interpretive)",
            ])
            .with_context("Style choice dramatically affects the final image")
    }

    fn color_mood_question(&self, answers: &AnswerMap) -> DialogueQuestion {
        if self.mode == DialogueMode::Quick {
            return DialogueQuestion::new(
                DialogueStage::ColorMood,
                "Any specific colors or mood in mind? (e.g., 'warm sunset tones' or 'professional blues')",
            )
            .with_context("Colors and mood set the emotional tone");
        }

        // Guided/Explorer: colors first, then mood.
        if !answers.contains_key(keys::COLORS) {
            DialogueQuestion::new(DialogueStage::ColorMood, "What color palette works best?")
                .with_options([
                    "Warm colors (reds, oranges, yellows)",
                    "Cool colors (blues, greens, purples)",
                    "Neutral/Monochrome (blacks, whites, grays)",
                    "Vibrant/Saturated (bold, energetic)",
                    "Muted/Pastel (soft, subtle)",
                    "Specific colors (tell me which)",
                ])
                .with_context("Color psychology affects how viewers feel")
        } else {
            DialogueQuestion::new(
                DialogueStage::ColorMood,
                "What mood or atmosphere should it convey?",
            )
            .with_options([
                "Professional & polished",
                "Energetic & dynamic",
                "Calm & peaceful",
                "Bold & dramatic",
                "Warm & inviting",
                "Modern & cutting-edge",
            ])
            .with_context("Mood guides lighting and composition choices")
        }
    }

    /// Detail sub-questions in fixed priority order: detail level, then
    /// composition, then (explorer only) specific elements.
    fn detail_question(&self, answers: &AnswerMap) -> Option<DialogueQuestion> {
        if !answers.contains_key(keys::DETAIL_LEVEL) {
            return Some(
                DialogueQuestion::new(DialogueStage::Details, "How detailed should it be?")
                    .with_options([
                        "Highly detailed (rich with elements)",
                        "Balanced (some detail, not overwhelming)",
                        "Minimalist (focus on essentials)",
                    ])
                    .with_context("Detail level affects visual impact"),
            );
        }

        if !answers.contains_key(keys::COMPOSITION) {
            return Some(
                DialogueQuestion::new(DialogueStage::Details, "Any composition preferences?")
                    .with_options([
                        "Centered subject (traditional, balanced)",
                        "Rule of thirds (dynamic, professional)",
                        "Close-up/Intimate (focus on details)",
                        "Wide view (show context)",
                        "Let you decide (AI optimizes)",
                    ])
                    .with_context("Composition affects visual flow"),
            );
        }

        if self.mode == DialogueMode::Explorer && !answers.contains_key(keys::SPECIFIC_ELEMENTS) {
            return Some(
                DialogueQuestion::new(
                    DialogueStage::Details,
                    "Any specific elements to include or avoid?",
                )
                .with_context("Fine-tuning ensures the image matches your vision"),
            );
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(pairs: &[(&str, &str)]) -> AnswerMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    /// Drives a flow to completion, recording each question under its
    /// natural answer key, and returns the questions asked.
    fn drive(mode: DialogueMode, prompt: &str) -> Vec<DialogueQuestion> {
        let mut flow = DialogueFlow::new(mode);
        let mut responses = AnswerMap::new();
        let mut asked = Vec::new();

        while let Some(question) = flow.next_question(prompt, &responses) {
            let key = match question.stage {
                DialogueStage::Initial => keys::INITIAL.to_string(),
                DialogueStage::Style => keys::STYLE.to_string(),
                DialogueStage::ColorMood => {
                    if mode == DialogueMode::Quick {
                        keys::COLOR_MOOD.to_string()
                    } else if !responses.contains_key(keys::COLORS) {
                        keys::COLORS.to_string()
                    } else {
                        keys::MOOD.to_string()
                    }
                }
                DialogueStage::Details => {
                    if !responses.contains_key(keys::DETAIL_LEVEL) {
                        keys::DETAIL_LEVEL.to_string()
                    } else if !responses.contains_key(keys::COMPOSITION) {
                        keys::COMPOSITION.to_string()
                    } else {
                        keys::SPECIFIC_ELEMENTS.to_string()
                    }
                }
                DialogueStage::Ready => unreachable!("ready is never asked"),
            };
            responses.insert(key, "an answer".to_string());
            asked.push(question);
            assert!(asked.len() < 20, "flow does not terminate");
        }

        asked
    }

    mod skip_mode {
        use super::*;

        #[test]
        fn returns_none_immediately() {
            let mut flow = DialogueFlow::new(DialogueMode::Skip);
            assert!(flow.next_question("a castle", &AnswerMap::new()).is_none());
        }

        #[test]
        fn does_not_transition_stage() {
            let mut flow = DialogueFlow::new(DialogueMode::Skip);
            flow.next_question("a castle", &AnswerMap::new());
            assert_eq!(flow.current_stage(), DialogueStage::Initial);
        }
    }

    mod question_counts {
        use super::*;

        #[test]
        fn quick_asks_exactly_two_questions() {
            let asked = drive(DialogueMode::Quick, "a castle on a hill");
            assert_eq!(asked.len(), 2);
            assert_eq!(asked[0].stage, DialogueStage::Initial);
            assert_eq!(asked[1].stage, DialogueStage::Style);
        }

        /// Drives a flow recording answers under whole-stage marker
        /// keys, the way a caller that tracks stages (not
        /// sub-questions) does.
        fn drive_with_stage_markers(mode: DialogueMode) -> usize {
            let mut flow = DialogueFlow::new(mode);
            let mut responses = AnswerMap::new();
            let mut asked = 0;
            while let Some(question) = flow.next_question("a castle", &responses) {
                let marker = match question.stage {
                    DialogueStage::Initial => keys::INITIAL,
                    DialogueStage::Style => keys::STYLE,
                    DialogueStage::ColorMood => keys::COLOR_MOOD,
                    DialogueStage::Details => keys::DETAILS_MARKER,
                    DialogueStage::Ready => unreachable!(),
                };
                responses.insert(marker.to_string(), "an answer".to_string());
                asked += 1;
                assert!(asked < 20, "flow does not terminate");
            }
            asked
        }

        #[test]
        fn guided_with_stage_markers_asks_between_three_and_five() {
            let asked = drive_with_stage_markers(DialogueMode::Guided);
            assert!((3..=5).contains(&asked), "asked {}", asked);
        }

        #[test]
        fn guided_at_full_sub_question_depth_asks_six() {
            let asked = drive(DialogueMode::Guided, "a castle on a hill");
            assert_eq!(asked.len(), 6);
        }

        #[test]
        fn explorer_asks_more_than_guided_at_full_depth() {
            let guided = drive(DialogueMode::Guided, "a castle on a hill");
            let explorer = drive(DialogueMode::Explorer, "a castle on a hill");
            assert!(explorer.len() >= 4);
            assert!(explorer.len() > guided.len());
        }

        #[test]
        fn flow_ends_at_ready() {
            let mut flow = DialogueFlow::new(DialogueMode::Quick);
            let full = answers(&[("initial", "web"), ("style", "minimalist")]);
            assert!(flow.next_question("a castle", &full).is_none());
            assert_eq!(flow.current_stage(), DialogueStage::Ready);
        }
    }

    mod initial_stage {
        use super::*;

        #[test]
        fn logo_prompt_gets_brand_question() {
            let mut flow = DialogueFlow::new(DialogueMode::Guided);
            let q = flow
                .next_question("a logo for my bakery", &AnswerMap::new())
                .unwrap();
            assert!(q.question.contains("logo represents"));
            assert!(q.options.is_none());
        }

        #[test]
        fn presentation_prompt_gets_audience_options() {
            let mut flow = DialogueFlow::new(DialogueMode::Guided);
            let q = flow
                .next_question("slide background for a deck", &AnswerMap::new())
                .unwrap();
            assert!(q.question.contains("audience"));
            assert_eq!(q.options.as_ref().unwrap().len(), 3);
        }

        #[test]
        fn social_prompt_gets_goal_question() {
            let mut flow = DialogueFlow::new(DialogueMode::Guided);
            let q = flow
                .next_question("an instagram post about coffee", &AnswerMap::new())
                .unwrap();
            assert!(q.question.contains("social media post"));
        }

        #[test]
        fn unmatched_prompt_falls_back_to_use_case_question() {
            let mut flow = DialogueFlow::new(DialogueMode::Guided);
            let q = flow
                .next_question("a quiet mountain lake", &AnswerMap::new())
                .unwrap();
            assert_eq!(q.question, "How will you use this image?");
            assert_eq!(q.options.as_ref().unwrap().len(), 4);
        }
    }

    mod style_stage {
        use super::*;

        #[test]
        fn style_question_is_fixed_across_modes() {
            for mode in [
                DialogueMode::Quick,
                DialogueMode::Guided,
                DialogueMode::Explorer,
            ] {
                let mut flow = DialogueFlow::new(mode);
                let done_initial = answers(&[("initial", "web")]);
                let q = flow.next_question("a castle", &done_initial).unwrap();
                assert_eq!(q.stage, DialogueStage::Style);
                assert_eq!(q.question, "What visual style appeals to you?");
                assert_eq!(q.options.as_ref().unwrap().len(), 5);
            }
        }
    }

    mod color_mood_stage {
        use super::*;

        fn through_style(pairs: &[(&str, &str)]) -> AnswerMap {
            let mut map = answers(&[("initial", "web"), ("style", "minimalist")]);
            map.extend(
                pairs
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string())),
            );
            map
        }

        #[test]
        fn quick_mode_asks_one_combined_question() {
            let mut flow = DialogueFlow::new(DialogueMode::Quick);
            // Quick's sequence ends after style, so color_mood never comes up.
            assert!(flow.next_question("a castle", &through_style(&[])).is_none());
        }

        #[test]
        fn guided_asks_colors_before_mood() {
            let mut flow = DialogueFlow::new(DialogueMode::Guided);
            let q = flow.next_question("a castle", &through_style(&[])).unwrap();
            assert_eq!(q.stage, DialogueStage::ColorMood);
            assert!(q.question.contains("color palette"));
        }

        #[test]
        fn guided_asks_mood_once_colors_present() {
            let mut flow = DialogueFlow::new(DialogueMode::Guided);
            let q = flow
                .next_question("a castle", &through_style(&[("colors", "warm")]))
                .unwrap();
            assert_eq!(q.stage, DialogueStage::ColorMood);
            assert!(q.question.contains("mood or atmosphere"));
        }

        #[test]
        fn combined_color_mood_answer_satisfies_the_stage() {
            // A quick-mode combined answer (or whole-stage marker) under
            // the legacy key closes the stage without a mood question.
            let mut flow = DialogueFlow::new(DialogueMode::Guided);
            let q = flow
                .next_question("a castle", &through_style(&[("color_mood", "warm and calm")]))
                .unwrap();
            assert_eq!(q.stage, DialogueStage::Details);
        }

        #[test]
        fn sub_keys_satisfy_the_stage_only_together() {
            let both = through_style(&[("colors", "warm"), ("mood", "calm")]);
            let status = StageStatus::of(DialogueStage::ColorMood, DialogueMode::Guided, &both);
            assert!(status.is_satisfied());

            let only_colors = through_style(&[("colors", "warm")]);
            let status =
                StageStatus::of(DialogueStage::ColorMood, DialogueMode::Guided, &only_colors);
            assert!(!status.is_satisfied());
        }
    }

    mod details_stage {
        use super::*;

        fn through_colors() -> AnswerMap {
            answers(&[
                ("initial", "web"),
                ("style", "minimalist"),
                ("colors", "warm"),
                ("mood", "calm"),
            ])
        }

        #[test]
        fn asks_detail_level_first() {
            let mut flow = DialogueFlow::new(DialogueMode::Guided);
            let q = flow.next_question("a castle", &through_colors()).unwrap();
            assert_eq!(q.stage, DialogueStage::Details);
            assert!(q.question.contains("How detailed"));
        }

        #[test]
        fn asks_composition_second() {
            let mut flow = DialogueFlow::new(DialogueMode::Guided);
            let mut map = through_colors();
            map.insert(keys::DETAIL_LEVEL.into(), "balanced".into());
            let q = flow.next_question("a castle", &map).unwrap();
            assert!(q.question.contains("composition preferences"));
        }

        #[test]
        fn guided_completes_without_specific_elements() {
            let mut flow = DialogueFlow::new(DialogueMode::Guided);
            let mut map = through_colors();
            map.insert(keys::DETAIL_LEVEL.into(), "balanced".into());
            map.insert(keys::COMPOSITION.into(), "centered".into());
            assert!(flow.next_question("a castle", &map).is_none());
            assert_eq!(flow.current_stage(), DialogueStage::Ready);
        }

        #[test]
        fn explorer_asks_specific_elements_last() {
            let mut flow = DialogueFlow::new(DialogueMode::Explorer);
            let mut map = through_colors();
            map.insert(keys::DETAIL_LEVEL.into(), "balanced".into());
            map.insert(keys::COMPOSITION.into(), "centered".into());
            let q = flow.next_question("a castle", &map).unwrap();
            assert!(q.question.contains("specific elements"));
            assert!(q.options.is_none());

            map.insert(keys::SPECIFIC_ELEMENTS.into(), "a red door".into());
            assert!(flow.next_question("a castle", &map).is_none());
        }

        #[test]
        fn answered_stage_is_never_re_asked() {
            let mut flow = DialogueFlow::new(DialogueMode::Guided);
            let mut map = AnswerMap::new();
            let first = flow.next_question("a castle", &map).unwrap();
            assert_eq!(first.stage, DialogueStage::Initial);
            map.insert(keys::INITIAL.into(), "web".into());
            let second = flow.next_question("a castle", &map).unwrap();
            assert_ne!(second.stage, DialogueStage::Initial);
        }
    }

    mod progress {
        use super::*;

        #[test]
        fn fresh_flow_reports_zero() {
            let flow = DialogueFlow::new(DialogueMode::Guided);
            let p = flow.progress();
            assert_eq!(p.completed_stages, 0);
            assert_eq!(p.total_stages, 4);
            assert_eq!(p.percent, 0);
        }

        #[test]
        fn advances_with_the_current_stage() {
            let mut flow = DialogueFlow::new(DialogueMode::Guided);
            let map = answers(&[("initial", "web"), ("style", "minimalist")]);
            flow.next_question("a castle", &map);
            let p = flow.progress();
            assert_eq!(p.current_stage, DialogueStage::ColorMood);
            assert_eq!(p.completed_stages, 2);
            assert_eq!(p.percent, 50);
        }

        #[test]
        fn skip_mode_reports_empty_sequence() {
            let flow = DialogueFlow::new(DialogueMode::Skip);
            let p = flow.progress();
            assert_eq!(p.total_stages, 0);
            assert_eq!(p.percent, 0);
        }

        #[test]
        fn ready_stage_is_not_in_the_sequence() {
            let mut flow = DialogueFlow::new(DialogueMode::Quick);
            let map = answers(&[("initial", "web"), ("style", "minimalist")]);
            flow.next_question("a castle", &map);
            // Ready is reported as index 0 since it never appears in the table.
            let p = flow.progress();
            assert_eq!(p.current_stage, DialogueStage::Ready);
            assert_eq!(p.completed_stages, 0);
        }
    }
}
