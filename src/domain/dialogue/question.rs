//! Question value object.

use serde::{Deserialize, Serialize};

use super::stage::DialogueStage;

/// A question to ask the user.
///
/// Produced fresh per call and never mutated afterwards. `options` is an
/// ordered list of suggested answers; `context` explains why the
/// question is being asked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueQuestion {
    /// The stage this question belongs to.
    pub stage: DialogueStage,
    /// The question text.
    pub question: String,
    /// Suggested answers, in presentation order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    /// Why this question is being asked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl DialogueQuestion {
    /// Creates a question with no options or context.
    pub fn new(stage: DialogueStage, question: impl Into<String>) -> Self {
        Self {
            stage,
            question: question.into(),
            options: None,
            context: None,
        }
    }

    /// Attaches an ordered option list.
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    /// Attaches rationale text.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}
