//! Dialogue module - The guided refinement conversation.
//!
//! A short structured conversation walks the user from an underspecified
//! image request to a set of answers the enrichment engine can fold into
//! one descriptive prompt. `DialogueFlow` decides what to ask next and
//! when the conversation is done; the caller owns the answer map.

mod flow;
mod mode;
mod question;
mod stage;

pub use flow::{AnswerMap, DialogueFlow, DialogueProgress, StageStatus};
pub use mode::DialogueMode;
pub use question::DialogueQuestion;
pub use stage::{keys, DialogueStage};
