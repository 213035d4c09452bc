//! Application layer - Use-case orchestration over the domain core.

mod image_session;

pub use image_session::{
    GenerationOutcome, ImageSessionService, SessionError, SessionTurn, TurnRequest,
};
