//! Image Atelier - Conversational image generation core
//!
//! Guides a user through a short structured conversation that refines an
//! underspecified creative request into a rich descriptive prompt, then
//! persists the conversation locally so it survives process restarts.
//!
//! The crate is laid out hexagonally:
//!
//! - [`domain`] holds the pure core: the dialogue flow state machine,
//!   the prompt enrichment engine, and the conversation record types.
//! - [`ports`] defines the contracts for external collaborators (image
//!   generation, artifact sinks, verification).
//! - [`adapters`] implements the ports and provides the file-backed
//!   conversation store.
//! - [`application`] orchestrates one conversation turn end to end.
//! - [`config`] loads typed configuration from the environment.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
