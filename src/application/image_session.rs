//! Image session orchestration.
//!
//! Drives one conversation turn end to end: resolve the dialogue mode,
//! ask the next question or, once the dialogue is complete, enrich the
//! prompt, call the generator, sink the bytes, run verification, and
//! persist every step through the conversation store.

use std::path::PathBuf;

use serde_json::{json, Value};
use thiserror::Error;

use crate::adapters::{ConversationStore, StoreError};
use crate::domain::conversation::{ConversationMessage, GeneratedImage, Metadata};
use crate::domain::dialogue::{
    AnswerMap, DialogueFlow, DialogueMode, DialogueProgress, DialogueQuestion,
};
use crate::domain::enrichment::{ImageSize, PromptEnricher};
use crate::domain::foundation::{ConversationId, Timestamp};
use crate::ports::{
    ArtifactError, ArtifactSink, GenerationError, ImageGenerator, ImageVerifier, Verification,
    VerificationRequest,
};

/// Errors from a session turn.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Input for one conversation turn.
#[derive(Debug, Clone, Default)]
pub struct TurnRequest {
    /// The request text; used as the original prompt on the first turn.
    pub prompt: String,
    /// Continue an existing conversation, or start a new one when absent.
    pub conversation_id: Option<ConversationId>,
    /// Requested dialogue mode; unrecognized strings fall back to
    /// guided, absent falls back to the stored mode.
    pub mode: Option<String>,
    /// All dialogue answers collected so far (the caller owns this map).
    pub answers: AnswerMap,
}

/// What happened this turn.
#[derive(Debug)]
pub enum SessionTurn {
    /// The dialogue wants another answer.
    Question {
        conversation_id: ConversationId,
        question: DialogueQuestion,
        progress: DialogueProgress,
        /// Type-specific tips, present on the opening turn only.
        tips: Vec<String>,
    },
    /// The dialogue is complete and an image was generated.
    Generated {
        conversation_id: ConversationId,
        outcome: GenerationOutcome,
    },
}

/// Result of a completed generation.
#[derive(Debug)]
pub struct GenerationOutcome {
    pub enhanced_prompt: String,
    pub size: ImageSize,
    pub artifact_path: PathBuf,
    pub verification: Verification,
}

/// Orchestrates refinement sessions against injected collaborators.
pub struct ImageSessionService<G, V, S> {
    store: ConversationStore,
    enricher: PromptEnricher,
    generator: G,
    verifier: V,
    artifacts: S,
}

impl<G, V, S> ImageSessionService<G, V, S>
where
    G: ImageGenerator,
    V: ImageVerifier,
    S: ArtifactSink,
{
    /// Creates a service over the given collaborators.
    pub fn new(store: ConversationStore, generator: G, verifier: V, artifacts: S) -> Self {
        Self {
            store,
            enricher: PromptEnricher::new(),
            generator,
            verifier,
            artifacts,
        }
    }

    /// Returns the underlying store for read-side queries.
    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    /// Advances a conversation by one turn.
    pub async fn advance(&self, request: TurnRequest) -> Result<SessionTurn, SessionError> {
        let conversation_id = request
            .conversation_id
            .clone()
            .unwrap_or_else(ConversationId::generate);
        let prior = self.store.load(&conversation_id);
        let is_new = prior.is_none();

        let mode = match &request.mode {
            Some(mode) => DialogueMode::from_str_lossy(mode),
            None => prior
                .as_ref()
                .and_then(|record| record.dialogue_mode())
                .map(DialogueMode::from_str_lossy)
                .unwrap_or_default(),
        };

        let original_prompt = prior
            .as_ref()
            .and_then(|record| {
                record
                    .metadata
                    .get("original_prompt")
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .unwrap_or_else(|| request.prompt.clone());

        // The stored answers seed the map; this turn's answers win.
        let mut answers = prior
            .as_ref()
            .map(|record| stored_answers(&record.metadata))
            .unwrap_or_default();
        answers.extend(request.answers.clone());

        let mut messages = prior.map(|record| record.messages).unwrap_or_default();
        if is_new {
            messages.push(ConversationMessage::user(original_prompt.clone()));
        }

        let mut flow = DialogueFlow::new(mode);
        if let Some(question) = flow.next_question(&original_prompt, &answers) {
            messages
                .push(ConversationMessage::assistant(question.question.clone())
                    .with_stage(question.stage));
            self.store.save(
                &conversation_id,
                messages,
                Some(self.session_metadata(mode, &original_prompt, &answers, false)),
            )?;

            let tips = if is_new {
                let image_type = self.enricher.detect_type(&original_prompt);
                self.enricher
                    .contextual_suggestions(image_type)
                    .into_iter()
                    .map(str::to_string)
                    .collect()
            } else {
                Vec::new()
            };

            return Ok(SessionTurn::Question {
                conversation_id,
                question,
                progress: flow.progress(),
                tips,
            });
        }

        // Dialogue complete: enrich, generate, persist.
        let image_type = self.enricher.detect_type(&original_prompt);
        let merged = self.enricher.merge(&original_prompt, &answers);
        let enhanced_prompt = self.enricher.apply_type_optimizations(&merged, image_type);
        let size = self.enricher.suggest_size(image_type, &original_prompt);

        let bytes = self.generator.generate(&enhanced_prompt, size).await?;
        let artifact_path = self.artifacts.save(&bytes, "png")?;

        let verification = self.verifier.verify(VerificationRequest {
            artifact_path: &artifact_path,
            original_prompt: &original_prompt,
            enhanced_prompt: &enhanced_prompt,
            answers: Some(&answers),
            image_type: Some(image_type),
        });

        messages.push(ConversationMessage::assistant(format!(
            "Image generated and saved to {}",
            artifact_path.display()
        )));
        let mut metadata = self.session_metadata(mode, &original_prompt, &answers, true);
        metadata.insert("enhanced_prompt".into(), json!(enhanced_prompt));
        self.store.save(&conversation_id, messages, Some(metadata))?;

        let descriptor = GeneratedImage {
            path: artifact_path.clone(),
            prompt: enhanced_prompt.clone(),
            size,
            created_at: Timestamp::now(),
        };
        self.store
            .append_generated_image(&conversation_id, descriptor.to_value());

        Ok(SessionTurn::Generated {
            conversation_id,
            outcome: GenerationOutcome {
                enhanced_prompt,
                size,
                artifact_path,
                verification,
            },
        })
    }

    /// Generates directly from a prompt with no dialogue, enriching it
    /// with heuristic defaults instead of answers.
    pub async fn generate_direct(
        &self,
        prompt: &str,
        size: Option<ImageSize>,
    ) -> Result<(ConversationId, GenerationOutcome), SessionError> {
        let conversation_id = ConversationId::generate();
        let image_type = self.enricher.detect_type(prompt);
        let enhanced_prompt = self.enricher.enrich_without_dialogue(prompt);
        let size = size.unwrap_or_else(|| self.enricher.suggest_size(image_type, prompt));

        let bytes = self.generator.generate(&enhanced_prompt, size).await?;
        let artifact_path = self.artifacts.save(&bytes, "png")?;

        let verification = self.verifier.verify(VerificationRequest {
            artifact_path: &artifact_path,
            original_prompt: prompt,
            enhanced_prompt: &enhanced_prompt,
            answers: None,
            image_type: Some(image_type),
        });

        let messages = vec![
            ConversationMessage::user(prompt),
            ConversationMessage::assistant(format!(
                "Image generated and saved to {}",
                artifact_path.display()
            )),
        ];
        let mut metadata =
            self.session_metadata(DialogueMode::Skip, prompt, &AnswerMap::new(), true);
        metadata.insert("enhanced_prompt".into(), json!(enhanced_prompt));
        self.store.save(&conversation_id, messages, Some(metadata))?;

        let descriptor = GeneratedImage {
            path: artifact_path.clone(),
            prompt: enhanced_prompt.clone(),
            size,
            created_at: Timestamp::now(),
        };
        self.store
            .append_generated_image(&conversation_id, descriptor.to_value());

        Ok((
            conversation_id,
            GenerationOutcome {
                enhanced_prompt,
                size,
                artifact_path,
                verification,
            },
        ))
    }

    fn session_metadata(
        &self,
        mode: DialogueMode,
        original_prompt: &str,
        answers: &AnswerMap,
        complete: bool,
    ) -> Metadata {
        let mut metadata = Metadata::new();
        metadata.insert("dialogue_mode".into(), json!(mode.as_str()));
        metadata.insert("original_prompt".into(), json!(original_prompt));
        metadata.insert("responses".into(), answers_to_value(answers));
        metadata.insert("dialogue_complete".into(), json!(complete));
        metadata
    }
}

fn answers_to_value(answers: &AnswerMap) -> Value {
    Value::Object(
        answers
            .iter()
            .map(|(k, v)| (k.clone(), json!(v)))
            .collect(),
    )
}

fn stored_answers(metadata: &Metadata) -> AnswerMap {
    metadata
        .get("responses")
        .and_then(Value::as_object)
        .map(|object| {
            object
                .iter()
                .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                .collect()
        })
        .unwrap_or_default()
}
