//! Chat session: the explicit per-user object tying the pipeline together.
//!
//! A [`ChatSession`] owns everything one user interaction needs — retrieval
//! pipeline handle, conversation memory, moderation gate, synthesizer, and
//! feedback recorder — so there is no ambient global state. Callers create a
//! session, ingest files, then ask questions.

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use crate::error::{ChatError, Result};
use crate::feedback::{FeedbackRecorder, Vote};
use crate::loader::DocumentLoader;
use crate::memory::ConversationMemory;
use crate::model::ChatModel;
use crate::moderation::{ModerationGate, ModerationProvider};
use crate::pipeline::ChatPipeline;
use crate::synthesizer::{Answer, AnswerSynthesizer};

/// The fixed reply returned when the moderation gate blocks a question.
pub const MODERATION_REFUSAL: &str = "Sorry, I cannot answer that.";

/// The outcome of one [`ChatSession::ask`] call.
#[derive(Debug, Clone)]
pub enum ChatReply {
    /// A grounded answer with its retrieval sources.
    Answered(Answer),
    /// The moderation gate blocked the question; the payload is the fixed
    /// refusal line. The question never reached retrieval or the model, and
    /// memory was not touched.
    Blocked(String),
}

/// One user's chat session over an ingested document set.
///
/// Ingestion must complete before questions are asked — [`ask`](Self::ask)
/// fails with [`ChatError::IndexEmpty`] until at least one document has been
/// ingested into the session's collection.
pub struct ChatSession {
    pipeline: Arc<ChatPipeline>,
    collection: String,
    gate: ModerationGate,
    synthesizer: AnswerSynthesizer,
    feedback: FeedbackRecorder,
    memory: ConversationMemory,
}

impl ChatSession {
    /// Create a new [`ChatSessionBuilder`].
    pub fn builder() -> ChatSessionBuilder {
        ChatSessionBuilder::default()
    }

    /// The conversation history accumulated so far.
    pub fn memory(&self) -> &ConversationMemory {
        &self.memory
    }

    /// Load and ingest files into the session's collection.
    ///
    /// Unsupported or unreadable files are logged and skipped; the batch
    /// never fails on them. The call returns only once every loaded document
    /// is fully indexed, so a subsequent [`ask`](Self::ask) sees the complete
    /// index (ingest-then-serve).
    ///
    /// Returns the number of documents ingested.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Pipeline`] if embedding or storage fails for a
    /// loaded document.
    pub async fn ingest_files<P: AsRef<Path>>(&self, paths: &[P]) -> Result<usize> {
        self.pipeline.create_collection(&self.collection).await?;

        let documents = DocumentLoader::load_batch(paths);
        self.pipeline.ingest_batch(&self.collection, &documents).await?;

        info!(document_count = documents.len(), collection = %self.collection, "ingest complete");
        Ok(documents.len())
    }

    /// Answer a question grounded in the ingested documents.
    ///
    /// Flow: moderation gate → retrieval → synthesis. A blocked question
    /// returns [`ChatReply::Blocked`] without touching retrieval, the model,
    /// or memory. A successful answer appends its turn to memory.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::IndexEmpty`] if nothing has been ingested, or the
    /// synthesis/retrieval error otherwise. Memory is unmodified on any
    /// error.
    pub async fn ask(&mut self, question: &str) -> Result<ChatReply> {
        if !self.gate.check(question).await {
            info!("question blocked by moderation gate");
            return Ok(ChatReply::Blocked(MODERATION_REFUSAL.to_string()));
        }

        let retrieved = self.pipeline.retrieve(&self.collection, question).await?;
        let answer = self.synthesizer.answer(question, retrieved, &mut self.memory).await?;

        Ok(ChatReply::Answered(answer))
    }

    /// Record a vote on a prior exchange.
    ///
    /// Feedback persistence is best-effort: an I/O failure is logged and
    /// swallowed so it can never block the chat surface.
    pub async fn vote(&self, question: &str, answer: &str, vote: Vote) {
        if let Err(e) = self.feedback.record(question, answer, vote).await {
            warn!(error = %e, "failed to record feedback");
        }
    }
}

/// Builder for constructing a [`ChatSession`].
///
/// The moderation gate's fail-open policy and the memory's history window are
/// taken from the pipeline's [`ChatConfig`](crate::config::ChatConfig).
#[derive(Default)]
pub struct ChatSessionBuilder {
    pipeline: Option<Arc<ChatPipeline>>,
    collection: Option<String>,
    chat_model: Option<Arc<dyn ChatModel>>,
    moderation_provider: Option<Arc<dyn ModerationProvider>>,
    feedback: Option<FeedbackRecorder>,
}

impl ChatSessionBuilder {
    /// Set the ingestion/retrieval pipeline.
    pub fn pipeline(mut self, pipeline: Arc<ChatPipeline>) -> Self {
        self.pipeline = Some(pipeline);
        self
    }

    /// Set the vector store collection this session reads and writes.
    pub fn collection(mut self, name: impl Into<String>) -> Self {
        self.collection = Some(name.into());
        self
    }

    /// Set the answer-generation model.
    pub fn chat_model(mut self, model: Arc<dyn ChatModel>) -> Self {
        self.chat_model = Some(model);
        self
    }

    /// Set the content-classification backend for the moderation gate.
    pub fn moderation_provider(mut self, provider: Arc<dyn ModerationProvider>) -> Self {
        self.moderation_provider = Some(provider);
        self
    }

    /// Set the feedback recorder.
    pub fn feedback(mut self, recorder: FeedbackRecorder) -> Self {
        self.feedback = Some(recorder);
        self
    }

    /// Build the [`ChatSession`], validating that all required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Config`] if any required field is missing.
    pub fn build(self) -> Result<ChatSession> {
        let pipeline =
            self.pipeline.ok_or_else(|| ChatError::Config("pipeline is required".to_string()))?;
        let collection = self
            .collection
            .ok_or_else(|| ChatError::Config("collection is required".to_string()))?;
        let chat_model = self
            .chat_model
            .ok_or_else(|| ChatError::Config("chat_model is required".to_string()))?;
        let moderation_provider = self
            .moderation_provider
            .ok_or_else(|| ChatError::Config("moderation_provider is required".to_string()))?;
        let feedback =
            self.feedback.ok_or_else(|| ChatError::Config("feedback is required".to_string()))?;

        let config = pipeline.config();
        let gate = ModerationGate::new(moderation_provider, config.fail_open_moderation);
        let memory = match config.history_window {
            Some(window) => ConversationMemory::with_window(window),
            None => ConversationMemory::new(),
        };

        Ok(ChatSession {
            pipeline,
            collection,
            gate,
            synthesizer: AnswerSynthesizer::new(chat_model),
            feedback,
            memory,
        })
    }
}
