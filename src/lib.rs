//! # docchat
//!
//! A document-grounded chat pipeline: ingest files (pdf, txt, docx), index
//! their chunks in a vector store, and answer questions from retrieved
//! context through a language model — with a moderation gate in front and
//! feedback capture behind.
//!
//! External collaborators sit behind narrow async traits so any backend can
//! be swapped in:
//!
//! - [`EmbeddingProvider`] — text → fixed-dimensionality vector
//! - [`VectorStore`] — chunk storage with similarity search
//! - [`ChatModel`] — message list → answer string
//! - [`ModerationProvider`] — input → flagged verdict
//! - [`Notifier`] — outbound messaging capability
//!
//! OpenAI-backed implementations of the first, third, and fourth live in
//! [`openai`]; [`InMemoryVectorStore`] and the durable [`DiskVectorStore`]
//! cover the second.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use docchat::{
//!     ChatConfig, ChatPipeline, ChatSession, DiskVectorStore, FeedbackRecorder,
//!     FixedSizeChunker,
//!     openai::{OpenAIChatModel, OpenAIEmbeddingProvider, OpenAIModerationProvider},
//! };
//!
//! let config = ChatConfig::default();
//! let pipeline = Arc::new(
//!     ChatPipeline::builder()
//!         .config(config.clone())
//!         .embedding_provider(Arc::new(OpenAIEmbeddingProvider::from_env()?))
//!         .vector_store(Arc::new(DiskVectorStore::open("vector_store").await?))
//!         .chunker(Arc::new(FixedSizeChunker::new(config.chunk_size, config.chunk_overlap)))
//!         .build()?,
//! );
//!
//! let mut session = ChatSession::builder()
//!     .pipeline(pipeline)
//!     .collection("course_docs")
//!     .chat_model(Arc::new(OpenAIChatModel::from_env()?))
//!     .moderation_provider(Arc::new(OpenAIModerationProvider::from_env()?))
//!     .feedback(FeedbackRecorder::new("feedback_log.txt"))
//!     .build()?;
//!
//! session.ingest_files(&["syllabus.pdf", "notes.txt"]).await?;
//! let reply = session.ask("When is the capstone deadline?").await?;
//! ```

pub mod chunking;
pub mod config;
pub mod disk;
pub mod document;
pub mod embedding;
pub mod error;
pub mod feedback;
pub mod inmemory;
pub mod loader;
pub mod memory;
pub mod model;
pub mod moderation;
pub mod notify;
pub mod openai;
pub mod pipeline;
pub mod prompt;
pub mod session;
pub mod synthesizer;
pub mod vectorstore;

pub use chunking::{Chunker, FixedSizeChunker};
pub use config::{ChatConfig, ChatConfigBuilder};
pub use disk::DiskVectorStore;
pub use document::{Chunk, Document, SearchResult};
pub use embedding::EmbeddingProvider;
pub use error::{ChatError, Result};
pub use feedback::{FeedbackRecorder, Vote};
pub use inmemory::InMemoryVectorStore;
pub use loader::DocumentLoader;
pub use memory::{ConversationMemory, ConversationTurn};
pub use model::{ChatMessage, ChatModel, Role};
pub use moderation::{ModerationGate, ModerationProvider};
pub use notify::{Channel, LogNotifier, Notifier};
pub use pipeline::{ChatPipeline, ChatPipelineBuilder};
pub use prompt::REFUSAL;
pub use session::{ChatReply, ChatSession, ChatSessionBuilder, MODERATION_REFUSAL};
pub use synthesizer::{Answer, AnswerSynthesizer};
pub use vectorstore::VectorStore;
