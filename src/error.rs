//! Error types for the `docchat` crate.

use thiserror::Error;

/// Errors that can occur in the chat pipeline.
#[derive(Debug, Error)]
pub enum ChatError {
    /// An error occurred during embedding generation.
    #[error("Embedding error ({provider}): {message}")]
    Embedding {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// An error occurred in the vector store backend.
    #[error("Vector store error ({backend}): {message}")]
    VectorStore {
        /// The vector store backend that produced the error.
        backend: String,
        /// A description of the failure.
        message: String,
    },

    /// A file could not be loaded or parsed.
    #[error("Loader error ({path}): {message}")]
    Loader {
        /// The path of the file that failed to load.
        path: String,
        /// A description of the failure.
        message: String,
    },

    /// A file had an extension outside the supported set (pdf, txt, docx).
    #[error("Unsupported document format: .{0}")]
    UnsupportedFormat(String),

    /// The content-classification service failed to produce a verdict.
    ///
    /// The [`ModerationGate`](crate::moderation::ModerationGate) converts this
    /// into an allow/deny decision according to its fail-open setting; callers
    /// of the gate never see it.
    #[error("Moderation error: {0}")]
    Moderation(String),

    /// The answer-generation model call failed.
    #[error("Model error ({provider}): {message}")]
    Model {
        /// The model provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// Retrieval was attempted before any documents were ingested.
    #[error("Vector index is empty: ingest documents before querying")]
    IndexEmpty,

    /// Writing a feedback record failed.
    #[error("Feedback error: {0}")]
    Feedback(String),

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An error in pipeline orchestration.
    #[error("Pipeline error: {0}")]
    Pipeline(String),
}

/// A convenience result type for chat pipeline operations.
pub type Result<T> = std::result::Result<T, ChatError>;
