//! Ingestion and retrieval pipeline.
//!
//! [`ChatPipeline`] coordinates the ingest side (chunk → embed → store) and
//! the retrieval side (embed query → similarity search) by composing an
//! [`EmbeddingProvider`], a [`VectorStore`], and a [`Chunker`].
//!
//! # Example
//!
//! ```rust,ignore
//! use docchat::{ChatPipeline, ChatConfig, InMemoryVectorStore, FixedSizeChunker};
//!
//! let config = ChatConfig::default();
//! let pipeline = ChatPipeline::builder()
//!     .config(config.clone())
//!     .embedding_provider(Arc::new(my_embedder))
//!     .vector_store(Arc::new(InMemoryVectorStore::new()))
//!     .chunker(Arc::new(FixedSizeChunker::new(config.chunk_size, config.chunk_overlap)))
//!     .build()?;
//!
//! pipeline.create_collection("docs").await?;
//! pipeline.ingest("docs", &document).await?;
//! let results = pipeline.retrieve("docs", "when is the deadline?").await?;
//! ```

use std::sync::Arc;

use tracing::{error, info};

use crate::chunking::Chunker;
use crate::config::ChatConfig;
use crate::document::{Chunk, Document, SearchResult};
use crate::embedding::EmbeddingProvider;
use crate::error::{ChatError, Result};
use crate::vectorstore::VectorStore;

/// The ingestion/retrieval orchestrator.
///
/// Construct one via [`ChatPipeline::builder()`]. The same embedding provider
/// handles both ingestion and queries, keeping everything in one embedding
/// space.
pub struct ChatPipeline {
    config: ChatConfig,
    embedding_provider: Arc<dyn EmbeddingProvider>,
    vector_store: Arc<dyn VectorStore>,
    chunker: Arc<dyn Chunker>,
}

impl ChatPipeline {
    /// Create a new [`ChatPipelineBuilder`].
    pub fn builder() -> ChatPipelineBuilder {
        ChatPipelineBuilder::default()
    }

    /// Return a reference to the pipeline configuration.
    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Return a reference to the embedding provider.
    pub fn embedding_provider(&self) -> &Arc<dyn EmbeddingProvider> {
        &self.embedding_provider
    }

    /// Return a reference to the vector store.
    pub fn vector_store(&self) -> &Arc<dyn VectorStore> {
        &self.vector_store
    }

    /// Create a named collection in the vector store.
    ///
    /// The collection is created with the dimensionality reported by the
    /// configured [`EmbeddingProvider`].
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Pipeline`] if the vector store operation fails.
    pub async fn create_collection(&self, name: &str) -> Result<()> {
        let dimensions = self.embedding_provider.dimensions();
        self.vector_store.create_collection(name, dimensions).await.map_err(|e| {
            error!(collection = name, error = %e, "failed to create collection");
            ChatError::Pipeline(format!("failed to create collection '{name}': {e}"))
        })
    }

    /// Delete a named collection from the vector store.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Pipeline`] if the vector store operation fails.
    pub async fn delete_collection(&self, name: &str) -> Result<()> {
        self.vector_store.delete_collection(name).await.map_err(|e| {
            error!(collection = name, error = %e, "failed to delete collection");
            ChatError::Pipeline(format!("failed to delete collection '{name}': {e}"))
        })
    }

    /// Ingest a single document: chunk → embed → store.
    ///
    /// The upsert is one atomic batch per document: if embedding fails,
    /// nothing is written, so an interrupted ingest never leaves partial
    /// chunks in the index. Returns the chunks that were stored.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Pipeline`] if embedding or storage fails,
    /// including the document ID in the error message.
    pub async fn ingest(&self, collection: &str, document: &Document) -> Result<Vec<Chunk>> {
        let mut chunks = self.chunker.chunk(document);
        if chunks.is_empty() {
            info!(document.id = %document.id, chunk_count = 0, "ingested document (empty)");
            return Ok(chunks);
        }

        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();

        let embeddings = self.embedding_provider.embed_batch(&texts).await.map_err(|e| {
            error!(document.id = %document.id, error = %e, "embedding failed during ingestion");
            ChatError::Pipeline(format!("embedding failed for document '{}': {e}", document.id))
        })?;

        for (chunk, embedding) in chunks.iter_mut().zip(embeddings) {
            chunk.embedding = embedding;
        }

        self.vector_store.upsert(collection, &chunks).await.map_err(|e| {
            error!(document.id = %document.id, error = %e, "upsert failed during ingestion");
            ChatError::Pipeline(format!("upsert failed for document '{}': {e}", document.id))
        })?;

        let chunk_count = chunks.len();
        info!(document.id = %document.id, chunk_count, "ingested document");

        Ok(chunks)
    }

    /// Ingest multiple documents through the chunk → embed → store workflow.
    ///
    /// Returns all chunks that were stored across all documents.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Pipeline`] on the first document that fails,
    /// including the document ID in the error message. Documents ingested
    /// before the failure remain stored.
    pub async fn ingest_batch(
        &self,
        collection: &str,
        documents: &[Document],
    ) -> Result<Vec<Chunk>> {
        let mut all_chunks = Vec::new();
        for document in documents {
            let chunks = self.ingest(collection, document).await?;
            all_chunks.extend(chunks);
        }
        Ok(all_chunks)
    }

    /// Retrieve the `top_k` chunks most similar to `query`.
    ///
    /// The query is embedded with the same provider used at ingestion time.
    /// Results come back ordered by descending similarity.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::IndexEmpty`] if the collection holds no chunks,
    /// including when no ingestion has ever created it — callers must not
    /// proceed to answer synthesis in that state. Returns
    /// [`ChatError::Pipeline`] if embedding or search fails.
    pub async fn retrieve(&self, collection: &str, query: &str) -> Result<Vec<SearchResult>> {
        let count = self.vector_store.count(collection).await.map_err(|e| {
            error!(collection, error = %e, "vector store count failed");
            ChatError::Pipeline(format!("count failed in collection '{collection}': {e}"))
        })?;
        if count == 0 {
            return Err(ChatError::IndexEmpty);
        }

        let query_embedding = self.embedding_provider.embed(query).await.map_err(|e| {
            error!(error = %e, "embedding failed during retrieval");
            ChatError::Pipeline(format!("query embedding failed: {e}"))
        })?;

        let results = self
            .vector_store
            .search(collection, &query_embedding, self.config.top_k)
            .await
            .map_err(|e| {
                error!(collection, error = %e, "vector store search failed");
                ChatError::Pipeline(format!("search failed in collection '{collection}': {e}"))
            })?;

        info!(result_count = results.len(), "retrieval completed");

        Ok(results)
    }
}

/// Builder for constructing a [`ChatPipeline`].
///
/// All fields are required. Call [`build()`](ChatPipelineBuilder::build) to
/// validate and produce the pipeline.
#[derive(Default)]
pub struct ChatPipelineBuilder {
    config: Option<ChatConfig>,
    embedding_provider: Option<Arc<dyn EmbeddingProvider>>,
    vector_store: Option<Arc<dyn VectorStore>>,
    chunker: Option<Arc<dyn Chunker>>,
}

impl ChatPipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: ChatConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the embedding provider (shared by ingestion and queries).
    pub fn embedding_provider(mut self, provider: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedding_provider = Some(provider);
        self
    }

    /// Set the vector store backend.
    pub fn vector_store(mut self, store: Arc<dyn VectorStore>) -> Self {
        self.vector_store = Some(store);
        self
    }

    /// Set the document chunker.
    pub fn chunker(mut self, chunker: Arc<dyn Chunker>) -> Self {
        self.chunker = Some(chunker);
        self
    }

    /// Build the [`ChatPipeline`], validating that all required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Config`] if any required field is missing.
    pub fn build(self) -> Result<ChatPipeline> {
        let config =
            self.config.ok_or_else(|| ChatError::Config("config is required".to_string()))?;
        let embedding_provider = self
            .embedding_provider
            .ok_or_else(|| ChatError::Config("embedding_provider is required".to_string()))?;
        let vector_store = self
            .vector_store
            .ok_or_else(|| ChatError::Config("vector_store is required".to_string()))?;
        let chunker =
            self.chunker.ok_or_else(|| ChatError::Config("chunker is required".to_string()))?;

        Ok(ChatPipeline { config, embedding_provider, vector_store, chunker })
    }
}
