//! Durable vector store persisted to a directory on disk.
//!
//! [`DiskVectorStore`] keeps the same in-memory map as
//! [`InMemoryVectorStore`](crate::inmemory::InMemoryVectorStore) and mirrors
//! every mutation to one JSON file per collection under a named directory.
//! Re-opening the same directory with [`DiskVectorStore::open`] reconstructs
//! the exact chunk set that was stored, so retrieval results survive process
//! restarts.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

use crate::document::{Chunk, SearchResult};
use crate::error::{ChatError, Result};
use crate::inmemory::rank_by_similarity;
use crate::vectorstore::VectorStore;

/// A vector store persisted as one JSON file per collection.
///
/// Collection files are written atomically (temp file, then rename), so a
/// crash mid-write leaves the previous state intact rather than a truncated
/// file. Search runs against the in-memory mirror; disk is only touched on
/// mutation and open.
///
/// # Example
///
/// ```rust,ignore
/// use docchat::DiskVectorStore;
///
/// let store = DiskVectorStore::open("vector_store").await?;
/// store.create_collection("docs", 1536).await?;
/// ```
#[derive(Debug)]
pub struct DiskVectorStore {
    dir: PathBuf,
    collections: RwLock<HashMap<String, HashMap<String, Chunk>>>,
}

fn store_error(message: impl Into<String>) -> ChatError {
    ChatError::VectorStore { backend: "Disk".to_string(), message: message.into() }
}

fn missing_collection(collection: &str) -> ChatError {
    store_error(format!("collection '{collection}' does not exist"))
}

impl DiskVectorStore {
    /// Open (or create) a store rooted at `dir`.
    ///
    /// Loads every `*.json` collection file found under the directory.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::VectorStore`] if the directory cannot be created
    /// or an existing collection file cannot be read or parsed.
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| store_error(format!("failed to create '{}': {e}", dir.display())))?;

        let mut collections = HashMap::new();
        let mut entries = tokio::fs::read_dir(&dir)
            .await
            .map_err(|e| store_error(format!("failed to read '{}': {e}", dir.display())))?;

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| store_error(format!("failed to read '{}': {e}", dir.display())))?
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let bytes = tokio::fs::read(&path)
                .await
                .map_err(|e| store_error(format!("failed to read '{}': {e}", path.display())))?;
            let chunks: Vec<Chunk> = serde_json::from_slice(&bytes)
                .map_err(|e| store_error(format!("failed to parse '{}': {e}", path.display())))?;

            let by_id: HashMap<String, Chunk> =
                chunks.into_iter().map(|c| (c.id.clone(), c)).collect();
            collections.insert(name.to_string(), by_id);
        }

        info!(dir = %dir.display(), collections = collections.len(), "opened vector store");

        Ok(Self { dir, collections: RwLock::new(collections) })
    }

    fn collection_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }

    /// Write a collection's chunks to its JSON file via temp file + rename.
    async fn persist(&self, name: &str, chunks: &HashMap<String, Chunk>) -> Result<()> {
        let path = self.collection_path(name);
        let tmp = self.dir.join(format!("{name}.json.tmp"));

        let values: Vec<&Chunk> = chunks.values().collect();
        let bytes = serde_json::to_vec(&values)
            .map_err(|e| store_error(format!("failed to serialize collection '{name}': {e}")))?;

        tokio::fs::write(&tmp, bytes)
            .await
            .map_err(|e| store_error(format!("failed to write '{}': {e}", tmp.display())))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| store_error(format!("failed to rename '{}': {e}", tmp.display())))?;

        Ok(())
    }
}

#[async_trait]
impl VectorStore for DiskVectorStore {
    async fn create_collection(&self, name: &str, _dimensions: usize) -> Result<()> {
        let mut collections = self.collections.write().await;
        if !collections.contains_key(name) {
            collections.insert(name.to_string(), HashMap::new());
            self.persist(name, &collections[name]).await?;
        }
        Ok(())
    }

    async fn delete_collection(&self, name: &str) -> Result<()> {
        let mut collections = self.collections.write().await;
        if collections.remove(name).is_some() {
            let path = self.collection_path(name);
            if let Err(e) = tokio::fs::remove_file(&path).await {
                if e.kind() != std::io::ErrorKind::NotFound {
                    return Err(store_error(format!(
                        "failed to remove '{}': {e}",
                        path.display()
                    )));
                }
            }
        }
        Ok(())
    }

    async fn upsert(&self, collection: &str, chunks: &[Chunk]) -> Result<()> {
        let mut collections = self.collections.write().await;
        let store =
            collections.get_mut(collection).ok_or_else(|| missing_collection(collection))?;

        // Stage into a copy so a failed persist leaves memory and disk
        // agreeing on the previous state.
        let mut staged = store.clone();
        for chunk in chunks {
            staged.insert(chunk.id.clone(), chunk.clone());
        }
        self.persist(collection, &staged).await?;
        *store = staged;
        Ok(())
    }

    async fn delete(&self, collection: &str, ids: &[&str]) -> Result<()> {
        let mut collections = self.collections.write().await;
        let store =
            collections.get_mut(collection).ok_or_else(|| missing_collection(collection))?;

        let mut staged = store.clone();
        for id in ids {
            staged.remove(*id);
        }
        self.persist(collection, &staged).await?;
        *store = staged;
        Ok(())
    }

    async fn count(&self, collection: &str) -> Result<usize> {
        let collections = self.collections.read().await;
        // A collection that was never created holds nothing.
        Ok(collections.get(collection).map_or(0, |store| store.len()))
    }

    async fn search(
        &self,
        collection: &str,
        embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<SearchResult>> {
        let collections = self.collections.read().await;
        let store = collections.get(collection).ok_or_else(|| missing_collection(collection))?;
        Ok(rank_by_similarity(store.values().cloned(), embedding, top_k))
    }
}
