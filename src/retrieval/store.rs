//! Vector store: one named collection, persisted as JSON, searched with
//! brute-force cosine similarity

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::config::VectorDbConfig;
use crate::error::{Error, Result};
use crate::types::Chunk;

/// A persisted (embedding, chunk text, source) tuple
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Chunk text
    pub content: String,
    /// Source identifier of the originating document
    pub source: String,
    /// Embedding vector
    pub embedding: Vec<f32>,
}

impl IndexEntry {
    /// Build an entry from an embedded chunk
    pub fn from_chunk(chunk: &Chunk) -> Self {
        Self {
            content: chunk.content.clone(),
            source: chunk.source.clone(),
            embedding: chunk.embedding.clone(),
        }
    }
}

/// The named collection: every indexed entry, in ingestion order
#[derive(Debug, Default, Serialize, Deserialize)]
struct Collection {
    entries: Vec<IndexEntry>,
}

/// A retrieved chunk with its similarity to the query
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Chunk text
    pub content: String,
    /// Source identifier
    pub source: String,
    /// Cosine similarity to the query (higher is better)
    pub similarity: f32,
}

/// Vector store holding the process-wide collection handle.
///
/// The handle is an `Arc` behind an `RwLock`: the ingestion pipeline is the
/// only writer (on success), query pipelines clone the `Arc` and search a
/// consistent snapshot, so a replacement is atomic from a reader's
/// viewpoint. Replacement overwrites the persisted collection file; nothing
/// is merged.
pub struct VectorStore {
    /// Directory holding the persisted collection
    data_dir: PathBuf,
    /// Collection name, fixed for the process lifetime
    collection_name: String,
    /// Active collection, if any
    collection: RwLock<Option<Arc<Collection>>>,
}

impl VectorStore {
    /// Create a store. No I/O happens until the collection is replaced or
    /// a persisted one is opened.
    pub fn new(config: &VectorDbConfig) -> Self {
        Self {
            data_dir: config.data_dir.clone(),
            collection_name: config.collection_name.clone(),
            collection: RwLock::new(None),
        }
    }

    /// Path of the persisted collection file
    fn collection_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.json", self.collection_name))
    }

    /// Whether a collection is active in memory
    pub fn is_loaded(&self) -> bool {
        self.collection.read().is_some()
    }

    /// Number of entries in the active collection
    pub fn len(&self) -> usize {
        self.collection
            .read()
            .as_ref()
            .map(|c| c.entries.len())
            .unwrap_or(0)
    }

    /// Whether the active collection is empty (or absent)
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replace the named collection with `entries`, persisting first.
    ///
    /// The file is written to a temp path and renamed into place, then the
    /// in-memory handle is swapped, so neither readers nor a restarted
    /// process can observe a half-written collection.
    pub fn replace_collection(&self, entries: Vec<IndexEntry>) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir)?;

        let collection = Collection { entries };
        let json = serde_json::to_string(&collection)?;

        let path = self.collection_path();
        let tmp_path = path.with_extension("json.tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &path)?;

        tracing::info!(
            "Persisted collection '{}' ({} entries) to {}",
            self.collection_name,
            collection.entries.len(),
            path.display()
        );

        *self.collection.write() = Some(Arc::new(collection));
        Ok(())
    }

    /// Open the persisted collection if one exists on disk.
    ///
    /// Returns `true` when a collection is active afterwards. A missing,
    /// empty, or unreadable file means no collection; an unreadable file is
    /// logged and treated the same as an absent one.
    pub fn open_persisted(&self) -> Result<bool> {
        if self.is_loaded() {
            return Ok(true);
        }

        let path = self.collection_path();
        if !path.exists() {
            return Ok(false);
        }

        let collection: Collection = match std::fs::read_to_string(&path)
            .map_err(Error::from)
            .and_then(|data| serde_json::from_str(&data).map_err(Error::from))
        {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(
                    "Ignoring unreadable collection file {}: {}",
                    path.display(),
                    e
                );
                return Ok(false);
            }
        };

        if collection.entries.is_empty() {
            return Ok(false);
        }

        tracing::info!(
            "Opened persisted collection '{}' ({} entries)",
            self.collection_name,
            collection.entries.len()
        );

        *self.collection.write() = Some(Arc::new(collection));
        Ok(true)
    }

    /// Search the active collection, best match first
    pub fn search(&self, query_embedding: &[f32], top_k: usize) -> Result<Vec<SearchResult>> {
        let collection = self
            .collection
            .read()
            .clone()
            .ok_or(Error::NoDocumentsIndexed)?;

        let mut results: Vec<SearchResult> = collection
            .entries
            .iter()
            .map(|entry| SearchResult {
                content: entry.content.clone(),
                source: entry.source.clone(),
                similarity: cosine_similarity(query_embedding, &entry.embedding),
            })
            .collect();

        results.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
        results.truncate(top_k);

        Ok(results)
    }
}

/// Cosine similarity between two vectors; zero when either has zero norm
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}
