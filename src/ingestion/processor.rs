//! Ingestion pipeline orchestration

use std::path::Path;

use crate::config::ChunkingConfig;
use crate::error::Result;
use crate::providers::EmbeddingProvider;
use crate::retrieval::{IndexEntry, VectorStore};

use super::chunker::TextChunker;
use super::loader::{DocumentLoader, SkippedFile};

/// Outcome of an ingestion run
#[derive(Debug)]
pub enum IngestReport {
    /// Documents were loaded, embedded, and indexed
    Indexed {
        /// Number of documents loaded
        documents: usize,
        /// Number of chunks indexed
        chunks: usize,
        /// Files skipped because of parse failures
        skipped: Vec<SkippedFile>,
    },
    /// The folder contained no compatible documents; the active collection
    /// was left untouched
    NoDocuments {
        /// Files skipped because of parse failures
        skipped: Vec<SkippedFile>,
    },
}

/// Strip surrounding quote characters and whitespace from a user-supplied
/// folder path
pub fn normalize_folder_path(raw: &str) -> String {
    raw.replace('"', "").trim().to_string()
}

/// Orchestrates load, split, embed, and persist
pub struct IngestPipeline {
    loader: DocumentLoader,
    chunker: TextChunker,
}

impl IngestPipeline {
    /// Create a pipeline with the configured chunk size and overlap
    pub fn new(chunking: &ChunkingConfig) -> Self {
        Self {
            loader: DocumentLoader::new(),
            chunker: TextChunker::new(chunking.chunk_size, chunking.chunk_overlap),
        }
    }

    /// Run the full ingestion pipeline for a folder.
    ///
    /// The embedding provider is probed once before bulk work so a missing
    /// model fails the run in a single call. On success the store's named
    /// collection is fully replaced; on any failure the previous collection
    /// stays active.
    pub async fn run(
        &self,
        folder_path: &str,
        embedder: &dyn EmbeddingProvider,
        store: &VectorStore,
    ) -> Result<IngestReport> {
        let folder = normalize_folder_path(folder_path);
        tracing::info!("Starting ingestion from: {}", folder);

        let outcome = self.loader.load_folder(Path::new(&folder))?;
        if outcome.documents.is_empty() {
            tracing::warn!("No compatible documents under {}", folder);
            return Ok(IngestReport::NoDocuments {
                skipped: outcome.skipped,
            });
        }

        let document_count = outcome.documents.len();
        let mut chunks = self.chunker.split_documents(&outcome.documents);
        tracing::info!(
            "Split {} documents into {} chunks",
            document_count,
            chunks.len()
        );

        embedder.probe().await?;

        let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
        tracing::info!(
            "Embedding {} chunks with model '{}'",
            texts.len(),
            embedder.model()
        );
        let embeddings = embedder.embed_batch(&texts).await?;
        for (chunk, embedding) in chunks.iter_mut().zip(embeddings) {
            chunk.embedding = embedding;
        }

        let entries: Vec<IndexEntry> = chunks.iter().map(IndexEntry::from_chunk).collect();
        let chunk_count = entries.len();
        store.replace_collection(entries)?;

        tracing::info!(
            "Ingestion complete: {} documents, {} chunks",
            document_count,
            chunk_count
        );

        Ok(IngestReport::Indexed {
            documents: document_count,
            chunks: chunk_count,
            skipped: outcome.skipped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VectorDbConfig;
    use crate::error::Error;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Deterministic embedder: vector derived from text length
    struct StubEmbedder {
        probes: AtomicUsize,
        embeds: AtomicUsize,
    }

    impl StubEmbedder {
        fn new() -> Self {
            Self {
                probes: AtomicUsize::new(0),
                embeds: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl EmbeddingProvider for StubEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>> {
            self.embeds.fetch_add(1, Ordering::SeqCst);
            Ok(vec![text.len() as f32, 1.0])
        }

        async fn probe(&self) -> Result<()> {
            self.probes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }

        fn model(&self) -> &str {
            "stub-embed"
        }

        fn name(&self) -> &str {
            "stub"
        }
    }

    /// Embedder whose model is missing
    struct UnavailableEmbedder;

    #[async_trait]
    impl EmbeddingProvider for UnavailableEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            Err(Error::model_unavailable("stub-embed"))
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(false)
        }

        fn model(&self) -> &str {
            "stub-embed"
        }

        fn name(&self) -> &str {
            "stub"
        }
    }

    fn store_in(dir: &std::path::Path) -> VectorStore {
        VectorStore::new(&VectorDbConfig {
            data_dir: dir.to_path_buf(),
            collection_name: "test_docs".to_string(),
        })
    }

    fn pipeline() -> IngestPipeline {
        IngestPipeline::new(&ChunkingConfig::default())
    }

    #[test]
    fn test_normalize_folder_path() {
        assert_eq!(normalize_folder_path("  /tmp/docs "), "/tmp/docs");
        assert_eq!(normalize_folder_path("\"/tmp/my docs\""), "/tmp/my docs");
        assert_eq!(normalize_folder_path(" \"/tmp/docs\" "), "/tmp/docs");
        assert_eq!(normalize_folder_path("/tmp/docs"), "/tmp/docs");
    }

    #[tokio::test]
    async fn test_single_short_file_yields_one_document_one_chunk() {
        let docs = tempfile::tempdir().unwrap();
        std::fs::write(docs.path().join("a.txt"), "Paris is the capital of France.").unwrap();
        let data = tempfile::tempdir().unwrap();
        let store = store_in(data.path());

        let embedder = StubEmbedder::new();
        let report = pipeline()
            .run(&docs.path().display().to_string(), &embedder, &store)
            .await
            .unwrap();

        match report {
            IngestReport::Indexed {
                documents, chunks, ..
            } => {
                assert_eq!(documents, 1);
                assert_eq!(chunks, 1);
            }
            other => panic!("expected Indexed, got {other:?}"),
        }
        assert_eq!(embedder.probes.load(Ordering::SeqCst), 1);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_unsupported_only_folder_is_a_warning_and_keeps_collection() {
        let docs = tempfile::tempdir().unwrap();
        std::fs::write(docs.path().join("image.png"), "PNG bytes").unwrap();
        let data = tempfile::tempdir().unwrap();
        let store = store_in(data.path());
        store
            .replace_collection(vec![crate::retrieval::IndexEntry {
                content: "existing".to_string(),
                source: "old.txt".to_string(),
                embedding: vec![1.0, 0.0],
            }])
            .unwrap();

        let embedder = StubEmbedder::new();
        let report = pipeline()
            .run(&docs.path().display().to_string(), &embedder, &store)
            .await
            .unwrap();

        assert!(matches!(report, IngestReport::NoDocuments { .. }));
        // No probe, no embedding, previous collection untouched
        assert_eq!(embedder.probes.load(Ordering::SeqCst), 0);
        assert_eq!(embedder.embeds.load(Ordering::SeqCst), 0);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_model_fails_before_bulk_embedding() {
        let docs = tempfile::tempdir().unwrap();
        std::fs::write(docs.path().join("a.txt"), "some content").unwrap();
        let data = tempfile::tempdir().unwrap();
        let store = store_in(data.path());

        let result = pipeline()
            .run(
                &docs.path().display().to_string(),
                &UnavailableEmbedder,
                &store,
            )
            .await;

        assert!(matches!(result, Err(Error::ModelUnavailable { .. })));
        assert!(!store.is_loaded());
    }

    #[tokio::test]
    async fn test_missing_folder_propagates() {
        let data = tempfile::tempdir().unwrap();
        let store = store_in(data.path());

        let result = pipeline()
            .run("/does/not/exist", &StubEmbedder::new(), &store)
            .await;

        assert!(matches!(result, Err(Error::FolderNotFound(_))));
    }

    #[tokio::test]
    async fn test_reingestion_replaces_collection() {
        let docs = tempfile::tempdir().unwrap();
        std::fs::write(docs.path().join("a.txt"), "Paris is the capital of France.").unwrap();
        let data = tempfile::tempdir().unwrap();
        let store = store_in(data.path());

        let embedder = StubEmbedder::new();
        let p = pipeline();
        let folder = docs.path().display().to_string();
        p.run(&folder, &embedder, &store).await.unwrap();
        p.run(&folder, &embedder, &store).await.unwrap();

        // Same folder twice leaves exactly one copy of its chunks
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_long_document_yields_more_chunks_than_documents() {
        let docs = tempfile::tempdir().unwrap();
        std::fs::write(docs.path().join("long.txt"), "z".repeat(2500)).unwrap();
        let data = tempfile::tempdir().unwrap();
        let store = store_in(data.path());

        let report = pipeline()
            .run(
                &docs.path().display().to_string(),
                &StubEmbedder::new(),
                &store,
            )
            .await
            .unwrap();

        match report {
            IngestReport::Indexed {
                documents, chunks, ..
            } => {
                assert_eq!(documents, 1);
                assert!(chunks > 1);
            }
            other => panic!("expected Indexed, got {other:?}"),
        }
    }
}
