//! Application state for the HTTP server

use std::sync::Arc;

use crate::config::RagConfig;
use crate::error::Result;
use crate::providers::{OllamaClient, OllamaEmbedder, OllamaLlm};
use crate::retrieval::VectorStore;

/// Shared application state, built once at startup.
///
/// The vector store (and with it the process-wide collection handle) is
/// owned here and injected into both pipelines, rather than living in a
/// lazily-created global.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: RagConfig,
    /// Vector store holding the named collection
    store: VectorStore,
    /// Embedding provider (Ollama)
    embedder: OllamaEmbedder,
    /// Generation provider (Ollama)
    llm: OllamaLlm,
}

impl AppState {
    /// Create new application state
    pub fn new(config: RagConfig) -> Result<Self> {
        tracing::info!("Initializing application state...");

        let store = VectorStore::new(&config.vector_db);
        tracing::info!(
            "Vector store ready (collection '{}' under {})",
            config.vector_db.collection_name,
            config.vector_db.data_dir.display()
        );

        // One client serves both providers so they share the same base URL
        // and timeout settings
        let client = Arc::new(OllamaClient::new(&config.llm)?);
        let embedder = OllamaEmbedder::from_client(Arc::clone(&client), config.llm.embed_model.clone());
        let llm = OllamaLlm::from_client(client, config.llm.generate_model.clone());
        tracing::info!(
            "Ollama providers ready (embeddings: {}, generation: {})",
            config.llm.embed_model,
            config.llm.generate_model
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                embedder,
                llm,
            }),
        })
    }

    /// Get configuration
    pub fn config(&self) -> &RagConfig {
        &self.inner.config
    }

    /// Get the vector store
    pub fn vector_store(&self) -> &VectorStore {
        &self.inner.store
    }

    /// Get the embedding provider
    pub fn embedder(&self) -> &OllamaEmbedder {
        &self.inner.embedder
    }

    /// Get the generation provider
    pub fn llm(&self) -> &OllamaLlm {
        &self.inner.llm
    }
}
