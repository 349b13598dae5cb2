//! Configuration for the document Q&A service

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Main service configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RagConfig {
    /// Server configuration
    pub server: ServerConfig,
    /// Chunking configuration
    pub chunking: ChunkingConfig,
    /// Ollama/LLM configuration
    pub llm: LlmConfig,
    /// Retrieval configuration
    pub retrieval: RetrievalConfig,
    /// Vector collection configuration
    pub vector_db: VectorDbConfig,
}

impl RagConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(host) = std::env::var("RAG_HOST") {
            config.server.host = host;
        }
        if let Ok(port) = std::env::var("RAG_PORT") {
            config.server.port = port
                .parse()
                .map_err(|_| Error::Config(format!("invalid RAG_PORT: {port}")))?;
        }
        if let Ok(url) = std::env::var("OLLAMA_URL") {
            config.llm.base_url = url;
        }
        if let Ok(model) = std::env::var("EMBEDDING_MODEL") {
            config.llm.embed_model = model;
        }
        if let Ok(model) = std::env::var("GENERATION_MODEL") {
            config.llm.generate_model = model;
        }
        if let Ok(dir) = std::env::var("RAG_DATA_DIR") {
            config.vector_db.data_dir = PathBuf::from(dir);
        }
        if let Ok(name) = std::env::var("RAG_COLLECTION") {
            config.vector_db.collection_name = name;
        }
        if let Ok(size) = std::env::var("CHUNK_SIZE") {
            config.chunking.chunk_size = size
                .parse()
                .map_err(|_| Error::Config(format!("invalid CHUNK_SIZE: {size}")))?;
        }
        if let Ok(overlap) = std::env::var("CHUNK_OVERLAP") {
            config.chunking.chunk_overlap = overlap
                .parse()
                .map_err(|_| Error::Config(format!("invalid CHUNK_OVERLAP: {overlap}")))?;
        }
        if let Ok(k) = std::env::var("RETRIEVAL_TOP_K") {
            config.retrieval.top_k = k
                .parse()
                .map_err(|_| Error::Config(format!("invalid RETRIEVAL_TOP_K: {k}")))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check cross-field invariants
    pub fn validate(&self) -> Result<()> {
        if self.chunking.chunk_size == 0 {
            return Err(Error::Config("chunk size must be greater than zero".into()));
        }
        if self.chunking.chunk_overlap >= self.chunking.chunk_size {
            return Err(Error::Config(format!(
                "chunk overlap ({}) must be smaller than chunk size ({})",
                self.chunking.chunk_overlap, self.chunking.chunk_size
            )));
        }
        if self.retrieval.top_k == 0 {
            return Err(Error::Config("retrieval top_k must be greater than zero".into()));
        }
        Ok(())
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Enable CORS (any origin)
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            enable_cors: true,
        }
    }
}

/// Text chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Maximum chunk size in characters
    pub chunk_size: usize,
    /// Overlap between adjacent chunks in characters
    pub chunk_overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
        }
    }
}

/// LLM (Ollama) configuration
///
/// Both pipelines read the embedding model name from here, so ingestion-time
/// and query-time vectors always come from the same model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Ollama base URL
    pub base_url: String,
    /// Embedding model name
    pub embed_model: String,
    /// Generation model name
    pub generate_model: String,
    /// Temperature for generation
    pub temperature: f32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Number of retries for failed requests
    pub max_retries: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            embed_model: "nomic-embed-text".to_string(),
            generate_model: "llama3".to_string(),
            temperature: 0.3,
            timeout_secs: 300,
            max_retries: 3,
        }
    }
}

/// Retrieval configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Number of chunks to retrieve per question
    pub top_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self { top_k: 4 }
    }
}

/// Vector collection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorDbConfig {
    /// Directory holding the persisted collection
    pub data_dir: PathBuf,
    /// Collection name; the process uses exactly one collection
    pub collection_name: String,
}

impl Default for VectorDbConfig {
    fn default() -> Self {
        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
            .join("local-rag");

        Self {
            data_dir,
            collection_name: "local_docs".to_string(),
        }
    }
}
