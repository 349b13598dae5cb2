//! local-rag: document Q&A over a local folder, powered by Ollama
//!
//! This crate ingests text, PDF, and Word documents from a folder, indexes
//! them into a persisted vector collection, and answers questions by
//! retrieving the most relevant chunks and asking a local Ollama model to
//! synthesize an answer grounded in them.

pub mod config;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod providers;
pub mod retrieval;
pub mod server;
pub mod types;

pub use config::RagConfig;
pub use error::{Error, Result};
pub use types::{
    document::{Chunk, Document, FileType},
    request::{ChatRequest, IngestRequest},
    response::{ChatResponse, IngestResponse, IngestStatus},
};
