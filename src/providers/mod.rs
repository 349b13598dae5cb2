//! External model providers consumed by the pipelines

mod embedding;
mod llm;
mod ollama;

pub use embedding::EmbeddingProvider;
pub use llm::LlmProvider;
pub use ollama::{OllamaClient, OllamaEmbedder, OllamaLlm};
