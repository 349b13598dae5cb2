//! Embedding provider trait

use async_trait::async_trait;

use crate::error::Result;

/// Maps text to fixed-length vectors.
///
/// The same provider (and model identifier) must serve both ingestion and
/// query embedding; vectors from different models are not comparable, and
/// nothing at runtime can detect the mismatch.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate an embedding for a single text
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embeddings for multiple texts.
    ///
    /// Default implementation calls `embed` sequentially.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut embeddings = Vec::with_capacity(texts.len());
        for text in texts {
            embeddings.push(self.embed(text).await?);
        }
        Ok(embeddings)
    }

    /// One cheap connectivity probe, run before bulk embedding so a missing
    /// model fails the whole run in a single call
    async fn probe(&self) -> Result<()> {
        self.embed("test").await.map(|_| ())
    }

    /// Check if the provider is reachable
    async fn health_check(&self) -> Result<bool>;

    /// Get the model identifier in use
    fn model(&self) -> &str;

    /// Get provider name for logging
    fn name(&self) -> &str;
}
