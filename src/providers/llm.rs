//! LLM provider trait

use async_trait::async_trait;

use crate::error::Result;

/// Completes a prompt with generated text.
///
/// Single-shot: the provider carries no conversation state, so every
/// question is answered independently of prior questions.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate a completion for the given prompt
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Check if the provider is reachable
    async fn health_check(&self) -> Result<bool>;

    /// Get the model identifier in use
    fn model(&self) -> &str;

    /// Get provider name for logging
    fn name(&self) -> &str;
}
