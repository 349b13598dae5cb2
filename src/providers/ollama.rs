//! Ollama API client with retry logic, plus trait adapters

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::time::sleep;

use crate::config::LlmConfig;
use crate::error::{Error, Result};

use super::embedding::EmbeddingProvider;
use super::llm::LlmProvider;

/// Ollama API client shared by the embedding and generation providers
pub struct OllamaClient {
    /// HTTP client
    client: Client,
    /// Configuration
    config: LlmConfig,
    /// Maximum retries for transient failures
    max_retries: u32,
}

#[derive(Serialize)]
struct EmbedRequest {
    model: String,
    prompt: String,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embedding: Vec<f32>,
}

#[derive(Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaClient {
    /// Create a new Ollama client
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(5)
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            max_retries: config.max_retries,
            config: config.clone(),
        })
    }

    /// Retry a request with exponential backoff. A missing model is never
    /// retried: the same answer would come back every time.
    async fn retry_request<F, Fut, T>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e @ Error::ModelUnavailable { .. }) => return Err(e),
                Err(e) => {
                    last_error = Some(e);
                    if attempt < self.max_retries {
                        let delay = Duration::from_secs(2u64.pow(attempt));
                        tracing::warn!(
                            "Ollama request failed (attempt {}/{}), retrying in {:?}",
                            attempt + 1,
                            self.max_retries + 1,
                            delay
                        );
                        sleep(delay).await;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| Error::llm("unknown error")))
    }

    /// Check if Ollama is reachable
    pub async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/api/tags", self.config.base_url);

        match self.client.get(&url).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    /// Generate an embedding
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let url = format!("{}/api/embeddings", self.config.base_url);
        let model = self.config.embed_model.clone();
        let text = text.to_string();
        let client = self.client.clone();

        self.retry_request(|| {
            let url = url.clone();
            let model = model.clone();
            let text = text.clone();
            let client = client.clone();

            async move {
                let request = EmbedRequest {
                    model: model.clone(),
                    prompt: text,
                };

                let response = client
                    .post(&url)
                    .json(&request)
                    .send()
                    .await
                    .map_err(|e| Error::embedding(format!("embedding request failed: {e}")))?;

                if !response.status().is_success() {
                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();
                    if is_model_missing(status, &body) {
                        return Err(Error::model_unavailable(model));
                    }
                    return Err(Error::embedding(format!(
                        "embedding failed: HTTP {status} - {body}"
                    )));
                }

                let embed_response: EmbedResponse = response
                    .json()
                    .await
                    .map_err(|e| Error::embedding(format!("invalid embedding response: {e}")))?;

                Ok(embed_response.embedding)
            }
        })
        .await
    }

    /// Generate a completion for a prompt
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/api/generate", self.config.base_url);
        let model = self.config.generate_model.clone();
        let temperature = self.config.temperature;
        let prompt = prompt.to_string();
        let client = self.client.clone();

        tracing::info!("Generating answer with model: {}", model);

        self.retry_request(|| {
            let url = url.clone();
            let model = model.clone();
            let prompt = prompt.clone();
            let client = client.clone();

            async move {
                let request = GenerateRequest {
                    model: model.clone(),
                    prompt,
                    stream: false,
                    options: GenerateOptions { temperature },
                };

                let response = client
                    .post(&url)
                    .json(&request)
                    .send()
                    .await
                    .map_err(|e| Error::llm(format!("generation request failed: {e}")))?;

                if !response.status().is_success() {
                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();
                    if is_model_missing(status, &body) {
                        return Err(Error::model_unavailable(model));
                    }
                    return Err(Error::llm(format!(
                        "generation failed: HTTP {status} - {body}"
                    )));
                }

                let generate_response: GenerateResponse = response
                    .json()
                    .await
                    .map_err(|e| Error::llm(format!("invalid generation response: {e}")))?;

                Ok(generate_response.response)
            }
        })
        .await
    }
}

/// Ollama reports a missing model as a 404 with a "not found" error body
fn is_model_missing(status: reqwest::StatusCode, body: &str) -> bool {
    status == reqwest::StatusCode::NOT_FOUND || body.to_lowercase().contains("not found")
}

/// Embedding provider backed by Ollama
pub struct OllamaEmbedder {
    client: Arc<OllamaClient>,
    model: String,
}

impl OllamaEmbedder {
    /// Create from an existing client
    pub fn from_client(client: Arc<OllamaClient>, model: String) -> Self {
        Self { client, model }
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.client.embed(text).await
    }

    async fn health_check(&self) -> Result<bool> {
        self.client.health_check().await
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn name(&self) -> &str {
        "ollama"
    }
}

/// LLM provider backed by Ollama
pub struct OllamaLlm {
    client: Arc<OllamaClient>,
    model: String,
}

impl OllamaLlm {
    /// Create from an existing client
    pub fn from_client(client: Arc<OllamaClient>, model: String) -> Self {
        Self { client, model }
    }
}

#[async_trait]
impl LlmProvider for OllamaLlm {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.client.generate(prompt).await
    }

    async fn health_check(&self) -> Result<bool> {
        self.client.health_check().await
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn name(&self) -> &str {
        "ollama"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_missing_detection() {
        assert!(is_model_missing(
            reqwest::StatusCode::NOT_FOUND,
            r#"{"error":"model 'llama3' not found, try pulling it first"}"#
        ));
        assert!(is_model_missing(
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"error":"model not found"}"#
        ));
        assert!(!is_model_missing(
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"error":"out of memory"}"#
        ));
    }
}
