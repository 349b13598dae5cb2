//! Query pipeline orchestration

use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::providers::{EmbeddingProvider, LlmProvider};
use crate::retrieval::VectorStore;
use crate::types::ChatResponse;

use super::prompt::PromptBuilder;

/// Fixed answer returned when retrieval finds nothing; the LLM is not called
pub const NO_MATCH_ANSWER: &str = "No relevant information was found in the indexed documents.";

/// Orchestrates retrieve, prompt, and generate for one question
pub struct QueryPipeline<'a> {
    embedder: &'a dyn EmbeddingProvider,
    llm: &'a dyn LlmProvider,
    store: &'a VectorStore,
    top_k: usize,
}

impl<'a> QueryPipeline<'a> {
    /// Create a query pipeline over the given providers and store
    pub fn new(
        embedder: &'a dyn EmbeddingProvider,
        llm: &'a dyn LlmProvider,
        store: &'a VectorStore,
        top_k: usize,
    ) -> Self {
        Self {
            embedder,
            llm,
            store,
            top_k,
        }
    }

    /// Answer a question from the indexed documents.
    ///
    /// With no active collection (and none persisted on disk) this fails
    /// before any provider call. With an active collection but no retrieved
    /// text, the fixed no-match answer is returned without calling the LLM.
    pub async fn answer(&self, question: &str) -> Result<ChatResponse> {
        if !self.store.open_persisted()? {
            return Err(Error::NoDocumentsIndexed);
        }

        tracing::info!("Question: \"{}\"", question);

        let query_embedding = self.embedder.embed(question).await?;
        let results = self.store.search(&query_embedding, self.top_k)?;

        let context = PromptBuilder::build_context(&results);
        if context.is_empty() {
            tracing::info!("Retrieval returned no text, skipping generation");
            return Ok(ChatResponse {
                answer: NO_MATCH_ANSWER.to_string(),
                sources: Vec::new(),
            });
        }

        let prompt = PromptBuilder::build_qa_prompt(question, &context);
        let answer = self.llm.generate(&prompt).await?;

        let sources: Vec<String> = results
            .iter()
            .map(|r| r.source.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        tracing::info!("Answered from {} sources", sources.len());

        Ok(ChatResponse { answer, sources })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VectorDbConfig;
    use crate::retrieval::IndexEntry;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubEmbedder;

    #[async_trait]
    impl EmbeddingProvider for StubEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            Ok(vec![1.0, 0.0])
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

    struct StubLlm {
        calls: AtomicUsize,
    }

    impl StubLlm {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl LlmProvider for StubLlm {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok("Paris is the capital of France.".to_string())
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }

        fn model(&self) -> &str {
            "stub-llm"
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

    fn entry(content: &str, source: &str, embedding: Vec<f32>) -> IndexEntry {
        IndexEntry {
            content: content.to_string(),
            source: source.to_string(),
            embedding,
        }
    }

    #[tokio::test]
    async fn test_no_collection_fails_without_provider_calls() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        let llm = StubLlm::new();

        let pipeline = QueryPipeline::new(&StubEmbedder, &llm, &store, 4);
        let result = pipeline.answer("What is the capital of France?").await;

        assert!(matches!(result, Err(Error::NoDocumentsIndexed)));
        assert_eq!(llm.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_retrieval_returns_fixed_answer_without_llm() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        // Active but empty collection
        store.replace_collection(Vec::new()).unwrap();
        let llm = StubLlm::new();

        let pipeline = QueryPipeline::new(&StubEmbedder, &llm, &store, 4);
        let response = pipeline.answer("anything?").await.unwrap();

        assert_eq!(response.answer, NO_MATCH_ANSWER);
        assert!(response.sources.is_empty());
        assert_eq!(llm.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_answer_with_deduplicated_sources() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        store
            .replace_collection(vec![
                entry("Paris is the capital of France.", "a.txt", vec![1.0, 0.0]),
                entry("France is in Europe.", "a.txt", vec![0.9, 0.1]),
                entry("Berlin is the capital of Germany.", "b.txt", vec![0.8, 0.2]),
            ])
            .unwrap();
        let llm = StubLlm::new();

        let pipeline = QueryPipeline::new(&StubEmbedder, &llm, &store, 4);
        let response = pipeline
            .answer("What is the capital of France?")
            .await
            .unwrap();

        assert!(response.answer.contains("Paris"));
        assert_eq!(response.sources, vec!["a.txt", "b.txt"]);
        assert_eq!(llm.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_persisted_collection_is_opened_on_first_question() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = store_in(dir.path());
            store
                .replace_collection(vec![entry(
                    "Paris is the capital of France.",
                    "a.txt",
                    vec![1.0, 0.0],
                )])
                .unwrap();
        }

        // Fresh store handle, as after a process restart
        let store = store_in(dir.path());
        let llm = StubLlm::new();
        let pipeline = QueryPipeline::new(&StubEmbedder, &llm, &store, 4);

        let response = pipeline
            .answer("What is the capital of France?")
            .await
            .unwrap();
        assert_eq!(response.sources, vec!["a.txt"]);
    }

    #[tokio::test]
    async fn test_generation_model_unavailable_propagates() {
        struct MissingLlm;

        #[async_trait]
        impl LlmProvider for MissingLlm {
            async fn generate(&self, _prompt: &str) -> Result<String> {
                Err(Error::model_unavailable("llama3"))
            }

            async fn health_check(&self) -> Result<bool> {
                Ok(false)
            }

            fn model(&self) -> &str {
                "llama3"
            }

            fn name(&self) -> &str {
                "stub"
            }
        }

        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        store
            .replace_collection(vec![entry("some text", "a.txt", vec![1.0, 0.0])])
            .unwrap();

        let pipeline = QueryPipeline::new(&StubEmbedder, &MissingLlm, &store, 4);
        let result = pipeline.answer("question?").await;

        assert!(matches!(result, Err(Error::ModelUnavailable { .. })));
    }
}
