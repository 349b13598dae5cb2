//! Prompt templates for answer generation

use crate::retrieval::SearchResult;

/// Prompt builder for document-grounded questions
pub struct PromptBuilder;

impl PromptBuilder {
    /// Concatenate retrieved chunk texts, best match first, separated by a
    /// blank line
    pub fn build_context(results: &[SearchResult]) -> String {
        results
            .iter()
            .map(|r| r.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Build the instruction prompt directing the model to answer only from
    /// the supplied context
    pub fn build_qa_prompt(question: &str, context: &str) -> String {
        format!(
            r#"Based on the following context, answer the question. Only use information from the context.

Context:
{context}

Question: {question}

Answer:"#
        )
    }
}
