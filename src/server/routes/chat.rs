//! Question answering endpoint

use axum::{extract::State, Json};

use crate::error::Result;
use crate::generation::QueryPipeline;
use crate::server::state::AppState;
use crate::types::{ChatRequest, ChatResponse};

/// POST /chat - Answer a question from the indexed documents
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    let pipeline = QueryPipeline::new(
        state.embedder(),
        state.llm(),
        state.vector_store(),
        state.config().retrieval.top_k,
    );

    let response = pipeline.answer(&request.question).await?;

    Ok(Json(response))
}
