//! Folder ingestion endpoint

use axum::{extract::State, Json};

use crate::error::Result;
use crate::ingestion::{IngestPipeline, IngestReport};
use crate::server::state::AppState;
use crate::types::{IngestRequest, IngestResponse};

/// POST /ingest - Index every supported document under a folder
pub async fn ingest_documents(
    State(state): State<AppState>,
    Json(request): Json<IngestRequest>,
) -> Result<Json<IngestResponse>> {
    let pipeline = IngestPipeline::new(&state.config().chunking);

    let report = pipeline
        .run(
            &request.folder_path,
            state.embedder(),
            state.vector_store(),
        )
        .await?;

    let response = match report {
        IngestReport::Indexed {
            documents,
            chunks,
            skipped,
        } => IngestResponse::success(documents, chunks, skipped.len()),
        IngestReport::NoDocuments { skipped } => IngestResponse::warning(skipped.len()),
    };

    Ok(Json(response))
}
