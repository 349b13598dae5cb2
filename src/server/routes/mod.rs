//! API routes for the document Q&A server

pub mod chat;
pub mod ingest;

use axum::{
    routing::{get, post},
    Router,
};

use crate::server::state::AppState;

/// Build all API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ingest", post(ingest::ingest_documents))
        .route("/chat", post(chat::chat))
        .route("/health", get(health_check))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
