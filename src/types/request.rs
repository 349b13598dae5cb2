//! Request types for the HTTP API

use serde::{Deserialize, Serialize};

/// Request body for `POST /ingest`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestRequest {
    /// Root folder to scan for documents
    pub folder_path: String,
}

/// Request body for `POST /chat`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The question to answer
    pub question: String,
}
