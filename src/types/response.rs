//! Response types for the HTTP API

use serde::{Deserialize, Serialize};

/// Outcome class of an ingestion run
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IngestStatus {
    /// Documents were indexed
    Success,
    /// The folder contained no compatible documents
    Warning,
}

/// Response from `POST /ingest`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestResponse {
    /// Outcome class
    pub status: IngestStatus,
    /// Human-readable summary
    pub message: String,
}

impl IngestResponse {
    /// Build a success response with document/chunk counts and skip diagnostics
    pub fn success(documents: usize, chunks: usize, skipped: usize) -> Self {
        let mut message = format!("Indexed {documents} documents ({chunks} chunks).");
        if skipped > 0 {
            message.push_str(&format!(" Skipped {skipped} unreadable files."));
        }
        Self {
            status: IngestStatus::Success,
            message,
        }
    }

    /// Build the warning response for a folder with no compatible documents
    pub fn warning(skipped: usize) -> Self {
        let mut message = "No compatible documents found.".to_string();
        if skipped > 0 {
            message.push_str(&format!(" Skipped {skipped} unreadable files."));
        }
        Self {
            status: IngestStatus::Warning,
            message,
        }
    }
}

/// Response from `POST /chat`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Generated answer text
    pub answer: String,
    /// Distinct source identifiers of the retrieved chunks
    pub sources: Vec<String>,
}
