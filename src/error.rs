//! Error types for the document Q&A service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for service operations
pub type Result<T> = std::result::Result<T, Error>;

/// Service errors
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Ingestion root folder does not exist
    #[error("folder not found: {0}")]
    FolderNotFound(String),

    /// Named Ollama model is not installed or reachable
    #[error("model '{model}' is not available")]
    ModelUnavailable { model: String },

    /// Query attempted before any ingestion and with no persisted collection
    #[error("no documents have been indexed yet")]
    NoDocumentsIndexed,

    /// File parsing error
    #[error("failed to parse '{filename}': {message}")]
    FileParse { filename: String, message: String },

    /// Embedding error
    #[error("embedding generation failed: {0}")]
    Embedding(String),

    /// LLM error
    #[error("LLM error: {0}")]
    Llm(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a file parse error
    pub fn file_parse(filename: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FileParse {
            filename: filename.into(),
            message: message.into(),
        }
    }

    /// Create a model-unavailable error
    pub fn model_unavailable(model: impl Into<String>) -> Self {
        Self::ModelUnavailable {
            model: model.into(),
        }
    }

    /// Create an embedding error
    pub fn embedding(message: impl Into<String>) -> Self {
        Self::Embedding(message.into())
    }

    /// Create an LLM error
    pub fn llm(message: impl Into<String>) -> Self {
        Self::Llm(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            Error::ModelUnavailable { model } => (
                StatusCode::NOT_FOUND,
                format!("Model '{model}' is not installed. Pull it with: ollama pull {model}"),
            ),
            Error::NoDocumentsIndexed => {
                (StatusCode::BAD_REQUEST, "Load documents first.".to_string())
            }
            other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
        };

        let body = Json(json!({ "detail": detail }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_unavailable_maps_to_404() {
        let response = Error::model_unavailable("nomic-embed-text").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_no_documents_maps_to_400() {
        let response = Error::NoDocumentsIndexed.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_missing_folder_maps_to_500() {
        let response = Error::FolderNotFound("/does/not/exist".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_internal_maps_to_500() {
        let response = Error::internal("boom").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
