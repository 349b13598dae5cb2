//! Document and chunk types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Supported file types
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// PDF document
    Pdf,
    /// Microsoft Word document (.docx)
    Docx,
    /// Legacy Microsoft Word document (.doc)
    Doc,
    /// Plain text file
    Txt,
    /// Markdown file
    Markdown,
    /// Unknown file type
    Unknown,
}

impl FileType {
    /// Detect file type from extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => Self::Pdf,
            "docx" => Self::Docx,
            "doc" => Self::Doc,
            "txt" | "text" => Self::Txt,
            "md" | "markdown" => Self::Markdown,
            _ => Self::Unknown,
        }
    }

    /// Check if this is a supported file type
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Get display name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Pdf => "PDF",
            Self::Docx => "Word Document (.docx)",
            Self::Doc => "Word Document (.doc)",
            Self::Txt => "Text File",
            Self::Markdown => "Markdown",
            Self::Unknown => "Unknown",
        }
    }
}

/// A document loaded from disk
///
/// Documents are the unit the loader produces; they are split into chunks
/// and discarded once chunking is done.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique document ID
    pub id: Uuid,
    /// Origin file path, carried through to chunks as the source identifier
    pub source: String,
    /// File type
    pub file_type: FileType,
    /// Extracted text content
    pub content: String,
    /// Load timestamp
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}

impl Document {
    /// Create a new document
    pub fn new(source: String, file_type: FileType, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            source,
            file_type,
            content,
            loaded_at: chrono::Utc::now(),
        }
    }
}

/// A bounded-length slice of a document's text, the unit of embedding
/// and retrieval
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// Unique chunk ID
    pub id: Uuid,
    /// Parent document ID
    pub document_id: Uuid,
    /// Source identifier inherited from the parent document
    pub source: String,
    /// Chunk text
    pub content: String,
    /// Position within the parent document (0-indexed)
    pub chunk_index: u32,
    /// Embedding vector, filled in by the embedding provider before indexing
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embedding: Vec<f32>,
}

impl Chunk {
    /// Create a new chunk without an embedding
    pub fn new(document_id: Uuid, source: String, content: String, chunk_index: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            document_id,
            source,
            content,
            chunk_index,
            embedding: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_type_from_extension() {
        assert_eq!(FileType::from_extension("pdf"), FileType::Pdf);
        assert_eq!(FileType::from_extension("PDF"), FileType::Pdf);
        assert_eq!(FileType::from_extension("docx"), FileType::Docx);
        assert_eq!(FileType::from_extension("doc"), FileType::Doc);
        assert_eq!(FileType::from_extension("txt"), FileType::Txt);
        assert_eq!(FileType::from_extension("md"), FileType::Markdown);
        assert_eq!(FileType::from_extension("xyz"), FileType::Unknown);
    }

    #[test]
    fn test_unknown_is_unsupported() {
        assert!(!FileType::Unknown.is_supported());
        assert!(FileType::Txt.is_supported());
    }
}
