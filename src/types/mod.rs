//! Core types for the document Q&A service

pub mod document;
pub mod request;
pub mod response;

pub use document::{Chunk, Document, FileType};
pub use request::{ChatRequest, IngestRequest};
pub use response::{ChatResponse, IngestResponse, IngestStatus};
