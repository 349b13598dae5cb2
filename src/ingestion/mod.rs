//! Document ingestion pipeline: load, split, embed, persist

mod chunker;
mod loader;
mod parser;
mod processor;

pub use chunker::TextChunker;
pub use loader::{DocumentLoader, LoadOutcome, SkippedFile};
pub use parser::{ParseFn, ParserRegistry};
pub use processor::{normalize_folder_path, IngestPipeline, IngestReport};
