//! Recursive folder scanning and document loading

use std::path::Path;

use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::types::{Document, FileType};

use super::parser::ParserRegistry;

/// A file that matched a registered parser but could not be read
#[derive(Debug, Clone)]
pub struct SkippedFile {
    /// File path
    pub path: String,
    /// Why parsing failed
    pub reason: String,
}

/// Result of a folder scan: the documents that loaded, plus a record of
/// every file that was attempted and failed
#[derive(Debug, Default)]
pub struct LoadOutcome {
    /// Successfully loaded documents
    pub documents: Vec<Document>,
    /// Files skipped because of parse failures
    pub skipped: Vec<SkippedFile>,
}

/// Loads documents from a directory tree
pub struct DocumentLoader {
    registry: ParserRegistry,
}

impl DocumentLoader {
    /// Create a loader with the built-in parser registry
    pub fn new() -> Self {
        Self {
            registry: ParserRegistry::with_defaults(),
        }
    }

    /// Create a loader with a custom parser registry
    pub fn with_registry(registry: ParserRegistry) -> Self {
        Self { registry }
    }

    /// Recursively load every parseable file under `folder`.
    ///
    /// Files with no registered parser are skipped silently. Files whose
    /// parser fails become `skipped` records and the scan continues; only a
    /// missing root folder aborts the whole call.
    pub fn load_folder(&self, folder: &Path) -> Result<LoadOutcome> {
        if !folder.exists() {
            return Err(Error::FolderNotFound(folder.display().to_string()));
        }

        tracing::info!("Scanning folder: {}", folder.display());

        let mut outcome = LoadOutcome::default();

        for entry in WalkDir::new(folder)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let extension = path
                .extension()
                .map(|e| e.to_string_lossy().to_lowercase())
                .unwrap_or_default();

            let Some(parser) = self.registry.get(&extension) else {
                continue;
            };

            match parser(path) {
                Ok(content) => {
                    let file_type = FileType::from_extension(&extension);
                    tracing::debug!(
                        "Loaded {} ({}, {} chars)",
                        path.display(),
                        file_type.display_name(),
                        content.chars().count()
                    );
                    outcome.documents.push(Document::new(
                        path.display().to_string(),
                        file_type,
                        content,
                    ));
                }
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", path.display(), e);
                    outcome.skipped.push(SkippedFile {
                        path: path.display().to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            "Loaded {} documents ({} skipped)",
            outcome.documents.len(),
            outcome.skipped.len()
        );

        Ok(outcome)
    }
}

impl Default for DocumentLoader {
    fn default() -> Self {
        Self::new()
    }
}
