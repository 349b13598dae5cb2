//! Per-format file parsers behind an extension registry
//!
//! Each parser turns one file into plain text. The registry maps lowercase
//! extensions to parsers, so adding a format is a `register` call rather
//! than a new branch at the dispatch site.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{Error, Result};

/// A parsing capability: file path in, extracted text out
pub type ParseFn = fn(&Path) -> Result<String>;

/// Extension-to-parser registry
pub struct ParserRegistry {
    parsers: HashMap<String, ParseFn>,
}

impl ParserRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            parsers: HashMap::new(),
        }
    }

    /// Create a registry with the built-in parsers: plain text, markdown,
    /// PDF, and Word documents
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("txt", parse_text);
        registry.register("md", parse_text);
        registry.register("pdf", parse_pdf);
        registry.register("docx", parse_docx);
        // Legacy .doc files go through the docx parser; most fail and end up
        // as skip records, matching the try-and-log handling of the rest of
        // the loader.
        registry.register("doc", parse_docx);
        registry
    }

    /// Register a parser for an extension (lowercase, without the dot)
    pub fn register(&mut self, extension: &str, parser: ParseFn) {
        self.parsers.insert(extension.to_lowercase(), parser);
    }

    /// Look up the parser for an extension
    pub fn get(&self, extension: &str) -> Option<ParseFn> {
        self.parsers.get(&extension.to_lowercase()).copied()
    }

    /// Check whether an extension has a registered parser
    pub fn supports(&self, extension: &str) -> bool {
        self.parsers.contains_key(&extension.to_lowercase())
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Parse a plain text or markdown file
fn parse_text(path: &Path) -> Result<String> {
    let data = std::fs::read(path)
        .map_err(|e| Error::file_parse(path.display().to_string(), e.to_string()))?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

/// Parse a PDF document
fn parse_pdf(path: &Path) -> Result<String> {
    pdf_extract::extract_text(path)
        .map_err(|e| Error::file_parse(path.display().to_string(), e.to_string()))
}

/// Parse a Word document
fn parse_docx(path: &Path) -> Result<String> {
    let data = std::fs::read(path)
        .map_err(|e| Error::file_parse(path.display().to_string(), e.to_string()))?;

    let doc = docx_rs::read_docx(&data)
        .map_err(|e| Error::file_parse(path.display().to_string(), e.to_string()))?;

    let mut content = String::new();
    for child in doc.document.children {
        if let docx_rs::DocumentChild::Paragraph(paragraph) = child {
            for child in paragraph.children {
                if let docx_rs::ParagraphChild::Run(run) = child {
                    for child in run.children {
                        if let docx_rs::RunChild::Text(text) = child {
                            content.push_str(&text.text);
                        }
                    }
                }
            }
            content.push('\n');
        }
    }

    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_registry_extensions() {
        let registry = ParserRegistry::with_defaults();
        assert!(registry.supports("txt"));
        assert!(registry.supports("TXT"));
        assert!(registry.supports("md"));
        assert!(registry.supports("pdf"));
        assert!(registry.supports("docx"));
        assert!(registry.supports("doc"));
        assert!(!registry.supports("xyz"));
        assert!(!registry.supports("csv"));
    }

    #[test]
    fn test_register_extends_dispatch() {
        let mut registry = ParserRegistry::with_defaults();
        assert!(!registry.supports("log"));
        registry.register("log", |path| {
            Ok(std::fs::read_to_string(path).unwrap_or_default())
        });
        assert!(registry.supports("log"));
    }

    #[test]
    fn test_parse_text_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Paris is the capital of France.").unwrap();

        let parser = ParserRegistry::with_defaults().get("txt").unwrap();
        let content = parser(file.path()).unwrap();
        assert_eq!(content, "Paris is the capital of France.");
    }

    #[test]
    fn test_parse_invalid_docx_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not a zip archive").unwrap();

        let parser = ParserRegistry::with_defaults().get("docx").unwrap();
        assert!(parser(file.path()).is_err());
    }
}
