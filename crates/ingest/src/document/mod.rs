pub mod assemble;
pub mod chunker;
pub mod convert;
mod json;
pub mod normalize;
mod pdf;
pub mod table;

use std::collections::HashMap;
use std::path::Path;

use paperdown_core::Element;
use thiserror::Error;

pub use assemble::{assemble, render_document};
pub use convert::{MarkdownConverter, PlainTextConverter};
pub use json::JsonElementSource;
pub use normalize::normalize_text;
pub use pdf::PdfElementSource;
pub use table::{reconstruct_table, render_table, TableError};

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),
    #[error("PDF extraction failed: {0}")]
    PdfError(String),
    #[error("Invalid element file: {0}")]
    InvalidElements(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Produces the ordered element sequence for one source file.
///
/// Failures propagate to the caller unmodified; nothing here retries or
/// repairs unparseable input.
pub trait ElementSource: Send + Sync {
    fn extract(&self, path: &Path) -> Result<Vec<Element>, ExtractionError>;
}

/// Lowercased extension of `path`, or an empty string.
pub fn file_extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// Element sources keyed by file extension.
pub struct SourceRegistry {
    sources: HashMap<String, Box<dyn ElementSource>>,
}

impl SourceRegistry {
    pub fn empty() -> Self {
        Self {
            sources: HashMap::new(),
        }
    }

    /// Register (or replace) the source used for `extension`.
    pub fn register(&mut self, extension: &str, source: Box<dyn ElementSource>) {
        self.sources.insert(extension.to_lowercase(), source);
    }

    pub fn supports(&self, path: &Path) -> bool {
        self.sources.contains_key(&file_extension(path))
    }

    /// Extract elements using the source registered for the file's extension.
    pub fn extract(&self, path: &Path) -> Result<Vec<Element>, ExtractionError> {
        let ext = file_extension(path);
        match self.sources.get(&ext) {
            Some(source) => source.extract(path),
            None => Err(ExtractionError::UnsupportedType(ext)),
        }
    }
}

impl Default for SourceRegistry {
    /// PDF text layers and element-JSON files.
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register("pdf", Box::new(PdfElementSource));
        registry.register("json", Box::new(JsonElementSource));
        registry
    }
}
