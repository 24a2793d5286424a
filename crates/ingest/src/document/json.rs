use std::path::Path;

use paperdown_core::Element;

use super::{ElementSource, ExtractionError};

/// Reads elements from a layout parser's element-JSON output
/// (`[{"type": "Title", "text": "..."}, ...]`).
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonElementSource;

pub(crate) fn parse_elements(bytes: &[u8]) -> Result<Vec<Element>, ExtractionError> {
    serde_json::from_slice(bytes).map_err(|e| ExtractionError::InvalidElements(e.to_string()))
}

impl ElementSource for JsonElementSource {
    fn extract(&self, path: &Path) -> Result<Vec<Element>, ExtractionError> {
        let bytes = std::fs::read(path)?;
        parse_elements(&bytes)
    }
}
