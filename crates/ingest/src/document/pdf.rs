use std::path::Path;

use paperdown_core::{Element, ElementCategory};

use super::{ElementSource, ExtractionError};

/// Element source over a PDF's embedded text layer.
///
/// Pages are separated by form feeds and blocks by blank lines. Each block is
/// classified with simple shape heuristics; there is no OCR or layout analysis,
/// so scanned PDFs without a text layer are reported as errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfElementSource;

const BULLETS: &[&str] = &["- ", "* ", "• ", "◦ ", "▪ "];
const MAX_TITLE_CHARS: usize = 100;
const MAX_TITLE_WORDS: usize = 12;

fn strip_bullet(line: &str) -> Option<&str> {
    BULLETS.iter().find_map(|b| line.strip_prefix(*b)).map(str::trim)
}

fn looks_like_title(line: &str) -> bool {
    let starts_upper = line
        .chars()
        .next()
        .is_some_and(|c| c.is_uppercase() || c.is_ascii_digit());
    let ends_open = !line.ends_with(['.', ',', ';', ':', '!', '?']);
    starts_upper
        && ends_open
        && line.chars().count() <= MAX_TITLE_CHARS
        && line.split_whitespace().count() <= MAX_TITLE_WORDS
        && line.chars().any(char::is_alphabetic)
}

/// Turn one blank-line-delimited block into elements.
pub(crate) fn classify_block(block: &str) -> Vec<Element> {
    let lines: Vec<&str> = block
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    if lines.is_empty() {
        return Vec::new();
    }

    let items: Option<Vec<&str>> = lines.iter().map(|l| strip_bullet(l)).collect();
    if let Some(items) = items {
        return items
            .into_iter()
            .map(|item| Element::new(ElementCategory::ListItem, item))
            .collect();
    }

    if lines.len() == 1 && looks_like_title(lines[0]) {
        return vec![Element::new(ElementCategory::Title, lines[0])];
    }

    vec![Element::new(ElementCategory::Text, lines.join("\n"))]
}

/// Split extracted text into elements in reading order.
pub(crate) fn segment_text(text: &str) -> Vec<Element> {
    let mut elements = Vec::new();
    for page in text.split('\x0C') {
        let mut block = String::new();
        for line in page.lines() {
            if line.trim().is_empty() {
                elements.extend(classify_block(&block));
                block.clear();
            } else {
                block.push_str(line);
                block.push('\n');
            }
        }
        elements.extend(classify_block(&block));
    }
    elements
}

pub fn extract_pdf(bytes: &[u8]) -> Result<Vec<Element>, ExtractionError> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| ExtractionError::PdfError(e.to_string()))?;

    if text.trim().is_empty() {
        return Err(ExtractionError::PdfError(
            "no text layer found (scanned PDFs need OCR upstream)".to_string(),
        ));
    }

    let elements = segment_text(&text);
    tracing::debug!(elements = elements.len(), "segmented PDF text layer");
    Ok(elements)
}

impl ElementSource for PdfElementSource {
    fn extract(&self, path: &Path) -> Result<Vec<Element>, ExtractionError> {
        let bytes = std::fs::read(path)?;
        extract_pdf(&bytes)
    }
}
