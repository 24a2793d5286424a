//! Generic text-to-markdown conversion for non-table content.

/// Converts a run of plain text into markdown-safe text.
pub trait MarkdownConverter: Send + Sync {
    fn to_markdown(&self, text: &str) -> String;
}

/// Default converter backed by `html2md`.
///
/// Input is treated as an HTML text fragment: entities are decoded and
/// markdown control characters are escaped. Whitespace runs in the result
/// collapse to one space since callers hand in single-line text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextConverter;

impl MarkdownConverter for PlainTextConverter {
    fn to_markdown(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return String::new();
        }
        html2md::parse_html(text)
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }
}
