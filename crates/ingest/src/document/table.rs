//! Heuristic rebuild of table elements into markdown pipe tables.
//!
//! Columns are whitespace-delimited, so a cell containing spaces is split into
//! several columns. The header row fixes the separator width; later rows are
//! rendered with whatever token count they have.

use thiserror::Error;

use super::convert::MarkdownConverter;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("table text contains non-text data ({0:?} at byte {1})")]
    NonText(char, usize),
}

fn render_row(cols: &[&str]) -> String {
    format!("| {} |", cols.join(" | "))
}

fn render_separator(width: usize) -> String {
    format!("|{}", " --- |".repeat(width))
}

/// Rebuild raw table text as a markdown table.
///
/// Returns an empty string when no row has any column, which callers treat as
/// "nothing to emit".
pub fn reconstruct_table(raw: &str) -> Result<String, TableError> {
    if let Some((offset, c)) = raw
        .char_indices()
        .find(|(_, c)| c.is_control() && !c.is_whitespace())
    {
        return Err(TableError::NonText(c, offset));
    }

    let mut lines = Vec::new();
    let mut header_width = None;
    let mut misaligned = 0usize;

    for row in raw.split('\n').map(str::trim).filter(|r| !r.is_empty()) {
        let cols: Vec<&str> = row.split_whitespace().collect();
        if cols.is_empty() {
            continue;
        }
        lines.push(render_row(&cols));
        match header_width {
            None => {
                header_width = Some(cols.len());
                lines.push(render_separator(cols.len()));
            }
            Some(width) if width != cols.len() => misaligned += 1,
            Some(_) => {}
        }
    }

    if misaligned > 0 {
        tracing::warn!(
            header_columns = header_width.unwrap_or_default(),
            misaligned_rows = misaligned,
            "table rows disagree with header column count"
        );
    }

    Ok(lines.join("\n"))
}

/// Best-effort table rendering: falls back to generic conversion of the raw
/// text when the table cannot be rebuilt.
pub fn render_table(raw: &str, converter: &dyn MarkdownConverter) -> String {
    match reconstruct_table(raw) {
        Ok(table) => table,
        Err(e) => {
            tracing::warn!(error = %e, "table reconstruction failed, using plain conversion");
            converter.to_markdown(raw)
        }
    }
}
