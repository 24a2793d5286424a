//! Assembles an ordered element sequence into one markdown document.

use paperdown_core::{DocumentMeta, Element, RenderedDocument};

use super::convert::MarkdownConverter;
use super::normalize::normalize_text;
use super::table::render_table;

const FRONT_MATTER_FENCE: &str = "---";

/// Escape a value for a double-quoted YAML scalar.
fn quote_yaml(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

fn front_matter(meta: &DocumentMeta) -> String {
    format!(
        "{fence}\ntitle: {title}\nsource_file: {source}\nprocessed_date: {date}\n{fence}\n\n",
        fence = FRONT_MATTER_FENCE,
        title = quote_yaml(&meta.name),
        source = quote_yaml(&meta.source_path),
        date = quote_yaml(&meta.processed_date()),
    )
}

/// Rendered body for one element, or `None` when it has no content.
fn element_content(element: &Element, converter: &dyn MarkdownConverter) -> Option<String> {
    let content = if element.category.is_table() {
        // Whitespace layout carries the column structure, so tables skip normalization.
        render_table(&element.text, converter)
    } else {
        let text = normalize_text(&element.text);
        if text.is_empty() {
            return None;
        }
        converter.to_markdown(&text)
    };
    (!content.trim().is_empty()).then_some(content)
}

/// Render a document's front matter and one `## <Category>` section per
/// non-empty element, in the order given.
pub fn assemble(
    meta: &DocumentMeta,
    elements: &[Element],
    converter: &dyn MarkdownConverter,
) -> String {
    let mut out = front_matter(meta);
    let mut skipped = 0usize;

    for element in elements {
        match element_content(element, converter) {
            Some(content) => {
                out.push_str(&format!("## {}\n\n{}\n\n", element.category, content));
            }
            None => {
                skipped += 1;
                tracing::debug!(category = %element.category, "skipping empty element");
            }
        }
    }

    tracing::debug!(
        document = %meta.name,
        elements = elements.len(),
        skipped,
        "assembled document"
    );
    out
}

pub fn render_document(
    meta: &DocumentMeta,
    elements: &[Element],
    converter: &dyn MarkdownConverter,
) -> RenderedDocument {
    RenderedDocument {
        meta: meta.clone(),
        markdown: assemble(meta, elements, converter),
    }
}
