use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Category label attached to an element by the upstream layout parser.
///
/// Known labels get their own variant; anything else is carried through
/// verbatim in `Other` so the rendered heading still names it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ElementCategory {
    Title,
    NarrativeText,
    #[default]
    Text,
    UncategorizedText,
    ListItem,
    Table,
    Header,
    Footer,
    FigureCaption,
    Formula,
    Address,
    EmailAddress,
    CodeSnippet,
    PageNumber,
    Image,
    PageBreak,
    Other(String),
}

impl ElementCategory {
    /// The label as the layout parser spells it.
    pub fn as_str(&self) -> &str {
        match self {
            ElementCategory::Title => "Title",
            ElementCategory::NarrativeText => "NarrativeText",
            ElementCategory::Text => "Text",
            ElementCategory::UncategorizedText => "UncategorizedText",
            ElementCategory::ListItem => "ListItem",
            ElementCategory::Table => "Table",
            ElementCategory::Header => "Header",
            ElementCategory::Footer => "Footer",
            ElementCategory::FigureCaption => "FigureCaption",
            ElementCategory::Formula => "Formula",
            ElementCategory::Address => "Address",
            ElementCategory::EmailAddress => "EmailAddress",
            ElementCategory::CodeSnippet => "CodeSnippet",
            ElementCategory::PageNumber => "PageNumber",
            ElementCategory::Image => "Image",
            ElementCategory::PageBreak => "PageBreak",
            ElementCategory::Other(label) => label,
        }
    }

    pub fn is_table(&self) -> bool {
        matches!(self, ElementCategory::Table)
    }
}

impl FromStr for ElementCategory {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let category = match s.trim() {
            "" | "Text" => ElementCategory::Text,
            "Title" => ElementCategory::Title,
            "NarrativeText" => ElementCategory::NarrativeText,
            "UncategorizedText" => ElementCategory::UncategorizedText,
            "ListItem" => ElementCategory::ListItem,
            "Table" => ElementCategory::Table,
            "Header" => ElementCategory::Header,
            "Footer" => ElementCategory::Footer,
            "FigureCaption" => ElementCategory::FigureCaption,
            "Formula" => ElementCategory::Formula,
            "Address" => ElementCategory::Address,
            "EmailAddress" => ElementCategory::EmailAddress,
            "CodeSnippet" => ElementCategory::CodeSnippet,
            "PageNumber" => ElementCategory::PageNumber,
            "Image" => ElementCategory::Image,
            "PageBreak" => ElementCategory::PageBreak,
            other => ElementCategory::Other(other.to_string()),
        };
        Ok(category)
    }
}

impl From<String> for ElementCategory {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(category) => category,
            Err(never) => match never {},
        }
    }
}

impl From<ElementCategory> for String {
    fn from(category: ElementCategory) -> Self {
        category.as_str().to_string()
    }
}

impl fmt::Display for ElementCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parsed unit of a source document, in reading order.
///
/// Serialized with the field names of the layout parser's element JSON
/// (`type` + `text`); extra fields such as `element_id` or `metadata` are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    #[serde(rename = "type", alias = "category", default)]
    pub category: ElementCategory,
    #[serde(default)]
    pub text: String,
}

impl Element {
    pub fn new(category: ElementCategory, text: impl Into<String>) -> Self {
        Self {
            category,
            text: text.into(),
        }
    }
}

/// Per-document metadata written into the front-matter block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMeta {
    /// Document name, normally the source file stem.
    pub name: String,
    /// Source identifier as given by the caller (usually a path).
    pub source_path: String,
    pub processed_at: DateTime<Utc>,
}

impl DocumentMeta {
    /// Metadata stamped with the current time.
    pub fn new(name: impl Into<String>, source_path: impl Into<String>) -> Self {
        Self::at(name, source_path, Utc::now())
    }

    pub fn at(
        name: impl Into<String>,
        source_path: impl Into<String>,
        processed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            source_path: source_path.into(),
            processed_at,
        }
    }

    /// Processing date as `YYYY-MM-DD`.
    pub fn processed_date(&self) -> String {
        self.processed_at.format("%Y-%m-%d").to_string()
    }
}

/// The rendered form of a document: its metadata plus the assembled markdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub meta: DocumentMeta,
    pub markdown: String,
}
