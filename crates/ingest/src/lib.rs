//! Element-to-markdown assembly and chunking for parsed documents.
//!
//! Pipeline flow: element source → normalize / rebuild tables → assemble
//! markdown → split into overlapping chunks → write outputs.

pub mod document;
pub mod pipeline;

pub use document::chunker::{Chunk, TextSplitter};
pub use document::{assemble, render_document, ElementSource, ExtractionError, MarkdownConverter};
pub use pipeline::{BatchReport, Pipeline, PipelineError, ProcessedDocument};
