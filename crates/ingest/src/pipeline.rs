//! Per-document processing: extract → assemble → write markdown → chunk →
//! write chunk files. Documents are independent; a batch keeps going when one
//! of them fails.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use paperdown_core::{ChunkingConfig, DocumentMeta, PaperdownError};
use thiserror::Error;
use tracing::{info, warn};

use crate::document::chunker::{Chunk, TextSplitter};
use crate::document::{
    render_document, ExtractionError, MarkdownConverter, PlainTextConverter, SourceRegistry,
};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("extraction failed for {path}: {source}")]
    Extraction {
        path: PathBuf,
        #[source]
        source: ExtractionError,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to list {path}: {source}")]
    List {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("output name {name:?} for {path} is already taken by {first}")]
    DuplicateName {
        path: PathBuf,
        name: String,
        first: PathBuf,
    },
    #[error(transparent)]
    Config(#[from] PaperdownError),
}

/// Outcome of processing one source file.
#[derive(Debug, Clone)]
pub struct ProcessedDocument {
    pub name: String,
    pub source: PathBuf,
    pub markdown_path: PathBuf,
    pub chunk_paths: Vec<PathBuf>,
    pub element_count: usize,
}

/// Per-document results of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub processed: Vec<ProcessedDocument>,
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn total_chunks(&self) -> usize {
        self.processed.iter().map(|d| d.chunk_paths.len()).sum()
    }
}

/// File name for the `index`-th chunk of document `base`.
pub fn chunk_file_name(base: &str, index: usize) -> String {
    format!("{base}_chunk{index}.md")
}

/// Output base name for a source file: its file stem, lossily decoded.
pub fn document_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn write_file(path: &Path, contents: &str) -> Result<(), PipelineError> {
    fs::write(path, contents).map_err(|source| PipelineError::Write {
        path: path.to_path_buf(),
        source,
    })
}

pub struct Pipeline {
    sources: SourceRegistry,
    converter: Box<dyn MarkdownConverter>,
    splitter: TextSplitter,
    output_dir: PathBuf,
}

impl Pipeline {
    pub fn new(output_dir: impl Into<PathBuf>, chunking: ChunkingConfig) -> Result<Self, PipelineError> {
        Ok(Self {
            sources: SourceRegistry::default(),
            converter: Box::new(PlainTextConverter),
            splitter: TextSplitter::new(chunking)?,
            output_dir: output_dir.into(),
        })
    }

    pub fn with_sources(mut self, sources: SourceRegistry) -> Self {
        self.sources = sources;
        self
    }

    pub fn with_converter(mut self, converter: Box<dyn MarkdownConverter>) -> Self {
        self.converter = converter;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Process one source file and write its markdown and chunk files.
    pub fn process_file(&self, path: &Path) -> Result<ProcessedDocument, PipelineError> {
        let name = document_name(path);
        info!(path = %path.display(), "processing document");

        let elements = self
            .sources
            .extract(path)
            .map_err(|source| PipelineError::Extraction {
                path: path.to_path_buf(),
                source,
            })?;

        let meta = DocumentMeta::new(&name, path.display().to_string());
        let rendered = render_document(&meta, &elements, self.converter.as_ref());

        fs::create_dir_all(&self.output_dir).map_err(|source| PipelineError::Write {
            path: self.output_dir.clone(),
            source,
        })?;
        let markdown_path = self.output_dir.join(format!("{name}.md"));
        write_file(&markdown_path, &rendered.markdown)?;

        let chunks = self.splitter.split_text(&rendered.markdown);
        let chunk_paths = self.write_chunks(&name, &chunks)?;

        info!(
            document = %name,
            elements = elements.len(),
            chunks = chunks.len(),
            output = %markdown_path.display(),
            "document saved"
        );

        Ok(ProcessedDocument {
            name,
            source: path.to_path_buf(),
            markdown_path,
            chunk_paths,
            element_count: elements.len(),
        })
    }

    fn write_chunks(&self, base: &str, chunks: &[Chunk]) -> Result<Vec<PathBuf>, PipelineError> {
        chunks
            .iter()
            .map(|chunk| {
                let path = self.output_dir.join(chunk_file_name(base, chunk.index));
                write_file(&path, &chunk.text)?;
                Ok(path)
            })
            .collect()
    }

    /// Supported files directly inside `dir`, sorted by path.
    pub fn discover(&self, dir: &Path) -> Result<Vec<PathBuf>, PipelineError> {
        let mut files = Vec::new();
        for entry in walkdir::WalkDir::new(dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|source| PipelineError::List {
                path: dir.to_path_buf(),
                source,
            })?;
            if entry.file_type().is_file() && self.sources.supports(entry.path()) {
                files.push(entry.into_path());
            }
        }
        files.sort();
        Ok(files)
    }

    /// Process every supported file in `dir`. Failures are recorded per
    /// document and do not stop the batch.
    pub fn process_dir(&self, dir: &Path) -> Result<BatchReport, PipelineError> {
        let files = self.discover(dir)?;
        if files.is_empty() {
            warn!(dir = %dir.display(), "no supported documents found");
        }
        Ok(self.process_files(&files))
    }

    /// Process `files` in order. A file whose output name was already
    /// written earlier in the batch fails instead of overwriting it.
    pub fn process_files(&self, files: &[PathBuf]) -> BatchReport {
        let mut report = BatchReport::default();
        let mut claimed: HashMap<String, PathBuf> = HashMap::new();
        for path in files {
            let name = document_name(path);
            let result = match claimed.get(&name) {
                Some(first) => Err(PipelineError::DuplicateName {
                    path: path.clone(),
                    name,
                    first: first.clone(),
                }),
                None => self.process_file(path),
            };
            match result {
                Ok(doc) => {
                    claimed.insert(doc.name.clone(), doc.source.clone());
                    report.processed.push(doc);
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "document failed");
                    report.failed.push((path.clone(), e.to_string()));
                }
            }
        }
        report
    }
}
