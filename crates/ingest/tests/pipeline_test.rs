//! End-to-end tests: element files in a temp directory → markdown + chunk files.

use std::fs;
use std::path::Path;

use paperdown_core::{ChunkingConfig, Element, ElementCategory};
use paperdown_ingest::document::{ElementSource, SourceRegistry};
use paperdown_ingest::{ExtractionError, MarkdownConverter, Pipeline, PipelineError};

fn write_elements(dir: &Path, name: &str, elements: &[Element]) {
    let json = serde_json::to_string(elements).unwrap();
    fs::write(dir.join(name), json).unwrap();
}

fn scenario_elements() -> Vec<Element> {
    vec![
        Element::new(ElementCategory::Title, "Intro"),
        Element::new(ElementCategory::Text, "This is page 3"),
        Element::new(ElementCategory::Table, "A B\n1 2\n3 4"),
    ]
}

/// Fails every extraction, standing in for a broken upstream parser.
struct FailingSource;

impl ElementSource for FailingSource {
    fn extract(&self, _path: &Path) -> Result<Vec<Element>, ExtractionError> {
        Err(ExtractionError::PdfError("corrupt xref table".to_string()))
    }
}

/// Yields a single fixed element for every file.
struct StaticSource(&'static str);

impl ElementSource for StaticSource {
    fn extract(&self, _path: &Path) -> Result<Vec<Element>, ExtractionError> {
        Ok(vec![Element::new(ElementCategory::Text, self.0)])
    }
}

struct UpperConverter;

impl MarkdownConverter for UpperConverter {
    fn to_markdown(&self, text: &str) -> String {
        text.to_uppercase()
    }
}

#[test]
fn processes_element_file_into_markdown_and_chunks() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_elements(input.path(), "paper.json", &scenario_elements());

    let pipeline = Pipeline::new(output.path(), ChunkingConfig::default()).unwrap();
    let report = pipeline.process_dir(input.path()).unwrap();

    assert!(report.is_success());
    assert_eq!(report.processed.len(), 1);
    let doc = &report.processed[0];
    assert_eq!(doc.name, "paper");
    assert_eq!(doc.element_count, 3);

    let md = fs::read_to_string(output.path().join("paper.md")).unwrap();
    assert!(md.starts_with("---\ntitle: \"paper\"\nsource_file: \""));
    assert!(md.contains("processed_date: \""));
    assert!(md.contains("## Title\n\nIntro\n\n"));
    assert!(!md.contains("## Text"));
    assert!(md.contains("## Table\n\n| A | B |\n| --- | --- |\n| 1 | 2 |\n| 3 | 4 |\n\n"));

    // Short document: exactly one chunk, identical to the markdown.
    assert_eq!(doc.chunk_paths, vec![output.path().join("paper_chunk1.md")]);
    let chunk = fs::read_to_string(&doc.chunk_paths[0]).unwrap();
    assert_eq!(chunk, md);
}

#[test]
fn long_document_chunks_round_trip() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let elements: Vec<Element> = (0..40)
        .map(|i| {
            Element::new(
                ElementCategory::NarrativeText,
                format!("Paragraph {i} talks about results. It has two sentences!"),
            )
        })
        .collect();
    write_elements(input.path(), "long.json", &elements);

    let config = ChunkingConfig {
        target_chunk_size: 300,
        chunk_overlap: 50,
        ..ChunkingConfig::default()
    };
    let pipeline = Pipeline::new(output.path(), config).unwrap();
    let report = pipeline.process_dir(input.path()).unwrap();
    let doc = &report.processed[0];
    assert!(doc.chunk_paths.len() > 1);

    let md = fs::read_to_string(&doc.markdown_path).unwrap();
    let mut rebuilt = String::new();
    for (i, path) in doc.chunk_paths.iter().enumerate() {
        assert_eq!(path, &output.path().join(format!("long_chunk{}.md", i + 1)));
        let text = fs::read_to_string(path).unwrap();
        assert!(text.chars().count() <= 300);
        if i == 0 {
            rebuilt.push_str(&text);
        } else {
            rebuilt.extend(text.chars().skip(50));
        }
    }
    assert_eq!(rebuilt, md);
}

#[test]
fn one_failing_document_does_not_abort_batch() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_elements(input.path(), "a_good.json", &scenario_elements());
    fs::write(input.path().join("b_broken.json"), "{ not json").unwrap();
    write_elements(input.path(), "c_good.json", &scenario_elements());
    fs::write(input.path().join("notes.txt"), "ignored").unwrap();

    let pipeline = Pipeline::new(output.path(), ChunkingConfig::default()).unwrap();
    let report = pipeline.process_dir(input.path()).unwrap();

    let names: Vec<&str> = report.processed.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["a_good", "c_good"]);
    assert_eq!(report.failed.len(), 1);
    assert!(report.failed[0].0.ends_with("b_broken.json"));
    assert!(!report.is_success());
    assert!(!output.path().join("b_broken.md").exists());
}

#[test]
fn same_stem_in_two_formats_does_not_overwrite_output() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_elements(
        input.path(),
        "paper.json",
        &[Element::new(ElementCategory::Text, "from the element file")],
    );
    fs::write(input.path().join("paper.pdf"), b"%PDF-1.4").unwrap();

    let mut sources = SourceRegistry::default();
    sources.register("pdf", Box::new(StaticSource("from the pdf")));
    let config = ChunkingConfig {
        target_chunk_size: 60,
        chunk_overlap: 10,
        ..ChunkingConfig::default()
    };
    let pipeline = Pipeline::new(output.path(), config)
        .unwrap()
        .with_sources(sources);
    let report = pipeline.process_dir(input.path()).unwrap();

    assert_eq!(report.processed.len(), 1);
    assert!(report.processed[0].source.ends_with("paper.json"));
    assert_eq!(report.failed.len(), 1);
    assert!(report.failed[0].0.ends_with("paper.pdf"));
    assert!(report.failed[0].1.contains("already taken"));

    let md = fs::read_to_string(output.path().join("paper.md")).unwrap();
    assert!(md.contains("from the element file"));
    assert!(!md.contains("from the pdf"));
    let chunk_files = fs::read_dir(output.path())
        .unwrap()
        .filter(|e| {
            let name = e.as_ref().unwrap().file_name();
            name.to_string_lossy().starts_with("paper_chunk")
        })
        .count();
    assert_eq!(chunk_files, report.processed[0].chunk_paths.len());
}

#[test]
fn upstream_failure_propagates_unmodified() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let path = input.path().join("scan.pdf");
    fs::write(&path, b"%PDF-1.4").unwrap();

    let mut sources = SourceRegistry::empty();
    sources.register("pdf", Box::new(FailingSource));
    let pipeline = Pipeline::new(output.path(), ChunkingConfig::default())
        .unwrap()
        .with_sources(sources);

    let err = pipeline.process_file(&path).unwrap_err();
    match err {
        PipelineError::Extraction { source, .. } => {
            assert_eq!(source.to_string(), "PDF extraction failed: corrupt xref table");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn custom_converter_is_used_for_text_only() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_elements(
        input.path(),
        "doc.json",
        &[
            Element::new(ElementCategory::Text, "lower text"),
            Element::new(ElementCategory::Table, "a b\nc d"),
        ],
    );

    let pipeline = Pipeline::new(output.path(), ChunkingConfig::default())
        .unwrap()
        .with_converter(Box::new(UpperConverter));
    let doc = pipeline.process_file(&input.path().join("doc.json")).unwrap();
    let md = fs::read_to_string(doc.markdown_path).unwrap();
    assert!(md.contains("## Text\n\nLOWER TEXT\n\n"));
    assert!(md.contains("| a | b |\n| --- | --- |\n| c | d |"));
}

#[test]
fn empty_input_directory_yields_empty_report() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let pipeline = Pipeline::new(output.path(), ChunkingConfig::default()).unwrap();
    let report = pipeline.process_dir(input.path()).unwrap();
    assert!(report.processed.is_empty());
    assert!(report.is_success());
}

#[test]
fn missing_input_directory_is_an_error() {
    let output = tempfile::tempdir().unwrap();
    let pipeline = Pipeline::new(output.path(), ChunkingConfig::default()).unwrap();
    let err = pipeline
        .process_dir(Path::new("/definitely/not/here"))
        .unwrap_err();
    assert!(matches!(err, PipelineError::List { .. }));
}
