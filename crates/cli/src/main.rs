mod cli;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{error, info};

use paperdown_core::config::load_dotenv;
use paperdown_core::Config;
use paperdown_ingest::{BatchReport, Pipeline};

use crate::cli::CliArgs;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = CliArgs::parse();

    load_dotenv();
    let mut config = Config::from_env();
    args.apply(&mut config);
    config.log_summary();

    let pipeline = Pipeline::new(config.paths.output_dir.clone(), config.chunking.clone())
        .context("invalid chunking configuration")?;

    let report = match &args.file {
        Some(file) => pipeline.process_files(std::slice::from_ref(file)),
        None => pipeline
            .process_dir(&config.paths.input_dir)
            .with_context(|| {
                format!("failed to scan {}", config.paths.input_dir.display())
            })?,
    };

    print_summary(&report, &pipeline);

    if !report.is_success() {
        bail!("{} document(s) failed", report.failed.len());
    }
    Ok(())
}

fn print_summary(report: &BatchReport, pipeline: &Pipeline) {
    for doc in &report.processed {
        println!(
            "saved {} ({} chunks)",
            doc.markdown_path.display(),
            doc.chunk_paths.len()
        );
    }
    for (path, reason) in &report.failed {
        error!(path = %path.display(), "{reason}");
    }
    info!(
        processed = report.processed.len(),
        failed = report.failed.len(),
        chunks = report.total_chunks(),
        output = %pipeline.output_dir().display(),
        "conversion finished"
    );
}
