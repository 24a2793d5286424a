use std::path::PathBuf;

use clap::Parser;
use paperdown_core::Config;

/// Convert parsed document elements into annotated markdown and
/// embedding-ready chunks.
///
/// Every supported file (`.pdf`, element `.json`) in the input directory is
/// processed independently; one failing document does not stop the batch.
#[derive(Parser, Debug)]
#[command(name = "paperdown", version, about)]
pub struct CliArgs {
    /// Directory containing source documents
    #[arg(long, short)]
    pub input: Option<PathBuf>,

    /// Directory for markdown and chunk files
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Process a single file instead of the input directory
    #[arg(long, conflicts_with = "input")]
    pub file: Option<PathBuf>,

    /// Target chunk size in characters
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Characters shared between consecutive chunks
    #[arg(long)]
    pub chunk_overlap: Option<usize>,
}

impl CliArgs {
    /// Apply command-line overrides on top of the environment config.
    pub fn apply(&self, config: &mut Config) {
        if let Some(input) = &self.input {
            config.paths.input_dir = input.clone();
        }
        if let Some(output) = &self.output {
            config.paths.output_dir = output.clone();
        }
        if let Some(size) = self.chunk_size {
            config.chunking.target_chunk_size = size;
        }
        if let Some(overlap) = self.chunk_overlap {
            config.chunking.chunk_overlap = overlap;
        }
    }
}
