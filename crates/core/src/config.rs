use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::PaperdownError;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_usize(profile: &str, key: &str, default: usize) -> usize {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub paths: PathsConfig,
    pub chunking: ChunkingConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `PAPERDOWN_PROFILE` env var. When set (e.g. `PROD`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("PAPERDOWN_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            paths: PathsConfig::from_env_profiled(p),
            chunking: ChunkingConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!(
            "  paths:       input={}, output={}",
            self.paths.input_dir.display(),
            self.paths.output_dir.display()
        );
        tracing::info!(
            "  chunking:    size={}, overlap={}, separators={:?}",
            self.chunking.target_chunk_size,
            self.chunking.chunk_overlap,
            self.chunking.separator_priority
        );
    }
}

// ── Paths ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl PathsConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            input_dir: PathBuf::from(profiled_env_or(p, "INPUT_DIR", "input_pdfs")),
            output_dir: PathBuf::from(profiled_env_or(p, "OUTPUT_DIR", "output_md")),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("input_pdfs"),
            output_dir: PathBuf::from("output_md"),
        }
    }
}

// ── Chunking ──────────────────────────────────────────────────

pub const DEFAULT_CHUNK_SIZE: usize = 1000;
pub const DEFAULT_CHUNK_OVERLAP: usize = 150;

/// Separators tried from coarsest to finest: paragraph, line, sentence ends.
pub fn default_separators() -> Vec<String> {
    ["\n\n", "\n", ".", "!", "?"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Sizes are measured in characters of the rendered text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkingConfig {
    pub target_chunk_size: usize,
    pub chunk_overlap: usize,
    pub separator_priority: Vec<String>,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            target_chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            separator_priority: default_separators(),
        }
    }
}

impl ChunkingConfig {
    fn from_env_profiled(p: &str) -> Self {
        let separator_priority = profiled_env_opt(p, "CHUNK_SEPARATORS")
            .map(|raw| parse_separators(&raw))
            .unwrap_or_else(default_separators);
        Self {
            target_chunk_size: profiled_env_usize(p, "CHUNK_SIZE", DEFAULT_CHUNK_SIZE),
            chunk_overlap: profiled_env_usize(p, "CHUNK_OVERLAP", DEFAULT_CHUNK_OVERLAP),
            separator_priority,
        }
    }

    pub fn validate(&self) -> Result<(), PaperdownError> {
        if self.target_chunk_size == 0 {
            return Err(PaperdownError::InvalidConfig(
                "target_chunk_size must be greater than zero".to_string(),
            ));
        }
        if self.chunk_overlap >= self.target_chunk_size {
            return Err(PaperdownError::InvalidConfig(format!(
                "chunk_overlap ({}) must be smaller than target_chunk_size ({})",
                self.chunk_overlap, self.target_chunk_size
            )));
        }
        if self.separator_priority.iter().any(String::is_empty) {
            return Err(PaperdownError::InvalidConfig(
                "separator_priority contains an empty separator".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parse a comma-separated separator list. Supports `\n`, `\t`, `\\` and `\,`
/// escapes so that newlines and literal commas can be expressed in a single
/// env value.
pub fn parse_separators(raw: &str) -> Vec<String> {
    let mut separators = Vec::new();
    let mut current = String::new();
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('n') => current.push('\n'),
                Some('t') => current.push('\t'),
                Some(',') => current.push(','),
                Some('\\') => current.push('\\'),
                Some(other) => {
                    current.push('\\');
                    current.push(other);
                }
                None => current.push('\\'),
            },
            ',' => separators.push(std::mem::take(&mut current)),
            other => current.push(other),
        }
    }
    separators.push(current);
    separators
}
