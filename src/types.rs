use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Outcome of the per-file decision in a processed directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileDecision {
    /// Nothing is written for the file.
    Skip,
    /// Delimiter followed by the file's text.
    IncludeFull,
    /// Delimiter followed by the redaction placeholder.
    IncludeRedacted,
}

/// A file whose block could not be written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Counts gathered while appending file contents.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AppendSummary {
    pub included: usize,
    pub redacted: usize,
    pub skipped: usize,
    /// Directories left out by exclusion or partial exclusion.
    pub pruned_dirs: usize,
    pub failures: Vec<FailedFile>,
}

/// Result of a complete run.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ReportSummary {
    /// `false` when the tree header could not be produced.
    pub tree_rendered: bool,
    pub contents: AppendSummary,
}
