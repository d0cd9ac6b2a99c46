//! # Codereport
//!
//! `codereport` writes a single text report for a repository: a directory tree listing
//! followed by the contents of selected files. Folders can be excluded by substring or as
//! whole top-level subtrees, some file names can be hidden entirely, and others can be
//! redacted so that only their path is reported.
//!
//! The tree header comes from a [`TreeRenderer`]: the external `tree` program
//! ([`TreeCommand`]) or the in-process [`BuiltinTree`]. Every failure is logged through
//! `tracing` and skipped; a run never aborts.
//!
//! # Example
//!
//! ```no_run
//! use codereport::{ReportBuilder, TreeCommand, generate_report};
//!
//! let options = ReportBuilder::new("/path/to/repo")
//!     .exclusion_folders(["node_modules", ".venv"])
//!     .partial_exclusion_folders(["logs"])
//!     .redaction_list(["button.tsx"])
//!     .build();
//!
//! let summary = generate_report(&options, &TreeCommand::default());
//! println!("{} files included", summary.contents.included);
//! ```

mod engine;
mod error;
mod options;
pub mod output;
pub mod policy;
mod tree;
mod types;

pub use engine::{append_contents, generate_report};
pub use error::ReportError;
pub use options::{DEFAULT_REPORT_FILE_NAME, DEFAULT_TREE_PATTERNS, ReportBuilder, ReportOptions};
pub use tree::{
    BuiltinTree, ExcludePatterns, TreeCommand, TreeRenderer, collect_partial_exclusions,
    render_tree,
};
pub use types::{AppendSummary, FailedFile, FileDecision, ReportSummary};
