//! Command-line interface for codereport.
//!
//! Run without arguments inside a repository to regenerate its report file.
//! The process exits with status 0 even when parts of the report could not be written.

use clap::Parser;
use codereport::{BuiltinTree, ReportBuilder, TreeCommand, TreeRenderer, generate_report};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// codereport — directory tree plus selected file contents in one text file
#[derive(Parser)]
#[command(name = "codereport", version, about, long_about = None)]
struct Cli {
    /// Repository root (default current dir)
    #[arg(default_value = ".")]
    root: PathBuf,

    /// Report path; relative paths are resolved against the root
    #[arg(long)]
    output: Option<PathBuf>,

    /// External tree program
    #[arg(long, default_value = "tree")]
    tree_program: String,

    /// Render the tree in-process instead of running the external program
    #[arg(long)]
    builtin_tree: bool,

    /// Add subdirectories of partially excluded folders to the tree exclusions
    #[arg(long)]
    merge_partial_exclusions: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let root = match cli.root.canonicalize() {
        Ok(root) => root,
        Err(e) => {
            tracing::error!(root = %cli.root.display(), error = %e, "Cannot resolve repository root");
            return;
        }
    };
    tracing::info!(root = %root.display(), "Repository root");

    let mut builder =
        ReportBuilder::new(&root).merge_partial_exclusions(cli.merge_partial_exclusions);
    if let Some(output) = cli.output {
        builder = builder.output_path(root.join(output));
    }
    let options = builder.build();
    match serde_json::to_string(&options) {
        Ok(json) => tracing::debug!(options = %json, "Effective configuration"),
        Err(e) => tracing::warn!(error = %e, "Could not serialize configuration"),
    }

    let command;
    let renderer: &dyn TreeRenderer = if cli.builtin_tree {
        &BuiltinTree
    } else {
        command = TreeCommand::new(cli.tree_program);
        &command
    };
    let summary = generate_report(&options, renderer);
    for failed in &summary.contents.failures {
        tracing::warn!(file = %failed.path.display(), reason = %failed.reason, "Not included in report");
    }
}
