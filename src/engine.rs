use crate::error::ReportError;
use crate::options::ReportOptions;
use crate::output::{append_file, append_redacted};
use crate::policy::ContentPolicy;
use crate::tree::{TreeRenderer, render_tree};
use crate::types::{AppendSummary, FailedFile, FileDecision, ReportSummary};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
struct Walker {
    inner: ignore::Walk,
    pruned: Arc<AtomicUsize>,
}
impl Walker {
    /// Depth-first walk that lists a directory's files before its subdirectories
    /// and never descends into a pruned directory.
    fn new(root: &Path, policy: Arc<ContentPolicy>) -> Self {
        let pruned = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&pruned);
        let mut builder = WalkBuilder::new(root);
        builder
            .standard_filters(false)
            .follow_links(false)
            .sort_by_file_path(|a, b| {
                (a.is_dir(), a.file_name()).cmp(&(b.is_dir(), b.file_name()))
            })
            .filter_entry(move |entry| {
                if entry.depth() == 0 || !entry.file_type().is_some_and(|t| t.is_dir()) {
                    return true;
                }
                match policy.prune_reason(entry.path()) {
                    Some(reason) => {
                        tracing::debug!(dir = %entry.path().display(), ?reason, "Pruned directory");
                        counter.fetch_add(1, Ordering::Relaxed);
                        false
                    }
                    None => true,
                }
            });
        Self {
            inner: builder.build(),
            pruned,
        }
    }
    fn into_files(self) -> impl Iterator<Item = Result<PathBuf, ReportError>> {
        self.inner.filter_map(|result| match result {
            Ok(entry) if entry.depth() > 0 && entry.path().is_file() => {
                Some(Ok(entry.into_path()))
            }
            Ok(_) => None,
            Err(e) => Some(Err(ReportError::Walk(e.to_string()))),
        })
    }
}

/// Walks `options.root` and appends one block per included or redacted file.
///
/// Per-file failures are logged and recorded in the summary; the walk always runs to completion.
pub fn append_contents(options: &ReportOptions) -> AppendSummary {
    let policy = Arc::new(ContentPolicy::new(options));
    let mut summary = AppendSummary::default();
    if let Some(reason) = policy.prune_reason(&options.root) {
        tracing::warn!(root = %options.root.display(), ?reason, "Repository root is excluded, no contents appended");
        summary.pruned_dirs = 1;
        return summary;
    }

    let walker = Walker::new(&options.root, Arc::clone(&policy));
    let pruned = Arc::clone(&walker.pruned);
    for result in walker.into_files() {
        let path = match result {
            Ok(path) => path,
            Err(e) => {
                tracing::error!(error = %e, "Skipping unreadable directory entry");
                continue;
            }
        };
        if options.is_report_file(&path) {
            continue;
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let decision = policy.decide(&name);
        let written = match decision {
            FileDecision::Skip => {
                tracing::trace!(file = %path.display(), "Skipped");
                summary.skipped += 1;
                continue;
            }
            FileDecision::IncludeFull => append_file(&options.output_path, &path),
            FileDecision::IncludeRedacted => append_redacted(&options.output_path, &path),
        };
        match written {
            Ok(()) if decision == FileDecision::IncludeFull => summary.included += 1,
            Ok(()) => summary.redacted += 1,
            Err(e) => {
                tracing::error!(file = %path.display(), error = %e, "An error occurred while reading/writing file");
                summary.failures.push(FailedFile {
                    path,
                    reason: e.to_string(),
                });
            }
        }
    }
    summary.pruned_dirs = pruned.load(Ordering::Relaxed);
    summary
}

/// Writes the tree header and then the file blocks. Never fails; see [`ReportSummary`].
pub fn generate_report(options: &ReportOptions, renderer: &dyn TreeRenderer) -> ReportSummary {
    tracing::debug!(root = %options.root.display(), output = %options.output_path.display(), "Generating report");
    let tree_rendered = render_tree(options, renderer);
    let contents = append_contents(options);
    tracing::info!(
        tree_rendered,
        included = contents.included,
        redacted = contents.redacted,
        skipped = contents.skipped,
        pruned_dirs = contents.pruned_dirs,
        failures = contents.failures.len(),
        "Report written to {}",
        options.output_path.display()
    );
    ReportSummary {
        tree_rendered,
        contents,
    }
}
