//! Tree header of the report.
//!
//! The listing itself comes from a [`TreeRenderer`]: either the external `tree`
//! program ([`TreeCommand`]) or an in-process equivalent ([`BuiltinTree`]).

use crate::error::ReportError;
use crate::options::ReportOptions;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Name fragments excluded from the tree, as accepted by `tree -I`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExcludePatterns {
    tokens: Vec<String>,
}
impl ExcludePatterns {
    /// Parses a pipe-delimited pattern string. Tokens and the whole string may be single-quoted.
    pub fn parse(raw: &str) -> Self {
        let tokens = raw
            .split('|')
            .map(|token| token.trim().trim_matches('\'').trim())
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect();
        Self { tokens }
    }
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
    pub fn extend(&mut self, extra: impl IntoIterator<Item = String>) {
        for token in extra {
            if !self.tokens.contains(&token) {
                self.tokens.push(token);
            }
        }
    }
    /// The `-I` argument, without shell quoting.
    pub fn to_arg(&self) -> String {
        self.tokens.join("|")
    }
}

/// Renders a directory listing of `root` into `out`.
pub trait TreeRenderer {
    fn render(&self, root: &Path, patterns: &ExcludePatterns, out: File) -> Result<(), ReportError>;
}

/// Runs an external `tree`-compatible program with its stdout redirected into the report.
#[derive(Debug, Clone)]
pub struct TreeCommand {
    program: String,
}
impl Default for TreeCommand {
    fn default() -> Self {
        Self::new("tree")
    }
}
impl TreeCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
    fn command_line(&self, root: &Path, patterns: &ExcludePatterns) -> String {
        if patterns.is_empty() {
            format!("{} {} -a", self.program, root.display())
        } else {
            format!("{} {} -a -I '{}'", self.program, root.display(), patterns.to_arg())
        }
    }
}
impl TreeRenderer for TreeCommand {
    fn render(&self, root: &Path, patterns: &ExcludePatterns, out: File) -> Result<(), ReportError> {
        let command = self.command_line(root, patterns);
        tracing::info!(command = %command, "Running tree command");
        let mut cmd = Command::new(&self.program);
        cmd.arg(root).arg("-a");
        if !patterns.is_empty() {
            cmd.arg("-I").arg(patterns.to_arg());
        }
        let status = cmd
            .stdout(Stdio::from(out))
            .status()
            .map_err(|source| ReportError::TreeRender {
                command: command.clone(),
                source,
            })?;
        if !status.success() {
            return Err(ReportError::TreeExit { command, status });
        }
        Ok(())
    }
}

/// In-process listing in the style of `tree -a -I`.
///
/// Patterns without a `/` match entry names; patterns with one match the path
/// relative to the root.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinTree;

struct TreeMatcher {
    names: GlobSet,
    paths: GlobSet,
}
impl TreeMatcher {
    fn new(patterns: &ExcludePatterns) -> Result<Self, ReportError> {
        let mut names = GlobSetBuilder::new();
        let mut paths = GlobSetBuilder::new();
        for pattern in patterns.tokens() {
            let glob = GlobBuilder::new(pattern)
                .literal_separator(true)
                .build()
                .map_err(|e| ReportError::Pattern(format!("'{}': {}", pattern, e)))?;
            if pattern.contains('/') {
                paths.add(glob);
            } else {
                names.add(glob);
            }
        }
        let build = |set: GlobSetBuilder| {
            set.build()
                .map_err(|e| ReportError::Pattern(format!("Failed to build glob set: {}", e)))
        };
        Ok(Self {
            names: build(names)?,
            paths: build(paths)?,
        })
    }
    fn is_excluded(&self, relative: &Path) -> bool {
        let name_hit = relative
            .file_name()
            .is_some_and(|name| self.names.is_match(name));
        name_hit || self.paths.is_match(relative)
    }
}

struct Node {
    name: String,
    path: PathBuf,
    is_dir: bool,
}

#[derive(Default)]
struct Counts {
    dirs: usize,
    files: usize,
}

impl TreeRenderer for BuiltinTree {
    fn render(&self, root: &Path, patterns: &ExcludePatterns, out: File) -> Result<(), ReportError> {
        if !root.is_dir() {
            return Err(ReportError::io(
                root,
                std::io::Error::new(std::io::ErrorKind::NotFound, "root is not a directory"),
            ));
        }
        let matcher = TreeMatcher::new(patterns)?;
        let walk_root = root.to_path_buf();
        let mut builder = WalkBuilder::new(root);
        builder
            .standard_filters(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry| {
                entry.depth() == 0
                    || entry
                        .path()
                        .strip_prefix(&walk_root)
                        .map_or(true, |relative| !matcher.is_excluded(relative))
            });

        let mut children: BTreeMap<PathBuf, Vec<Node>> = BTreeMap::new();
        for result in builder.build() {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping unreadable entry in tree listing");
                    continue;
                }
            };
            if entry.depth() == 0 {
                continue;
            }
            let Some(parent) = entry.path().parent() else {
                continue;
            };
            children.entry(parent.to_path_buf()).or_default().push(Node {
                name: entry.file_name().to_string_lossy().into_owned(),
                path: entry.path().to_path_buf(),
                is_dir: entry.file_type().is_some_and(|t| t.is_dir()),
            });
        }

        let mut lines = vec![root.display().to_string()];
        let mut counts = Counts::default();
        render_level(root, &children, "", &mut lines, &mut counts);
        lines.push(String::new());
        lines.push(format!(
            "{} {}, {} {}",
            counts.dirs,
            if counts.dirs == 1 { "directory" } else { "directories" },
            counts.files,
            if counts.files == 1 { "file" } else { "files" }
        ));

        let mut writer = BufWriter::new(out);
        for line in &lines {
            writeln!(writer, "{}", line).map_err(|e| ReportError::io(root, e))?;
        }
        writer.flush().map_err(|e| ReportError::io(root, e))?;
        Ok(())
    }
}

fn render_level(
    dir: &Path,
    children: &BTreeMap<PathBuf, Vec<Node>>,
    prefix: &str,
    lines: &mut Vec<String>,
    counts: &mut Counts,
) {
    let Some(nodes) = children.get(dir) else {
        return;
    };
    for (i, node) in nodes.iter().enumerate() {
        let last = i + 1 == nodes.len();
        let connector = if last { "└── " } else { "├── " };
        lines.push(format!("{}{}{}", prefix, connector, node.name));
        if node.is_dir {
            counts.dirs += 1;
            let nested = format!("{}{}", prefix, if last { "    " } else { "│   " });
            render_level(&node.path, children, &nested, lines, counts);
        } else {
            counts.files += 1;
        }
    }
}

/// Relative paths of every directory under each partially excluded folder, the folder included.
///
/// Missing folders contribute nothing.
pub fn collect_partial_exclusions(root: &Path, folders: &BTreeSet<String>) -> Vec<String> {
    let mut tokens = Vec::new();
    for folder in folders {
        let start = root.join(folder);
        if !start.is_dir() {
            continue;
        }
        let mut builder = WalkBuilder::new(&start);
        builder
            .standard_filters(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b));
        for result in builder.build() {
            match result {
                Ok(entry) if entry.file_type().is_some_and(|t| t.is_dir()) => {
                    if let Ok(relative) = entry.path().strip_prefix(root) {
                        tokens.push(relative.to_string_lossy().into_owned());
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::warn!(error = %e, "Skipping unreadable partial exclusion entry"),
            }
        }
    }
    tokens
}

/// Writes the tree header, truncating any previous report.
///
/// Failures are logged and reported as `false`; the report may then be empty.
pub fn render_tree(options: &ReportOptions, renderer: &dyn TreeRenderer) -> bool {
    match try_render_tree(options, renderer) {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(error = %e, output = %options.output_path.display(), "An error occurred while rendering the tree");
            false
        }
    }
}

fn try_render_tree(options: &ReportOptions, renderer: &dyn TreeRenderer) -> Result<(), ReportError> {
    let mut patterns = ExcludePatterns::parse(&options.tree_exclude_patterns);
    let extra = collect_partial_exclusions(&options.root, &options.partial_exclusion_folders);
    if options.merge_partial_exclusions {
        patterns.extend(extra);
    } else if !extra.is_empty() {
        tracing::debug!(tokens = ?extra, "Partial exclusion tokens computed but not merged");
    }
    let out = File::create(&options.output_path)
        .map_err(|e| ReportError::io(&options.output_path, e))?;
    renderer.render(&options.root, &patterns, out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_quoted_pipe_list() {
        let patterns = ExcludePatterns::parse("'__pycache__|*.log|.git'");
        assert_eq!(patterns.tokens(), ["__pycache__", "*.log", ".git"]);
        assert_eq!(patterns.to_arg(), "__pycache__|*.log|.git");
    }

    #[test]
    fn parses_individually_quoted_tokens() {
        let patterns = ExcludePatterns::parse("'logs' | 'logs/a'||");
        assert_eq!(patterns.tokens(), ["logs", "logs/a"]);
    }

    #[test]
    fn extend_skips_duplicates() {
        let mut patterns = ExcludePatterns::parse("logs");
        patterns.extend(vec!["logs".to_string(), "logs/a".to_string()]);
        assert_eq!(patterns.tokens(), ["logs", "logs/a"]);
    }

    #[test]
    fn command_line_mirrors_tree_flags() {
        let cmd = TreeCommand::default();
        let line = cmd.command_line(Path::new("/repo"), &ExcludePatterns::parse("a|b"));
        assert_eq!(line, "tree /repo -a -I 'a|b'");
        let bare = cmd.command_line(Path::new("/repo"), &ExcludePatterns::default());
        assert_eq!(bare, "tree /repo -a");
    }

    #[test]
    fn matcher_uses_names_and_relative_paths() {
        let matcher = TreeMatcher::new(&ExcludePatterns::parse("*.log|logs/deep")).unwrap();
        assert!(matcher.is_excluded(Path::new("src/run.log")));
        assert!(matcher.is_excluded(Path::new("logs/deep")));
        assert!(!matcher.is_excluded(Path::new("logs")));
        assert!(!matcher.is_excluded(Path::new("other/deep")));
    }
}
