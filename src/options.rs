use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// File name of the report, created inside the scanned root unless overridden.
pub const DEFAULT_REPORT_FILE_NAME: &str = "custom_tree_and_files_corrected.txt";

/// Name fragments handed to the tree renderer, in `tree -I` syntax.
pub const DEFAULT_TREE_PATTERNS: &str = "'__pycache__|archive|dist|*.log|.next|.git|logs|objects|.terraform|.cache|.tfstate|node_modules'";

const DEFAULT_EXCLUSION_FOLDERS: &[&str] = &[
    "__pycache__",
    "node_modules",
    "public",
    ".venv",
    "objects",
    ".vscode",
    ".next",
    "repo_utils_scripts",
    ".terraform",
    "archive",
    "tree_code_report.py",
    "notebooks",
    "investortoolkit",
    "fetch_repo_stats.py",
    "text_to_video copy.py",
    "text_to_video_old.py",
    "test.py",
    "mlruns",
    "experiments_storage",
    "data_prometheus",
    "service-account.yaml",
    "src_process_text",
];

const DEFAULT_PARTIAL_EXCLUSION_FOLDERS: &[&str] = &["logs", "src_process_text"];

const DEFAULT_PRINT_EXCLUSION_LIST: &[&str] = &[
    "tree_code_report.py",
    ".git",
    "terraform.tfstate",
    "fetch_repo_stats.py",
    "service-account.yaml",
    "src_process_text",
];

const DEFAULT_REDACTION_LIST: &[&str] = &[
    "model_validation.py",
    "tree_code_report.py",
    "button.tsx",
    "code_report.py",
    "use-toast.ts",
    "test.py",
    ".terraform",
    "tooltip.tsx",
    "./src/code_report.py",
    "fetch_repo_stats.py",
    "card.tsx",
    "toast.tsx",
    "toaster.tsx",
    "BillingForm.tsx",
    "terraform.tfstate",
    "MaxWidthWrapper.tsx",
    "stripe.ts",
    "Icons.tsx",
    "types.d.ts",
    "service-account.yaml",
    "theme.ts",
    "contentlayer.config.js",
    "Books.tsx",
    "src_process_text",
];

const DEFAULT_QUALIFYING_SUFFIXES: &[&str] = &[
    "Dockerfile",
    ".toml",
    ".env.sample",
    ".yaml",
    ".yml",
    ".py",
    ".mako",
    ".ini",
    ".tfvars.example",
];

fn to_set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Immutable configuration shared by the tree lister and the content appender.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportOptions {
    pub root: PathBuf,
    pub output_path: PathBuf,
    /// Substrings; any directory whose path contains one is pruned.
    pub exclusion_folders: BTreeSet<String>,
    /// Top-level folders, relative to `root`, whose whole subtree is pruned.
    pub partial_exclusion_folders: BTreeSet<String>,
    /// File names that never show up in the report.
    pub print_exclusion_list: BTreeSet<String>,
    /// File names reported by path only, with a placeholder body.
    pub redaction_list: BTreeSet<String>,
    pub qualifying_suffixes: BTreeSet<String>,
    pub tree_exclude_patterns: String,
    /// Whether subdirectories of partially excluded folders are added to the tree patterns.
    pub merge_partial_exclusions: bool,
}
impl Default for ReportOptions {
    fn default() -> Self {
        Self::for_root(".")
    }
}
impl ReportOptions {
    fn for_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            output_path: root.join(DEFAULT_REPORT_FILE_NAME),
            root,
            exclusion_folders: to_set(DEFAULT_EXCLUSION_FOLDERS),
            partial_exclusion_folders: to_set(DEFAULT_PARTIAL_EXCLUSION_FOLDERS),
            print_exclusion_list: to_set(DEFAULT_PRINT_EXCLUSION_LIST),
            redaction_list: to_set(DEFAULT_REDACTION_LIST),
            qualifying_suffixes: to_set(DEFAULT_QUALIFYING_SUFFIXES),
            tree_exclude_patterns: DEFAULT_TREE_PATTERNS.to_string(),
            merge_partial_exclusions: false,
        }
    }
    pub fn partial_exclusion_roots(&self) -> Vec<PathBuf> {
        self.partial_exclusion_folders
            .iter()
            .map(|folder| self.root.join(folder))
            .collect()
    }
    pub(crate) fn is_report_file(&self, path: &Path) -> bool {
        path == self.output_path
    }
}
#[derive(Debug, Default)]
pub struct ReportBuilder {
    options: ReportOptions,
}
impl ReportBuilder {
    /// Starts from the built-in lists, writing the report inside `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            options: ReportOptions::for_root(root),
        }
    }
    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.output_path = path.into();
        self
    }
    pub fn exclusion_folders<I, S>(mut self, folders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.exclusion_folders = folders.into_iter().map(Into::into).collect();
        self
    }
    pub fn partial_exclusion_folders<I, S>(mut self, folders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.partial_exclusion_folders = folders.into_iter().map(Into::into).collect();
        self
    }
    pub fn print_exclusion_list<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.print_exclusion_list = names.into_iter().map(Into::into).collect();
        self
    }
    pub fn redaction_list<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.redaction_list = names.into_iter().map(Into::into).collect();
        self
    }
    pub fn qualifying_suffixes<I, S>(mut self, suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.qualifying_suffixes = suffixes.into_iter().map(Into::into).collect();
        self
    }
    pub fn tree_exclude_patterns(mut self, patterns: impl Into<String>) -> Self {
        self.options.tree_exclude_patterns = patterns.into();
        self
    }
    pub fn merge_partial_exclusions(mut self, yes: bool) -> Self {
        self.options.merge_partial_exclusions = yes;
        self
    }
    pub fn build(self) -> ReportOptions {
        self.options
    }
}
