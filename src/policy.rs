//! Inclusion, redaction and pruning rules applied during the content walk.

use crate::options::ReportOptions;
use crate::types::FileDecision;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Returns the first needle that occurs as a substring of `path`.
pub fn path_contains_any<'a>(path: &Path, needles: &'a BTreeSet<String>) -> Option<&'a str> {
    let haystack = path.to_string_lossy();
    needles
        .iter()
        .map(String::as_str)
        .find(|needle| haystack.contains(needle))
}

/// Whether `name` ends with one of `suffixes`.
pub fn name_ends_with_any(name: &str, suffixes: &BTreeSet<String>) -> bool {
    suffixes.iter().any(|suffix| name.ends_with(suffix.as_str()))
}

/// Why a directory was left out of the content walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PruneReason {
    Excluded(String),
    PartiallyExcluded(PathBuf),
}

#[derive(Debug, Clone)]
pub struct ContentPolicy {
    exclusion_folders: BTreeSet<String>,
    partial_roots: Vec<PathBuf>,
    print_exclusion_list: BTreeSet<String>,
    redaction_list: BTreeSet<String>,
    qualifying_suffixes: BTreeSet<String>,
}
impl ContentPolicy {
    pub fn new(options: &ReportOptions) -> Self {
        Self {
            exclusion_folders: options.exclusion_folders.clone(),
            partial_roots: options.partial_exclusion_roots(),
            print_exclusion_list: options.print_exclusion_list.clone(),
            redaction_list: options.redaction_list.clone(),
            qualifying_suffixes: options.qualifying_suffixes.clone(),
        }
    }

    /// Substring exclusion wins over partial exclusion; `None` means descend.
    pub fn prune_reason(&self, dir: &Path) -> Option<PruneReason> {
        if let Some(hit) = path_contains_any(dir, &self.exclusion_folders) {
            return Some(PruneReason::Excluded(hit.to_string()));
        }
        self.partial_roots
            .iter()
            .find(|partial| dir.starts_with(partial))
            .map(|partial| PruneReason::PartiallyExcluded(partial.clone()))
    }

    pub fn decide(&self, file_name: &str) -> FileDecision {
        if self.print_exclusion_list.contains(file_name) {
            return FileDecision::Skip;
        }
        let redacted = self.redaction_list.contains(file_name);
        if !redacted && name_ends_with_any(file_name, &self.qualifying_suffixes) {
            FileDecision::IncludeFull
        } else if redacted {
            FileDecision::IncludeRedacted
        } else {
            FileDecision::Skip
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ReportBuilder;

    fn policy() -> ContentPolicy {
        let options = ReportBuilder::new("/repo")
            .exclusion_folders(["node_modules", ".venv"])
            .partial_exclusion_folders(["logs"])
            .print_exclusion_list(["fetch_repo_stats.py"])
            .redaction_list(["button.tsx", "fetch_repo_stats.py", "secret.py"])
            .qualifying_suffixes([".py", "Dockerfile"])
            .build();
        ContentPolicy::new(&options)
    }

    #[test]
    fn substring_match_is_not_segment_match() {
        let set: BTreeSet<String> = ["venv".to_string()].into();
        assert_eq!(path_contains_any(Path::new("/repo/.venv/lib"), &set), Some("venv"));
        assert_eq!(path_contains_any(Path::new("/repo/src"), &set), None);
    }

    #[test]
    fn suffix_match_covers_bare_names() {
        let set: BTreeSet<String> = ["Dockerfile".to_string()].into();
        assert!(name_ends_with_any("Dockerfile", &set));
        assert!(name_ends_with_any("api.Dockerfile", &set));
        assert!(!name_ends_with_any("Dockerfile.bak", &set));
    }

    #[test]
    fn print_exclusion_beats_redaction() {
        assert_eq!(policy().decide("fetch_repo_stats.py"), FileDecision::Skip);
    }

    #[test]
    fn redaction_ignores_extension() {
        let policy = policy();
        assert_eq!(policy.decide("button.tsx"), FileDecision::IncludeRedacted);
        assert_eq!(policy.decide("secret.py"), FileDecision::IncludeRedacted);
    }

    #[test]
    fn qualifying_and_unlisted() {
        let policy = policy();
        assert_eq!(policy.decide("a.py"), FileDecision::IncludeFull);
        assert_eq!(policy.decide("notes.md"), FileDecision::Skip);
    }

    #[test]
    fn pruning_rules() {
        let policy = policy();
        assert_eq!(
            policy.prune_reason(Path::new("/repo/node_modules/pkg")),
            Some(PruneReason::Excluded("node_modules".into()))
        );
        assert_eq!(
            policy.prune_reason(Path::new("/repo/logs/2024")),
            Some(PruneReason::PartiallyExcluded("/repo/logs".into()))
        );
        assert_eq!(policy.prune_reason(Path::new("/repo/logs_old")), None);
        assert_eq!(policy.prune_reason(Path::new("/repo/src/logs")), None);
        assert_eq!(policy.prune_reason(Path::new("/repo")), None);
    }
}
