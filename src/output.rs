//! Report block formatting and append-only writes.
//!
//! Every block opens the report in append mode and closes it again, so no handle
//! outlives the file it describes.

use crate::ReportError;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Body written in place of a redacted file's content.
pub const REDACTION_PLACEHOLDER: &str = "Code present but not reported for space reasons";

/// Header line that precedes every reported file, padded by blank lines.
pub fn content_delimiter(path: &Path) -> String {
    format!("\n\n=== Content of {} ===\n\n", path.display())
}

/// Reads `source` completely, then appends its delimiter and text to `report`.
///
/// Nothing is written when the read fails.
pub fn append_file(report: &Path, source: &Path) -> Result<(), ReportError> {
    let content = fs::read_to_string(source).map_err(|e| ReportError::append(source, e))?;
    append_block(report, source, &content)
}

/// Appends the delimiter for `source` followed by the redaction placeholder.
pub fn append_redacted(report: &Path, source: &Path) -> Result<(), ReportError> {
    append_block(report, source, REDACTION_PLACEHOLDER)
}

fn append_block(report: &Path, source: &Path, body: &str) -> Result<(), ReportError> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(report)
        .map_err(|e| ReportError::append(source, e))?;
    file.write_all(content_delimiter(source).as_bytes())
        .and_then(|_| file.write_all(body.as_bytes()))
        .map_err(|e| ReportError::append(source, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn delimiter_is_blank_line_padded() {
        assert_eq!(
            content_delimiter(Path::new("/r/a.py")),
            "\n\n=== Content of /r/a.py ===\n\n"
        );
    }

    #[test]
    fn blocks_accumulate() {
        let dir = tempdir().unwrap();
        let report = dir.path().join("report.txt");
        let source = dir.path().join("a.py");
        fs::write(&report, "HEADER").unwrap();
        fs::write(&source, "print(1)\n").unwrap();
        append_file(&report, &source).unwrap();
        append_redacted(&report, &source).unwrap();
        let expected = format!(
            "HEADER{d}print(1)\n{d}{p}",
            d = content_delimiter(&source),
            p = REDACTION_PLACEHOLDER
        );
        assert_eq!(fs::read_to_string(&report).unwrap(), expected);
    }

    #[test]
    fn unreadable_source_writes_nothing() {
        let dir = tempdir().unwrap();
        let report = dir.path().join("report.txt");
        fs::write(&report, "HEADER").unwrap();
        let missing = dir.path().join("missing.py");
        let err = append_file(&report, &missing).unwrap_err();
        assert!(matches!(err, ReportError::FileAppend { .. }));
        assert_eq!(fs::read_to_string(&report).unwrap(), "HEADER");
    }
}
