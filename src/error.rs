use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Tree command `{command}` could not run: {source}")]
    TreeRender {
        command: String,
        source: std::io::Error,
    },
    #[error("Tree command `{command}` exited with {status}")]
    TreeExit { command: String, status: ExitStatus },
    #[error("Could not append {path} to the report: {source}")]
    FileAppend {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Walk error: {0}")]
    Walk(String),
    #[error("Invalid exclusion pattern: {0}")]
    Pattern(String),
}
impl ReportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReportError::Io {
            path: path.into(),
            source,
        }
    }
    pub(crate) fn append(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReportError::FileAppend {
            path: path.into(),
            source,
        }
    }
}
