use std::io;
use thiserror::Error;

/// Failures surfaced by the filesystem operations.
///
/// Each variant names the path as the caller supplied it, so the message can
/// be returned to the caller verbatim.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("Access denied: {0} is outside allowed path")]
    AccessDenied(String),
    #[error("File not found: {0}")]
    FileNotFound(String),
    #[error("Not a file: {0}")]
    NotAFile(String),
    #[error("Directory not found: {0}")]
    DirectoryNotFound(String),
    #[error("Not a directory: {0}")]
    NotADirectory(String),
    #[error("Path not found: {0}")]
    PathNotFound(String),
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("Missing required argument: {0}")]
    MissingArgument(&'static str),
    #[error("Failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl OperationError {
    pub(crate) fn io(path: &str, source: io::Error) -> Self {
        Self::Io {
            path: path.to_string(),
            source,
        }
    }
}
