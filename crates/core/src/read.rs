use std::fs;

use crate::error::OperationError;
use crate::guard::PathGuard;

/// Number of leading bytes shown when a file is not valid UTF-8.
pub const BINARY_PREVIEW_BYTES: usize = 1024;

/// Body of a successful read: the decoded text or a hex preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    Text(String),
    Binary { hex_preview: String },
}

impl FileContent {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        match String::from_utf8(bytes) {
            Ok(text) => FileContent::Text(text),
            Err(e) => {
                let bytes = e.into_bytes();
                let end = bytes.len().min(BINARY_PREVIEW_BYTES);
                FileContent::Binary {
                    hex_preview: hex::encode(&bytes[..end]),
                }
            }
        }
    }

    pub fn render(&self) -> String {
        match self {
            FileContent::Text(text) => text.clone(),
            FileContent::Binary { hex_preview } => format!(
                "[Binary file - first {} bytes as hex]\n{}",
                BINARY_PREVIEW_BYTES, hex_preview
            ),
        }
    }
}

pub fn read_file_content(guard: &PathGuard, raw: &str) -> Result<FileContent, OperationError> {
    let path = guard.resolve(raw)?;

    if !path.exists() {
        return Err(OperationError::FileNotFound(raw.to_string()));
    }
    if !path.is_file() {
        return Err(OperationError::NotAFile(raw.to_string()));
    }

    let bytes = fs::read(&path).map_err(|e| OperationError::io(raw, e))?;
    Ok(FileContent::from_bytes(bytes))
}

/// Read a file under the guard's root and render it as a text block.
pub fn read_file(guard: &PathGuard, raw: &str) -> Result<String, OperationError> {
    let content = read_file_content(guard, raw)?;
    Ok(format!("Contents of {}:\n\n{}", raw, content.render()))
}
