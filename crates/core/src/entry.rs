use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::Metadata;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

impl EntryKind {
    pub fn from_metadata(meta: &Metadata) -> Self {
        if meta.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::File => "file",
            EntryKind::Directory => "directory",
        }
    }

    /// Marker shown in front of an entry in directory listings.
    pub fn marker(&self) -> &'static str {
        match self {
            EntryKind::File => "📄",
            EntryKind::Directory => "📁",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One immediate child of a listed directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub name: String,
    pub kind: EntryKind,
    /// Byte size, present for files only.
    pub size: Option<u64>,
    pub path: PathBuf,
}

/// Metadata snapshot produced by `get_file_info`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileInfo {
    pub path: PathBuf,
    pub name: String,
    pub kind: EntryKind,
    pub size_bytes: u64,
    /// Seconds since the Unix epoch, fractional part preserved.
    pub modified: f64,
    /// Raw mode rendered in octal with a `0o` prefix.
    pub permissions: String,
}
