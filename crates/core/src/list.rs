use std::fs;
use std::io;
use std::path::Path;

use crate::entry::{DirectoryEntry, EntryKind};
use crate::error::OperationError;
use crate::guard::PathGuard;

/// Immediate children of `raw` (or the root when `None`), sorted by name.
pub fn scan_directory(
    guard: &PathGuard,
    raw: Option<&str>,
) -> Result<Vec<DirectoryEntry>, OperationError> {
    let root = guard.root().display().to_string();
    let raw = raw.unwrap_or(root.as_str());

    let path = guard.resolve(raw)?;

    if !path.exists() {
        return Err(OperationError::DirectoryNotFound(raw.to_string()));
    }
    if !path.is_dir() {
        return Err(OperationError::NotADirectory(raw.to_string()));
    }

    let read_dir = fs::read_dir(&path).map_err(|e| OperationError::io(raw, e))?;
    collect_entries(raw, read_dir, |e| {
        describe_entry(&e.path(), e.file_name().to_string_lossy().into_owned())
    })
}

/// Describe every yielded entry, sorted by name. The first entry the
/// iterator fails to produce aborts the listing.
fn collect_entries<T, F>(
    raw: &str,
    iter: impl Iterator<Item = io::Result<T>>,
    describe: F,
) -> Result<Vec<DirectoryEntry>, OperationError>
where
    F: Fn(T) -> DirectoryEntry,
{
    let mut entries = iter
        .map(|entry| entry.map(&describe).map_err(|e| OperationError::io(raw, e)))
        .collect::<Result<Vec<_>, _>>()?;

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

fn describe_entry(path: &Path, name: String) -> DirectoryEntry {
    // Follows symlinks; entries that cannot be stat'ed are listed as sizeless files.
    let (kind, size) = match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => (EntryKind::Directory, None),
        Ok(meta) if meta.is_file() => (EntryKind::File, Some(meta.len())),
        _ => (EntryKind::File, None),
    };

    DirectoryEntry {
        name,
        kind,
        size,
        path: path.to_path_buf(),
    }
}

pub fn render_listing(raw: &str, entries: &[DirectoryEntry]) -> String {
    let lines: Vec<String> = entries
        .iter()
        .map(|entry| match entry.size {
            Some(size) => format!("{} {} ({} bytes)", entry.kind.marker(), entry.name, size),
            None => format!("{} {}", entry.kind.marker(), entry.name),
        })
        .collect();

    format!("Contents of {}:\n\n{}", raw, lines.join("\n"))
}

/// List a directory under the guard's root and render it as a text block.
pub fn list_directory(guard: &PathGuard, raw: Option<&str>) -> Result<String, OperationError> {
    let entries = scan_directory(guard, raw)?;
    let root = guard.root().display().to_string();
    Ok(render_listing(raw.unwrap_or(root.as_str()), &entries))
}
