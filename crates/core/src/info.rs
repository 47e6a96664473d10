use std::fs::{self, Metadata};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::entry::{EntryKind, FileInfo};
use crate::error::OperationError;
use crate::guard::PathGuard;

pub fn stat_path(guard: &PathGuard, raw: &str) -> Result<FileInfo, OperationError> {
    let path = guard.resolve(raw)?;

    if !path.exists() {
        return Err(OperationError::PathNotFound(raw.to_string()));
    }

    let meta = fs::metadata(&path).map_err(|e| OperationError::io(raw, e))?;
    let modified = meta.modified().map_err(|e| OperationError::io(raw, e))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(FileInfo {
        name,
        kind: EntryKind::from_metadata(&meta),
        size_bytes: meta.len(),
        modified: epoch_secs(modified),
        permissions: format!("0o{:o}", mode(&meta)),
        path,
    })
}

/// Signed seconds since the Unix epoch; negative for pre-epoch times.
fn epoch_secs(time: SystemTime) -> f64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(after) => after.as_secs_f64(),
        Err(before) => -before.duration().as_secs_f64(),
    }
}

#[cfg(unix)]
fn mode(meta: &Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode()
}

#[cfg(not(unix))]
fn mode(meta: &Metadata) -> u32 {
    let type_bits = if meta.is_dir() { 0o040000 } else { 0o100000 };
    let perm_bits = if meta.permissions().readonly() { 0o444 } else { 0o666 };
    type_bits | perm_bits
}

pub fn render_info(raw: &str, info: &FileInfo) -> String {
    format!(
        "Information for {}:\n\nName: {}\nType: {}\nSize: {} bytes\nModified: {}\nPermissions: {}",
        raw, info.name, info.kind, info.size_bytes, info.modified, info.permissions
    )
}

/// Describe a file or directory under the guard's root as a text block.
pub fn get_file_info(guard: &PathGuard, raw: &str) -> Result<String, OperationError> {
    let info = stat_path(guard, raw)?;
    Ok(render_info(raw, &info))
}
