pub mod entry;
pub mod error;
pub mod guard;
pub mod info;
pub mod list;
pub mod read;
#[cfg(test)]
mod testutils;

pub use entry::{DirectoryEntry, EntryKind, FileInfo};
pub use error::OperationError;
pub use guard::PathGuard;
pub use info::{get_file_info, render_info, stat_path};
pub use list::{list_directory, render_listing, scan_directory};
pub use read::{read_file, read_file_content, FileContent, BINARY_PREVIEW_BYTES};
