use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Create a root directory with a small fixed layout for testing.
pub fn create_test_root() -> TempDir {
    let dir = TempDir::new().unwrap();

    fs::write(dir.path().join("hello.txt"), "hello world\n").unwrap();
    fs::write(dir.path().join("b.txt"), "hi").unwrap();

    fs::create_dir(dir.path().join("docs")).unwrap();
    fs::write(dir.path().join("docs/guide.md"), "# Guide\n").unwrap();

    dir
}

pub fn path_str(path: &Path) -> String {
    path.to_str().unwrap().to_string()
}
