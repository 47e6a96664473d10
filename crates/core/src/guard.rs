use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::error::OperationError;

/// Confines every filesystem read to a single canonical root directory.
///
/// The root is canonicalized once at construction. Candidate paths are
/// resolved (symlinks, `.` and `..` included) before a component-wise
/// containment check, so `/srv/database` is never inside `/srv/data`.
#[derive(Debug, Clone)]
pub struct PathGuard {
    root: PathBuf,
}

impl PathGuard {
    pub fn new(root: impl AsRef<Path>) -> io::Result<Self> {
        let root = root.as_ref().canonicalize()?;
        if !root.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("allowed root is not a directory: {}", root.display()),
            ));
        }
        Ok(Self { root })
    }

    /// The canonical allowed root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_allowed(&self, raw: &str) -> bool {
        self.resolve(raw).is_ok()
    }

    /// Resolve `raw` to its canonical form, denying anything outside the root.
    ///
    /// A missing final component is resolved through its parent so callers can
    /// still report "not found"; any other resolution failure is a denial.
    pub fn resolve(&self, raw: &str) -> Result<PathBuf, OperationError> {
        let denied = || OperationError::AccessDenied(raw.to_string());

        let canonical = canonicalize_lenient(raw).ok_or_else(denied)?;
        if canonical.starts_with(&self.root) {
            Ok(canonical)
        } else {
            Err(denied())
        }
    }
}

fn canonicalize_lenient(raw: &str) -> Option<PathBuf> {
    if raw.is_empty() || raw.contains('\0') {
        return None;
    }

    let path = Path::new(raw);
    match path.canonicalize() {
        Ok(canonical) => Some(canonical),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            // Symlinks that dangle still exist as links; never guess their target.
            if fs::symlink_metadata(path).is_ok() {
                return None;
            }
            let leaf = match path.components().next_back()? {
                Component::Normal(name) => name,
                _ => return None,
            };
            let parent = match path.parent() {
                Some(p) if p.as_os_str().is_empty() => Path::new("."),
                Some(p) => p,
                None => return None,
            };
            parent.canonicalize().ok().map(|p| p.join(leaf))
        }
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutils::{create_test_root, path_str};
    use tempfile::TempDir;

    fn guard_for(dir: &TempDir) -> PathGuard {
        PathGuard::new(dir.path()).unwrap()
    }

    #[test]
    fn allows_root_itself() {
        let dir = create_test_root();
        let guard = guard_for(&dir);

        assert!(guard.is_allowed(&path_str(dir.path())));
        assert_eq!(guard.resolve(&path_str(dir.path())).unwrap(), guard.root());
    }

    #[test]
    fn allows_descendants() {
        let dir = create_test_root();
        let guard = guard_for(&dir);

        assert!(guard.is_allowed(&path_str(&dir.path().join("hello.txt"))));
        assert!(guard.is_allowed(&path_str(&dir.path().join("docs/guide.md"))));
    }

    #[test]
    fn trailing_separator_resolves_to_same_dir() {
        let dir = create_test_root();
        let guard = guard_for(&dir);
        let raw = format!("{}/docs/", dir.path().display());

        assert_eq!(guard.resolve(&raw).unwrap(), guard.root().join("docs"));
    }

    #[test]
    fn denies_paths_outside_root() {
        let dir = create_test_root();
        let guard = guard_for(&dir);

        let err = guard.resolve("/etc/passwd").unwrap_err();
        assert!(err.to_string().starts_with("Access denied"));
    }

    #[test]
    fn denies_dotdot_traversal() {
        let dir = create_test_root();
        let guard = PathGuard::new(dir.path().join("docs")).unwrap();
        let raw = format!("{}/docs/../hello.txt", dir.path().display());

        assert!(!guard.is_allowed(&raw));
    }

    #[test]
    fn dotdot_that_stays_inside_is_allowed() {
        let dir = create_test_root();
        let guard = guard_for(&dir);
        let raw = format!("{}/docs/../hello.txt", dir.path().display());

        assert_eq!(guard.resolve(&raw).unwrap(), guard.root().join("hello.txt"));
    }

    #[test]
    fn denies_sibling_with_shared_prefix() {
        let parent = TempDir::new().unwrap();
        std::fs::create_dir(parent.path().join("data")).unwrap();
        std::fs::create_dir(parent.path().join("database")).unwrap();
        std::fs::write(parent.path().join("database/x.txt"), "x").unwrap();

        let guard = PathGuard::new(parent.path().join("data")).unwrap();
        let raw = path_str(&parent.path().join("database/x.txt"));

        assert!(!guard.is_allowed(&raw));
    }

    #[cfg(unix)]
    #[test]
    fn denies_symlink_escape() {
        let outside = TempDir::new().unwrap();
        std::fs::write(outside.path().join("secret.txt"), "secret").unwrap();

        let dir = create_test_root();
        std::os::unix::fs::symlink(outside.path(), dir.path().join("escape")).unwrap();
        let guard = guard_for(&dir);

        assert!(!guard.is_allowed(&path_str(&dir.path().join("escape/secret.txt"))));
        assert!(!guard.is_allowed(&path_str(&dir.path().join("escape"))));
    }

    #[cfg(unix)]
    #[test]
    fn denies_dangling_symlink() {
        let dir = create_test_root();
        std::os::unix::fs::symlink("/nonexistent/target", dir.path().join("dangling")).unwrap();
        let guard = guard_for(&dir);

        assert!(!guard.is_allowed(&path_str(&dir.path().join("dangling"))));
    }

    #[test]
    fn missing_leaf_inside_root_resolves() {
        let dir = create_test_root();
        let guard = guard_for(&dir);

        let resolved = guard
            .resolve(&path_str(&dir.path().join("missing.txt")))
            .unwrap();
        assert_eq!(resolved, guard.root().join("missing.txt"));
    }

    #[test]
    fn missing_intermediate_is_denied() {
        let dir = create_test_root();
        let guard = guard_for(&dir);

        assert!(!guard.is_allowed(&path_str(&dir.path().join("nope/missing.txt"))));
    }

    #[test]
    fn denies_null_byte_and_empty() {
        let dir = create_test_root();
        let guard = guard_for(&dir);

        assert!(!guard.is_allowed(""));
        assert!(!guard.is_allowed(&format!("{}/hello\0.txt", dir.path().display())));
    }

    #[test]
    fn rejects_root_that_is_a_file() {
        let dir = create_test_root();
        assert!(PathGuard::new(dir.path().join("hello.txt")).is_err());
    }

    #[test]
    fn rejects_missing_root() {
        let dir = create_test_root();
        assert!(PathGuard::new(dir.path().join("absent")).is_err());
    }
}
