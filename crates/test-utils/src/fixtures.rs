use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// A temporary tree:
///
/// ```text
/// <root>/outer/inner/file.txt
/// ```
pub struct NestedTree {
    pub dir: TempDir,
}

impl NestedTree {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let inner = dir.path().join("outer").join("inner");
        fs::create_dir_all(&inner).expect("create nested dirs");
        fs::write(inner.join("file.txt"), b"hello").expect("write file");
        Self { dir }
    }

    /// Canonical root, so comparisons survive symlinked temp dirs
    /// (`/tmp` → `/private/tmp` on macOS).
    pub fn root(&self) -> PathBuf {
        fs::canonicalize(self.dir.path()).expect("canonicalize temp root")
    }

    pub fn outer(&self) -> PathBuf {
        self.root().join("outer")
    }

    pub fn inner(&self) -> PathBuf {
        self.outer().join("inner")
    }

    pub fn file(&self) -> PathBuf {
        self.inner().join("file.txt")
    }

    /// Rename `outer` to `new_name` and return the new outer path.
    pub fn rename_outer(&self, new_name: &str) -> PathBuf {
        let to = self.root().join(new_name);
        fs::rename(self.outer(), &to).expect("rename outer dir");
        to
    }
}

impl Default for NestedTree {
    fn default() -> Self {
        Self::new()
    }
}
