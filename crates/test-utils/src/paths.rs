//! Scratch files for tests that load grids, ramps or config from disk.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A fresh scratch directory, removed when dropped.
pub fn scratch_dir(prefix: &str) -> TempDir {
    tempfile::Builder::new()
        .prefix(prefix)
        .tempdir()
        .expect("create scratch directory")
}

/// Write `contents` to `dir/name` and return the path.
pub fn write_test_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents)
        .unwrap_or_else(|e| panic!("write {}: {}", path.display(), e));
    path
}
