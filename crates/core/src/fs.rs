//! Filesystem checks used before a dataset is opened

use std::io;
use std::path::{Path, PathBuf};

/// Resolve `path` to an existing regular file.
///
/// Returns a `NotFound` error naming the path when it is missing or is a directory.
pub fn require_file(path: &str) -> io::Result<PathBuf> {
    let p = Path::new(path);
    if p.is_file() {
        Ok(p.to_path_buf())
    } else {
        Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("no such file: {}", p.display()),
        ))
    }
}

/// Resolve `path` to an existing directory.
pub fn require_directory(path: &str) -> io::Result<PathBuf> {
    let p = Path::new(path);
    if p.is_dir() {
        Ok(p.to_path_buf())
    } else {
        Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("no such directory: {}", p.display()),
        ))
    }
}
