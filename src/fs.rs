//! Filesystem access seam
//!
//! The walker and rule-set factory reach the disk only through this trait,
//! which keeps all I/O local, scoped to a single call, and substitutable in
//! tests with an instrumented in-memory tree.

use std::io;
use std::path::{Path, PathBuf};

/// One entry returned from a directory listing.
#[derive(Debug, Clone)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
    pub is_file: bool,
}

/// Minimal filesystem surface consumed by the engine.
pub trait Filesystem {
    /// List a directory's entries, sorted by name.
    fn read_dir(&self, dir: &Path) -> io::Result<Vec<DirEntry>>;

    /// Read a small UTF-8 text file (an ignore or include-only file).
    fn read_text_file(&self, path: &Path) -> io::Result<String>;

    /// Resolve symlinks to a canonical form, for cycle detection.
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;
}

/// The real local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFilesystem;

impl Filesystem for OsFilesystem {
    fn read_dir(&self, dir: &Path) -> io::Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            // follows symlinks so a link to a directory traverses like one;
            // broken links are skipped
            let Ok(meta) = std::fs::metadata(entry.path()) else {
                tracing::debug!(path = %entry.path().display(), "skipping unreadable entry");
                continue;
            };
            entries.push(DirEntry {
                name,
                is_dir: meta.is_dir(),
                is_file: meta.is_file(),
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn read_text_file(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        std::fs::canonicalize(path)
    }
}
