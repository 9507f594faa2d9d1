//! Recursive directory scanning with a content predicate.
//!
//! [`scan`] walks a directory tree depth-first, skipping hidden entries, and
//! keeps the regular files accepted by a [`FilePredicate`]. Entries are
//! visited in lexical file-name order at every level so the result does not
//! depend on how the platform enumerates directories.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use memchr::memmem;
use walkdir::{DirEntry, WalkDir};

use crate::{Error, Result};

/// Decides whether a regular file belongs in a scan result.
pub trait FilePredicate {
    fn matches(&self, path: &Path) -> io::Result<bool>;
}

impl<F> FilePredicate for F
where
    F: Fn(&Path) -> io::Result<bool>,
{
    fn matches(&self, path: &Path) -> io::Result<bool> {
        self(path)
    }
}

/// Matches module definition files: a file extension plus a marker that
/// appears anywhere in the content.
///
/// The default is `.js` files containing `define(`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionMarker {
    extension: String,
    marker: String,
}

impl DefinitionMarker {
    pub fn new(extension: impl Into<String>, marker: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
            marker: marker.into(),
        }
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }
}

impl Default for DefinitionMarker {
    fn default() -> Self {
        Self::new(".js", "define(")
    }
}

impl FilePredicate for DefinitionMarker {
    fn matches(&self, path: &Path) -> io::Result<bool> {
        if !has_suffix(path, &self.extension) {
            return Ok(false);
        }
        if self.marker.is_empty() {
            return Ok(true);
        }

        let content = fs::read(path)?;
        Ok(memmem::find(&content, self.marker.as_bytes()).is_some())
    }
}

/// Matches HTML templates by extension alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFiles {
    extension: String,
}

impl TemplateFiles {
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
        }
    }
}

impl Default for TemplateFiles {
    fn default() -> Self {
        Self::new(".html")
    }
}

impl FilePredicate for TemplateFiles {
    fn matches(&self, path: &Path) -> io::Result<bool> {
        Ok(has_suffix(path, &self.extension))
    }
}

/// Files accepted by a scan and the newest modification time among them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    /// Matching files, each joined onto the scanned root.
    pub files: Vec<PathBuf>,
    /// `UNIX_EPOCH` when nothing matched.
    pub last_modified: SystemTime,
}

impl ScanResult {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Paths relative to `root` with `/` separators, for URLs and banners.
    pub fn relative_to(&self, root: &Path) -> Vec<String> {
        self.files.iter().map(|file| relative_slash_path(root, file)).collect()
    }
}

/// Scan `root` for files accepted by `predicate`.
///
/// # Errors
///
/// `Error::NotFound` when `root` is missing or not a directory; an I/O error
/// naming the entry when a directory or file cannot be read.
pub fn scan(root: &Path, predicate: &dyn FilePredicate) -> Result<ScanResult> {
    if !root.is_dir() {
        return Err(Error::NotFound(root.to_path_buf()));
    }

    let mut files = Vec::new();
    let mut last_modified = SystemTime::UNIX_EPOCH;

    let walker = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

    for entry in walker {
        let entry = entry.map_err(|err| {
            let message = match err.path() {
                Some(path) => format!("failed to read {}", path.display()),
                None => format!("failed to scan {}", root.display()),
            };
            Error::io(message, io::Error::from(err))
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let matched = predicate
            .matches(path)
            .map_err(|err| Error::io(format!("failed to read {}", path.display()), err))?;
        if !matched {
            continue;
        }

        let modified = entry
            .metadata()
            .map_err(io::Error::from)
            .and_then(|meta| meta.modified())
            .map_err(|err| Error::io(format!("failed to stat {}", path.display()), err))?;
        last_modified = last_modified.max(modified);
        files.push(path.to_path_buf());
    }

    tracing::debug!(
        root = %root.display(),
        matched = files.len(),
        "scanned directory"
    );

    Ok(ScanResult {
        files,
        last_modified,
    })
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().as_encoded_bytes().starts_with(b".")
}

fn has_suffix(path: &Path, suffix: &str) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(suffix))
}

pub(crate) fn relative_slash_path(root: &Path, file: &Path) -> String {
    let relative = file.strip_prefix(root).unwrap_or(file);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
