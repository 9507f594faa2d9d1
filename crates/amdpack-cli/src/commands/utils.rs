//! Shared helpers for command implementations.

use crate::error::{CliError, Result};
use std::path::{Path, PathBuf};

/// Resolve `path` against `cwd` unless it is already absolute.
pub fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Current working directory.
///
/// # Errors
///
/// Fails when the directory was removed or is not accessible.
pub fn get_cwd() -> Result<PathBuf> {
    std::env::current_dir().map_err(|e| {
        CliError::Custom(format!("Failed to get current working directory: {}", e))
    })
}

/// Path shown to the user: relative to `base` when it lies below it.
pub fn display_path(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .display()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_path_absolute() {
        let abs = if cfg!(windows) {
            PathBuf::from("C:\\site\\amdpack.toml")
        } else {
            PathBuf::from("/site/amdpack.toml")
        };
        assert_eq!(resolve_path(&abs, Path::new("/other")), abs);
    }

    #[test]
    fn test_resolve_path_relative() {
        let cwd = Path::new("/site");
        assert_eq!(
            resolve_path(Path::new("conf/amdpack.toml"), cwd),
            cwd.join("conf/amdpack.toml")
        );
    }

    #[test]
    fn test_display_path() {
        let base = Path::new("/site");
        assert_eq!(
            display_path(Path::new("/site/var/app.js"), base),
            Path::new("var/app.js").display().to_string()
        );
        assert_eq!(display_path(Path::new("/tmp/x.js"), base), "/tmp/x.js");
    }
}
