//! Error handling for the amdpack CLI.
//!
//! `CliError` wraps the library errors via `#[from]` and adds the failures
//! only the CLI can have, such as an unknown bundle name. [`ResultExt`]
//! attaches paths and hints on the way up.
//!
//! # Example
//!
//! ```rust,no_run
//! use amdpack_cli::error::{Result, ResultExt};
//! use std::path::Path;
//!
//! fn read_artifact(path: &Path) -> Result<Vec<u8>> {
//!     std::fs::read(path)
//!         .with_path(path)
//!         .with_hint("Run 'amdpack build' first")
//! }
//! ```

pub mod miette;

pub use self::miette::cli_error_to_miette;

use std::path::PathBuf;
use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Loading or validating the project config failed
    #[error("Configuration error: {0}")]
    Config(#[from] amdpack_config::ConfigError),

    /// Scanning, compiling or linking a bundle failed
    #[error(transparent)]
    Bundle(#[from] amdpack_bundler::Error),

    /// No configured bundle matches the requested name
    #[error("Bundle '{handle}' is not configured\n\nHint: {}", available_hint(.available))]
    BundleNotFound {
        handle: String,
        available: Vec<String>,
    },

    /// More than one bundle matches a bare name
    #[error("Bundle name '{handle}' is ambiguous: {}\n\nHint: Use module/name", .candidates.join(", "))]
    AmbiguousBundle {
        handle: String,
        candidates: Vec<String>,
    },

    /// Invalid command-line arguments or options
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// File or directory not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with custom messages
    #[error("{0}")]
    Custom(String),
}

fn available_hint(available: &[String]) -> String {
    if available.is_empty() {
        "No bundles are declared; add a [[bundles]] table to amdpack.toml".to_string()
    } else {
        format!("Configured bundles: {}", available.join(", "))
    }
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for adding context to `Result` types.
pub trait ResultExt<T> {
    /// Turn a not-found I/O error into `CliError::FileNotFound(path)`.
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;

    /// Append a hint to the error message.
    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T>;

    /// Prefix the error message.
    fn context(self, msg: impl std::fmt::Display) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            match err {
                CliError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
                    CliError::FileNotFound(path.as_ref().to_path_buf())
                }
                other => other,
            }
        })
    }

    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{}\n\nHint: {}", err, hint))
        })
    }

    fn context(self, msg: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{}: {}", msg, err))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amdpack_config::ConfigError;

    #[test]
    fn test_bundle_not_found_lists_bundles() {
        let err = CliError::BundleNotFound {
            handle: "admin".to_string(),
            available: vec!["app/main".to_string(), "app/editor".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("Bundle 'admin' is not configured"));
        assert!(msg.contains("app/main, app/editor"));
    }

    #[test]
    fn test_bundle_not_found_without_bundles() {
        let err = CliError::BundleNotFound {
            handle: "main".to_string(),
            available: vec![],
        };
        assert!(err.to_string().contains("[[bundles]]"));
    }

    #[test]
    fn test_ambiguous_bundle() {
        let err = CliError::AmbiguousBundle {
            handle: "main".to_string(),
            candidates: vec!["app/main".to_string(), "admin/main".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("app/main, admin/main"));
        assert!(msg.contains("Hint: Use module/name"));
    }

    #[test]
    fn test_cli_error_from_config_error() {
        let cli_err: CliError = ConfigError::ProfileNotFound("production".to_string()).into();
        assert!(matches!(cli_err, CliError::Config(_)));
        assert!(cli_err.to_string().contains("profile 'production'"));
    }

    #[test]
    fn test_cli_error_from_bundler_error() {
        let cli_err: CliError = amdpack_bundler::Error::UnknownModule("shop".to_string()).into();
        assert!(matches!(cli_err, CliError::Bundle(_)));
    }

    #[test]
    fn test_result_ext_with_path() {
        let result: std::io::Result<()> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "file not found",
        ));

        let err = result.with_path("/test/path.js").unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }

    #[test]
    fn test_result_ext_with_hint() {
        let result: std::result::Result<(), ConfigError> = Err(ConfigError::NotFound);

        let err = result.with_hint("Create amdpack.toml").unwrap_err();
        assert!(err.to_string().contains("Hint: Create amdpack.toml"));
    }

    #[test]
    fn test_result_ext_context() {
        let result: std::result::Result<(), ConfigError> = Err(ConfigError::NotFound);

        let err = result.context("Failed to load project").unwrap_err();
        assert!(err.to_string().starts_with("Failed to load project: "));
    }
}
