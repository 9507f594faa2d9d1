#![cfg_attr(docsrs, feature(doc_cfg))]

//! # amdpack-bundler
//!
//! Collects the JavaScript sources declared by application modules into one
//! named, versioned bundle.
//!
//! A [`Bundle`] is configured once through [`BundleOptions`] and then either
//! describes its scripts individually (debug mode) or compiles them into a
//! single cached artifact (production mode). The artifact is rebuilt when it
//! is missing, or in watch mode when a source is newer than it.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use amdpack_bundler::{BundleOptions, FsRegistry, HtmlDocument, Identity};
//!
//! # fn main() -> amdpack_bundler::Result<()> {
//! let registry = FsRegistry::new("modules", "var", "framework").root_http("/site");
//!
//! let bundle = BundleOptions::new("app", "main", "1.0.0")
//!     .add_scripts("app", ["lib/require.js", "lib/app.js"])
//!     .add_directories("app", ["js/app"])
//!     .compress(false)
//!     .registry(Arc::new(registry))
//!     .transform(Arc::new(Identity))
//!     .build()?;
//!
//! let mut document = HtmlDocument::default();
//! bundle.link_to(&mut document)?;
//! println!("{}", document.to_html());
//! # Ok(()) }
//! ```

pub mod bundle;
pub mod cache;
pub mod output;
pub mod registry;
pub mod scanner;
pub mod templates;
pub mod transform;

pub use bundle::{Bundle, BundleOptions, CompileReport, OwnedPaths, SourceGroups, SourceKind};
pub use cache::{
    ArtifactCache, ArtifactKey, ArtifactState, EnsureOutcome, PLACEHOLDER_PREFIX, is_placeholder,
    write_atomic,
};
pub use output::{Document, EmbedSpec, HtmlDocument};
pub use registry::{FsRegistry, ModuleRegistry};
pub use scanner::{DefinitionMarker, FilePredicate, ScanResult, TemplateFiles, scan};
pub use templates::{TemplateSet, template_definitions};
pub use transform::{CommandTransform, Identity, Transform, TransformError};

// Logging utilities (optional, enabled with "logging" feature)
#[cfg(feature = "logging")]
#[cfg_attr(docsrs, doc(cfg(feature = "logging")))]
pub mod logging;

#[cfg(feature = "logging")]
#[cfg_attr(docsrs, doc(cfg(feature = "logging")))]
pub use logging::{LogLevel, init_logging, init_logging_from_env};

use std::path::PathBuf;

/// Error types for amdpack-bundler operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A directory to scan does not exist or is not a directory.
    #[error("Directory not found: {}", .0.display())]
    NotFound(PathBuf),

    /// An explicitly registered script does not exist.
    #[error("Missing source in module '{module}': {}", path.display())]
    MissingSource { module: String, path: PathBuf },

    /// The registry cannot place a module.
    #[error("Unknown module: {0}")]
    UnknownModule(String),

    /// A bundle identity part cannot be used in a file name.
    #[error("Invalid bundle {field} '{value}': {reason}")]
    InvalidIdentity {
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The advisory lock guarding an artifact could not be taken.
    #[error("Failed to lock {}: {message}", path.display())]
    Lock { path: PathBuf, message: String },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O error with context message.
    #[error("{message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for amdpack-bundler operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Error::IoError {
            message: message.into(),
            source,
        }
    }
}

impl miette::Diagnostic for Error {
    fn code(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        Some(Box::new(match self {
            Error::NotFound(_) => "NOT_FOUND",
            Error::MissingSource { .. } => "MISSING_SOURCE",
            Error::UnknownModule(_) => "UNKNOWN_MODULE",
            Error::InvalidIdentity { .. } => "INVALID_IDENTITY",
            Error::InvalidConfig(_) => "INVALID_CONFIG",
            Error::Lock { .. } => "LOCK_FAILED",
            Error::Io(_) | Error::IoError { .. } => "IO_ERROR",
        }))
    }

    fn help(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        match self {
            Error::NotFound(path) => Some(Box::new(format!(
                "Create '{}' or remove it from the bundle's directories.",
                path.display()
            ))),
            Error::MissingSource { module, .. } => Some(Box::new(format!(
                "A bundle never skips a declared script. Restore the file or remove it from module '{}'.",
                module
            ))),
            Error::UnknownModule(module) => Some(Box::new(format!(
                "Module '{}' has no directory under the configured layout. Add it to [layout.modules] or check the spelling.",
                module
            ))),
            Error::InvalidIdentity { .. } => Some(Box::new(
                "Module, name and version become the artifact file name. Use plain names without '/', '\\' or '..'."
                    .to_string(),
            )),
            Error::InvalidConfig(msg) => Some(Box::new(format!(
                "Check how the bundle is constructed.\nError: {}",
                msg
            ))),
            Error::Lock { .. } => Some(Box::new(
                "Check that the cache directory is writable.".to_string(),
            )),
            _ => None,
        }
    }
}
