//! Configuration for amdpack projects.
//!
//! Loads `amdpack.toml` (or the `amdpack` field of `package.json`), layers
//! environment overrides on top, applies named profiles and validates the
//! result before the CLI turns it into bundles.

pub mod bundle;
pub mod config;
pub mod discovery;
pub mod error;
pub mod layout;
pub mod settings;
pub mod validation;

// Re-export main types
pub use bundle::*;
pub use config::*;
pub use error::*;
pub use layout::*;
pub use settings::*;

// Re-export discovery and validation
pub use discovery::{CONFIG_FILE_NAME, ConfigDiscovery, discover, discover_with_profile};
pub use validation::{ConfigValidator, FsValidator, SchemaValidator, validate_fs, validate_schema};
