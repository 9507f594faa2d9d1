//! Pluggable config validation strategies
//!
//! Separates filesystem validation (for CLI use) from schema validation.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::bundle::{BundleConfig, SourceEntryKind};
use crate::config::ProjectConfig;
use crate::error::{ConfigError, Result};

pub trait ConfigValidator {
    fn validate(&self, config: &ProjectConfig) -> Result<()>;
}

/// Schema-only validation (no filesystem checks)
///
/// # Example
///
/// ```
/// use amdpack_config::{ConfigValidator, ProjectConfig, SchemaValidator};
/// use serde_json::json;
///
/// let config = ProjectConfig::from_value(json!({
///     "bundles": [{ "module": "app", "name": "main", "version": "1.0" }]
/// }))
/// .unwrap();
///
/// SchemaValidator.validate(&config).unwrap();
/// ```
pub struct SchemaValidator;

impl ConfigValidator for SchemaValidator {
    fn validate(&self, config: &ProjectConfig) -> Result<()> {
        if config.layout.cache_module.trim().is_empty() {
            return Err(ConfigError::SchemaValidation {
                message: "layout.cache_module cannot be empty".to_string(),
                hint: Some("Name the module whose var directory holds compiled bundles".to_string()),
            });
        }

        let mut seen = HashSet::new();
        for bundle in &config.bundles {
            validate_identity(bundle)?;

            if !seen.insert((bundle.module.as_str(), bundle.name.as_str())) {
                return Err(ConfigError::DuplicateBundle {
                    module: bundle.module.clone(),
                    name: bundle.name.clone(),
                });
            }

            for source in &bundle.sources {
                if source.module.trim().is_empty() {
                    return Err(ConfigError::SchemaValidation {
                        message: format!("bundle '{}' has a source without a module", bundle.id()),
                        hint: Some("Set 'module' on every [[bundles.sources]] entry".to_string()),
                    });
                }
            }
        }

        let compresses = config.bundles.iter().any(|b| b.compress && !b.debug);
        if compresses && config.minifier.program.trim().is_empty() {
            return Err(ConfigError::SchemaValidation {
                message: "minifier.program cannot be empty".to_string(),
                hint: Some(
                    "Set [minifier] program, or compress = false on every bundle".to_string(),
                ),
            });
        }

        Ok(())
    }
}

fn validate_identity(bundle: &BundleConfig) -> Result<()> {
    for (field, value) in [
        ("module", &bundle.module),
        ("name", &bundle.name),
        ("version", &bundle.version),
    ] {
        if let Some(problem) = identity_problem(value) {
            return Err(ConfigError::InvalidValue {
                field: format!("bundles.{field}"),
                hint: Some(format!("'{value}' {problem}")),
            });
        }
    }
    Ok(())
}

fn identity_problem(value: &str) -> Option<&'static str> {
    if value.is_empty() {
        Some("must not be empty")
    } else if value.contains(['/', '\\']) {
        Some("must not contain path separators")
    } else if value.contains("..") {
        Some("must not contain '..'")
    } else if value.contains('\0') {
        Some("must not contain NUL")
    } else {
        None
    }
}

/// Filesystem validator (for CLI use)
///
/// Checks that every declared script and directory exists under the layout.
/// Relative layout paths are taken relative to `root`.
pub struct FsValidator {
    root: PathBuf,
}

impl FsValidator {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl ConfigValidator for FsValidator {
    fn validate(&self, config: &ProjectConfig) -> Result<()> {
        SchemaValidator.validate(config)?;

        for bundle in &config.bundles {
            for source in &bundle.sources {
                let base = self
                    .root
                    .join(config.layout.source_base(source.kind, &source.module));
                for rel in &source.paths {
                    let path = base.join(rel);
                    let exists = match source.kind {
                        SourceEntryKind::Directory => path.is_dir(),
                        _ => path.is_file(),
                    };
                    if !exists {
                        return Err(ConfigError::SourceNotFound {
                            bundle: bundle.id(),
                            kind: source.kind.label(),
                            path,
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

/// Convenience function for schema-only validation
pub fn validate_schema(config: &ProjectConfig) -> Result<()> {
    SchemaValidator.validate(config)
}

/// Convenience function for filesystem validation
pub fn validate_fs(config: &ProjectConfig, root: impl AsRef<Path>) -> Result<()> {
    FsValidator::new(root).validate(config)
}
