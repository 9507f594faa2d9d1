//! File-based config discovery for CLI use
//!
//! Handles finding and loading amdpack configuration files from the filesystem.
//! Values are layered with figment: built-in defaults, then the config file,
//! then `AMDPACK_*` environment variables (`__` separates nested keys, e.g.
//! `AMDPACK_LAYOUT__ROOT_HTTP=/site`), then the selected profile.

use std::fs;
use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format as _, Serialized, Toml},
};
use serde_json::Value;

use crate::config::ProjectConfig;
use crate::error::{ConfigError, Result};

pub const CONFIG_FILE_NAME: &str = "amdpack.toml";

const PACKAGE_JSON: &str = "package.json";
const PACKAGE_FIELD: &str = "amdpack";
const ENV_PREFIX: &str = "AMDPACK_";

/// File-based configuration discovery
///
/// # Example
///
/// ```no_run
/// use amdpack_config::ConfigDiscovery;
///
/// let discovery = ConfigDiscovery::new(".");
/// let config = discovery.load().unwrap();
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Find a config file in the root directory
    ///
    /// Searches in this order:
    /// 1. TOML config: amdpack.toml
    /// 2. package.json (amdpack field)
    pub fn find(&self) -> Option<PathBuf> {
        let toml_path = self.root.join(CONFIG_FILE_NAME);
        if toml_path.is_file() {
            return Some(toml_path);
        }

        let pkg_path = self.root.join(PACKAGE_JSON);
        if pkg_path.is_file() {
            if let Ok(content) = fs::read_to_string(&pkg_path) {
                if let Ok(parsed) = serde_json::from_str::<Value>(&content) {
                    if parsed.get(PACKAGE_FIELD).is_some_and(|v| !v.is_null()) {
                        return Some(pkg_path);
                    }
                }
            }
        }

        None
    }

    /// Load config from discovered file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if no config file is found.
    pub fn load(&self) -> Result<ProjectConfig> {
        let path = self.find().ok_or(ConfigError::NotFound)?;
        ProjectConfig::load(&path, None)
    }

    /// Load config with profile merging
    pub fn load_with_profile(&self, profile: &str) -> Result<ProjectConfig> {
        let path = self.find().ok_or(ConfigError::NotFound)?;
        ProjectConfig::load(&path, Some(profile))
    }
}

impl ProjectConfig {
    /// Load a config file, layer environment overrides on top and apply
    /// `profile` when given.
    ///
    /// Relative layout paths are resolved against the file's directory.
    pub fn load(path: &Path, profile: Option<&str>) -> Result<Self> {
        if !path.is_file() {
            return Err(ConfigError::NotFound);
        }

        let mut figment = Figment::new().merge(Serialized::defaults(ProjectConfig::default()));

        if path.file_name() == Some(std::ffi::OsStr::new(PACKAGE_JSON)) {
            figment = figment.merge(Serialized::defaults(package_json_section(path)?));
        } else {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: ProjectConfig = figment.extract().map_err(|e| ConfigError::InvalidValue {
            field: if e.path.is_empty() {
                "configuration".to_string()
            } else {
                e.path.join(".")
            },
            hint: Some(e.kind.to_string()),
        })?;

        tracing::debug!(
            path = %path.display(),
            bundles = config.bundles.len(),
            "loaded config"
        );

        let mut config = config.materialize_profile(profile)?;
        if let Some(base) = path.parent() {
            config.layout.resolve_against(base);
        }
        Ok(config)
    }
}

fn package_json_section(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)?;

    let parsed: Value = serde_json::from_str(&content).map_err(|e| ConfigError::InvalidValue {
        field: PACKAGE_JSON.to_string(),
        hint: Some(format!("Invalid JSON: {}", e)),
    })?;

    match parsed.get(PACKAGE_FIELD) {
        None => Err(ConfigError::InvalidValue {
            field: PACKAGE_FIELD.to_string(),
            hint: Some("Add an 'amdpack' field to your package.json".to_string()),
        }),
        Some(Value::Null) => Err(ConfigError::InvalidValue {
            field: PACKAGE_FIELD.to_string(),
            hint: Some("The 'amdpack' field cannot be null".to_string()),
        }),
        Some(value) => Ok(value.clone()),
    }
}

/// Discover and load config from current directory (convenience function)
pub fn discover() -> Result<ProjectConfig> {
    let root = std::env::current_dir()?;
    ConfigDiscovery::new(&root).load()
}

/// Discover and load config with profile (convenience function)
pub fn discover_with_profile(profile: &str) -> Result<ProjectConfig> {
    let root = std::env::current_dir()?;
    ConfigDiscovery::new(&root).load_with_profile(profile)
}
