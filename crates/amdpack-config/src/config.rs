//! High-level configuration structure for amdpack.
//!
//! This module provides the main `ProjectConfig` struct and profile merging logic.
//! For file discovery, see the `discovery` module.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::bundle::BundleConfig;
use crate::error::{ConfigError, Result as ConfigResult};
use crate::layout::LayoutConfig;
use crate::settings::{GlobalSettings, MinifierConfig};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub minifier: MinifierConfig,

    #[serde(default)]
    pub settings: GlobalSettings,

    #[serde(default)]
    pub bundles: Vec<BundleConfig>,

    #[serde(default)]
    pub profiles: HashMap<String, ProfileConfig>,
}

/// Partial overrides applied on top of the base config.
///
/// `bundle_defaults` is merged into every bundle; the other sections are
/// merged into their top-level counterparts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default)]
    pub bundle_defaults: Value,

    #[serde(default)]
    pub layout: Value,

    #[serde(default)]
    pub minifier: Value,

    #[serde(default)]
    pub settings: Value,
}

impl ProjectConfig {
    /// Create from serde_json::Value
    ///
    /// # Example
    ///
    /// ```
    /// use amdpack_config::ProjectConfig;
    /// use serde_json::json;
    ///
    /// let value = json!({
    ///     "bundles": [
    ///         { "module": "app", "name": "main", "version": "1.0" }
    ///     ]
    /// });
    ///
    /// let config = ProjectConfig::from_value(value).unwrap();
    /// assert_eq!(config.bundles[0].id(), "app/main");
    /// ```
    pub fn from_value(value: Value) -> ConfigResult<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Convert to serde_json::Value
    pub fn to_value(&self) -> ConfigResult<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Look up a bundle by `name` or `module/name`.
    pub fn bundle(&self, handle: &str) -> Option<&BundleConfig> {
        self.bundles.iter().find(|b| b.matches(handle))
    }

    pub fn profile_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl ProjectConfig {
    pub fn materialize_profile(mut self, profile: Option<&str>) -> ConfigResult<Self> {
        let Some(name) = profile else {
            return Ok(self);
        };

        let profile_cfg = self
            .profiles
            .get(name)
            .cloned()
            .ok_or_else(|| ConfigError::ProfileNotFound(name.to_string()))?;

        tracing::debug!(profile = name, "applying config profile");

        if !profile_cfg.layout.is_null() {
            self.layout = merge_section(&self.layout, &profile_cfg.layout)?;
        }

        if !profile_cfg.minifier.is_null() {
            self.minifier = merge_section(&self.minifier, &profile_cfg.minifier)?;
        }

        if !profile_cfg.settings.is_null() {
            self.settings = merge_section(&self.settings, &profile_cfg.settings)?;
        }

        if !profile_cfg.bundle_defaults.is_null() {
            for bundle in &mut self.bundles {
                *bundle = merge_section(bundle, &profile_cfg.bundle_defaults)?;
            }
        }

        Ok(self)
    }
}

fn merge_section<T>(base: &T, overrides: &Value) -> ConfigResult<T>
where
    T: Serialize + for<'de> Deserialize<'de>,
{
    let mut merged =
        serde_json::to_value(base).map_err(|err| ConfigError::InvalidProfileOverride {
            message: err.to_string(),
        })?;
    merge_values(&mut merged, overrides);
    serde_json::from_value(merged).map_err(|err| ConfigError::InvalidProfileOverride {
        message: err.to_string(),
    })
}

/// Deep-merge `update` into `target`. Objects merge key by key; everything
/// else, arrays included, is replaced.
pub fn merge_values(target: &mut Value, update: &Value) {
    match (target, update) {
        (Value::Object(target_map), Value::Object(update_map)) => {
            for (key, value) in update_map {
                merge_values(target_map.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
        (target_slot, _) => {
            *target_slot = update.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::PathBuf;

    #[test]
    fn from_value_creates_config() {
        let value = json!({
            "layout": { "root_http": "/site" },
            "bundles": [{
                "module": "app",
                "name": "main",
                "version": "1.0",
                "sources": [{ "kind": "plain", "module": "app", "paths": ["a.js"] }]
            }]
        });

        let config = ProjectConfig::from_value(value).unwrap();
        assert_eq!(config.layout.root_http, "/site");
        assert_eq!(config.layout.var_dir, PathBuf::from("var"));
        assert_eq!(config.bundles.len(), 1);
        assert_eq!(config.bundles[0].sources[0].paths, vec![PathBuf::from("a.js")]);
    }

    #[test]
    fn from_value_rejects_wrong_types() {
        let value = json!({ "bundles": "nope" });
        let err = ProjectConfig::from_value(value).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn to_value_serializes_config() {
        let mut config = ProjectConfig::default();
        config.minifier.program = "terser".to_string();

        let value = config.to_value().unwrap();
        assert_eq!(value["minifier"]["program"], json!("terser"));
        assert_eq!(value["layout"]["cache_module"], json!("amdpack"));
    }

    #[test]
    fn profile_merging_works() {
        let value = json!({
            "bundles": [
                { "module": "app", "name": "main", "version": "1.0" },
                { "module": "app", "name": "admin", "version": "2.0", "compress": false }
            ],
            "profiles": {
                "development": {
                    "bundle_defaults": { "debug": true, "watch": true },
                    "layout": { "root_http": "/dev" }
                }
            }
        });

        let config = ProjectConfig::from_value(value)
            .unwrap()
            .materialize_profile(Some("development"))
            .unwrap();

        assert_eq!(config.layout.root_http, "/dev");
        assert_eq!(config.layout.modules_dir, PathBuf::from("modules"));
        for bundle in &config.bundles {
            assert!(bundle.debug);
            assert!(bundle.watch);
        }
        assert!(config.bundles[0].compress);
        assert!(!config.bundles[1].compress);
        assert_eq!(config.bundles[1].version, "2.0");
    }

    #[test]
    fn missing_profile_is_an_error() {
        let config = ProjectConfig::default();
        let err = config.materialize_profile(Some("staging")).unwrap_err();
        assert!(matches!(err, ConfigError::ProfileNotFound(name) if name == "staging"));
    }

    #[test]
    fn no_profile_leaves_config_untouched() {
        let mut config = ProjectConfig::default();
        config.settings.log_level = Some("debug".to_string());

        let config = config.materialize_profile(None).unwrap();
        assert_eq!(config.settings.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn invalid_override_is_reported() {
        let value = json!({
            "profiles": { "broken": { "minifier": { "args": "not-a-list" } } }
        });

        let err = ProjectConfig::from_value(value)
            .unwrap()
            .materialize_profile(Some("broken"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidProfileOverride { .. }));
    }

    #[test]
    fn merge_values_replaces_arrays() {
        let mut target = json!({ "a": [1, 2], "b": { "c": 1, "d": 2 } });
        merge_values(&mut target, &json!({ "a": [3], "b": { "d": 5 } }));
        assert_eq!(target, json!({ "a": [3], "b": { "c": 1, "d": 5 } }));
    }
}
