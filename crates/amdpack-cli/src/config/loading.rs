use std::path::{Path, PathBuf};
use std::sync::Arc;

use amdpack_bundler::{Bundle, ModuleRegistry, Transform};
use amdpack_config::{
    BundleConfig, ConfigDiscovery, ConfigError, GlobalSettings, ProjectConfig, validate_fs,
    validate_schema,
};

use super::conversions::{bundle_options, registry_from_layout, transform_from_minifier};
use crate::cli::GlobalArgs;
use crate::commands::utils;
use crate::error::{CliError, Result};

/// A loaded, schema-checked project.
pub struct Project {
    root: PathBuf,
    config_path: PathBuf,
    config: ProjectConfig,
    registry: Arc<dyn ModuleRegistry>,
    transform: Arc<dyn Transform>,
}

impl Project {
    /// Load the config named by `--config`, or discover it in `--cwd`, and
    /// apply `--profile`.
    pub fn load(global: &GlobalArgs) -> Result<Self> {
        let config_path = locate_config(global)?;
        let config = ProjectConfig::load(&config_path, global.profile.as_deref())?;
        validate_schema(&config)?;

        tracing::debug!(
            config = %config_path.display(),
            profile = global.profile.as_deref().unwrap_or("-"),
            bundles = config.bundles.len(),
            "loaded project"
        );

        Ok(Self::from_config(config_path, config))
    }

    /// Wrap an already loaded config; `config_path` anchors relative paths.
    pub fn from_config(config_path: PathBuf, config: ProjectConfig) -> Self {
        let root = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let registry: Arc<dyn ModuleRegistry> = Arc::new(registry_from_layout(&config.layout));
        let transform: Arc<dyn Transform> = Arc::new(transform_from_minifier(&config.minifier));

        Self {
            root,
            config_path,
            config,
            registry,
            transform,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    /// Check that every declared script and directory exists.
    pub fn validate_sources(&self) -> Result<()> {
        validate_fs(&self.config, &self.root)?;
        Ok(())
    }

    /// Every bundle, or the bundles `handle` selects.
    ///
    /// A bare name that matches bundles of several modules is ambiguous.
    pub fn select(&self, handle: Option<&str>) -> Result<Vec<&BundleConfig>> {
        let Some(handle) = handle else {
            return Ok(self.config.bundles.iter().collect());
        };

        let matches: Vec<&BundleConfig> = self
            .config
            .bundles
            .iter()
            .filter(|bundle| bundle.matches(handle))
            .collect();

        match matches.len() {
            0 => Err(CliError::BundleNotFound {
                handle: handle.to_string(),
                available: self.config.bundles.iter().map(BundleConfig::id).collect(),
            }),
            1 => Ok(matches),
            _ => Err(CliError::AmbiguousBundle {
                handle: handle.to_string(),
                candidates: matches.iter().map(|bundle| bundle.id()).collect(),
            }),
        }
    }

    /// Exactly one bundle selected by `handle`.
    pub fn select_one(&self, handle: &str) -> Result<&BundleConfig> {
        let mut selected = self.select(Some(handle))?;
        selected.pop().ok_or_else(|| CliError::BundleNotFound {
            handle: handle.to_string(),
            available: Vec::new(),
        })
    }

    /// Build the bundler's view of `declaration`.
    pub fn bundle(&self, declaration: &BundleConfig) -> Result<Bundle> {
        self.bundle_with(declaration, |options| options)
    }

    /// Like [`bundle`](Self::bundle), letting the caller override flags.
    pub fn bundle_with<F>(&self, declaration: &BundleConfig, adjust: F) -> Result<Bundle>
    where
        F: FnOnce(amdpack_bundler::BundleOptions) -> amdpack_bundler::BundleOptions,
    {
        let options = bundle_options(declaration)
            .registry(Arc::clone(&self.registry))
            .transform(Arc::clone(&self.transform));
        Ok(adjust(options).build()?)
    }
}

/// Config settings for logger setup, or defaults when no config loads.
pub fn peek_settings(global: &GlobalArgs) -> GlobalSettings {
    locate_config(global)
        .and_then(|path| Ok(ProjectConfig::load(&path, global.profile.as_deref())?))
        .map(|config| config.settings)
        .unwrap_or_default()
}

fn locate_config(global: &GlobalArgs) -> Result<PathBuf> {
    let cwd = match &global.cwd {
        Some(dir) => utils::resolve_path(dir, &utils::get_cwd()?),
        None => utils::get_cwd()?,
    };

    match &global.config {
        Some(path) => {
            let path = utils::resolve_path(path, &cwd);
            if path.is_file() {
                Ok(path)
            } else {
                Err(CliError::FileNotFound(path))
            }
        }
        None => Ok(ConfigDiscovery::new(&cwd)
            .find()
            .ok_or(ConfigError::NotFound)?),
    }
}
