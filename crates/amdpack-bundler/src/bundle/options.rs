use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use super::{Bundle, OwnedPaths, SourceGroups, SourceKind};
use crate::cache::{ArtifactCache, ArtifactKey};
use crate::registry::ModuleRegistry;
use crate::transform::{CommandTransform, Transform};
use crate::{Error, Result};

/// Configuration of a bundle before it is built.
///
/// Every method consumes and returns the options, so a bundle is declared
/// in one chain and [`build`](BundleOptions::build) validates it once.
#[derive(Clone)]
pub struct BundleOptions {
    /// Module owning the compiled artifact.
    pub module: String,

    pub name: String,

    /// Bump to retire previously compiled artifacts.
    pub version: String,

    /// Explicit scripts per group and owner.
    pub sources: SourceGroups,

    /// Directories scanned for definition files and templates, relative to
    /// the owner's htdocs directory.
    pub directories: OwnedPaths,

    /// Link individual scripts instead of the compiled artifact (default: false).
    pub debug: bool,

    /// Rebuild the artifact when a source is newer than it (default: false).
    pub watch: bool,

    /// Run the transform over the concatenation (default: true).
    pub compress: bool,

    pub registry: Option<Arc<dyn ModuleRegistry>>,

    /// Defaults to [`CommandTransform::uglifyjs`].
    pub transform: Option<Arc<dyn Transform>>,
}

impl BundleOptions {
    pub fn new(
        module: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            module: module.into(),
            name: name.into(),
            version: version.into(),
            sources: SourceGroups::default(),
            directories: OwnedPaths::default(),
            debug: false,
            watch: false,
            compress: true,
            registry: None,
            transform: None,
        }
    }

    /// Add scripts from `owner`'s htdocs directory.
    pub fn add_scripts<I, P>(self, owner: impl Into<String>, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.add_group(SourceKind::Plain, owner, paths)
    }

    /// Add scripts from `owner`'s var htdocs directory.
    pub fn add_var_scripts<I, P>(self, owner: impl Into<String>, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.add_group(SourceKind::Var, owner, paths)
    }

    /// Add framework scripts provided for `owner`.
    pub fn add_framework_scripts<I, P>(self, owner: impl Into<String>, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.add_group(SourceKind::Framework, owner, paths)
    }

    /// Add directories to scan under `owner`'s htdocs directory.
    pub fn add_directories<I, P>(mut self, owner: impl Into<String>, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.directories.add(owner, dirs);
        self
    }

    fn add_group<I, P>(mut self, kind: SourceKind, owner: impl Into<String>, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.sources.add(kind, owner, paths);
        self
    }

    pub fn debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }

    pub fn watch(mut self, enabled: bool) -> Self {
        self.watch = enabled;
        self
    }

    pub fn compress(mut self, enabled: bool) -> Self {
        self.compress = enabled;
        self
    }

    pub fn registry(mut self, registry: Arc<dyn ModuleRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn transform(mut self, transform: Arc<dyn Transform>) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Validate the identity and freeze the options into a [`Bundle`].
    ///
    /// # Errors
    ///
    /// `Error::InvalidIdentity` when module, name or version cannot be part
    /// of a file name; `Error::InvalidConfig` without a registry or when a
    /// script or directory is not a relative path inside its owner.
    pub fn build(self) -> Result<Bundle> {
        let key = ArtifactKey::new(self.module, self.name, self.version, self.compress)?;

        for (_, owner, paths) in self.sources.iter() {
            for path in paths {
                check_contained(owner, path, "script")?;
            }
        }
        for (owner, dirs) in self.directories.iter() {
            for dir in dirs {
                check_contained(owner, dir, "directory")?;
            }
        }

        let registry = self.registry.ok_or_else(|| {
            Error::InvalidConfig(format!("bundle {} has no module registry", key))
        })?;
        let transform = self
            .transform
            .unwrap_or_else(|| Arc::new(CommandTransform::uglifyjs()) as Arc<dyn Transform>);
        let cache = ArtifactCache::new(registry.cache_dir());

        Ok(Bundle {
            key,
            sources: self.sources,
            directories: self.directories,
            debug: self.debug,
            watch: self.watch,
            registry,
            transform,
            cache,
        })
    }
}

/// Sources are joined onto the owner's directory, so they must not be
/// absolute or climb out of it.
fn check_contained(owner: &str, path: &Path, what: &str) -> Result<()> {
    let contained = path
        .components()
        .all(|component| matches!(component, Component::Normal(_) | Component::CurDir));
    if contained {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!(
            "{} '{}' of module '{}' must be a relative path inside the module",
            what,
            path.display(),
            owner
        )))
    }
}

impl fmt::Debug for BundleOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BundleOptions")
            .field("module", &self.module)
            .field("name", &self.name)
            .field("version", &self.version)
            .field("sources", &self.sources)
            .field("directories", &self.directories)
            .field("debug", &self.debug)
            .field("watch", &self.watch)
            .field("compress", &self.compress)
            .field("registry", &self.registry.is_some())
            .field("transform", &self.transform.as_ref().map(|t| t.name().to_string()))
            .finish()
    }
}
