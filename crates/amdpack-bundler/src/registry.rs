//! Module registry: where a module's sources live and how they are served.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use crate::bundle::SourceKind;
use crate::{Error, Result};

/// Pure lookups from module names to directories and URLs.
pub trait ModuleRegistry: Send + Sync {
    /// Directory the relative paths of `kind` sources of `module` resolve against.
    fn source_dir(&self, module: &str, kind: SourceKind) -> Result<PathBuf>;

    /// URL prefix for the same directory, without a trailing `/`.
    fn source_url(&self, module: &str, kind: SourceKind) -> Result<String>;

    /// Directory holding compiled artifacts.
    fn cache_dir(&self) -> PathBuf;

    /// URL a compiled artifact named `file_name` is served from.
    fn cache_url(&self, file_name: &str) -> String;
}

/// Registry backed by a conventional directory layout:
///
/// | kind      | directory                                 | URL                          |
/// |-----------|-------------------------------------------|------------------------------|
/// | plain     | `<modules_dir>/<module>/htdocs`           | `<root_http>/modules/<m>`    |
/// | var       | `<var_dir>/htdocs/modulesVar/<module>`    | `<root_http>/modulesVar/<m>` |
/// | framework | `<framework_dir>/<module>`                | `<root_http>/framework/<m>`  |
///
/// Compiled bundles go to the var directory of `cache_module`.
#[derive(Debug, Clone)]
pub struct FsRegistry {
    root_http: String,
    modules_dir: PathBuf,
    var_dir: PathBuf,
    framework_dir: PathBuf,
    cache_module: String,
    modules: BTreeMap<String, PathBuf>,
}

impl FsRegistry {
    pub fn new(
        modules_dir: impl Into<PathBuf>,
        var_dir: impl Into<PathBuf>,
        framework_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            root_http: String::new(),
            modules_dir: modules_dir.into(),
            var_dir: var_dir.into(),
            framework_dir: framework_dir.into(),
            cache_module: "amdpack".to_string(),
            modules: BTreeMap::new(),
        }
    }

    pub fn root_http(mut self, root_http: impl Into<String>) -> Self {
        self.root_http = root_http.into().trim_end_matches('/').to_string();
        self
    }

    pub fn cache_module(mut self, module: impl Into<String>) -> Self {
        self.cache_module = module.into();
        self
    }

    /// Place `module`'s htdocs somewhere other than `<modules_dir>/<module>/htdocs`.
    pub fn module(mut self, module: impl Into<String>, htdocs: impl Into<PathBuf>) -> Self {
        self.modules.insert(module.into(), htdocs.into());
        self
    }

    fn var_htdocs(&self) -> PathBuf {
        self.var_dir.join("htdocs").join("modulesVar")
    }

    fn is_known(&self, module: &str) -> bool {
        self.modules.contains_key(module)
            || self.modules_dir.join(module).is_dir()
            || self.var_htdocs().join(module).is_dir()
            || self.framework_dir.join(module).is_dir()
    }

    fn ensure_known(&self, module: &str) -> Result<()> {
        if module.is_empty() || !self.is_known(module) {
            return Err(Error::UnknownModule(module.to_string()));
        }
        Ok(())
    }
}

impl ModuleRegistry for FsRegistry {
    fn source_dir(&self, module: &str, kind: SourceKind) -> Result<PathBuf> {
        self.ensure_known(module)?;
        Ok(match kind {
            SourceKind::Plain => match self.modules.get(module) {
                Some(dir) => dir.clone(),
                None => self.modules_dir.join(module).join("htdocs"),
            },
            SourceKind::Var => self.var_htdocs().join(module),
            SourceKind::Framework => self.framework_dir.join(module),
        })
    }

    fn source_url(&self, module: &str, kind: SourceKind) -> Result<String> {
        self.ensure_known(module)?;
        let segment = match kind {
            SourceKind::Plain => "modules",
            SourceKind::Var => "modulesVar",
            SourceKind::Framework => "framework",
        };
        Ok(format!("{}/{}/{}", self.root_http, segment, module))
    }

    fn cache_dir(&self) -> PathBuf {
        self.var_htdocs().join(&self.cache_module)
    }

    fn cache_url(&self, file_name: &str) -> String {
        format!(
            "{}/modulesVar/{}/{}",
            self.root_http, self.cache_module, file_name
        )
    }
}

/// Join a `/`-separated relative path onto a URL prefix.
pub(crate) fn join_url(prefix: &str, relative: &Path) -> String {
    let tail = relative
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    format!("{}/{}", prefix, tail)
}
