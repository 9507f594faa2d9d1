//! Filesystem and URL layout of a project.
//!
//! Describes where module sources live, where runtime (var) files and the
//! compiled artifacts are kept, and the URL prefix they are served under.

use serde::{Deserialize, Serialize};

use crate::bundle::SourceEntryKind;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// URL prefix prepended to every script URL (e.g. "" or "/app")
    #[serde(default)]
    pub root_http: String,

    /// Directory holding `<module>/htdocs` trees
    #[serde(default = "default_modules_dir")]
    pub modules_dir: PathBuf,

    /// Variable data directory; runtime scripts and compiled bundles live
    /// under `<var_dir>/htdocs/modulesVar/<module>`
    #[serde(default = "default_var_dir")]
    pub var_dir: PathBuf,

    /// Directory holding framework-provided scripts, one subdirectory per module
    #[serde(default = "default_framework_dir")]
    pub framework_dir: PathBuf,

    /// Module whose var htdocs directory receives compiled bundles
    #[serde(default = "default_cache_module")]
    pub cache_module: String,

    /// Explicit htdocs directories for modules outside `modules_dir`
    #[serde(default)]
    pub modules: BTreeMap<String, PathBuf>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            root_http: String::new(),
            modules_dir: default_modules_dir(),
            var_dir: default_var_dir(),
            framework_dir: default_framework_dir(),
            cache_module: default_cache_module(),
            modules: BTreeMap::new(),
        }
    }
}

fn default_modules_dir() -> PathBuf {
    PathBuf::from("modules")
}

fn default_var_dir() -> PathBuf {
    PathBuf::from("var")
}

fn default_framework_dir() -> PathBuf {
    PathBuf::from("framework")
}

fn default_cache_module() -> String {
    "amdpack".to_string()
}

impl LayoutConfig {
    /// Join every relative directory onto `base`.
    pub fn resolve_against(&mut self, base: &Path) {
        let join = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        };

        join(&mut self.modules_dir);
        join(&mut self.var_dir);
        join(&mut self.framework_dir);
        for dir in self.modules.values_mut() {
            join(dir);
        }
    }

    /// Root of the var htdocs tree, `<var_dir>/htdocs/modulesVar`.
    pub fn var_htdocs(&self) -> PathBuf {
        self.var_dir.join("htdocs").join("modulesVar")
    }

    /// Directory the paths of a source entry are relative to.
    pub fn source_base(&self, kind: SourceEntryKind, module: &str) -> PathBuf {
        match kind {
            SourceEntryKind::Plain | SourceEntryKind::Directory => self.htdocs(module),
            SourceEntryKind::Var => self.var_htdocs().join(module),
            SourceEntryKind::Framework => self.framework_dir.join(module),
        }
    }

    /// Plain htdocs directory of `module`, honouring explicit overrides.
    pub fn htdocs(&self, module: &str) -> PathBuf {
        match self.modules.get(module) {
            Some(dir) => dir.clone(),
            None => self.modules_dir.join(module).join("htdocs"),
        }
    }
}
