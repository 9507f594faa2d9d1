//! Bundle declarations.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the paths of a [`SourceEntry`] are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceEntryKind {
    /// Scripts under the owner's htdocs directory
    Plain,
    /// Runtime scripts under the owner's var htdocs directory
    Var,
    /// Scripts shipped with the framework for the owner
    Framework,
    /// Directories scanned for definition files and templates
    Directory,
}

impl SourceEntryKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Plain => "script",
            Self::Var => "var script",
            Self::Framework => "framework script",
            Self::Directory => "directory",
        }
    }
}

/// One ordered group of paths contributed by an owner module.
///
/// Sources are declared as an array so their order survives every config
/// format; entries for the same owner and kind are appended in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceEntry {
    #[serde(default = "default_kind")]
    pub kind: SourceEntryKind,

    pub module: String,

    #[serde(default)]
    pub paths: Vec<PathBuf>,
}

/// A named, versioned bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleConfig {
    /// Module that owns the compiled artifact
    pub module: String,

    pub name: String,

    /// Bump to invalidate previously compiled artifacts
    pub version: String,

    #[serde(default)]
    pub debug: bool,

    #[serde(default)]
    pub watch: bool,

    #[serde(default = "default_true")]
    pub compress: bool,

    #[serde(default)]
    pub sources: Vec<SourceEntry>,
}

impl BundleConfig {
    /// `module/name`, the handle used on the command line.
    pub fn id(&self) -> String {
        format!("{}/{}", self.module, self.name)
    }

    /// Whether `handle` selects this bundle (`name` or `module/name`).
    pub fn matches(&self, handle: &str) -> bool {
        handle == self.name || handle == self.id()
    }

    pub fn sources_of(&self, kind: SourceEntryKind) -> impl Iterator<Item = &SourceEntry> {
        self.sources.iter().filter(move |s| s.kind == kind)
    }
}

fn default_kind() -> SourceEntryKind {
    SourceEntryKind::Plain
}

fn default_true() -> bool {
    true
}
