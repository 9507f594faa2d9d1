//! Bundle builder.
//!
//! A [`Bundle`] is declared through [`BundleOptions`] and then either linked
//! script by script (debug) or compiled into one cached artifact.

mod compile;
mod options;
mod sources;

pub use compile::CompileReport;
pub use options::BundleOptions;
pub use sources::{OwnedPaths, SourceGroups, SourceKind};

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use crate::cache::{ArtifactCache, ArtifactKey};
use crate::output::{Document, EmbedSpec};
use crate::registry::{ModuleRegistry, join_url};
use crate::scanner::{DefinitionMarker, ScanResult, TemplateFiles, scan};
use crate::templates::template_definitions;
use crate::transform::Transform;
use crate::{Error, Result};

/// A validated bundle, ready to be linked or compiled.
pub struct Bundle {
    key: ArtifactKey,
    sources: SourceGroups,
    directories: OwnedPaths,
    debug: bool,
    watch: bool,
    registry: Arc<dyn ModuleRegistry>,
    transform: Arc<dyn Transform>,
    cache: ArtifactCache,
}

impl fmt::Debug for Bundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bundle")
            .field("key", &self.key)
            .field("sources", &self.sources)
            .field("directories", &self.directories)
            .field("debug", &self.debug)
            .field("watch", &self.watch)
            .field("transform", &self.transform.name())
            .field("cache", &self.cache)
            .finish()
    }
}

/// An explicit script resolved against the registry.
struct ScriptRef<'a> {
    kind: SourceKind,
    owner: &'a str,
    relative: &'a Path,
    path: PathBuf,
}

/// A registered directory and the definition files found in it.
struct ScannedDir<'a> {
    owner: &'a str,
    relative: &'a Path,
    path: PathBuf,
    definitions: ScanResult,
}

impl Bundle {
    pub fn key(&self) -> &ArtifactKey {
        &self.key
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub fn is_watching(&self) -> bool {
        self.watch
    }

    pub fn is_compressed(&self) -> bool {
        self.key.compressed()
    }

    pub fn sources(&self) -> &SourceGroups {
        &self.sources
    }

    pub fn directories(&self) -> &OwnedPaths {
        &self.directories
    }

    pub fn compiled_file_name(&self) -> String {
        self.cache.file_name(&self.key)
    }

    pub fn compiled_path(&self) -> PathBuf {
        self.cache.path_for(&self.key)
    }

    pub fn compiled_url(&self) -> String {
        self.registry.cache_url(&self.compiled_file_name())
    }

    /// Newest modification time over every explicit script, definition file
    /// and template. `UNIX_EPOCH` for a bundle without sources.
    ///
    /// # Errors
    ///
    /// `Error::MissingSource` for a missing script, `Error::NotFound` for a
    /// missing directory.
    pub fn last_source_modified(&self) -> Result<SystemTime> {
        let mut newest = SystemTime::UNIX_EPOCH;

        for script in self.scripts()? {
            newest = newest.max(stat_script(&script)?);
        }

        for dir in self.scanned_directories()? {
            let templates = scan(&dir.path, &TemplateFiles::default())?;
            newest = newest
                .max(dir.definitions.last_modified)
                .max(templates.last_modified);
        }

        tracing::debug!(bundle = %self.key, "computed last source modification");
        Ok(newest)
    }

    /// Describe how the bundle is embedded in a page.
    ///
    /// Debug mode lists plain, var and framework scripts (owners in the
    /// order they were added) followed by the definition files of every
    /// directory, and carries the template definitions inline. Otherwise the
    /// artifact is compiled if needed and referenced by one URL.
    pub fn resolve_for_embedding(&self) -> Result<EmbedSpec> {
        if !self.debug {
            self.ensure_compiled()?;
            return Ok(EmbedSpec::Compiled {
                url: self.compiled_url(),
            });
        }

        let mut scripts = Vec::with_capacity(self.sources.len());
        for script in self.scripts()? {
            stat_script(&script)?;
            let base = self.registry.source_url(script.owner, script.kind)?;
            scripts.push(join_url(&base, script.relative));
        }

        let mut inline = String::new();
        for dir in self.scanned_directories()? {
            let base = self.registry.source_url(dir.owner, SourceKind::Plain)?;
            for file in &dir.definitions.files {
                let within = file.strip_prefix(&dir.path).unwrap_or(file);
                scripts.push(join_url(&base, &dir.relative.join(within)));
            }
            inline.push_str(&template_definitions(&dir.path)?.script);
        }

        Ok(EmbedSpec::Debug { scripts, inline })
    }

    /// Attach the bundle to `document`.
    pub fn link_to(&self, document: &mut dyn Document) -> Result<()> {
        match self.resolve_for_embedding()? {
            EmbedSpec::Debug { scripts, inline } => {
                if !scripts.is_empty() {
                    document.add_scripts(&scripts);
                }
                if !inline.is_empty() {
                    document.add_script(&inline);
                }
            }
            EmbedSpec::Compiled { url } => document.add_scripts(&[url]),
        }
        Ok(())
    }

    fn scripts(&self) -> Result<Vec<ScriptRef<'_>>> {
        let mut scripts = Vec::with_capacity(self.sources.len());
        for (kind, owner, paths) in self.sources.iter() {
            let base = self.registry.source_dir(owner, kind)?;
            for relative in paths {
                scripts.push(ScriptRef {
                    kind,
                    owner,
                    relative: relative.as_path(),
                    path: base.join(relative),
                });
            }
        }
        Ok(scripts)
    }

    fn scanned_directories(&self) -> Result<Vec<ScannedDir<'_>>> {
        let marker = DefinitionMarker::default();
        let mut dirs = Vec::with_capacity(self.directories.len());
        for (owner, relatives) in self.directories.iter() {
            let base = self.registry.source_dir(owner, SourceKind::Plain)?;
            for relative in relatives {
                let path = base.join(relative);
                let definitions = scan(&path, &marker)?;
                dirs.push(ScannedDir {
                    owner,
                    relative: relative.as_path(),
                    path,
                    definitions,
                });
            }
        }
        Ok(dirs)
    }
}

fn stat_script(script: &ScriptRef<'_>) -> Result<SystemTime> {
    let meta = fs::metadata(&script.path).map_err(|err| missing_or_io(script, err))?;
    if !meta.is_file() {
        return Err(Error::MissingSource {
            module: script.owner.to_string(),
            path: script.path.clone(),
        });
    }
    meta.modified()
        .map_err(|err| Error::io(format!("failed to stat {}", script.path.display()), err))
}

fn read_script(script: &ScriptRef<'_>) -> Result<Vec<u8>> {
    fs::read(&script.path).map_err(|err| missing_or_io(script, err))
}

fn missing_or_io(script: &ScriptRef<'_>, err: io::Error) -> Error {
    if err.kind() == io::ErrorKind::NotFound {
        Error::MissingSource {
            module: script.owner.to_string(),
            path: script.path.clone(),
        }
    } else {
        Error::io(format!("failed to read {}", script.path.display()), err)
    }
}
