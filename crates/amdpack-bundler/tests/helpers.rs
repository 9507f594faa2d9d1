//! Shared test utilities for amdpack-bundler tests
//!
//! Builds throwaway project trees laid out the way `FsRegistry` expects.

#![allow(dead_code)]

use amdpack_bundler::{FsRegistry, ModuleRegistry, Transform, TransformError};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

pub struct Project {
    pub dir: TempDir,
}

impl Project {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn htdocs(&self, module: &str) -> PathBuf {
        self.root().join("modules").join(module).join("htdocs")
    }

    pub fn var_htdocs(&self, module: &str) -> PathBuf {
        self.root().join("var/htdocs/modulesVar").join(module)
    }

    pub fn framework(&self, module: &str) -> PathBuf {
        self.root().join("framework").join(module)
    }

    pub fn registry(&self) -> Arc<dyn ModuleRegistry> {
        Arc::new(
            FsRegistry::new(
                self.root().join("modules"),
                self.root().join("var"),
                self.root().join("framework"),
            )
            .root_http("/site"),
        )
    }

    /// Write a script under `module`'s htdocs.
    pub fn script(&self, module: &str, rel: &str, content: &str) -> PathBuf {
        write(&self.htdocs(module).join(rel), content)
    }

    pub fn var_script(&self, module: &str, rel: &str, content: &str) -> PathBuf {
        write(&self.var_htdocs(module).join(rel), content)
    }

    pub fn framework_script(&self, module: &str, rel: &str, content: &str) -> PathBuf {
        write(&self.framework(module).join(rel), content)
    }
}

pub fn write(path: &Path, content: &str) -> PathBuf {
    fs::create_dir_all(path.parent().expect("parent")).expect("create dirs");
    fs::write(path, content).expect("write file");
    path.to_path_buf()
}

pub fn set_mtime(path: &Path, time: SystemTime) {
    fs::File::options()
        .write(true)
        .open(path)
        .expect("open for mtime")
        .set_modified(time)
        .expect("set mtime");
}

pub fn mtime(path: &Path) -> SystemTime {
    fs::metadata(path).expect("stat").modified().expect("mtime")
}

pub fn minutes_ago(minutes: u64) -> SystemTime {
    SystemTime::now() - Duration::from_secs(minutes * 60)
}

/// Transform that always fails like a minifier exiting with status 1.
pub struct FailingTransform;

impl Transform for FailingTransform {
    fn name(&self) -> &str {
        "failing"
    }

    fn apply(&self, _input: &[u8]) -> Result<Vec<u8>, TransformError> {
        Err(TransformError::failed("failing", Some(1), "Unexpected token"))
    }
}

/// Transform that upper-cases its input and counts calls.
#[derive(Default)]
pub struct ShoutingTransform {
    pub calls: AtomicUsize,
}

impl ShoutingTransform {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Transform for ShoutingTransform {
    fn name(&self) -> &str {
        "shouting"
    }

    fn apply(&self, input: &[u8]) -> Result<Vec<u8>, TransformError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(input.to_ascii_uppercase())
    }
}
