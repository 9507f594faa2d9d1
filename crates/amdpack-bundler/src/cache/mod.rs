//! On-disk cache of compiled bundles.
//!
//! One file per [`ArtifactKey`] in the cache directory. An artifact is
//! trusted as long as it exists unless the caller asks to watch sources, in
//! which case it is rebuilt when any source is newer than it.
//!
//! Rebuilds for a key are serialized through an advisory lock next to the
//! artifact, and every write goes through a temp file plus rename so readers
//! see either the old bytes, the placeholder or the new bytes. A placeholder
//! is never treated as a usable artifact.

mod key;
mod lock;

pub use key::ArtifactKey;
pub use lock::ArtifactLock;

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tempfile::NamedTempFile;

use crate::{Error, Result};

/// Marks an artifact whose first build is still running.
pub const PLACEHOLDER_PREFIX: &str = "// hang on - i am working on it";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactState {
    Missing,
    Stale,
    Fresh,
}

impl ArtifactState {
    pub fn needs_rebuild(&self) -> bool {
        !self.is_fresh()
    }

    pub fn is_fresh(&self) -> bool {
        matches!(self, ArtifactState::Fresh)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactState::Missing => "missing",
            ArtifactState::Stale => "stale",
            ArtifactState::Fresh => "fresh",
        }
    }
}

impl std::fmt::Display for ArtifactState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of [`ArtifactCache::ensure`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnsureOutcome {
    /// State observed once the lock was held.
    pub state: ArtifactState,
    pub path: PathBuf,
    pub rebuilt: bool,
}

#[derive(Debug, Clone)]
pub struct ArtifactCache {
    dir: PathBuf,
}

impl ArtifactCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn file_name(&self, key: &ArtifactKey) -> String {
        key.file_name()
    }

    pub fn path_for(&self, key: &ArtifactKey) -> PathBuf {
        self.dir.join(key.file_name())
    }

    /// Classify the artifact for `key`.
    ///
    /// A placeholder counts as `Missing`. `last_source` is only called when
    /// a built artifact exists and `watch` is set.
    pub fn state<S>(&self, key: &ArtifactKey, watch: bool, last_source: S) -> Result<ArtifactState>
    where
        S: FnOnce() -> Result<SystemTime>,
    {
        let path = self.path_for(key);
        let artifact_modified = match fs::metadata(&path) {
            Ok(meta) => meta
                .modified()
                .map_err(|err| Error::io(format!("failed to stat {}", path.display()), err))?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(ArtifactState::Missing);
            }
            Err(err) => {
                return Err(Error::io(format!("failed to stat {}", path.display()), err));
            }
        };

        match holds_placeholder(&path) {
            Ok(false) => {}
            Ok(true) => return Ok(ArtifactState::Missing),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(ArtifactState::Missing);
            }
            Err(err) => {
                return Err(Error::io(format!("failed to read {}", path.display()), err));
            }
        }

        if !watch {
            return Ok(ArtifactState::Fresh);
        }

        if last_source()? > artifact_modified {
            Ok(ArtifactState::Stale)
        } else {
            Ok(ArtifactState::Fresh)
        }
    }

    /// Make sure the artifact for `key` exists and, in watch mode, is not
    /// older than its sources.
    ///
    /// `last_source` doubles as a preflight check: it runs before anything
    /// is written for a missing artifact, so a bundle with a missing source
    /// leaves the cache untouched. When `rebuild` fails the placeholder this
    /// call wrote is removed and a stale artifact is left as it was.
    ///
    /// Without `watch` a built artifact is returned without taking the lock,
    /// so a read-only cache directory works once it is populated. A
    /// placeholder still on disk once the lock is held belongs to a build that
    /// died, and is rebuilt like a missing artifact.
    pub fn ensure<S, R>(
        &self,
        key: &ArtifactKey,
        watch: bool,
        last_source: S,
        rebuild: R,
    ) -> Result<EnsureOutcome>
    where
        S: FnOnce() -> Result<SystemTime>,
        R: FnOnce() -> Result<Vec<u8>>,
    {
        let path = self.path_for(key);
        if !watch && self.state(key, false, || Ok(SystemTime::UNIX_EPOCH))?.is_fresh() {
            tracing::debug!(artifact = %path.display(), "artifact is fresh");
            return Ok(EnsureOutcome {
                state: ArtifactState::Fresh,
                path,
                rebuilt: false,
            });
        }

        fs::create_dir_all(&self.dir).map_err(|err| {
            Error::io(
                format!("failed to create cache directory {}", self.dir.display()),
                err,
            )
        })?;

        let _guard = ArtifactLock::acquire(&path)?;

        let mut last_source = Some(last_source);
        let state = self.state(key, watch, || match last_source.take() {
            Some(f) => f(),
            None => Ok(SystemTime::UNIX_EPOCH),
        })?;

        if !state.needs_rebuild() {
            tracing::debug!(artifact = %path.display(), "artifact is fresh");
            return Ok(EnsureOutcome {
                state,
                path,
                rebuilt: false,
            });
        }

        let wrote_placeholder = if state == ArtifactState::Missing {
            if path.exists() {
                tracing::warn!(
                    artifact = %path.display(),
                    "discarding placeholder of an interrupted build"
                );
            }
            if let Some(preflight) = last_source.take() {
                preflight()?;
            }
            write_atomic(&path, placeholder().as_bytes())?;
            true
        } else {
            false
        };

        tracing::info!(artifact = %path.display(), %state, "rebuilding artifact");

        let bytes = match rebuild() {
            Ok(bytes) => bytes,
            Err(err) => {
                if wrote_placeholder {
                    remove_placeholder(&path);
                }
                return Err(err);
            }
        };

        write_atomic(&path, &bytes)?;

        Ok(EnsureOutcome {
            state,
            path,
            rebuilt: true,
        })
    }
}

fn placeholder() -> String {
    format!(
        "{} {}",
        PLACEHOLDER_PREFIX,
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    )
}

fn remove_placeholder(path: &Path) {
    match fs::read(path) {
        Ok(bytes) if is_placeholder(&bytes) => {
            if let Err(err) = fs::remove_file(path) {
                tracing::warn!(artifact = %path.display(), "failed to remove placeholder: {}", err);
            }
        }
        _ => {}
    }
}

fn holds_placeholder(path: &Path) -> io::Result<bool> {
    let mut head = Vec::with_capacity(PLACEHOLDER_PREFIX.len());
    fs::File::open(path)?
        .take(PLACEHOLDER_PREFIX.len() as u64)
        .read_to_end(&mut head)?;
    Ok(is_placeholder(&head))
}

/// Whether `bytes` is a placeholder rather than a compiled bundle.
pub fn is_placeholder(bytes: &[u8]) -> bool {
    bytes.starts_with(PLACEHOLDER_PREFIX.as_bytes())
}

/// Replace `path` with `bytes` through a temp file in the same directory.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)
        .map_err(|err| Error::io(format!("failed to create {}", dir.display()), err))?;

    let mut temp = NamedTempFile::new_in(dir)
        .map_err(|err| Error::io(format!("failed to create temp file in {}", dir.display()), err))?;
    temp.write_all(bytes)
        .and_then(|()| temp.flush())
        .map_err(|err| Error::io(format!("failed to write {}", temp.path().display()), err))?;
    temp.persist(path)
        .map_err(|err| Error::io(format!("failed to replace {}", path.display()), err.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::time::Duration;
    use tempfile::TempDir;

    fn key() -> ArtifactKey {
        ArtifactKey::new("app", "main", "1.0", false).unwrap()
    }

    fn set_mtime(path: &Path, time: SystemTime) {
        fs::File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(time)
            .unwrap();
    }

    #[test]
    fn missing_artifact_is_missing() {
        let dir = TempDir::new().unwrap();
        let cache = ArtifactCache::new(dir.path());

        let state = cache
            .state(&key(), true, || panic!("sources are not consulted"))
            .unwrap();
        assert_eq!(state, ArtifactState::Missing);
    }

    #[test]
    fn existing_artifact_is_trusted_without_watch() {
        let dir = TempDir::new().unwrap();
        let cache = ArtifactCache::new(dir.path());
        fs::write(cache.path_for(&key()), "old").unwrap();

        let state = cache
            .state(&key(), false, || panic!("sources are not consulted"))
            .unwrap();
        assert_eq!(state, ArtifactState::Fresh);
    }

    #[test]
    fn watch_compares_mtimes() {
        let dir = TempDir::new().unwrap();
        let cache = ArtifactCache::new(dir.path());
        let path = cache.path_for(&key());
        fs::write(&path, "old").unwrap();
        let built = SystemTime::now() - Duration::from_secs(60);
        set_mtime(&path, built);

        let newer = built + Duration::from_secs(10);
        let older = built - Duration::from_secs(10);
        assert_eq!(cache.state(&key(), true, || Ok(newer)).unwrap(), ArtifactState::Stale);
        assert_eq!(cache.state(&key(), true, || Ok(older)).unwrap(), ArtifactState::Fresh);
        assert_eq!(cache.state(&key(), true, || Ok(built)).unwrap(), ArtifactState::Fresh);
    }

    #[test]
    fn ensure_builds_missing_artifact_once() {
        let dir = TempDir::new().unwrap();
        let cache = ArtifactCache::new(dir.path().join("cache"));
        let builds = Cell::new(0);

        let rebuild = || {
            builds.set(builds.get() + 1);
            Ok::<_, Error>(b"compiled".to_vec())
        };
        let first = cache
            .ensure(&key(), false, || Ok(SystemTime::UNIX_EPOCH), rebuild)
            .unwrap();
        assert_eq!(first.state, ArtifactState::Missing);
        assert!(first.rebuilt);
        assert_eq!(fs::read(&first.path).unwrap(), b"compiled");

        let rebuild = || {
            builds.set(builds.get() + 1);
            Ok::<_, Error>(b"again".to_vec())
        };
        let second = cache
            .ensure(&key(), false, || Ok(SystemTime::UNIX_EPOCH), rebuild)
            .unwrap();
        assert_eq!(second.state, ArtifactState::Fresh);
        assert!(!second.rebuilt);
        assert_eq!(builds.get(), 1);
        assert_eq!(fs::read(&second.path).unwrap(), b"compiled");
    }

    #[test]
    fn failed_first_build_leaves_no_artifact() {
        let dir = TempDir::new().unwrap();
        let cache = ArtifactCache::new(dir.path());

        let err = cache
            .ensure(
                &key(),
                false,
                || Ok(SystemTime::UNIX_EPOCH),
                || Err(Error::InvalidConfig("boom".to_string())),
            )
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
        assert!(!cache.path_for(&key()).exists());
    }

    #[test]
    fn failed_preflight_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let cache = ArtifactCache::new(dir.path());

        let err = cache
            .ensure(
                &key(),
                false,
                || Err(Error::NotFound(dir.path().join("js"))),
                || panic!("rebuild must not run"),
            )
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert!(!cache.path_for(&key()).exists());
    }

    #[test]
    fn failed_rebuild_keeps_stale_artifact() {
        let dir = TempDir::new().unwrap();
        let cache = ArtifactCache::new(dir.path());
        let path = cache.path_for(&key());
        fs::write(&path, "last good").unwrap();
        set_mtime(&path, SystemTime::now() - Duration::from_secs(60));

        let result = cache.ensure(
            &key(),
            true,
            || Ok(SystemTime::now()),
            || Err(Error::InvalidConfig("boom".to_string())),
        );
        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "last good");
    }

    #[test]
    fn leftover_placeholder_counts_as_missing() {
        let dir = TempDir::new().unwrap();
        let cache = ArtifactCache::new(dir.path());
        fs::write(cache.path_for(&key()), placeholder()).unwrap();

        for watch in [false, true] {
            let state = cache
                .state(&key(), watch, || panic!("sources are not consulted"))
                .unwrap();
            assert_eq!(state, ArtifactState::Missing);
        }
    }

    #[test]
    fn ensure_replaces_leftover_placeholder() {
        let dir = TempDir::new().unwrap();
        let cache = ArtifactCache::new(dir.path());
        let path = cache.path_for(&key());
        fs::write(&path, placeholder()).unwrap();

        let outcome = cache
            .ensure(
                &key(),
                false,
                || Ok(SystemTime::UNIX_EPOCH),
                || Ok(b"compiled".to_vec()),
            )
            .unwrap();
        assert_eq!(outcome.state, ArtifactState::Missing);
        assert!(outcome.rebuilt);
        assert_eq!(fs::read(&path).unwrap(), b"compiled");
    }

    #[test]
    fn fresh_artifact_is_served_without_lock() {
        let dir = TempDir::new().unwrap();
        let cache = ArtifactCache::new(dir.path());
        let path = cache.path_for(&key());
        fs::write(&path, "compiled").unwrap();

        let outcome = cache
            .ensure(
                &key(),
                false,
                || panic!("sources are not consulted"),
                || panic!("rebuild must not run"),
            )
            .unwrap();
        assert_eq!(outcome.state, ArtifactState::Fresh);
        assert!(!lock::lock_path(&path).exists());
    }

    #[test]
    fn placeholder_is_recognized() {
        assert!(is_placeholder(placeholder().as_bytes()));
        assert!(!is_placeholder(b"define([], 1);"));
    }

    #[test]
    fn write_atomic_replaces_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/out.js");

        write_atomic(&path, b"one").unwrap();
        write_atomic(&path, b"two").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"two");
        let leftovers: Vec<_> = fs::read_dir(path.parent().unwrap())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(leftovers.len(), 1);
    }
}
