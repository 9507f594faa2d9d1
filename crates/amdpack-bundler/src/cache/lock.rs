use std::ffi::OsString;
use std::path::{Path, PathBuf};

use fslock::LockFile;

use crate::{Error, Result};

/// RAII guard for an artifact's advisory lock at `<artifact>.lock`.
///
/// The lock file is left on disk after release: deleting it would let a
/// waiter that already opened it hold a lock nobody else can see.
#[derive(Debug)]
pub struct ArtifactLock {
    lock: LockFile,
    path: PathBuf,
}

impl ArtifactLock {
    /// Block until the lock for `artifact` is held.
    pub fn acquire(artifact: &Path) -> Result<Self> {
        let path = lock_path(artifact);

        let mut lock = LockFile::open(&path).map_err(|e| Error::Lock {
            path: path.clone(),
            message: format!("failed to open lock file: {}", e),
        })?;

        lock.lock().map_err(|e| Error::Lock {
            path: path.clone(),
            message: e.to_string(),
        })?;

        tracing::trace!(lock = %path.display(), "acquired artifact lock");
        Ok(Self { lock, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ArtifactLock {
    fn drop(&mut self) {
        let _ = self.lock.unlock();
    }
}

pub(crate) fn lock_path(artifact: &Path) -> PathBuf {
    let mut name = OsString::from(artifact.as_os_str());
    name.push(".lock");
    PathBuf::from(name)
}
