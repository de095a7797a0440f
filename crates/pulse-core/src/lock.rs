//! Run-level exclusive lock on a project target
//!
//! The lock file lives in the configured lock directory, named after a digest
//! of the target's normalized absolute path, so the project tree itself is
//! never touched. The lock is advisory and released by the OS when the
//! process exits.

use fd_lock::{RwLock, RwLockWriteGuard};
use sha2::{Digest, Sha256};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use crate::error::{PulseError, Result};
use crate::project::normalize;

pub struct TargetLock {
    file: RwLock<File>,
    target: PathBuf,
    path: PathBuf,
}

impl TargetLock {
    /// Open (creating if needed) the lock file for `target` inside `lock_dir`
    ///
    /// Every spelling of the same directory (`demo`, `./demo`, `/x/demo/`)
    /// maps to the same lock file.
    pub fn open(lock_dir: &Path, target: &Path) -> Result<Self> {
        let target = normalize(target)?;
        std::fs::create_dir_all(lock_dir)?;
        let path = lock_dir.join(lock_file_name(&target));
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(|source| PulseError::Write {
                path: path.clone(),
                source,
            })?;

        Ok(Self {
            file: RwLock::new(file),
            target,
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Take the lock without waiting; fails with `TargetLocked` if another run holds it
    pub fn try_acquire(&mut self) -> Result<RwLockWriteGuard<'_, File>> {
        tracing::debug!(lock = %self.path.display(), "acquiring target lock");
        let target = &self.target;
        self.file.try_write().map_err(|e| {
            tracing::debug!(error = %e, "target lock is held elsewhere");
            PulseError::TargetLocked(target.clone())
        })
    }
}

fn lock_file_name(target: &Path) -> String {
    let mut hasher = Sha256::new();
    hasher.update(target.as_os_str().as_encoded_bytes());
    let digest = hasher.finalize();
    format!("pulse-{}.lock", hex::encode(&digest[..16]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_lock_file_name_is_flat() {
        let name = lock_file_name(Path::new("/home/dev/projects/demo"));
        assert!(name.starts_with("pulse-"));
        assert!(name.ends_with(".lock"));
        assert_eq!(name.len(), "pulse-".len() + 32 + ".lock".len());
        assert!(!name.contains('/'));
    }

    #[test]
    fn test_similar_paths_get_distinct_lock_files() {
        assert_ne!(
            lock_file_name(Path::new("/a/b_c")),
            lock_file_name(Path::new("/a/b-c"))
        );
    }

    #[test]
    fn test_spellings_of_one_directory_share_a_lock_file() {
        let locks = TempDir::new().unwrap();
        let plain = TargetLock::open(locks.path(), &locks.path().join("demo")).unwrap();
        let dotted = TargetLock::open(locks.path(), &locks.path().join(".").join("demo")).unwrap();
        let detour = TargetLock::open(
            locks.path(),
            &locks.path().join("other").join("..").join("demo"),
        )
        .unwrap();

        assert_eq!(plain.path(), dotted.path());
        assert_eq!(plain.path(), detour.path());
    }

    #[cfg(unix)]
    #[test]
    fn test_dotted_spelling_is_rejected_while_locked() {
        let locks = TempDir::new().unwrap();
        let mut held = TargetLock::open(locks.path(), &locks.path().join("demo")).unwrap();
        let mut other =
            TargetLock::open(locks.path(), &locks.path().join(".").join("demo")).unwrap();

        let _guard = held.try_acquire().unwrap();
        assert!(matches!(
            other.try_acquire(),
            Err(PulseError::TargetLocked(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_second_acquire_is_rejected_until_release() {
        let locks = TempDir::new().unwrap();
        let target = locks.path().join("demo");

        let mut first = TargetLock::open(locks.path(), &target).unwrap();
        let mut second = TargetLock::open(locks.path(), &target).unwrap();
        assert_eq!(first.path(), second.path());

        let guard = first.try_acquire().unwrap();
        let err = second.try_acquire().unwrap_err();
        assert!(matches!(err, PulseError::TargetLocked(ref p) if p == &target));

        drop(guard);
        assert!(second.try_acquire().is_ok());
    }

    #[test]
    fn test_distinct_targets_do_not_contend() {
        let locks = TempDir::new().unwrap();
        let mut a = TargetLock::open(locks.path(), &locks.path().join("a")).unwrap();
        let mut b = TargetLock::open(locks.path(), &locks.path().join("b")).unwrap();

        let _a = a.try_acquire().unwrap();
        assert!(b.try_acquire().is_ok());
    }
}
