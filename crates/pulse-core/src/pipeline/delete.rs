//! Guarded recursive deletion of a project directory

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::Settings;
use crate::error::{PulseError, Result};
use crate::lock::TargetLock;
use crate::manifest::MANIFEST_FILE;
use crate::project::normalize;
use crate::prompt::PromptGateway;
use crate::report;

#[derive(Debug, Clone, Default)]
pub struct DeleteRequest {
    /// Path to delete; asked for when absent
    pub path: Option<PathBuf>,
    /// Report what would be removed without removing it
    pub dry_run: bool,
    /// Skip the confirmation prompt
    pub assume_yes: bool,
    /// Allow directories without a `package.json`
    pub force: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Removed { path: PathBuf, entries: usize },
    DryRun { path: PathBuf, entries: usize },
    Cancelled,
}

/// Resolve, validate, confirm, and remove the requested directory.
///
/// Relative paths resolve against `base_dir`. The base directory itself, its
/// ancestors, and the filesystem root are never removed.
pub async fn run_delete<P: PromptGateway>(
    prompts: &P,
    settings: &Settings,
    base_dir: &Path,
    request: DeleteRequest,
) -> Result<DeleteOutcome> {
    let input = match request.path {
        Some(path) => path,
        None => PathBuf::from(
            prompts
                .text("Enter the path of the project to delete")?
                .trim(),
        ),
    };

    if input.as_os_str().is_empty() {
        report::info("No path provided. Aborting deletion.");
        return Ok(DeleteOutcome::Cancelled);
    }

    let path = resolve_delete_target(base_dir, &input, request.force)?;
    let entries = WalkDir::new(&path)
        .min_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .count();

    if request.dry_run {
        report::info(format!(
            "Would delete {} ({} entries)",
            path.display(),
            entries
        ));
        return Ok(DeleteOutcome::DryRun { path, entries });
    }

    if !request.assume_yes {
        let confirmed = prompts.confirm(
            &format!("Delete {} and its {} entries?", path.display(), entries),
            false,
        )?;
        if !confirmed {
            report::info("Deletion cancelled.");
            return Ok(DeleteOutcome::Cancelled);
        }
    }

    let mut lock = TargetLock::open(&settings.lock_dir, &path)?;
    let _guard = lock.try_acquire()?;

    tokio::fs::remove_dir_all(&path)
        .await
        .map_err(|source| PulseError::Write {
            path: path.clone(),
            source,
        })?;
    report::success(format!("Deleted project at {}", path.display()));

    Ok(DeleteOutcome::Removed { path, entries })
}

/// Resolve `input` against `base_dir` lexically and reject unsafe targets.
///
/// Symbolic links are refused rather than followed, so removal never reaches
/// outside the named directory.
pub fn resolve_delete_target(base_dir: &Path, input: &Path, force: bool) -> Result<PathBuf> {
    let base = normalize(base_dir)?;
    let path = normalize(&base.join(input))?;
    let unsafe_target = |reason: &str| PulseError::UnsafeDelete {
        path: path.clone(),
        reason: reason.to_string(),
    };

    let metadata =
        std::fs::symlink_metadata(&path).map_err(|_| unsafe_target("path does not exist"))?;
    if metadata.file_type().is_symlink() {
        return Err(unsafe_target("it is a symbolic link"));
    }
    if !metadata.is_dir() {
        return Err(unsafe_target("not a directory"));
    }
    if path.parent().is_none() {
        return Err(unsafe_target("filesystem root"));
    }

    let ancestor = "it is the current directory or one of its parents";
    if base.starts_with(&path) {
        return Err(unsafe_target(ancestor));
    }
    // same check through any symlinks in the base's own spelling
    if let (Ok(real_base), Ok(real_path)) =
        (std::fs::canonicalize(&base), std::fs::canonicalize(&path))
    {
        if real_base.starts_with(real_path) {
            return Err(unsafe_target(ancestor));
        }
    }

    if !force && !path.join(MANIFEST_FILE).is_file() {
        return Err(unsafe_target(
            "no package.json found (use --force to delete anyway)",
        ));
    }

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn project(base: &TempDir, name: &str) -> PathBuf {
        let dir = base.path().join(name);
        std::fs::create_dir_all(dir.join("src")).unwrap();
        std::fs::write(dir.join(MANIFEST_FILE), "{}").unwrap();
        dir
    }

    #[test]
    fn test_resolves_relative_project() {
        let base = TempDir::new().unwrap();
        let dir = project(&base, "demo");

        let resolved = resolve_delete_target(base.path(), Path::new("demo"), false).unwrap();
        assert_eq!(resolved, dir);
    }

    #[test]
    fn test_refuses_base_dir_and_ancestors() {
        let base = TempDir::new().unwrap();
        std::fs::write(base.path().join(MANIFEST_FILE), "{}").unwrap();

        for input in [".", ".."] {
            let err = resolve_delete_target(base.path(), Path::new(input), true).unwrap_err();
            assert!(matches!(err, PulseError::UnsafeDelete { .. }), "{input}");
        }
    }

    #[test]
    fn test_refuses_missing_and_non_project_paths() {
        let base = TempDir::new().unwrap();
        std::fs::create_dir(base.path().join("plain")).unwrap();

        assert!(resolve_delete_target(base.path(), Path::new("missing"), false).is_err());
        assert!(resolve_delete_target(base.path(), Path::new("plain"), false).is_err());
        assert!(resolve_delete_target(base.path(), Path::new("plain"), true).is_ok());
    }

    #[test]
    fn test_dotted_input_resolves_lexically() {
        let base = TempDir::new().unwrap();
        let dir = project(&base, "demo");
        std::fs::create_dir(base.path().join("other")).unwrap();

        let resolved =
            resolve_delete_target(base.path(), Path::new("./other/../demo"), false).unwrap();
        assert_eq!(resolved, dir);
    }

    #[cfg(unix)]
    #[test]
    fn test_refuses_symlinked_project() {
        let base = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        std::fs::write(outside.path().join(MANIFEST_FILE), "{}").unwrap();
        std::os::unix::fs::symlink(outside.path(), base.path().join("link")).unwrap();

        let err = resolve_delete_target(base.path(), Path::new("link"), true).unwrap_err();
        match err {
            PulseError::UnsafeDelete { reason, .. } => assert!(reason.contains("symbolic link")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
