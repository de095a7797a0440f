//! The directory a pipeline run operates on

use std::path::{Component, Path, PathBuf};

use crate::error::{PulseError, Result};

/// Resolved destination of one pipeline run
///
/// Built once and passed by reference to every stage; the root is absolute,
/// lexically normalized, and never changes for the lifetime of the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectTarget {
    name: String,
    base: PathBuf,
    root: PathBuf,
}

impl ProjectTarget {
    /// A new project `name` to be created inside `base_dir`.
    ///
    /// `name` may contain path separators (`apps/demo`); it is handed to the
    /// scaffold tool as given and resolved against `base_dir`.
    pub fn new_in(base_dir: &Path, name: &str) -> Result<Self> {
        let base = normalize(base_dir)?;
        let root = normalize(&base.join(name))?;
        Ok(Self {
            name: name.to_string(),
            base,
            root,
        })
    }

    /// An existing project directory
    pub fn existing(dir: &Path) -> Result<Self> {
        let root = normalize(dir)?;
        if !root.is_dir() {
            return Err(PulseError::Read {
                path: root,
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "project directory does not exist",
                ),
            });
        }
        let name = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let base = root.parent().unwrap_or(&root).to_path_buf();
        Ok(Self { name, base, root })
    }

    /// Name as supplied by the operator
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory the scaffold tool runs in; `base().join(name())` is `root()`
    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn join(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }

    pub fn exists(&self) -> bool {
        self.root.is_dir()
    }

    /// True when the directory exists and has at least one entry
    pub fn is_non_empty(&self) -> bool {
        std::fs::read_dir(&self.root)
            .map(|mut entries| entries.next().is_some())
            .unwrap_or(false)
    }
}

/// Make `path` absolute against the current directory and resolve `.` and
/// `..` lexically. Symlinks are not followed.
pub fn normalize(path: &Path) -> Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let mut cleaned = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                cleaned.pop();
            }
            other => cleaned.push(other.as_os_str()),
        }
    }
    Ok(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_target_is_absolute_child_of_base() {
        let dir = TempDir::new().unwrap();
        let target = ProjectTarget::new_in(dir.path(), "demo").unwrap();

        assert_eq!(target.name(), "demo");
        assert_eq!(target.root(), dir.path().join("demo"));
        assert_eq!(target.base(), dir.path());
        assert!(target.root().is_absolute());
        assert!(!target.exists());
    }

    #[test]
    fn test_existing_requires_directory() {
        let dir = TempDir::new().unwrap();
        assert!(ProjectTarget::existing(&dir.path().join("missing")).is_err());

        let target = ProjectTarget::existing(dir.path()).unwrap();
        assert!(target.exists());
        assert!(!target.is_non_empty());

        std::fs::write(dir.path().join("package.json"), "{}").unwrap();
        assert!(target.is_non_empty());
    }

    #[test]
    fn test_nested_name_resolves_under_base() {
        let dir = TempDir::new().unwrap();
        let target = ProjectTarget::new_in(dir.path(), "apps/demo").unwrap();

        assert_eq!(target.name(), "apps/demo");
        assert_eq!(target.base(), dir.path());
        assert_eq!(target.root(), dir.path().join("apps").join("demo"));
    }

    #[test]
    fn test_normalize_is_lexical() {
        assert_eq!(
            normalize(Path::new("/x/./apps/../demo")).unwrap(),
            PathBuf::from("/x/demo")
        );
        assert_eq!(normalize(Path::new("/x/demo/")).unwrap(), PathBuf::from("/x/demo"));
        assert_eq!(normalize(Path::new("/..")).unwrap(), PathBuf::from("/"));
    }

    #[test]
    fn test_parent_segments_in_name_are_resolved() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("work");
        let target = ProjectTarget::new_in(&base, "../demo").unwrap();

        assert_eq!(target.root(), dir.path().join("demo"));
        assert_eq!(target.base(), base);
    }
}
