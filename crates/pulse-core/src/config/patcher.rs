//! JSON configuration documents: load, mutate by dotted path, write back atomically

use serde_json::{Map, Value};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::error::{PulseError, Result};

/// A JSON document loaded from disk
///
/// Key order survives a load/save round trip. Output is 2-space indented
/// with a trailing newline.
#[derive(Debug, Clone)]
pub struct JsonDocument {
    path: PathBuf,
    root: Value,
}

impl JsonDocument {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let raw = std::fs::read_to_string(&path).map_err(|source| PulseError::Read {
            path: path.clone(),
            source,
        })?;
        let root = serde_json::from_str(&raw).map_err(|source| PulseError::Parse {
            path: path.clone(),
            source,
        })?;
        Ok(Self { path, root })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Look up a value by dotted path (`compilerOptions.moduleResolution`)
    pub fn get(&self, dotted: &str) -> Option<&Value> {
        dotted
            .split('.')
            .try_fold(&self.root, |node, key| node.as_object()?.get(key))
    }

    /// Set a value by dotted path, creating missing intermediate objects.
    ///
    /// Returns whether the document changed.
    pub fn set(&mut self, dotted: &str, value: Value) -> Result<bool> {
        let mut keys: Vec<&str> = dotted.split('.').collect();
        let Some(leaf) = keys.pop() else {
            return Ok(false);
        };

        let mut node = &mut self.root;
        let mut walked = String::new();
        for key in keys {
            if !walked.is_empty() {
                walked.push('.');
            }
            walked.push_str(key);

            let object = node.as_object_mut().ok_or_else(|| PulseError::NotAnObject {
                path: self.path.clone(),
                field: parent_of(&walked),
            })?;
            node = object
                .entry(key.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
        }

        let object = node.as_object_mut().ok_or_else(|| PulseError::NotAnObject {
            path: self.path.clone(),
            field: if walked.is_empty() {
                "<root>".to_string()
            } else {
                walked.clone()
            },
        })?;

        if object.get(leaf) == Some(&value) {
            return Ok(false);
        }
        object.insert(leaf.to_string(), value);
        Ok(true)
    }

    pub fn to_pretty_string(&self) -> Result<String> {
        let mut out = serde_json::to_string_pretty(&self.root).map_err(|source| {
            PulseError::Parse {
                path: self.path.clone(),
                source,
            }
        })?;
        out.push('\n');
        Ok(out)
    }

    /// Write to a temporary file beside the target, then rename it into place.
    ///
    /// On failure the original file is left untouched. The original file's
    /// permissions carry over to the replacement.
    pub fn save(&self) -> Result<()> {
        let data = self.to_pretty_string()?;
        let write_err = |source: std::io::Error| PulseError::Write {
            path: self.path.clone(),
            source,
        };

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
        tmp.write_all(data.as_bytes()).map_err(write_err)?;
        if let Ok(metadata) = std::fs::metadata(&self.path) {
            tmp.as_file()
                .set_permissions(metadata.permissions())
                .map_err(write_err)?;
        }
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(&self.path).map_err(|e| write_err(e.error))?;
        Ok(())
    }
}

fn parent_of(dotted: &str) -> String {
    match dotted.rsplit_once('.') {
        Some((parent, _)) => parent.to_string(),
        None => "<root>".to_string(),
    }
}

/// Load `path`, set one dotted field, and save it back
pub fn patch_file(path: &Path, dotted: &str, value: Value) -> Result<bool> {
    let mut doc = JsonDocument::load(path)?;
    let changed = doc.set(dotted, value)?;
    doc.save()?;
    tracing::debug!(path = %path.display(), field = dotted, changed, "patched document");
    Ok(changed)
}
