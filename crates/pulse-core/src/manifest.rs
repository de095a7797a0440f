//! Reading declared dependency versions from a `package.json` manifest

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::error::{PulseError, Result};

pub const MANIFEST_FILE: &str = "package.json";

#[derive(Debug, Default, Deserialize)]
struct PackageManifest {
    // `null` and absent both read as "nothing declared"
    #[serde(default)]
    dependencies: Option<HashMap<String, String>>,
    #[serde(default, rename = "devDependencies")]
    dev_dependencies: Option<HashMap<String, String>>,
}

/// A dependency and its declared version constraint, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedVersion {
    pub name: String,
    pub version: Option<String>,
}

/// Read the versions of `names` from `manifest_path`, in the order given.
///
/// Runtime dependencies take precedence over dev dependencies.
pub fn read_versions(manifest_path: &Path, names: &[&str]) -> Result<Vec<TrackedVersion>> {
    let raw = std::fs::read_to_string(manifest_path).map_err(|source| PulseError::Read {
        path: manifest_path.to_path_buf(),
        source,
    })?;
    let manifest: PackageManifest =
        serde_json::from_str(&raw).map_err(|source| PulseError::Parse {
            path: manifest_path.to_path_buf(),
            source,
        })?;

    Ok(names
        .iter()
        .map(|name| TrackedVersion {
            name: name.to_string(),
            version: manifest
                .dependencies
                .as_ref()
                .and_then(|deps| deps.get(*name))
                .or_else(|| {
                    manifest
                        .dev_dependencies
                        .as_ref()
                        .and_then(|deps| deps.get(*name))
                })
                .cloned(),
        })
        .collect())
}
