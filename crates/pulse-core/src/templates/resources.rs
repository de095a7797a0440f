//! Template resources: embedded in the binary or read from a local directory

use std::path::PathBuf;
use tokio::fs;

use crate::error::{PulseError, Result};

pub const LINT_STAGED_CONFIG: &str = "lint-staged.config.js";
pub const PRETTIER_CONFIG: &str = ".prettierrc.json";

const EMBEDDED: &[(&str, &[u8])] = &[
    (
        LINT_STAGED_CONFIG,
        include_bytes!("../../resources/lint-staged.config.js"),
    ),
    (
        PRETTIER_CONFIG,
        include_bytes!("../../resources/.prettierrc.json"),
    ),
];

/// Where template files are read from
#[derive(Debug, Clone, Default)]
pub enum ResourceSource {
    /// Files compiled into the binary
    #[default]
    Embedded,
    /// Files read from a directory, for development or site-specific overrides
    Local(PathBuf),
}

impl ResourceSource {
    pub fn from_dir(dir: Option<PathBuf>) -> Self {
        match dir {
            Some(dir) => Self::Local(dir),
            None => Self::Embedded,
        }
    }

    /// Read a resource by file name
    pub async fn read(&self, name: &str) -> Result<Vec<u8>> {
        match self {
            ResourceSource::Embedded => EMBEDDED
                .iter()
                .find(|(file, _)| *file == name)
                .map(|(_, bytes)| bytes.to_vec())
                .ok_or_else(|| PulseError::Read {
                    path: PathBuf::from(name),
                    source: std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        "no embedded resource with this name",
                    ),
                }),
            ResourceSource::Local(dir) => {
                let path = dir.join(name);
                fs::read(&path)
                    .await
                    .map_err(|source| PulseError::Read { path, source })
            }
        }
    }
}
