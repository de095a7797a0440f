//! Seeding a fresh project with template files and a folder layout

use std::path::Path;
use tokio::fs;

use crate::report;
use crate::templates::resources::ResourceSource;

/// Per-item results of a seeding pass; each item is attempted independently
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub created: Vec<String>,
    /// `(item, reason)` pairs
    pub failed: Vec<(String, String)>,
}

impl SeedReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Copy each named resource into `target_dir`
pub async fn seed_files(source: &ResourceSource, target_dir: &Path, files: &[&str]) -> SeedReport {
    let mut seeded = SeedReport::default();

    for name in files {
        let destination = target_dir.join(name);
        let result = match source.read(name).await {
            Ok(content) => fs::write(&destination, &content)
                .await
                .map_err(|e| format!("failed to write {}: {}", destination.display(), e)),
            Err(e) => Err(e.to_string()),
        };

        match result {
            Ok(()) => {
                report::info(format!("{} was copied to destination", name));
                seeded.created.push(name.to_string());
            }
            Err(reason) => {
                report::error(format!(
                    "Something went wrong while copying {} to destination: {}",
                    name, reason
                ));
                seeded.failed.push((name.to_string(), reason));
            }
        }
    }

    seeded
}

/// Create each folder under `base_dir`; existing folders count as created
pub async fn create_folders(base_dir: &Path, folders: &[&str]) -> SeedReport {
    let mut seeded = SeedReport::default();

    for folder in folders {
        let path = base_dir.join(folder);
        match fs::create_dir_all(&path).await {
            Ok(()) => seeded.created.push(folder.to_string()),
            Err(e) => {
                report::error(format!("Directory {} couldn't be created: {}", folder, e));
                seeded.failed.push((folder.to_string(), e.to_string()));
            }
        }
    }

    if seeded.is_success() {
        report::success("Directories created successfully!");
    }

    seeded
}
