//! Error taxonomy and exit-code mapping

use std::path::PathBuf;
use thiserror::Error;

/// Exit code for a fully successful run
pub const EXIT_OK: u8 = 0;
/// Exit code for I/O, lock, prompt, and runtime-check failures
pub const EXIT_FAILURE: u8 = 1;
/// Exit code for invalid or unimplemented commands (matches clap usage errors)
pub const EXIT_INVALID_COMMAND: u8 = 2;
/// Exit code when the scaffold tool failed
pub const EXIT_SCAFFOLD_FAILED: u8 = 3;
/// Exit code when any post-creation step failed
pub const EXIT_POST_CREATION_FAILED: u8 = 4;
/// Exit code when the upgrade command failed
pub const EXIT_UPDATE_FAILED: u8 = 5;
/// Exit code after Ctrl+C
pub const EXIT_INTERRUPTED: u8 = 130;

#[derive(Debug, Error)]
pub enum PulseError {
    #[error("failed to start `{program}`: {cause}")]
    Spawn { program: String, cause: String },

    #[error("`{command}` exited with status {code}")]
    NonZeroExit { command: String, code: i32 },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("field `{field}` in {} is not an object", path.display())]
    NotAnObject { path: PathBuf, field: String },

    #[error("project name cannot be empty")]
    EmptyName,

    #[error("no project name given after {0} attempts")]
    MaxRetriesExceeded(u32),

    #[error("scaffolding failed: {0}")]
    ScaffoldFailed(String),

    #[error("{} post-creation step(s) failed: {}", .0.len(), .0.join(", "))]
    PostCreationFailed(Vec<String>),

    #[error("update failed: {0}")]
    UpdateFailed(String),

    #[error("another run is already operating on {}", .0.display())]
    TargetLocked(PathBuf),

    #[error("target directory already exists and is not empty: {}", .0.display())]
    TargetNotEmpty(PathBuf),

    #[error("missing required tools:\n{}", .0.iter().map(|m| format!("  - {}", m)).collect::<Vec<_>>().join("\n"))]
    MissingRuntimes(Vec<String>),

    #[error("refusing to delete {}: {reason}", path.display())]
    UnsafeDelete { path: PathBuf, reason: String },

    #[error("invalid value `{value}` for {key}")]
    InvalidSetting { key: String, value: String },

    #[error("`{0}` is not implemented yet")]
    NotImplemented(&'static str),

    #[error("prompt failed: {0}")]
    Prompt(#[source] std::io::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PulseError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            PulseError::NotImplemented(_) => EXIT_INVALID_COMMAND,
            PulseError::ScaffoldFailed(_) => EXIT_SCAFFOLD_FAILED,
            PulseError::PostCreationFailed(_) => EXIT_POST_CREATION_FAILED,
            PulseError::UpdateFailed(_) => EXIT_UPDATE_FAILED,
            PulseError::Prompt(e) if e.kind() == std::io::ErrorKind::Interrupted => {
                EXIT_INTERRUPTED
            }
            _ => EXIT_FAILURE,
        }
    }
}

pub type Result<T> = std::result::Result<T, PulseError>;
