//! Run settings resolved from the environment

use std::path::PathBuf;

use crate::error::{PulseError, Result};
use crate::runtime::{FailurePolicy, StdioMode};

pub const ENV_SCAFFOLDER: &str = "PULSE_SCAFFOLDER";
pub const ENV_PACKAGE_MANAGER: &str = "PULSE_PACKAGE_MANAGER";
pub const ENV_RESOURCES_DIR: &str = "PULSE_RESOURCES_DIR";
pub const ENV_OUTPUT: &str = "PULSE_OUTPUT";
pub const ENV_ON_FAILURE: &str = "PULSE_ON_FAILURE";
pub const ENV_MAX_NAME_ATTEMPTS: &str = "PULSE_MAX_NAME_ATTEMPTS";
pub const ENV_LOCK_DIR: &str = "PULSE_LOCK_DIR";

const DEFAULT_SCAFFOLDER: &str = "npx";
const DEFAULT_PACKAGE_MANAGER: &str = "pnpm";
const DEFAULT_MAX_NAME_ATTEMPTS: u32 = 5;

/// Settings shared by every pipeline in one run
#[derive(Debug, Clone)]
pub struct Settings {
    /// Executable that runs the scaffold tool (`npx create-next-app ...`)
    pub scaffolder: String,
    /// Package manager executable for installs, hooks, and upgrades
    pub package_manager: String,
    /// Directory overriding the embedded template resources
    pub resources_dir: Option<PathBuf>,
    pub output: StdioMode,
    /// Policy for the post-creation install chain
    pub failure_policy: FailurePolicy,
    pub max_name_attempts: u32,
    /// Where run lock files live
    pub lock_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scaffolder: DEFAULT_SCAFFOLDER.to_string(),
            package_manager: DEFAULT_PACKAGE_MANAGER.to_string(),
            resources_dir: None,
            output: StdioMode::default(),
            failure_policy: FailurePolicy::default(),
            max_name_attempts: DEFAULT_MAX_NAME_ATTEMPTS,
            lock_dir: std::env::temp_dir(),
        }
    }
}

impl Settings {
    /// Resolve settings from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings from an arbitrary key lookup; unset or blank keys keep defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let invalid = |key: &str, value: &str| PulseError::InvalidSetting {
            key: key.to_string(),
            value: value.to_string(),
        };

        let mut settings = Self::default();

        if let Some(scaffolder) = get(ENV_SCAFFOLDER) {
            settings.scaffolder = scaffolder;
        }
        if let Some(package_manager) = get(ENV_PACKAGE_MANAGER) {
            settings.package_manager = package_manager;
        }
        if let Some(dir) = get(ENV_RESOURCES_DIR) {
            settings.resources_dir = Some(PathBuf::from(dir));
        }
        if let Some(output) = get(ENV_OUTPUT) {
            settings.output = output.parse().map_err(|_| invalid(ENV_OUTPUT, &output))?;
        }
        if let Some(policy) = get(ENV_ON_FAILURE) {
            settings.failure_policy = policy
                .parse()
                .map_err(|_| invalid(ENV_ON_FAILURE, &policy))?;
        }
        if let Some(attempts) = get(ENV_MAX_NAME_ATTEMPTS) {
            settings.max_name_attempts = attempts
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| invalid(ENV_MAX_NAME_ATTEMPTS, &attempts))?;
        }
        if let Some(dir) = get(ENV_LOCK_DIR) {
            settings.lock_dir = PathBuf::from(dir);
        }

        Ok(settings)
    }
}
