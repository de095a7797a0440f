//! Preflight detection of the external tools a pipeline drives

use std::process::Command;

use crate::config::Settings;
use crate::error::{PulseError, Result};
use crate::report;

/// Tool detection result
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub name: String,
    pub version: Option<String>,
    pub available: bool,
}

/// Check whether `program --version` runs and exits successfully
pub fn check_executable(program: &str) -> RuntimeInfo {
    let output = Command::new(program).arg("--version").output();

    match output {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout)
                .lines()
                .next()
                .unwrap_or_default()
                .trim()
                .to_string();
            RuntimeInfo {
                name: program.to_string(),
                version: Some(version).filter(|v| !v.is_empty()),
                available: true,
            }
        }
        _ => RuntimeInfo {
            name: program.to_string(),
            version: None,
            available: false,
        },
    }
}

/// Check the scaffold runner and the package manager configured in `settings`
pub fn check_runtimes(settings: &Settings) -> Result<Vec<RuntimeInfo>> {
    let mut programs = vec![settings.scaffolder.as_str()];
    if settings.package_manager != settings.scaffolder {
        programs.push(settings.package_manager.as_str());
    }
    check_programs(&programs)
}

/// Check only the package manager, for pipelines that never scaffold
pub fn check_package_manager(settings: &Settings) -> Result<Vec<RuntimeInfo>> {
    check_programs(&[settings.package_manager.as_str()])
}

fn check_programs(programs: &[&str]) -> Result<Vec<RuntimeInfo>> {
    let mut results = Vec::new();
    let mut missing = Vec::new();

    for program in programs {
        let info = check_executable(program);
        if info.available {
            report::info(format!(
                "{} {}",
                program,
                info.version.as_deref().unwrap_or("detected")
            ));
            results.push(info);
        } else {
            missing.push(format!("{} (not found or not runnable)", program));
        }
    }

    if !missing.is_empty() {
        return Err(PulseError::MissingRuntimes(missing));
    }

    Ok(results)
}
