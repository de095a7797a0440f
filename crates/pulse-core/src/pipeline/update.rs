//! Update pipeline: report current versions, then upgrade the tracked set

use std::path::Path;

use crate::config::Settings;
use crate::error::{PulseError, Result};
use crate::lock::TargetLock;
use crate::manifest::{read_versions, TrackedVersion, MANIFEST_FILE};
use crate::project::ProjectTarget;
use crate::report;
use crate::runtime::{Invocation, ProcessRunner, StepOutcome};
use crate::stack::StackProfile;

#[derive(Debug, Clone)]
pub struct UpdateReport {
    pub target: ProjectTarget,
    /// Versions declared before the upgrade ran
    pub versions: Vec<TrackedVersion>,
    pub outcome: StepOutcome,
}

/// Upgrade the project in `project_dir`.
///
/// A manifest that cannot be read stops the run before the upgrade command.
pub async fn run_update<S, R>(
    stack: &S,
    settings: &Settings,
    runner: &R,
    project_dir: &Path,
) -> Result<UpdateReport>
where
    S: StackProfile,
    R: ProcessRunner,
{
    let target = ProjectTarget::existing(project_dir)?;
    tracing::info!(
        stack = stack.name(),
        target = %target.root().display(),
        "updating project"
    );
    let mut lock = TargetLock::open(&settings.lock_dir, target.root())?;
    let _guard = lock.try_acquire()?;

    let versions = read_versions(&target.join(MANIFEST_FILE), stack.tracked_dependencies())?;
    for tracked in &versions {
        report::info(format!(
            "{}: {}",
            tracked.name,
            tracked.version.as_deref().unwrap_or("not declared")
        ));
    }

    let invocation = Invocation::new(&settings.package_manager, target.root())
        .args(stack.upgrade_args().iter().copied())
        .stdio(settings.output);
    report::step(format!("Running {}", invocation));

    let outcome = runner.run(invocation.clone()).await;
    if let Err(e) = outcome.clone().into_result(&invocation) {
        report::error(format!("{}", e));
        return Err(PulseError::UpdateFailed(e.to_string()));
    }

    report::success(format!(
        "Project successfully upgraded to the latest {}",
        stack.display_name()
    ));
    report::info(format!(
        "Please visit {} to see what changed",
        stack.upgrade_guide_url()
    ));

    Ok(UpdateReport {
        target,
        versions,
        outcome,
    })
}

/// Open the stack's upgrade guide in the default browser
pub fn open_upgrade_guide<S: StackProfile>(stack: &S) -> Result<()> {
    report::info(format!(
        "Opening {} upgrade guide in your browser...",
        stack.display_name()
    ));
    open::that(stack.upgrade_guide_url())?;
    Ok(())
}
