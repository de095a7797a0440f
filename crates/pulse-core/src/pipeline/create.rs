//! Creation pipeline
//!
//! `NameResolved -> Scaffolding -> Seeding -> Customizing -> Done`, with
//! `Aborted` reachable from any non-terminal state. A failed scaffold aborts
//! the run before anything touches the target. Past scaffolding, each step is
//! attempted and failures are collected into the final result.

use std::fmt;
use std::path::PathBuf;

use crate::config::Settings;
use crate::error::{PulseError, Result};
use crate::lock::TargetLock;
use crate::pipeline::customize::{self, ChainReport, CustomizeAnswers};
use crate::project::ProjectTarget;
use crate::prompt::{resolve_project_name, PromptGateway};
use crate::report;
use crate::runtime::{Invocation, ProcessRunner, StepOutcome};
use crate::stack::StackProfile;
use crate::templates::{create_folders, seed_files, ResourceSource, SeedReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateState {
    NameResolved,
    Scaffolding,
    Seeding,
    Customizing,
    Done,
    Aborted,
}

impl fmt::Display for CreateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CreateState::NameResolved => "name-resolved",
            CreateState::Scaffolding => "scaffolding",
            CreateState::Seeding => "seeding",
            CreateState::Customizing => "customizing",
            CreateState::Done => "done",
            CreateState::Aborted => "aborted",
        };
        f.write_str(name)
    }
}

/// Inputs for one creation run
#[derive(Debug, Clone)]
pub struct CreateOptions {
    /// Project name given on the command line
    pub name: Option<String>,
    /// Directory the project is created in
    pub base_dir: PathBuf,
    pub answers: CustomizeAnswers,
}

/// Everything that happened during a run that reached `Done`
#[derive(Debug, Clone)]
pub struct CreateReport {
    pub target: ProjectTarget,
    /// States visited, in order
    pub states: Vec<CreateState>,
    pub seeded: SeedReport,
    pub chain: ChainReport,
    pub folders: SeedReport,
}

impl CreateReport {
    /// Labels of every post-creation step that failed
    pub fn failures(&self) -> Vec<String> {
        let mut failed: Vec<String> = self.seeded.failed.iter().map(|(f, _)| f.clone()).collect();
        failed.extend(self.chain.failures());
        failed.extend(self.folders.failed.iter().map(|(f, _)| f.clone()));
        failed
    }
}

pub struct CreationPipeline<'a, S, R, P> {
    stack: &'a S,
    settings: &'a Settings,
    runner: &'a R,
    prompts: &'a P,
}

impl<'a, S, R, P> CreationPipeline<'a, S, R, P>
where
    S: StackProfile,
    R: ProcessRunner,
    P: PromptGateway,
{
    pub fn new(stack: &'a S, settings: &'a Settings, runner: &'a R, prompts: &'a P) -> Self {
        Self {
            stack,
            settings,
            runner,
            prompts,
        }
    }

    /// Run to `Done`.
    ///
    /// Returns `ScaffoldFailed` when the run aborted, and `PostCreationFailed`
    /// when it finished with failed steps.
    pub async fn run(&self, options: CreateOptions) -> Result<CreateReport> {
        let report = self.run_to_done(options).await?;

        let failures = report.failures();
        if !failures.is_empty() {
            return Err(PulseError::PostCreationFailed(failures));
        }
        Ok(report)
    }

    /// Run to `Done` and return the report even when post-creation steps failed
    pub async fn run_to_done(&self, options: CreateOptions) -> Result<CreateReport> {
        let mut states = Vec::new();

        let name = resolve_project_name(
            options.name.as_deref(),
            self.prompts,
            self.settings.max_name_attempts,
        )?;
        let target = ProjectTarget::new_in(&options.base_dir, &name)?;
        tracing::info!(
            stack = self.stack.name(),
            target = %target.root().display(),
            "creating project"
        );
        transition(&mut states, CreateState::NameResolved);

        if target.is_non_empty() {
            transition(&mut states, CreateState::Aborted);
            return Err(PulseError::TargetNotEmpty(target.root().to_path_buf()));
        }

        let mut lock = TargetLock::open(&self.settings.lock_dir, target.root())?;
        let _guard = lock.try_acquire()?;

        transition(&mut states, CreateState::Scaffolding);
        if let Err(e) = self.scaffold(&target).await {
            transition(&mut states, CreateState::Aborted);
            report::error(format!("Error creating {} project", self.stack.display_name()));
            return Err(e);
        }
        report::success(format!(
            "{} project created successfully!",
            self.stack.display_name()
        ));
        report::info(format!(
            "Using {} for further installations",
            target.root().display()
        ));

        transition(&mut states, CreateState::Seeding);
        let source = ResourceSource::from_dir(self.settings.resources_dir.clone());
        let seeded = seed_files(&source, target.root(), self.stack.seed_files()).await;

        transition(&mut states, CreateState::Customizing);
        let chain = customize::run_chain(
            self.stack,
            self.settings,
            self.runner,
            self.prompts,
            &target,
            options.answers,
        )
        .await?;
        let folders = create_folders(
            &target.join(self.stack.source_root()),
            self.stack.source_folders(),
        )
        .await;

        transition(&mut states, CreateState::Done);

        Ok(CreateReport {
            target,
            states,
            seeded,
            chain,
            folders,
        })
    }

    async fn scaffold(&self, target: &ProjectTarget) -> Result<()> {
        let invocation = Invocation::new(&self.settings.scaffolder, target.base())
            .args(self.stack.scaffold_args(target.name()))
            .stdio(self.settings.output);
        report::step(format!("Running {}", invocation));

        match self.runner.run(invocation.clone()).await {
            StepOutcome::Success if target.exists() => Ok(()),
            StepOutcome::Success => Err(PulseError::ScaffoldFailed(format!(
                "`{}` succeeded but {} was not created",
                invocation,
                target.root().display()
            ))),
            outcome => {
                let cause = outcome
                    .into_result(&invocation)
                    .err()
                    .map(|e| e.to_string())
                    .unwrap_or_default();
                Err(PulseError::ScaffoldFailed(cause))
            }
        }
    }
}

fn transition(states: &mut Vec<CreateState>, next: CreateState) {
    tracing::debug!(from = ?states.last(), to = %next, "creation state");
    states.push(next);
}
