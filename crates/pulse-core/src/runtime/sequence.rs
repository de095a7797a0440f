//! Ordered execution of dependent steps

use crate::report;
use crate::runtime::process::{Invocation, ProcessRunner, StepOutcome};

/// What to do with the remaining steps once one fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum FailurePolicy {
    /// Skip everything after the first failure
    #[default]
    Abort,
    /// Run every step regardless of earlier failures
    BestEffort,
}

impl std::str::FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "abort" => Ok(FailurePolicy::Abort),
            "best-effort" | "best_effort" => Ok(FailurePolicy::BestEffort),
            other => Err(other.to_string()),
        }
    }
}

/// A labelled invocation in a sequence
#[derive(Debug, Clone)]
pub struct Step {
    pub label: String,
    pub invocation: Invocation,
}

impl Step {
    pub fn new(label: impl Into<String>, invocation: Invocation) -> Self {
        Self {
            label: label.into(),
            invocation,
        }
    }
}

/// Outcome of one executed step
#[derive(Debug, Clone)]
pub struct StepRecord {
    pub label: String,
    pub command: String,
    pub outcome: StepOutcome,
}

#[derive(Debug, Clone, Default)]
pub struct SequenceReport {
    /// Executed steps, in order
    pub records: Vec<StepRecord>,
    /// Labels of steps never started because of [`FailurePolicy::Abort`]
    pub skipped: Vec<String>,
}

impl SequenceReport {
    pub fn is_success(&self) -> bool {
        self.skipped.is_empty() && self.records.iter().all(|r| r.outcome.is_success())
    }

    pub fn failed(&self) -> impl Iterator<Item = &StepRecord> {
        self.records.iter().filter(|r| !r.outcome.is_success())
    }
}

/// Run `steps` one at a time, each awaited before the next starts
pub async fn run_sequence<R: ProcessRunner>(
    runner: &R,
    steps: Vec<Step>,
    policy: FailurePolicy,
) -> SequenceReport {
    let mut report = SequenceReport::default();
    let mut steps = steps.into_iter();

    for step in steps.by_ref() {
        let command = step.invocation.command_line();
        report::step(format!("Running {}", command));

        let outcome = runner.run(step.invocation).await;
        let failed = !outcome.is_success();

        if failed {
            report::error(format!("{} failed: {}", step.label, outcome));
            tracing::warn!(step = %step.label, %outcome, "step failed");
        } else {
            tracing::info!(step = %step.label, "step succeeded");
        }

        report.records.push(StepRecord {
            label: step.label,
            command,
            outcome,
        });

        if failed && policy == FailurePolicy::Abort {
            break;
        }
    }

    report.skipped = steps.map(|s| s.label).collect();
    if !report.skipped.is_empty() {
        report::warning(format!("Skipped: {}", report.skipped.join(", ")));
    }

    report
}
