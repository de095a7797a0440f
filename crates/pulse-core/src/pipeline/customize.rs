//! Post-creation customization chain
//!
//! Two inert questions (API technology, identity provider) followed by the
//! stack's install chain and the compiler configuration patch. Every step
//! runs in the project root and is awaited before the next one starts.

use std::fmt;

use crate::config::{patch_file, Settings};
use crate::error::Result;
use crate::project::ProjectTarget;
use crate::prompt::PromptGateway;
use crate::report;
use crate::runtime::{run_sequence, Invocation, ProcessRunner, SequenceReport, Step};
use crate::stack::StackProfile;

/// API technology the project will talk to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ApiTechnology {
    #[default]
    Rest,
    #[value(name = "graphql")]
    GraphQl,
    Grpc,
}

impl ApiTechnology {
    pub const ALL: [ApiTechnology; 3] =
        [ApiTechnology::Rest, ApiTechnology::GraphQl, ApiTechnology::Grpc];

    pub fn display_name(&self) -> &'static str {
        match self {
            ApiTechnology::Rest => "REST",
            ApiTechnology::GraphQl => "GraphQL",
            ApiTechnology::Grpc => "gRPC",
        }
    }
}

impl fmt::Display for ApiTechnology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Answers supplied up front; `None` means ask the operator
#[derive(Debug, Clone, Copy, Default)]
pub struct CustomizeAnswers {
    pub api: Option<ApiTechnology>,
    pub identity_provider: Option<bool>,
}

impl CustomizeAnswers {
    /// Defaults for every question, for non-interactive runs
    pub fn defaults() -> Self {
        Self {
            api: Some(ApiTechnology::default()),
            identity_provider: Some(false),
        }
    }
}

/// Recorded answers. Nothing acts on them yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Customization {
    pub api: ApiTechnology,
    pub identity_provider: bool,
}

#[derive(Debug, Clone)]
pub struct ChainReport {
    pub customization: Customization,
    pub installs: SequenceReport,
    /// `Ok(changed)` or the failure message
    pub patch: std::result::Result<bool, String>,
}

impl ChainReport {
    /// Labels of every failed or skipped step
    pub fn failures(&self) -> Vec<String> {
        let mut failed: Vec<String> = self.installs.failed().map(|r| r.label.clone()).collect();
        failed.extend(self.installs.skipped.iter().cloned());
        if self.patch.is_err() {
            failed.push("compiler configuration patch".to_string());
        }
        failed
    }
}

/// Ask the two customization questions unless already answered
pub fn ask_customization<P: PromptGateway>(
    prompts: &P,
    answers: CustomizeAnswers,
) -> Result<Customization> {
    let api = match answers.api {
        Some(api) => api,
        None => {
            let labels: Vec<&str> = ApiTechnology::ALL.iter().map(|a| a.display_name()).collect();
            let idx = prompts.select("Choose an API technology", &labels)?;
            ApiTechnology::ALL.get(idx).copied().unwrap_or_default()
        }
    };

    let identity_provider = match answers.identity_provider {
        Some(flag) => flag,
        None => prompts.confirm("Do you need identity-provider (Keycloak) integration?", false)?,
    };

    let customization = Customization {
        api,
        identity_provider,
    };
    tracing::info!(
        api = %customization.api,
        identity_provider = customization.identity_provider,
        "customization recorded"
    );
    Ok(customization)
}

/// The stack's install chain as runnable steps inside `target`
pub fn install_steps<S: StackProfile>(
    stack: &S,
    settings: &Settings,
    target: &ProjectTarget,
) -> Vec<Step> {
    stack
        .install_chain()
        .iter()
        .map(|install| {
            Step::new(
                install.label,
                Invocation::new(&settings.package_manager, target.root())
                    .args(install.args.iter().copied())
                    .stdio(settings.output),
            )
        })
        .collect()
}

/// Apply the stack's compiler configuration patch inside `target`
pub fn apply_compiler_patch<S: StackProfile>(stack: &S, target: &ProjectTarget) -> Result<bool> {
    let patch = stack.compiler_patch();
    patch_file(&target.join(patch.file), patch.field, patch.value)
}

/// Run the whole chain: questions, installs, then the compiler patch
pub async fn run_chain<S, R, P>(
    stack: &S,
    settings: &Settings,
    runner: &R,
    prompts: &P,
    target: &ProjectTarget,
    answers: CustomizeAnswers,
) -> Result<ChainReport>
where
    S: StackProfile,
    R: ProcessRunner,
    P: PromptGateway,
{
    let customization = ask_customization(prompts, answers)?;

    let installs = run_sequence(
        runner,
        install_steps(stack, settings, target),
        settings.failure_policy,
    )
    .await;

    let patch = match apply_compiler_patch(stack, target) {
        Ok(changed) => {
            report::success(format!("{} updated successfully!", stack.compiler_patch().file));
            Ok(changed)
        }
        Err(e) => {
            report::error(format!("{}", e));
            Err(e.to_string())
        }
    };

    Ok(ChainReport {
        customization,
        installs,
        patch,
    })
}
