//! Pulse CLI - Create, update, and delete frontend project skeletons

use anyhow::Result;
use clap::{Args as ClapArgs, Parser, Subcommand};
use pulse_core::pipeline::{open_upgrade_guide, run_delete, run_update};
use pulse_core::runtime::{check_package_manager, check_runtimes};
use pulse_core::tui::{install_interrupt_handler, restore_cursor, CliclackPrompts};
use pulse_core::{
    report, ApiTechnology, CreateOptions, CreationPipeline, CustomizeAnswers, DeleteOutcome,
    DeleteRequest, FailurePolicy, NextStack, PulseError, Settings, StackProfile, StdioMode,
    SystemRunner,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "pulse")]
#[command(about = "CLI for bootstrapping Next.js frontend projects")]
#[command(version, arg_required_else_help = true)]
pub struct Args {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Work with frontend projects
    #[command(subcommand_required = true, arg_required_else_help = true)]
    Frontend {
        #[command(subcommand)]
        subcommand: FrontendCommand,
    },
    /// Delete a project directory
    #[command(visible_alias = "d")]
    Delete(DeleteArgs),
}

#[derive(Subcommand, Debug)]
pub enum FrontendCommand {
    /// Create a new Next.js project
    #[command(visible_alias = "c")]
    Create(CreateArgs),
    /// Upgrade Next.js and React in an existing project
    #[command(visible_alias = "u")]
    Update(UpdateArgs),
    /// Add packages to an existing project
    #[command(visible_alias = "a")]
    Add(AddArgs),
}

#[derive(ClapArgs, Debug)]
pub struct CreateArgs {
    /// Project name (asked for when omitted)
    pub name: Option<String>,

    /// API technology the project talks to
    #[arg(long, value_enum)]
    pub api: Option<ApiTechnology>,

    /// Include identity-provider integration
    #[arg(long = "identity-provider")]
    pub identity_provider: bool,

    /// Accept defaults for every question except the project name
    #[arg(short, long)]
    pub yes: bool,

    /// Skip the scaffolder and package manager checks
    #[arg(long = "skip-checks")]
    pub skip_checks: bool,

    /// Local directory with template files to seed instead of the built-in ones
    #[arg(long = "resources-dir")]
    pub resources_dir: Option<PathBuf>,

    /// What to do when an install step fails
    #[arg(long = "on-failure", value_enum)]
    pub on_failure: Option<FailurePolicy>,

    /// Print child process output indented under each step
    #[arg(long = "stream-output")]
    pub stream_output: bool,
}

#[derive(ClapArgs, Debug)]
pub struct UpdateArgs {
    /// Project directory
    #[arg(short, long, default_value = ".")]
    pub directory: PathBuf,

    /// Open the upgrade guide in a browser afterwards
    #[arg(long = "open-guide")]
    pub open_guide: bool,

    /// Skip the package manager check
    #[arg(long = "skip-checks")]
    pub skip_checks: bool,
}

#[derive(ClapArgs, Debug)]
pub struct AddArgs {
    /// Packages to add
    pub packages: Vec<String>,
}

#[derive(ClapArgs, Debug)]
pub struct DeleteArgs {
    /// Project directory to delete (asked for when omitted)
    pub path: Option<PathBuf>,

    /// Show what would be deleted without deleting it
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Do not ask for confirmation
    #[arg(short, long)]
    pub yes: bool,

    /// Allow deleting a directory that has no package.json
    #[arg(long)]
    pub force: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    install_interrupt_handler();

    let args = Args::parse();
    init_tracing(args.verbose);

    let result = match Settings::from_env() {
        Ok(settings) => dispatch(args.command, settings).await,
        Err(e) => Err(e.into()),
    };

    restore_cursor();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            let code = e
                .downcast_ref::<PulseError>()
                .map(PulseError::exit_code)
                .unwrap_or(pulse_core::error::EXIT_FAILURE);
            ExitCode::from(code)
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn dispatch(command: Command, settings: Settings) -> Result<()> {
    match command {
        Command::Frontend { subcommand } => match subcommand {
            FrontendCommand::Create(args) => create(args, settings).await,
            FrontendCommand::Update(args) => update(args, settings).await,
            FrontendCommand::Add(args) => {
                tracing::debug!(packages = ?args.packages, "add requested");
                Err(PulseError::NotImplemented("frontend add").into())
            }
        },
        Command::Delete(args) => delete(args, settings).await,
    }
}

async fn create(args: CreateArgs, mut settings: Settings) -> Result<()> {
    if let Some(dir) = args.resources_dir {
        settings.resources_dir = Some(dir);
    }
    if let Some(policy) = args.on_failure {
        settings.failure_policy = policy;
    }
    if args.stream_output {
        settings.output = StdioMode::Stream;
    }

    let stack = NextStack;
    report::intro(format!("Create a new {} project", stack.display_name()));

    if !args.skip_checks {
        check_runtimes(&settings)?;
    }

    let answers = CustomizeAnswers {
        api: match (args.api, args.yes) {
            (Some(api), _) => Some(api),
            (None, true) => Some(ApiTechnology::default()),
            (None, false) => None,
        },
        identity_provider: match (args.identity_provider, args.yes) {
            (true, _) => Some(true),
            (false, true) => Some(false),
            (false, false) => None,
        },
    };
    let options = CreateOptions {
        name: args.name,
        base_dir: std::env::current_dir()?,
        answers,
    };

    let prompts = CliclackPrompts;
    let pipeline = CreationPipeline::new(&stack, &settings, &SystemRunner, &prompts);
    match pipeline.run(options).await {
        Ok(created) => {
            let steps = stack.next_steps(created.target.root(), &settings.package_manager);
            report::outro(format!("Next steps:\n   {}", steps.join("\n   ")));
            Ok(())
        }
        Err(e) => {
            report::outro_cancel("Project setup did not complete");
            Err(e.into())
        }
    }
}

async fn update(args: UpdateArgs, settings: Settings) -> Result<()> {
    let stack = NextStack;
    report::intro(format!("Update {} project", stack.display_name()));

    if !args.skip_checks {
        check_package_manager(&settings)?;
    }

    run_update(&stack, &settings, &SystemRunner, &args.directory).await?;

    if args.open_guide {
        if let Err(e) = open_upgrade_guide(&stack) {
            report::warning(format!("Could not open browser: {}", e));
        }
    }

    report::outro("Update complete");
    Ok(())
}

async fn delete(args: DeleteArgs, settings: Settings) -> Result<()> {
    let request = DeleteRequest {
        path: args.path,
        dry_run: args.dry_run,
        assume_yes: args.yes,
        force: args.force,
    };

    let outcome = run_delete(&CliclackPrompts, &settings, &std::env::current_dir()?, request).await?;
    if let DeleteOutcome::Removed { entries, .. } = outcome {
        tracing::info!(entries, "project deleted");
    }
    Ok(())
}
