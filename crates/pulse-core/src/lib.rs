//! Pulse Core - Shared library for bootstrapping frontend project skeletons
//!
//! This library orchestrates external tools: it drives a scaffold tool and a
//! package manager, seeds a fixed set of configuration files and folders, and
//! patches the generated compiler configuration. It does not resolve
//! dependencies or generate source files itself.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Leaves** - Process runner, JSON patcher, template seeder, prompt gateway
//! - **Layer 2: Pipelines** - Creation (with its post-creation chain), update, and delete
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! Every pipeline receives its collaborators explicitly: a [`StackProfile`], the
//! resolved [`Settings`], a [`ProcessRunner`], and a [`PromptGateway`]. The
//! project directory is an immutable [`ProjectTarget`] passed to each stage.
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based prompt gateway and log output
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use pulse_core::{CreateOptions, CreationPipeline, NextStack, Settings, SystemRunner};
//!
//! let settings = Settings::from_env()?;
//! let pipeline = CreationPipeline::new(&NextStack, &settings, &SystemRunner, &my_prompts);
//! let report = pipeline.run(options).await?;
//! ```

pub mod config;
pub mod error;
pub mod lock;
pub mod manifest;
pub mod pipeline;
pub mod project;
pub mod prompt;
pub mod report;
pub mod runtime;
pub mod stack;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::Settings;
pub use error::{PulseError, Result};
pub use pipeline::{
    ApiTechnology, CreateOptions, CreateReport, CreateState, CreationPipeline, CustomizeAnswers,
    DeleteOutcome, DeleteRequest,
};
pub use project::ProjectTarget;
pub use prompt::PromptGateway;
pub use runtime::{FailurePolicy, Invocation, ProcessRunner, StdioMode, StepOutcome, SystemRunner};
pub use stack::{NextStack, StackProfile};
