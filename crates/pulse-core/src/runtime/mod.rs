//! External process execution
//!
//! This module provides:
//! - The process runner abstraction and its tokio-backed implementation
//! - A sequential executor with an explicit failure policy
//! - Preflight detection of the scaffold runner and package manager

pub mod check;
pub mod process;
pub mod sequence;

pub use check::{check_executable, check_package_manager, check_runtimes, RuntimeInfo};
pub use process::{Invocation, ProcessRunner, StdioMode, StepOutcome, SystemRunner};
pub use sequence::{run_sequence, FailurePolicy, SequenceReport, Step, StepRecord};
