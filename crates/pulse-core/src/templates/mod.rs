//! Template resources and project seeding
//!
//! This module provides:
//! - The two static configuration files copied into every new project
//! - Seeding of those files and of the fixed source folder layout

pub mod resources;
pub mod seeder;

pub use resources::{ResourceSource, LINT_STAGED_CONFIG, PRETTIER_CONFIG};
pub use seeder::{create_folders, seed_files, SeedReport};
