//! Configuration: run settings and JSON document patching

pub mod patcher;
pub mod settings;

pub use patcher::{patch_file, JsonDocument};
pub use settings::Settings;
