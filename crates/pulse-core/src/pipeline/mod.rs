//! Pipelines composed from the runner, seeder, patcher, and prompt gateway

pub mod create;
pub mod customize;
pub mod delete;
pub mod update;

pub use create::{CreateOptions, CreateReport, CreateState, CreationPipeline};
pub use customize::{ApiTechnology, ChainReport, Customization, CustomizeAnswers};
pub use delete::{run_delete, DeleteOutcome, DeleteRequest};
pub use update::{open_upgrade_guide, run_update, UpdateReport};
