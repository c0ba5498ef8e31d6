/*
[INPUT]:  Public API exports for action-engine crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod task;

// Re-export main types for convenience
pub use config::EngineConfig;
pub use controller::{DEFAULT_EXECUTION_DELAY, TaskListController, TaskListSnapshot};
pub use error::ConfigError;
pub use task::{Task, TaskId, TaskStatus};
