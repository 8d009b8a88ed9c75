//! Task sets: groups of related tasks defined together

pub mod checks;

pub use checks::{Checks, ChecksOptions, ChecksTasks};

/// Set kind names accepted in build files
pub const TASK_SET_KINDS: &[&str] = &[Checks::KIND];
