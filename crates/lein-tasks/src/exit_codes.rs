//! Exit codes for the CLI

use lein_tasks_core::Error;

/// Success
#[allow(dead_code)]
pub const SUCCESS: i32 = 0;

/// A task failed, or the requested task does not exist
pub const ERROR: i32 = 1;

/// The build file is missing or invalid
pub const CONFIG_ERROR: i32 = 2;

/// Exit code for an error returned by a command
pub fn for_error(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<Error>() {
        Some(e) if e.is_config() => CONFIG_ERROR,
        _ => ERROR,
    }
}
