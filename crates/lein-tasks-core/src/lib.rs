//! lein-tasks core - shared foundations
//!
//! This crate provides the error taxonomy, the tri-state `Override` option used
//! by every task definition, scoped directory changes, and build file loading.

pub mod config;
pub mod directory;
pub mod error;
pub mod types;

pub use directory::{in_directory, DirectoryGuard};
pub use error::{ConfigError, Error, ExecutionError, GraphError, Result};
pub use types::{Environment, Override};
