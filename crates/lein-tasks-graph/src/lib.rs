//! lein-tasks graph - namespace-scoped task registry
//!
//! This crate provides the task graph build scripts register into: qualified
//! task names, prerequisite resolution through namespace scopes, and
//! synchronous depth-first execution with progress reporting.

pub mod graph;
pub mod reporter;
pub mod task;

pub use graph::{TaskGraph, TaskNode};
pub use reporter::{CollectingReporter, StdoutReporter, TaskEvent, TaskReporter, TracingReporter};
pub use task::{action, ActionContext, Scope, TaskAction, TaskArguments, TaskId, TaskRegistration};
