//! Error types for lein-tasks

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using the workspace error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for lein-tasks operations
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration-related errors, raised while defining tasks
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Task graph errors, raised while resolving or invoking tasks
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// Errors from running an external command or touching the filesystem
    /// on behalf of a task
    #[error(transparent)]
    Execution(#[from] ExecutionError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error was raised while defining tasks rather than running them
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Build file not found
    #[error("Build file not found at or above {0}")]
    NotFound(PathBuf),

    /// An option key the task kind does not recognise
    #[error("Unrecognised option for {kind} task: {message}")]
    UnknownOption { kind: String, message: String },

    /// A task or task set kind that does not exist
    #[error("Unknown {category} kind: {kind}")]
    UnknownKind { category: String, kind: String },

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading build file: {0}")]
    Io(#[from] std::io::Error),
}

/// Task graph errors
#[derive(Debug, Error)]
pub enum GraphError {
    /// No task matches the reference from the given scope
    #[error("Don't know how to build task '{0}'")]
    TaskNotFound(String),

    /// A task depends on itself, directly or transitively
    #[error("Circular dependency detected: {0}")]
    CyclicDependency(String),

    /// More positional arguments than the task declares
    #[error("Task '{task}' accepts {expected} argument(s) but {given} were given")]
    ArgumentCount {
        task: String,
        expected: usize,
        given: usize,
    },
}

/// Errors raised while a task action runs
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// Command exited unsuccessfully
    #[error("Command failed: {command} (exit code: {code:?})")]
    CommandFailed { command: String, code: Option<i32> },

    /// Command could not be started
    #[error("Failed to start command {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The binary to execute could not be located
    #[error("Binary not found: {0}")]
    BinaryNotFound(String),

    /// Changing into the task directory failed
    #[error("Cannot change directory to {}: {source}", path.display())]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Fetching a dependency failed
    #[error("Download of {uri} failed: {reason}")]
    DownloadFailed { uri: String, reason: String },

    /// Installing a fetched dependency failed
    #[error("Installation failed: {0}")]
    InstallFailed(String),
}
