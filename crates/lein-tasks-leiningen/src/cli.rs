//! Process-backed Leiningen runner

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};

use lein_tasks_core::error::{ExecutionError, Result};

use crate::command::LeinCall;
use crate::traits::Leiningen;

/// Default binary looked up on `PATH`
pub const DEFAULT_BINARY: &str = "lein";

/// Where the `lein` binary lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeinConfiguration {
    /// Bare command name looked up on `PATH`, or a path to the binary
    pub binary: PathBuf,
}

impl LeinConfiguration {
    /// Use the binary at `binary`
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Locate the binary to execute
    pub fn resolve_binary(&self) -> Result<PathBuf> {
        if is_bare_name(&self.binary) {
            return which::which(&self.binary).map_err(|e| {
                ExecutionError::BinaryNotFound(format!("{}: {}", self.binary.display(), e)).into()
            });
        }

        if self.binary.is_file() {
            Ok(self.binary.clone())
        } else {
            Err(ExecutionError::BinaryNotFound(self.binary.display().to_string()).into())
        }
    }
}

impl Default for LeinConfiguration {
    fn default() -> Self {
        Self::new(DEFAULT_BINARY)
    }
}

fn is_bare_name(path: &Path) -> bool {
    path.components().count() == 1 && path.parent().map_or(true, |p| p.as_os_str().is_empty())
}

/// Runs `lein` as a child process, inheriting standard streams
#[derive(Debug, Clone, Default)]
pub struct LeinCli {
    configuration: LeinConfiguration,
}

impl LeinCli {
    /// Create a runner for the given configuration
    pub fn new(configuration: LeinConfiguration) -> Self {
        Self { configuration }
    }

    /// The configuration in use
    pub fn configuration(&self) -> &LeinConfiguration {
        &self.configuration
    }
}

impl Leiningen for LeinCli {
    fn execute(&self, call: LeinCall) -> Result<()> {
        let binary = self.configuration.resolve_binary()?;
        let line = call.command_line();
        let rendered = line.to_string();
        info!(command = %rendered, "running leiningen");

        let status = Command::new(&binary)
            .args(line.program_arguments())
            .envs(&line.environment)
            .status()
            .map_err(|source| ExecutionError::Spawn {
                command: rendered.clone(),
                source,
            })?;

        debug!(command = %rendered, code = ?status.code(), "leiningen exited");

        if !status.success() {
            return Err(ExecutionError::CommandFailed {
                command: rendered,
                code: status.code(),
            }
            .into());
        }

        Ok(())
    }
}
