//! Run command

use clap::Args;
use tracing::info;

use crate::cli::{output, Cli};

/// Run a task and its prerequisites
#[derive(Debug, Args)]
pub struct RunCommand {
    /// Task to run (e.g., "library:check")
    pub task: String,

    /// Positional arguments, bound to the task's argument names
    #[arg(trailing_var_arg = true)]
    pub arguments: Vec<String>,
}

impl RunCommand {
    /// Execute the run command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(task = %self.task, arguments = ?self.arguments, "executing run command");
        let graph = cli.load_graph()?;

        graph.invoke(&self.task, &self.arguments)?;

        if !cli.quiet {
            output::success(&format!("{} finished", self.task));
        }
        Ok(())
    }
}
