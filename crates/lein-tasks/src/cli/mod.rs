//! CLI definition and command handling

pub mod commands;
pub mod output;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use lein_tasks::BuildFile;
use lein_tasks_graph::{StdoutReporter, TaskGraph, TaskReporter, TracingReporter};

use commands::{CompletionsCommand, InitCommand, ListCommand, PlanCommand, RunCommand};

/// lein-tasks - Leiningen tasks from a build file
#[derive(Debug, Parser)]
#[command(name = "lein-tasks")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Suppress progress messages
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<PathBuf>,

    /// Build file to use instead of searching for one
    #[arg(short = 'f', long, global = true, env = "LEIN_TASKS_FILE")]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List described tasks
    List(ListCommand),

    /// Show the tasks a run would execute, in order
    Plan(PlanCommand),

    /// Run a task and its prerequisites
    Run(RunCommand),

    /// Write a starter build file
    Init(InitCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> anyhow::Result<()> {
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)
                .with_context(|| format!("cannot change directory to {}", dir.display()))?;
        }

        match self.command {
            Commands::List(ref cmd) => cmd.execute(&self),
            Commands::Plan(ref cmd) => cmd.execute(&self),
            Commands::Run(ref cmd) => cmd.execute(&self),
            Commands::Init(ref cmd) => cmd.execute(&self),
            Commands::Completions(ref cmd) => cmd.execute(),
        }
    }

    /// Load the build file and define its tasks
    pub fn load_graph(&self) -> anyhow::Result<TaskGraph> {
        let (build_file, path) = match &self.file {
            Some(path) => (BuildFile::load(path)?, path.clone()),
            None => BuildFile::discover(&std::env::current_dir()?)?,
        };
        info!(path = %path.display(), "using build file");

        let reporter: Arc<dyn TaskReporter> = if self.quiet {
            Arc::new(TracingReporter)
        } else {
            Arc::new(StdoutReporter)
        };
        let mut graph = TaskGraph::with_reporter(reporter);
        build_file
            .define(&mut graph)
            .with_context(|| format!("invalid build file {}", path.display()))?;

        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run_with_arguments() {
        let cli = Cli::parse_from(["lein-tasks", "-C", "app", "run", "library:check", "prod"]);

        assert_eq!(cli.directory, Some(PathBuf::from("app")));
        match cli.command {
            Commands::Run(cmd) => {
                assert_eq!(cmd.task, "library:check");
                assert_eq!(cmd.arguments, vec!["prod"]);
            }
            other => panic!("expected run, got {:?}", other),
        }
    }
}
