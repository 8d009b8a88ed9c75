//! Shell completions generation command

use std::io::{self, Write};

use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use tracing::info;

use crate::cli::Cli;

/// Generate shell completions
#[derive(Debug, Args)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsCommand {
    /// Execute the completions command
    pub fn execute(&self) -> anyhow::Result<()> {
        info!(shell = %self.shell, "executing completions command");
        self.write_to(&mut io::stdout())
    }

    fn write_to(&self, out: &mut dyn Write) -> anyhow::Result<()> {
        generate(self.shell, &mut Cli::command(), "lein-tasks", out);
        out.flush()?;
        Ok(())
    }
}
