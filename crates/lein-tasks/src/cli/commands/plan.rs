//! Plan command

use clap::Args;
use tracing::info;

use crate::cli::{output, Cli, OutputFormat};

/// Show the tasks a run would execute, in order
#[derive(Debug, Args)]
pub struct PlanCommand {
    /// Task to plan (e.g., "library:check")
    pub task: String,
}

impl PlanCommand {
    /// Execute the plan command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(task = %self.task, "executing plan command");
        let graph = cli.load_graph()?;
        let plan: Vec<String> = graph
            .execution_plan(&self.task)?
            .iter()
            .map(ToString::to_string)
            .collect();

        if cli.format == OutputFormat::Json {
            println!("{}", serde_json::to_string_pretty(&plan)?);
            return Ok(());
        }

        if !cli.quiet {
            output::info(&format!(
                "{} task{} for {}",
                plan.len(),
                if plan.len() == 1 { "" } else { "s" },
                output::task_name(&self.task)
            ));
        }
        for (position, name) in plan.iter().enumerate() {
            println!("{:>3}. {}", position + 1, name);
        }

        Ok(())
    }
}
