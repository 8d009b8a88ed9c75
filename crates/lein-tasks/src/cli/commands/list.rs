//! List command

use clap::Args;
use serde::Serialize;
use tracing::info;

use crate::cli::{output, Cli, OutputFormat};

/// List described tasks
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Include tasks without a description
    #[arg(short, long)]
    pub all: bool,
}

#[derive(Debug, Serialize)]
struct TaskSummary {
    name: String,
    description: Option<String>,
    prerequisites: Vec<String>,
}

impl ListCommand {
    /// Execute the list command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(all = self.all, "executing list command");
        let graph = cli.load_graph()?;

        if cli.format == OutputFormat::Text && !self.all {
            print!("{}", graph.describe());
            return Ok(());
        }

        let tasks: Vec<TaskSummary> = graph
            .tasks()
            .filter(|node| self.all || node.description.is_some())
            .map(|node| TaskSummary {
                name: node.id.to_string(),
                description: node.description.clone(),
                prerequisites: node.prerequisites.clone(),
            })
            .collect();

        if cli.format == OutputFormat::Json {
            println!("{}", serde_json::to_string_pretty(&tasks)?);
            return Ok(());
        }

        let width = tasks.iter().map(|t| t.name.len()).max().unwrap_or(0);
        for task in &tasks {
            println!(
                "{}  {}",
                output::task_name(&format!("{:<width$}", task.name, width = width)),
                output::dim(&format!("# {}", task.description.as_deref().unwrap_or_default()))
            );
        }

        Ok(())
    }
}
