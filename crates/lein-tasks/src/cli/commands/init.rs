//! Init command

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, ValueEnum};
use tracing::info;

use lein_tasks::BuildFile;
use lein_tasks_core::config::defaults::{
    DEFAULT_BUILD_FILE_TEMPLATE, DEFAULT_BUILD_FILE_TOML, DEFAULT_BUILD_FILE_YAML,
};

use crate::cli::{output, Cli};

/// Write a starter build file
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Force overwrite existing build file
    #[arg(long)]
    pub force: bool,

    /// Build file format
    #[arg(long = "as", value_enum, default_value = "toml")]
    pub file_format: FileFormat,

    /// Output file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Build file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FileFormat {
    Toml,
    Yaml,
}

impl InitCommand {
    /// Execute the init command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(force = self.force, format = ?self.file_format, "executing init command");
        let path = self.output.clone().unwrap_or_else(|| {
            PathBuf::from(match self.file_format {
                FileFormat::Toml => DEFAULT_BUILD_FILE_TOML,
                FileFormat::Yaml => DEFAULT_BUILD_FILE_YAML,
            })
        });

        if path.exists() && !self.force {
            anyhow::bail!(
                "Build file already exists at {}. Use --force to overwrite.",
                path.display()
            );
        }

        std::fs::write(&path, render(self.file_format)?)
            .with_context(|| format!("cannot write {}", path.display()))?;

        if !cli.quiet {
            output::success(&format!("Created {}", path.display()));
        }
        Ok(())
    }
}

/// The starter build file in the requested format
fn render(format: FileFormat) -> anyhow::Result<String> {
    match format {
        FileFormat::Toml => Ok(DEFAULT_BUILD_FILE_TEMPLATE.to_string()),
        FileFormat::Yaml => {
            let template: serde_json::Value = toml::from_str(DEFAULT_BUILD_FILE_TEMPLATE)?;
            Ok(serde_yaml::to_string(&template)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_parse_as_build_files() {
        for format in [FileFormat::Toml, FileFormat::Yaml] {
            let content = render(format).unwrap();
            let parsed: BuildFile = match format {
                FileFormat::Toml => toml::from_str(&content).unwrap(),
                FileFormat::Yaml => serde_yaml::from_str(&content).unwrap(),
            };
            assert_eq!(parsed.task_sets.len(), 1);
            assert_eq!(parsed.tasks[0].kind, "test");
        }
    }
}
