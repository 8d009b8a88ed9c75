//! Check task: runs every other check as a prerequisite

use serde::Deserialize;

use lein_tasks_core::error::Result;
use lein_tasks_leiningen::Leiningen;

use crate::definition::{TaskKind, TaskParams};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckOptions {
    pub lint_task_name: Option<String>,
    pub optimise_task_name: Option<String>,
    pub idiomise_task_name: Option<String>,
    pub format_task_name: Option<String>,
    pub pedantise_task_name: Option<String>,
}

/// Perform all checks against clojure files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckTask {
    pub params: TaskParams,
    pub lint_task_name: String,
    pub optimise_task_name: String,
    pub idiomise_task_name: String,
    pub format_task_name: String,
    pub pedantise_task_name: String,
}

impl TaskKind for CheckTask {
    const KIND: &'static str = "check";
    const DEFAULT_NAME: &'static str = "check";

    type Options = CheckOptions;

    fn resolve(params: TaskParams, options: CheckOptions) -> Self {
        Self {
            params,
            lint_task_name: options.lint_task_name.unwrap_or_else(|| "lint".to_string()),
            optimise_task_name: options
                .optimise_task_name
                .unwrap_or_else(|| "optimise".to_string()),
            idiomise_task_name: options
                .idiomise_task_name
                .unwrap_or_else(|| "idiomise".to_string()),
            format_task_name: options
                .format_task_name
                .unwrap_or_else(|| "format".to_string()),
            pedantise_task_name: options
                .pedantise_task_name
                .unwrap_or_else(|| "pedantise".to_string()),
        }
    }

    fn params(&self) -> &TaskParams {
        &self.params
    }

    fn params_mut(&mut self) -> &mut TaskParams {
        &mut self.params
    }

    fn default_description(&self) -> String {
        "Perform all checks against clojure files.".to_string()
    }

    /// The member checks, in order; no ensure task
    fn default_prerequisites(&self) -> Vec<String> {
        vec![
            self.lint_task_name.clone(),
            self.optimise_task_name.clone(),
            self.idiomise_task_name.clone(),
            self.format_task_name.clone(),
            self.pedantise_task_name.clone(),
        ]
    }

    fn progress_message(&self) -> Option<String> {
        None
    }

    fn invoke(&self, _lein: &dyn Leiningen) -> Result<()> {
        Ok(())
    }
}
