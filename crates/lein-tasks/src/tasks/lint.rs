//! Lint task, backed by eastwood

use serde::Deserialize;

use lein_tasks_core::error::Result;
use lein_tasks_core::types::Environment;
use lein_tasks_graph::TaskArguments;
use lein_tasks_leiningen::{EastwoodArgs, Leiningen};

use crate::definition::{bind_argument, TaskKind, TaskParams};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LintOptions {
    /// Eastwood options map
    pub config: Option<String>,
    pub profile: Option<String>,
    pub environment: Option<Environment>,
}

/// Lint all clojure files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintTask {
    pub params: TaskParams,
    pub config: Option<String>,
    pub profile: Option<String>,
    pub environment: Option<Environment>,
}

impl TaskKind for LintTask {
    const KIND: &'static str = "lint";
    const DEFAULT_NAME: &'static str = "lint";

    type Options = LintOptions;

    fn resolve(params: TaskParams, options: LintOptions) -> Self {
        Self {
            params,
            config: options.config,
            profile: options.profile,
            environment: options.environment,
        }
    }

    fn params(&self) -> &TaskParams {
        &self.params
    }

    fn params_mut(&mut self) -> &mut TaskParams {
        &mut self.params
    }

    fn default_description(&self) -> String {
        "Lint all clojure files.".to_string()
    }

    fn progress_message(&self) -> Option<String> {
        Some("Linting all clojure files...".to_string())
    }

    fn apply_arguments(&mut self, arguments: &TaskArguments) {
        bind_argument(arguments, "config", &mut self.config);
        bind_argument(arguments, "profile", &mut self.profile);
    }

    fn invoke(&self, lein: &dyn Leiningen) -> Result<()> {
        lein.eastwood(EastwoodArgs {
            config: self.config.clone(),
            profile: self.profile.clone(),
            environment: self.environment.clone(),
        })
    }
}
