//! Optimise task: compile everything and warn on reflection

use serde::Deserialize;

use lein_tasks_core::error::Result;
use lein_tasks_core::types::Environment;
use lein_tasks_graph::TaskArguments;
use lein_tasks_leiningen::{CheckArgs, Leiningen};

use crate::definition::{bind_argument, TaskKind, TaskParams};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptimiseOptions {
    pub profile: Option<String>,
    pub environment: Option<Environment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimiseTask {
    pub params: TaskParams,
    pub profile: Option<String>,
    pub environment: Option<Environment>,
}

impl TaskKind for OptimiseTask {
    const KIND: &'static str = "optimise";
    const DEFAULT_NAME: &'static str = "optimise";

    type Options = OptimiseOptions;

    fn resolve(params: TaskParams, options: OptimiseOptions) -> Self {
        Self {
            params,
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
        "Warn on reflection for all clojure files.".to_string()
    }

    fn progress_message(&self) -> Option<String> {
        Some("Checking for uses of reflection in all clojure files...".to_string())
    }

    fn apply_arguments(&mut self, arguments: &TaskArguments) {
        bind_argument(arguments, "profile", &mut self.profile);
    }

    fn invoke(&self, lein: &dyn Leiningen) -> Result<()> {
        lein.check(CheckArgs {
            profile: self.profile.clone(),
            environment: self.environment.clone(),
        })
    }
}
