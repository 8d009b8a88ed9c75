//! Start task: run the application

use serde::Deserialize;

use lein_tasks_core::error::Result;
use lein_tasks_core::types::Environment;
use lein_tasks_graph::TaskArguments;
use lein_tasks_leiningen::{Leiningen, RunArgs};

use crate::definition::{bind_argument, TaskKind, TaskParams};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StartOptions {
    /// Fully qualified function to run instead of the project's `:main`
    pub main_function: Option<String>,
    pub arguments: Option<Vec<String>>,
    pub quote_arguments: Option<bool>,
    pub profile: Option<String>,
    pub environment: Option<Environment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTask {
    pub params: TaskParams,
    pub main_function: Option<String>,
    pub arguments: Option<Vec<String>>,
    pub quote_arguments: Option<bool>,
    pub profile: Option<String>,
    pub environment: Option<Environment>,
}

impl TaskKind for StartTask {
    const KIND: &'static str = "start";
    const DEFAULT_NAME: &'static str = "start";

    type Options = StartOptions;

    fn resolve(params: TaskParams, options: StartOptions) -> Self {
        Self {
            params,
            main_function: options.main_function,
            arguments: options.arguments,
            quote_arguments: options.quote_arguments,
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
        "Run the application.".to_string()
    }

    fn progress_message(&self) -> Option<String> {
        Some("Running the application...".to_string())
    }

    fn apply_arguments(&mut self, arguments: &TaskArguments) {
        bind_argument(arguments, "main_function", &mut self.main_function);
        bind_argument(arguments, "profile", &mut self.profile);
    }

    fn invoke(&self, lein: &dyn Leiningen) -> Result<()> {
        lein.run(RunArgs {
            main_function: self.main_function.clone(),
            arguments: self.arguments.clone(),
            quote_arguments: self.quote_arguments,
            profile: self.profile.clone(),
            environment: self.environment.clone(),
        })
    }
}
