//! Build task: standalone uberjar

use serde::Deserialize;

use lein_tasks_core::error::Result;
use lein_tasks_core::types::Environment;
use lein_tasks_graph::TaskArguments;
use lein_tasks_leiningen::{Leiningen, UberjarArgs};

use crate::definition::{bind_argument, TaskKind, TaskParams};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildOptions {
    /// Namespace containing `-main`
    pub main_namespace: Option<String>,
    pub profile: Option<String>,
    pub environment: Option<Environment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildTask {
    pub params: TaskParams,
    pub main_namespace: Option<String>,
    pub profile: Option<String>,
    pub environment: Option<Environment>,
}

impl TaskKind for BuildTask {
    const KIND: &'static str = "build";
    const DEFAULT_NAME: &'static str = "build";

    type Options = BuildOptions;

    fn resolve(params: TaskParams, options: BuildOptions) -> Self {
        Self {
            params,
            main_namespace: options.main_namespace,
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
        "Build standalone uberjar.".to_string()
    }

    fn progress_message(&self) -> Option<String> {
        Some("Building standalone uberjar...".to_string())
    }

    fn apply_arguments(&mut self, arguments: &TaskArguments) {
        bind_argument(arguments, "main_namespace", &mut self.main_namespace);
        bind_argument(arguments, "profile", &mut self.profile);
    }

    fn invoke(&self, lein: &dyn Leiningen) -> Result<()> {
        lein.uberjar(UberjarArgs {
            main_namespace: self.main_namespace.clone(),
            profile: self.profile.clone(),
            environment: self.environment.clone(),
        })
    }
}
