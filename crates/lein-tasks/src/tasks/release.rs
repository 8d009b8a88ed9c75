//! Release task

use serde::Deserialize;

use lein_tasks_core::error::Result;
use lein_tasks_core::types::Environment;
use lein_tasks_graph::TaskArguments;
use lein_tasks_leiningen::{Leiningen, ReleaseArgs};

use crate::definition::{bind_argument, TaskKind, TaskParams};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReleaseOptions {
    /// Version level to bump (e.g., ":patch")
    pub level: Option<String>,
    pub profile: Option<String>,
    pub environment: Option<Environment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseTask {
    pub params: TaskParams,
    pub level: Option<String>,
    pub profile: Option<String>,
    pub environment: Option<Environment>,
}

impl TaskKind for ReleaseTask {
    const KIND: &'static str = "release";
    const DEFAULT_NAME: &'static str = "release";

    type Options = ReleaseOptions;

    fn resolve(params: TaskParams, options: ReleaseOptions) -> Self {
        Self {
            params,
            level: options.level,
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
        "Release library.".to_string()
    }

    fn progress_message(&self) -> Option<String> {
        Some("Releasing library...".to_string())
    }

    fn apply_arguments(&mut self, arguments: &TaskArguments) {
        bind_argument(arguments, "level", &mut self.level);
        bind_argument(arguments, "profile", &mut self.profile);
    }

    fn invoke(&self, lein: &dyn Leiningen) -> Result<()> {
        lein.release(ReleaseArgs {
            level: self.level.clone(),
            profile: self.profile.clone(),
            environment: self.environment.clone(),
        })
    }
}
