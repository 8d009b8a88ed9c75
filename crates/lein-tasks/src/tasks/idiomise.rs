//! Idiomise task, backed by kibit

use serde::Deserialize;

use lein_tasks_core::error::Result;
use lein_tasks_core::types::Environment;
use lein_tasks_graph::TaskArguments;
use lein_tasks_leiningen::{KibitArgs, Leiningen};

use crate::definition::{bind_argument, TaskKind, TaskParams};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IdiomiseOptions {
    /// Apply suggestions instead of reporting them
    pub replace: Option<bool>,
    /// Ask before applying each suggestion
    pub interactive: Option<bool>,
    pub reporter: Option<String>,
    pub paths: Option<Vec<String>>,
    pub profile: Option<String>,
    pub environment: Option<Environment>,
}

/// Transform all clojure files to be more idiomatic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdiomiseTask {
    pub params: TaskParams,
    pub replace: Option<bool>,
    pub interactive: Option<bool>,
    pub reporter: Option<String>,
    pub paths: Option<Vec<String>>,
    pub profile: Option<String>,
    pub environment: Option<Environment>,
}

impl TaskKind for IdiomiseTask {
    const KIND: &'static str = "idiomise";
    const DEFAULT_NAME: &'static str = "idiomise";

    type Options = IdiomiseOptions;

    fn resolve(params: TaskParams, options: IdiomiseOptions) -> Self {
        Self {
            params,
            replace: options.replace,
            interactive: options.interactive,
            reporter: options.reporter,
            paths: options.paths,
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
        "Transform all clojure files to be more idiomatic.".to_string()
    }

    fn progress_message(&self) -> Option<String> {
        Some("Making all clojure files more idiomatic...".to_string())
    }

    fn apply_arguments(&mut self, arguments: &TaskArguments) {
        bind_argument(arguments, "reporter", &mut self.reporter);
        bind_argument(arguments, "profile", &mut self.profile);
    }

    fn invoke(&self, lein: &dyn Leiningen) -> Result<()> {
        lein.kibit(KibitArgs {
            replace: self.replace,
            interactive: self.interactive,
            reporter: self.reporter.clone(),
            paths: self.paths.clone(),
            profile: self.profile.clone(),
            environment: self.environment.clone(),
        })
    }
}
