//! Format task, backed by cljfmt

use serde::Deserialize;

use lein_tasks_core::error::Result;
use lein_tasks_core::types::Environment;
use lein_tasks_graph::TaskArguments;
use lein_tasks_leiningen::{CljfmtArgs, FormatMode, Leiningen};

use crate::definition::{bind_argument, TaskKind, TaskParams};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormatOptions {
    /// `check` or `fix`
    pub mode: Option<FormatMode>,
    pub paths: Option<Vec<String>>,
    pub profile: Option<String>,
    pub environment: Option<Environment>,
}

/// Format all clojure files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatTask {
    pub params: TaskParams,
    pub mode: Option<FormatMode>,
    pub paths: Option<Vec<String>>,
    pub profile: Option<String>,
    pub environment: Option<Environment>,
}

impl TaskKind for FormatTask {
    const KIND: &'static str = "format";
    const DEFAULT_NAME: &'static str = "format";

    type Options = FormatOptions;

    fn resolve(params: TaskParams, options: FormatOptions) -> Self {
        Self {
            params,
            mode: options.mode,
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
        "Format all clojure files.".to_string()
    }

    fn progress_message(&self) -> Option<String> {
        Some("Formatting all clojure files...".to_string())
    }

    fn apply_arguments(&mut self, arguments: &TaskArguments) {
        bind_argument(arguments, "profile", &mut self.profile);
    }

    fn invoke(&self, lein: &dyn Leiningen) -> Result<()> {
        lein.cljfmt(CljfmtArgs {
            mode: self.mode,
            paths: self.paths.clone(),
            profile: self.profile.clone(),
            environment: self.environment.clone(),
        })
    }
}
