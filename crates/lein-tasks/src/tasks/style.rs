//! Style task, backed by cljstyle
//!
//! This kind takes neither a profile nor an environment.

use serde::Deserialize;

use lein_tasks_core::error::Result;
use lein_tasks_leiningen::{CljstyleArgs, FormatMode, Leiningen};

use crate::definition::{TaskKind, TaskParams};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleOptions {
    pub mode: Option<FormatMode>,
    pub paths: Option<Vec<String>>,
}

/// Make all clojure files conform to a style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleTask {
    pub params: TaskParams,
    pub mode: Option<FormatMode>,
    pub paths: Option<Vec<String>>,
}

impl TaskKind for StyleTask {
    const KIND: &'static str = "style";
    const DEFAULT_NAME: &'static str = "style";

    type Options = StyleOptions;

    fn resolve(params: TaskParams, options: StyleOptions) -> Self {
        Self {
            params,
            mode: options.mode,
            paths: options.paths,
        }
    }

    fn params(&self) -> &TaskParams {
        &self.params
    }

    fn params_mut(&mut self) -> &mut TaskParams {
        &mut self.params
    }

    fn default_description(&self) -> String {
        "Make all clojure files conform to a style.".to_string()
    }

    fn progress_message(&self) -> Option<String> {
        Some("Styling all clojure files...".to_string())
    }

    fn invoke(&self, lein: &dyn Leiningen) -> Result<()> {
        lein.cljstyle(CljstyleArgs {
            mode: self.mode,
            paths: self.paths.clone(),
        })
    }
}
