//! Pedantise task, backed by bikeshed

use serde::Deserialize;

use lein_tasks_core::error::Result;
use lein_tasks_core::types::Environment;
use lein_tasks_graph::TaskArguments;
use lein_tasks_leiningen::{BikeshedArgs, Leiningen};

use crate::definition::{bind_argument, TaskKind, TaskParams};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PedantiseOptions {
    pub show_help: Option<bool>,
    pub verbose: Option<bool>,
    pub maximum_line_length: Option<u32>,
    pub long_lines: Option<bool>,
    pub trailing_whitespace: Option<bool>,
    pub trailing_blank_lines: Option<bool>,
    pub var_redefs: Option<bool>,
    pub docstrings: Option<bool>,
    pub name_collisions: Option<bool>,
    pub exclude_profiles: Option<Vec<String>>,
    pub profile: Option<String>,
    pub environment: Option<Environment>,
}

/// Hunt for 'bad' code in all clojure files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PedantiseTask {
    pub params: TaskParams,
    pub show_help: Option<bool>,
    pub verbose: Option<bool>,
    pub maximum_line_length: Option<u32>,
    pub long_lines: Option<bool>,
    pub trailing_whitespace: Option<bool>,
    pub trailing_blank_lines: Option<bool>,
    pub var_redefs: Option<bool>,
    pub docstrings: Option<bool>,
    pub name_collisions: Option<bool>,
    pub exclude_profiles: Option<Vec<String>>,
    pub profile: Option<String>,
    pub environment: Option<Environment>,
}

impl TaskKind for PedantiseTask {
    const KIND: &'static str = "pedantise";
    const DEFAULT_NAME: &'static str = "pedantise";

    type Options = PedantiseOptions;

    fn resolve(params: TaskParams, options: PedantiseOptions) -> Self {
        Self {
            params,
            show_help: options.show_help,
            verbose: options.verbose,
            maximum_line_length: options.maximum_line_length,
            long_lines: options.long_lines,
            trailing_whitespace: options.trailing_whitespace,
            trailing_blank_lines: options.trailing_blank_lines,
            var_redefs: options.var_redefs,
            docstrings: options.docstrings,
            name_collisions: options.name_collisions,
            exclude_profiles: options.exclude_profiles,
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
        "Hunt for 'bad' code in all clojure files.".to_string()
    }

    fn progress_message(&self) -> Option<String> {
        Some("Looking for 'bad' code in all clojure files...".to_string())
    }

    fn apply_arguments(&mut self, arguments: &TaskArguments) {
        bind_argument(arguments, "profile", &mut self.profile);
    }

    fn invoke(&self, lein: &dyn Leiningen) -> Result<()> {
        lein.bikeshed(BikeshedArgs {
            show_help: self.show_help,
            verbose: self.verbose,
            maximum_line_length: self.maximum_line_length,
            long_lines: self.long_lines,
            trailing_whitespace: self.trailing_whitespace,
            trailing_blank_lines: self.trailing_blank_lines,
            var_redefs: self.var_redefs,
            docstrings: self.docstrings,
            name_collisions: self.name_collisions,
            exclude_profiles: self.exclude_profiles.clone(),
            profile: self.profile.clone(),
            environment: self.environment.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lein_tasks_leiningen::{LeinCall, RecordingLeiningen};

    #[test]
    fn test_invoke_forwards_flags() {
        let options: PedantiseOptions = serde_json::from_value(serde_json::json!({
            "maximum_line_length": 100,
            "docstrings": false,
            "exclude_profiles": ["dev"]
        }))
        .unwrap();
        let task = PedantiseTask::resolve(TaskParams::new("pedantise"), options);
        let lein = RecordingLeiningen::new();

        task.invoke(&lein).unwrap();

        assert_eq!(
            lein.last_call(),
            Some(LeinCall::Bikeshed(BikeshedArgs {
                maximum_line_length: Some(100),
                docstrings: Some(false),
                exclude_profiles: Some(vec!["dev".to_string()]),
                ..Default::default()
            }))
        );
    }
}
