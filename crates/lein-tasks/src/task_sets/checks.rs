//! The checks task set: lint, optimise, idiomise, format and pedantise, plus
//! a `check` task that depends on all five

use std::path::PathBuf;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{info, instrument};

use lein_tasks_core::error::Result;
use lein_tasks_core::types::Environment;
use lein_tasks_core::Override;
use lein_tasks_graph::TaskGraph;
use lein_tasks_leiningen::{FormatMode, Leiningen};

use crate::definition::{
    define, CommonOptions, TaskOptions, DEFAULT_DIRECTORY, DEFAULT_ENSURE_TASK_NAME,
};
use crate::tasks::{
    CheckOptions, CheckTask, FormatOptions, FormatTask, IdiomiseOptions, IdiomiseTask,
    LintOptions, LintTask, OptimiseOptions, OptimiseTask, PedantiseOptions, PedantiseTask,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChecksOptions {
    pub profile: Option<String>,
    pub environment: Option<Environment>,
    pub directory: Override<PathBuf>,
    /// Let idiomise and format rewrite files instead of reporting
    pub fix: Option<bool>,
    pub ensure_task_name: Override<String>,
    pub argument_names: Option<Vec<String>>,
    pub lint_task_name: Option<String>,
    pub optimise_task_name: Option<String>,
    pub idiomise_task_name: Option<String>,
    pub format_task_name: Option<String>,
    pub pedantise_task_name: Option<String>,
    pub check_task_name: Option<String>,
}

/// Resolved configuration of the checks set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checks {
    pub profile: Option<String>,
    pub environment: Option<Environment>,
    pub directory: Option<PathBuf>,
    pub fix: bool,
    pub ensure_task_name: Option<String>,
    pub argument_names: Vec<String>,
    pub lint_task_name: String,
    pub optimise_task_name: String,
    pub idiomise_task_name: String,
    pub format_task_name: String,
    pub pedantise_task_name: String,
    pub check_task_name: String,
}

/// The frozen members of one checks set
#[derive(Debug, Clone)]
pub struct ChecksTasks {
    pub lint: Arc<LintTask>,
    pub optimise: Arc<OptimiseTask>,
    pub idiomise: Arc<IdiomiseTask>,
    pub format: Arc<FormatTask>,
    pub pedantise: Arc<PedantiseTask>,
    pub check: Arc<CheckTask>,
}

impl Checks {
    /// Kind name used in build files
    pub const KIND: &'static str = "checks";

    /// Overlay options on the set defaults
    pub fn resolve(options: ChecksOptions) -> Self {
        let name = |given: Option<String>, default: &str| {
            given.unwrap_or_else(|| default.to_string())
        };

        Self {
            profile: options.profile,
            environment: options.environment,
            directory: options
                .directory
                .resolve(Some(PathBuf::from(DEFAULT_DIRECTORY))),
            fix: options.fix.unwrap_or(false),
            ensure_task_name: options
                .ensure_task_name
                .resolve(Some(DEFAULT_ENSURE_TASK_NAME.to_string()))
                .filter(|name| !name.is_empty()),
            argument_names: options.argument_names.unwrap_or_default(),
            lint_task_name: name(options.lint_task_name, "lint"),
            optimise_task_name: name(options.optimise_task_name, "optimise"),
            idiomise_task_name: name(options.idiomise_task_name, "idiomise"),
            format_task_name: name(options.format_task_name, "format"),
            pedantise_task_name: name(options.pedantise_task_name, "pedantise"),
            check_task_name: name(options.check_task_name, "check"),
        }
    }

    /// Resolve the set and define its six tasks under the graph's current scope.
    ///
    /// `customize` sees the set configuration before member options are derived
    /// from it, so a changed `fix` flows into idiomise and format.
    #[instrument(skip_all, fields(scope = %graph.current_scope()))]
    pub fn define(
        graph: &mut TaskGraph,
        lein: &Arc<dyn Leiningen>,
        options: ChecksOptions,
        customize: impl FnOnce(&mut Checks),
    ) -> Result<ChecksTasks> {
        let mut checks = Self::resolve(options);
        customize(&mut checks);
        info!(fix = checks.fix, check = %checks.check_task_name, "defining checks task set");

        let lint = define::<LintTask>(
            graph,
            lein,
            checks.member(
                &checks.lint_task_name,
                LintOptions {
                    profile: checks.profile.clone(),
                    environment: checks.environment.clone(),
                    ..Default::default()
                },
            ),
            |_| {},
        )?;

        let optimise = define::<OptimiseTask>(
            graph,
            lein,
            checks.member(
                &checks.optimise_task_name,
                OptimiseOptions {
                    profile: checks.profile.clone(),
                    environment: checks.environment.clone(),
                },
            ),
            |_| {},
        )?;

        let idiomise = define::<IdiomiseTask>(
            graph,
            lein,
            checks.member(
                &checks.idiomise_task_name,
                IdiomiseOptions {
                    replace: Some(checks.fix),
                    profile: checks.profile.clone(),
                    environment: checks.environment.clone(),
                    ..Default::default()
                },
            ),
            |_| {},
        )?;

        let format = define::<FormatTask>(
            graph,
            lein,
            checks.member(
                &checks.format_task_name,
                FormatOptions {
                    mode: Some(FormatMode::from_fix(checks.fix)),
                    profile: checks.profile.clone(),
                    environment: checks.environment.clone(),
                    ..Default::default()
                },
            ),
            |_| {},
        )?;

        let pedantise = define::<PedantiseTask>(
            graph,
            lein,
            checks.member(
                &checks.pedantise_task_name,
                PedantiseOptions {
                    profile: checks.profile.clone(),
                    environment: checks.environment.clone(),
                    ..Default::default()
                },
            ),
            |_| {},
        )?;

        let check = define::<CheckTask>(
            graph,
            lein,
            checks.member(
                &checks.check_task_name,
                CheckOptions {
                    lint_task_name: Some(checks.lint_task_name.clone()),
                    optimise_task_name: Some(checks.optimise_task_name.clone()),
                    idiomise_task_name: Some(checks.idiomise_task_name.clone()),
                    format_task_name: Some(checks.format_task_name.clone()),
                    pedantise_task_name: Some(checks.pedantise_task_name.clone()),
                },
            ),
            |_| {},
        )?;

        Ok(ChecksTasks {
            lint,
            optimise,
            idiomise,
            format,
            pedantise,
            check,
        })
    }

    /// Member options: the shared set parameters plus the member's own
    fn member<O: Default>(&self, name: &str, kind: O) -> TaskOptions<O> {
        TaskOptions {
            common: CommonOptions {
                name: Some(name.to_string()),
                directory: self.directory.clone().into(),
                ensure_task_name: self.ensure_task_name.clone().into(),
                argument_names: Some(self.argument_names.clone()),
                ..Default::default()
            },
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_defaults() {
        let checks = Checks::resolve(ChecksOptions::default());
        assert!(!checks.fix);
        assert_eq!(checks.directory, Some(PathBuf::from(".")));
        assert_eq!(checks.ensure_task_name.as_deref(), Some("leiningen:ensure"));
        assert_eq!(checks.check_task_name, "check");
        assert!(checks.argument_names.is_empty());
    }

    #[test]
    fn test_resolve_from_build_file_options() {
        let options: ChecksOptions = toml::from_str(
            r#"
            fix = true
            ensure_task_name = false
            lint_task_name = "eastwood"
            "#,
        )
        .unwrap();
        let checks = Checks::resolve(options);

        assert!(checks.fix);
        assert_eq!(checks.ensure_task_name, None);
        assert_eq!(checks.lint_task_name, "eastwood");
        assert_eq!(checks.optimise_task_name, "optimise");
    }

    #[test]
    fn test_unknown_set_option_rejected() {
        assert!(toml::from_str::<ChecksOptions>("reporter = \"markdown\"").is_err());
    }

    #[test]
    fn test_member_options_carry_set_parameters() {
        let checks = Checks::resolve(ChecksOptions {
            directory: Override::Clear,
            argument_names: Some(vec!["region".to_string()]),
            ..Default::default()
        });
        let options = checks.member("lint", LintOptions::default());

        assert_eq!(options.common.name.as_deref(), Some("lint"));
        assert_eq!(options.common.directory, Override::Clear);
        assert_eq!(
            options.common.ensure_task_name,
            Override::Set("leiningen:ensure".to_string())
        );
        assert_eq!(options.common.argument_names, Some(vec!["region".to_string()]));
    }
}
