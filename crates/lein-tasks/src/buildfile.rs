//! Build file: declarative task definitions
//!
//! ```toml
//! [installation]
//! version = "2.9.1"
//!
//! [[task_sets]]
//! namespace = "library"
//! kind = "checks"
//!
//! [[tasks]]
//! namespace = "library"
//! kind = "test"
//! [tasks.options]
//! type = "unit"
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info, instrument};

use lein_tasks_core::config::{load_build_file, load_build_file_from_dir};
use lein_tasks_core::error::{ConfigError, Result};
use lein_tasks_graph::TaskGraph;
use lein_tasks_leiningen::{LeinCli, Leiningen};
use lein_tasks_tools::{Downloader, HttpDownloader};

use crate::definition::{define, TaskKind, TaskOptions};
use crate::installation::{InstallationOptions, InstallationTasks};
use crate::task_sets::{Checks, ChecksOptions};
use crate::tasks::{
    BuildTask, CheckTask, FormatTask, IdiomiseTask, LintTask, OptimiseTask, PedantiseTask,
    ReleaseTask, StartTask, StyleTask, TestTask,
};

/// Contents of a `lein-tasks.toml` / `lein-tasks.yaml` file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildFile {
    /// Leiningen installation tasks, when present
    pub installation: Option<InstallationOptions>,
    pub task_sets: Vec<TaskSetEntry>,
    pub tasks: Vec<TaskEntry>,
}

/// One `[[tasks]]` entry
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskEntry {
    /// Namespace to define the task in; may be nested ("a:b")
    #[serde(default)]
    pub namespace: Option<String>,
    pub kind: String,
    #[serde(default)]
    pub options: serde_json::Value,
}

/// One `[[task_sets]]` entry
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskSetEntry {
    #[serde(default)]
    pub namespace: Option<String>,
    pub kind: String,
    #[serde(default)]
    pub options: serde_json::Value,
}

/// What a build file defined
pub struct Definitions {
    pub installation: Option<InstallationTasks>,
    /// Runner the defined tasks use
    pub lein: Arc<dyn Leiningen>,
}

impl std::fmt::Debug for Definitions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Definitions")
            .field("installation", &self.installation)
            .finish_non_exhaustive()
    }
}

impl BuildFile {
    /// Load a build file from `path`
    pub fn load(path: &Path) -> Result<Self> {
        load_build_file(path)
    }

    /// Find and load the build file governing `dir`
    pub fn discover(dir: &Path) -> Result<(Self, PathBuf)> {
        load_build_file_from_dir(dir)
    }

    /// Define everything in the file.
    ///
    /// Tasks run the installed `lein` when an installation section is present
    /// and the `lein` on `PATH` otherwise.
    pub fn define(&self, graph: &mut TaskGraph) -> Result<Definitions> {
        let installation = self.define_installation(graph, Arc::new(HttpDownloader))?;
        let lein: Arc<dyn Leiningen> = match &installation {
            Some(installation) => installation.runner(),
            None => Arc::new(LeinCli::default()),
        };

        self.define_tasks(graph, &lein)?;
        Ok(Definitions { installation, lein })
    }

    /// Define everything in the file with an explicit runner and downloader
    pub fn define_with(
        &self,
        graph: &mut TaskGraph,
        lein: Arc<dyn Leiningen>,
        downloader: Arc<dyn Downloader>,
    ) -> Result<Definitions> {
        let installation = self.define_installation(graph, downloader)?;
        self.define_tasks(graph, &lein)?;
        Ok(Definitions { installation, lein })
    }

    fn define_installation(
        &self,
        graph: &mut TaskGraph,
        downloader: Arc<dyn Downloader>,
    ) -> Result<Option<InstallationTasks>> {
        self.installation
            .clone()
            .map(|options| InstallationTasks::define(graph, options, downloader))
            .transpose()
    }

    #[instrument(skip_all, fields(task_sets = self.task_sets.len(), tasks = self.tasks.len()))]
    fn define_tasks(&self, graph: &mut TaskGraph, lein: &Arc<dyn Leiningen>) -> Result<()> {
        for entry in &self.task_sets {
            in_namespace(graph, entry.namespace.as_deref(), |graph| {
                define_task_set(graph, lein, &entry.kind, entry.options.clone())
            })?;
        }

        for entry in &self.tasks {
            in_namespace(graph, entry.namespace.as_deref(), |graph| {
                define_task(graph, lein, &entry.kind, entry.options.clone())
            })?;
        }

        info!(tasks = graph.len(), "build file defined");
        Ok(())
    }
}

fn in_namespace<R>(
    graph: &mut TaskGraph,
    namespace: Option<&str>,
    f: impl FnOnce(&mut TaskGraph) -> R,
) -> R {
    match namespace {
        Some(namespace) => graph.namespace(namespace, f),
        None => f(graph),
    }
}

/// Define one task of the named kind from untyped options
pub fn define_task(
    graph: &mut TaskGraph,
    lein: &Arc<dyn Leiningen>,
    kind: &str,
    options: serde_json::Value,
) -> Result<()> {
    debug!(kind, "defining task from build file");
    match kind {
        LintTask::KIND => define_entry::<LintTask>(graph, lein, options),
        OptimiseTask::KIND => define_entry::<OptimiseTask>(graph, lein, options),
        IdiomiseTask::KIND => define_entry::<IdiomiseTask>(graph, lein, options),
        FormatTask::KIND => define_entry::<FormatTask>(graph, lein, options),
        PedantiseTask::KIND => define_entry::<PedantiseTask>(graph, lein, options),
        StyleTask::KIND => define_entry::<StyleTask>(graph, lein, options),
        BuildTask::KIND => define_entry::<BuildTask>(graph, lein, options),
        ReleaseTask::KIND => define_entry::<ReleaseTask>(graph, lein, options),
        StartTask::KIND => define_entry::<StartTask>(graph, lein, options),
        TestTask::KIND => define_entry::<TestTask>(graph, lein, options),
        CheckTask::KIND => define_entry::<CheckTask>(graph, lein, options),
        other => Err(ConfigError::UnknownKind {
            category: "task".to_string(),
            kind: other.to_string(),
        }
        .into()),
    }
}

/// Define one task set of the named kind from untyped options
pub fn define_task_set(
    graph: &mut TaskGraph,
    lein: &Arc<dyn Leiningen>,
    kind: &str,
    options: serde_json::Value,
) -> Result<()> {
    debug!(kind, "defining task set from build file");
    match kind {
        Checks::KIND => {
            let options: ChecksOptions = if options.is_null() {
                ChecksOptions::default()
            } else {
                serde_json::from_value(options).map_err(|e| ConfigError::UnknownOption {
                    kind: Checks::KIND.to_string(),
                    message: e.to_string(),
                })?
            };
            Checks::define(graph, lein, options, |_| {})?;
            Ok(())
        }
        other => Err(ConfigError::UnknownKind {
            category: "task set".to_string(),
            kind: other.to_string(),
        }
        .into()),
    }
}

fn define_entry<K: TaskKind>(
    graph: &mut TaskGraph,
    lein: &Arc<dyn Leiningen>,
    options: serde_json::Value,
) -> Result<()> {
    let options = TaskOptions::<K::Options>::from_value(K::KIND, options)?;
    define::<K>(graph, lein, options, |_| {})?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lein_tasks_core::error::Error;
    use lein_tasks_graph::CollectingReporter;
    use lein_tasks_leiningen::RecordingLeiningen;

    use crate::task_sets::TASK_SET_KINDS;
    use crate::tasks::TASK_KINDS;

    fn graph() -> TaskGraph {
        TaskGraph::with_reporter(Arc::new(CollectingReporter::default()))
    }

    fn lein() -> Arc<dyn Leiningen> {
        Arc::new(RecordingLeiningen::new())
    }

    #[test]
    fn test_parse_toml() {
        let file: BuildFile = toml::from_str(
            r#"
            [[task_sets]]
            namespace = "library"
            kind = "checks"
            [task_sets.options]
            fix = true

            [[tasks]]
            kind = "build"
            [tasks.options]
            main_namespace = "app.core"
            "#,
        )
        .unwrap();

        assert!(file.installation.is_none());
        assert_eq!(file.task_sets[0].namespace.as_deref(), Some("library"));
        assert_eq!(file.tasks[0].options["main_namespace"], "app.core");
    }

    #[test]
    fn test_parse_yaml() {
        let file: BuildFile = serde_yaml::from_str(
            r#"
installation:
  version: "2.9.1"
tasks:
  - namespace: app
    kind: start
    options:
      main_function: app.core/-main
      quote_arguments: true
"#,
        )
        .unwrap();

        assert_eq!(
            file.installation.and_then(|i| i.version).as_deref(),
            Some("2.9.1")
        );
        assert_eq!(file.tasks[0].kind, "start");
    }

    #[test]
    fn test_define_tasks_in_namespaces() {
        let file: BuildFile = toml::from_str(
            r#"
            [[task_sets]]
            namespace = "library"
            kind = "checks"

            [[tasks]]
            namespace = "library"
            kind = "test"
            [tasks.options]
            type = "unit"
            "#,
        )
        .unwrap();
        let mut graph = graph();

        file.define_tasks(&mut graph, &lein()).unwrap();

        for name in ["lint", "optimise", "idiomise", "format", "pedantise", "check", "test"] {
            assert!(graph.contains(&format!("library:{}", name)), "missing {}", name);
        }
        assert_eq!(
            graph.get("library:test").unwrap().description.as_deref(),
            Some("Run all unit tests.")
        );
    }

    #[test]
    fn test_every_kind_is_accepted() {
        let mut graph = graph();
        for kind in TASK_KINDS {
            define_task(&mut graph, &lein(), kind, serde_json::Value::Null).unwrap();
        }
        for kind in TASK_SET_KINDS {
            graph.namespace("set", |graph| {
                define_task_set(graph, &lein(), kind, serde_json::Value::Null).unwrap()
            });
        }

        assert!(graph.contains("style"));
        assert!(graph.contains("set:check"));
    }

    #[test]
    fn test_unknown_task_kind() {
        let mut graph = graph();
        let result = define_task(&mut graph, &lein(), "deploy", serde_json::Value::Null);
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::UnknownKind { .. }))
        ));
    }

    #[test]
    fn test_unknown_task_set_kind() {
        let mut graph = graph();
        let result = define_task_set(&mut graph, &lein(), "linters", serde_json::Value::Null);
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::UnknownKind { .. }))
        ));
    }

    #[test]
    fn test_unknown_option_in_build_file() {
        let file: BuildFile = toml::from_str(
            r#"
            [[tasks]]
            kind = "style"
            [tasks.options]
            profile = "test"
            "#,
        )
        .unwrap();
        let mut graph = graph();

        let result = file.define_tasks(&mut graph, &lein());
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::UnknownOption { .. }))
        ));
    }

    #[test]
    fn test_unknown_top_level_key_rejected() {
        assert!(toml::from_str::<BuildFile>("[deploy]\nregion = \"eu\"").is_err());
    }
}
