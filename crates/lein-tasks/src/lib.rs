//! lein-tasks - Leiningen tasks for a namespaced task graph
//!
//! Defines lint, optimise, idiomise, format, pedantise, check, style, build,
//! release, start and test tasks that each wrap one Leiningen command, the
//! `checks` task set that groups the checks, and tasks that vendor a pinned
//! Leiningen into the project.
//!
//! ```no_run
//! use lein_tasks::{define_check_tasks, define_installation_tasks, ChecksOptions};
//! use lein_tasks_graph::TaskGraph;
//!
//! # fn main() -> lein_tasks_core::Result<()> {
//! let mut graph = TaskGraph::new();
//! let installation = define_installation_tasks(&mut graph, Default::default())?;
//! let lein = installation.runner();
//!
//! graph.namespace("library", |graph| {
//!     define_check_tasks(graph, &lein, ChecksOptions::default(), |checks| checks.fix = true)
//! })?;
//!
//! graph.invoke("library:check", &[])?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use lein_tasks_core::error::Result;
use lein_tasks_graph::TaskGraph;
use lein_tasks_leiningen::Leiningen;

pub mod buildfile;
pub mod definition;
pub mod installation;
pub mod task_sets;
pub mod tasks;

pub use buildfile::{BuildFile, Definitions};
pub use definition::{define, CommonOptions, TaskKind, TaskOptions, TaskParams};
pub use installation::{
    define_installation_tasks, InstallationOptions, InstallationTasks, LeinVersionCheck,
};
pub use task_sets::{Checks, ChecksOptions, ChecksTasks};
pub use tasks::{
    BuildOptions, BuildTask, CheckOptions, CheckTask, FormatOptions, FormatTask, IdiomiseOptions,
    IdiomiseTask, LintOptions, LintTask, OptimiseOptions, OptimiseTask, PedantiseOptions,
    PedantiseTask, ReleaseOptions, ReleaseTask, StartOptions, StartTask, StyleOptions, StyleTask,
    TestOptions, TestTask, TASK_KINDS,
};

/// Define the checks task set: lint, optimise, idiomise, format, pedantise and check
pub fn define_check_tasks(
    graph: &mut TaskGraph,
    lein: &Arc<dyn Leiningen>,
    options: ChecksOptions,
    customize: impl FnOnce(&mut Checks),
) -> Result<ChecksTasks> {
    Checks::define(graph, lein, options, customize)
}

pub fn define_lint_task(
    graph: &mut TaskGraph,
    lein: &Arc<dyn Leiningen>,
    options: TaskOptions<LintOptions>,
    customize: impl FnOnce(&mut LintTask),
) -> Result<Arc<LintTask>> {
    define(graph, lein, options, customize)
}

pub fn define_optimise_task(
    graph: &mut TaskGraph,
    lein: &Arc<dyn Leiningen>,
    options: TaskOptions<OptimiseOptions>,
    customize: impl FnOnce(&mut OptimiseTask),
) -> Result<Arc<OptimiseTask>> {
    define(graph, lein, options, customize)
}

pub fn define_idiomise_task(
    graph: &mut TaskGraph,
    lein: &Arc<dyn Leiningen>,
    options: TaskOptions<IdiomiseOptions>,
    customize: impl FnOnce(&mut IdiomiseTask),
) -> Result<Arc<IdiomiseTask>> {
    define(graph, lein, options, customize)
}

pub fn define_format_task(
    graph: &mut TaskGraph,
    lein: &Arc<dyn Leiningen>,
    options: TaskOptions<FormatOptions>,
    customize: impl FnOnce(&mut FormatTask),
) -> Result<Arc<FormatTask>> {
    define(graph, lein, options, customize)
}

pub fn define_pedantise_task(
    graph: &mut TaskGraph,
    lein: &Arc<dyn Leiningen>,
    options: TaskOptions<PedantiseOptions>,
    customize: impl FnOnce(&mut PedantiseTask),
) -> Result<Arc<PedantiseTask>> {
    define(graph, lein, options, customize)
}

pub fn define_style_task(
    graph: &mut TaskGraph,
    lein: &Arc<dyn Leiningen>,
    options: TaskOptions<StyleOptions>,
    customize: impl FnOnce(&mut StyleTask),
) -> Result<Arc<StyleTask>> {
    define(graph, lein, options, customize)
}

/// Define a task that depends on every check
pub fn define_check_task(
    graph: &mut TaskGraph,
    lein: &Arc<dyn Leiningen>,
    options: TaskOptions<CheckOptions>,
    customize: impl FnOnce(&mut CheckTask),
) -> Result<Arc<CheckTask>> {
    define(graph, lein, options, customize)
}

/// Define a task that builds a standalone uberjar
pub fn define_build_task(
    graph: &mut TaskGraph,
    lein: &Arc<dyn Leiningen>,
    options: TaskOptions<BuildOptions>,
    customize: impl FnOnce(&mut BuildTask),
) -> Result<Arc<BuildTask>> {
    define(graph, lein, options, customize)
}

/// Define a task that releases the library
pub fn define_release_task(
    graph: &mut TaskGraph,
    lein: &Arc<dyn Leiningen>,
    options: TaskOptions<ReleaseOptions>,
    customize: impl FnOnce(&mut ReleaseTask),
) -> Result<Arc<ReleaseTask>> {
    define(graph, lein, options, customize)
}

/// Define a task that runs the application
pub fn define_start_task(
    graph: &mut TaskGraph,
    lein: &Arc<dyn Leiningen>,
    options: TaskOptions<StartOptions>,
    customize: impl FnOnce(&mut StartTask),
) -> Result<Arc<StartTask>> {
    define(graph, lein, options, customize)
}

/// Define a task that runs tests with eftest
pub fn define_test_task(
    graph: &mut TaskGraph,
    lein: &Arc<dyn Leiningen>,
    options: TaskOptions<TestOptions>,
    customize: impl FnOnce(&mut TestTask),
) -> Result<Arc<TestTask>> {
    define(graph, lein, options, customize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Mutex;

    use lein_tasks_core::error::{Error, ExecutionError};
    use lein_tasks_core::Override;
    use lein_tasks_graph::{CollectingReporter, TaskRegistration};
    use lein_tasks_leiningen::{
        CljfmtArgs, EftestArgs, FormatMode, LeinCall, RecordingLeiningen, ReleaseArgs, RunArgs,
    };
    use serde_json::json;
    use serial_test::serial;

    /// A graph with a no-op `leiningen:ensure` so default prerequisites resolve
    fn graph() -> (TaskGraph, Arc<CollectingReporter>) {
        let reporter = Arc::new(CollectingReporter::default());
        let mut graph = TaskGraph::with_reporter(reporter.clone());
        graph.namespace("leiningen", |graph| {
            graph.register(TaskRegistration::new("ensure"));
        });
        (graph, reporter)
    }

    fn recorder() -> (Arc<RecordingLeiningen>, Arc<dyn Leiningen>) {
        let recording = Arc::new(RecordingLeiningen::new());
        let lein: Arc<dyn Leiningen> = recording.clone();
        (recording, lein)
    }

    /// Records the working directory each call runs in
    #[derive(Default)]
    struct DirectoryRecorder {
        seen: Mutex<Vec<PathBuf>>,
        fail: bool,
    }

    impl Leiningen for DirectoryRecorder {
        fn execute(&self, call: LeinCall) -> Result<()> {
            let cwd = std::env::current_dir()?.canonicalize()?;
            self.seen.lock().unwrap().push(cwd);
            if self.fail {
                return Err(ExecutionError::CommandFailed {
                    command: call.command_line().to_string(),
                    code: Some(1),
                }
                .into());
            }
            Ok(())
        }
    }

    fn cwd() -> PathBuf {
        std::env::current_dir().unwrap().canonicalize().unwrap()
    }

    #[test]
    fn test_default_name_description_and_prerequisites() {
        let (mut graph, _) = graph();
        let (_, lein) = recorder();

        graph
            .namespace("library", |graph| {
                define_lint_task(graph, &lein, TaskOptions::default(), |_| {})
            })
            .unwrap();

        let node = graph.get("library:lint").unwrap();
        assert_eq!(node.description.as_deref(), Some("Lint all clojure files."));
        assert_eq!(node.prerequisites, vec!["leiningen:ensure"]);
        assert_eq!(node.action_count(), 1);
    }

    #[test]
    fn test_name_override() {
        let (mut graph, _) = graph();
        let (_, lein) = recorder();

        graph
            .namespace("library", |graph| {
                define_lint_task(
                    graph,
                    &lein,
                    TaskOptions::new(LintOptions::default()).named("eastwood"),
                    |_| {},
                )
            })
            .unwrap();

        assert!(graph.contains("library:eastwood"));
        assert!(!graph.contains("library:lint"));
    }

    #[test]
    fn test_cleared_ensure_task_name_drops_prerequisite() {
        let (mut graph, _) = graph();
        let (_, lein) = recorder();

        let task = define_build_task(
            &mut graph,
            &lein,
            TaskOptions::new(BuildOptions::default()).with_ensure_task_name(Override::Clear),
            |_| {},
        )
        .unwrap();

        assert!(graph.get("build").unwrap().prerequisites.is_empty());
        assert_eq!(task.params.prerequisites, Some(Vec::new()));
    }

    #[test]
    fn test_customize_changes_derived_fields() {
        let (mut graph, _) = graph();
        let (_, lein) = recorder();

        let task = define_test_task(&mut graph, &lein, TaskOptions::default(), |task| {
            task.test_type = Some("integration".to_string());
            task.params.ensure_task_name = Some("tools:lein:ensure".to_string());
        })
        .unwrap();

        let node = graph.get("test").unwrap();
        assert_eq!(
            node.description.as_deref(),
            Some("Run all integration tests.")
        );
        assert_eq!(node.prerequisites, vec!["tools:lein:ensure"]);
        assert_eq!(
            task.params.description.as_deref(),
            Some("Run all integration tests.")
        );
    }

    #[test]
    fn test_explicit_description_and_prerequisites_win() {
        let (mut graph, _) = graph();
        let (_, lein) = recorder();
        let mut options = TaskOptions::new(ReleaseOptions::default());
        options.common.description = Some("Ship it.".to_string());
        options.common.prerequisites = Some(vec!["library:check".to_string()]);

        define_release_task(&mut graph, &lein, options, |_| {}).unwrap();

        let node = graph.get("release").unwrap();
        assert_eq!(node.description.as_deref(), Some("Ship it."));
        assert_eq!(node.prerequisites, vec!["library:check"]);
    }

    #[test]
    #[serial]
    fn test_checks_fix_flows_into_format_and_idiomise() {
        let (mut graph, _) = graph();
        let (recording, lein) = recorder();

        let tasks = graph
            .namespace("library", |graph| {
                define_check_tasks(graph, &lein, ChecksOptions::default(), |checks| {
                    checks.fix = true
                })
            })
            .unwrap();

        assert_eq!(tasks.format.mode, Some(FormatMode::Fix));
        assert_eq!(tasks.idiomise.replace, Some(true));

        graph.invoke("library:format", &[]).unwrap();
        assert_eq!(
            recording.last_call(),
            Some(LeinCall::Cljfmt(CljfmtArgs {
                mode: Some(FormatMode::Fix),
                ..Default::default()
            }))
        );
    }

    #[test]
    fn test_checks_default_to_check_mode() {
        let (mut graph, _) = graph();
        let (_, lein) = recorder();

        let tasks =
            define_check_tasks(&mut graph, &lein, ChecksOptions::default(), |_| {}).unwrap();

        assert_eq!(tasks.format.mode, Some(FormatMode::Check));
        assert_eq!(tasks.idiomise.replace, Some(false));
    }

    #[test]
    #[serial]
    fn test_check_runs_members_in_order() {
        let (mut graph, reporter) = graph();
        let (recording, lein) = recorder();

        graph
            .namespace("library", |graph| {
                define_check_tasks(graph, &lein, ChecksOptions::default(), |_| {})
            })
            .unwrap();

        assert_eq!(
            graph.get("library:check").unwrap().prerequisites,
            vec!["lint", "optimise", "idiomise", "format", "pedantise"]
        );

        graph.invoke("library:check", &[]).unwrap();

        assert_eq!(
            reporter.completed(),
            vec![
                "leiningen:ensure",
                "library:lint",
                "library:optimise",
                "library:idiomise",
                "library:format",
                "library:pedantise",
                "library:check"
            ]
        );
        let subcommands: Vec<&str> = recording.calls().iter().map(LeinCall::subcommand).collect();
        assert_eq!(
            subcommands,
            vec!["eastwood", "check", "kibit", "cljfmt", "bikeshed"]
        );
        assert_eq!(
            reporter.messages(),
            vec![
                "Linting all clojure files...",
                "Checking for uses of reflection in all clojure files...",
                "Making all clojure files more idiomatic...",
                "Formatting all clojure files...",
                "Looking for 'bad' code in all clojure files..."
            ]
        );
    }

    #[test]
    #[serial]
    fn test_check_follows_renamed_members() {
        let (mut graph, reporter) = graph();
        let (_, lein) = recorder();
        let options = ChecksOptions {
            ensure_task_name: Override::Clear,
            lint_task_name: Some("eastwood".to_string()),
            optimise_task_name: Some("reflection".to_string()),
            idiomise_task_name: Some("kibit".to_string()),
            format_task_name: Some("cljfmt".to_string()),
            pedantise_task_name: Some("bikeshed".to_string()),
            check_task_name: Some("verify".to_string()),
            ..Default::default()
        };

        graph
            .namespace("library", |graph| define_check_tasks(graph, &lein, options, |_| {}))
            .unwrap();
        graph.invoke("library:verify", &[]).unwrap();

        assert_eq!(
            reporter.completed(),
            vec![
                "library:eastwood",
                "library:reflection",
                "library:kibit",
                "library:cljfmt",
                "library:bikeshed",
                "library:verify"
            ]
        );
    }

    #[test]
    #[serial]
    fn test_namespaces_are_independent() {
        let (mut graph, _) = graph();
        let (recording, lein) = recorder();

        graph
            .namespace("library", |graph| {
                define_check_tasks(
                    graph,
                    &lein,
                    ChecksOptions {
                        profile: Some("library".to_string()),
                        ..Default::default()
                    },
                    |_| {},
                )
            })
            .unwrap();
        graph
            .namespace("application", |graph| {
                define_check_tasks(
                    graph,
                    &lein,
                    ChecksOptions {
                        profile: Some("application".to_string()),
                        ..Default::default()
                    },
                    |_| {},
                )
            })
            .unwrap();

        graph.invoke("application:lint", &[]).unwrap();

        let calls = recording.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].command_line().profile.as_deref(),
            Some("application")
        );
    }

    #[test]
    #[serial]
    fn test_start_forwards_every_field() {
        let (mut graph, _) = graph();
        let (recording, lein) = recorder();
        let mut environment = lein_tasks_core::Environment::new();
        environment.insert("PORT".to_string(), "8080".to_string());
        let options = StartOptions {
            main_function: Some("app.core/-main".to_string()),
            arguments: Some(vec!["serve".to_string()]),
            quote_arguments: Some(true),
            profile: Some("prod".to_string()),
            environment: Some(environment.clone()),
        };

        define_start_task(&mut graph, &lein, TaskOptions::new(options), |_| {}).unwrap();
        graph.invoke("start", &[]).unwrap();

        assert_eq!(
            recording.last_call(),
            Some(LeinCall::Run(RunArgs {
                main_function: Some("app.core/-main".to_string()),
                arguments: Some(vec!["serve".to_string()]),
                quote_arguments: Some(true),
                profile: Some("prod".to_string()),
                environment: Some(environment),
            }))
        );
    }

    #[test]
    #[serial]
    fn test_test_task_forwards_selection() {
        let (mut graph, reporter) = graph();
        let (recording, lein) = recorder();
        let options = TestOptions {
            test_type: Some("unit".to_string()),
            only: Some(":unit".to_string()),
            namespaces: Some(vec!["app.core-test".to_string()]),
            ..Default::default()
        };

        graph
            .namespace("library", |graph| {
                define_test_task(graph, &lein, TaskOptions::new(options), |_| {})
            })
            .unwrap();
        graph.invoke("library:test", &[]).unwrap();

        assert_eq!(
            recording.last_call(),
            Some(LeinCall::Eftest(EftestArgs {
                only: Some(":unit".to_string()),
                namespaces: Some(vec!["app.core-test".to_string()]),
                ..Default::default()
            }))
        );
        assert_eq!(reporter.messages(), vec!["Running all unit tests..."]);
    }

    #[test]
    #[serial]
    fn test_failure_stops_the_run() {
        let (mut graph, reporter) = graph();
        let recording = Arc::new(RecordingLeiningen::failing(2));
        let lein: Arc<dyn Leiningen> = recording.clone();

        define_check_tasks(&mut graph, &lein, ChecksOptions::default(), |_| {}).unwrap();
        let result = graph.invoke("check", &[]);

        assert!(matches!(
            result,
            Err(Error::Execution(ExecutionError::CommandFailed { code: Some(2), .. }))
        ));
        assert_eq!(recording.calls().len(), 1);
        assert_eq!(reporter.completed(), vec!["leiningen:ensure"]);
    }

    #[test]
    #[serial]
    fn test_runs_in_configured_directory_and_restores() {
        let temp = tempfile::TempDir::new().unwrap();
        let (mut graph, _) = graph();
        let recorder = Arc::new(DirectoryRecorder::default());
        let lein: Arc<dyn Leiningen> = recorder.clone();
        let before = cwd();

        define_build_task(
            &mut graph,
            &lein,
            TaskOptions::new(BuildOptions::default())
                .with_directory(Override::Set(temp.path().to_path_buf())),
            |_| {},
        )
        .unwrap();
        graph.invoke("build", &[]).unwrap();

        assert_eq!(
            recorder.seen.lock().unwrap().clone(),
            vec![temp.path().canonicalize().unwrap()]
        );
        assert_eq!(cwd(), before);
    }

    #[test]
    #[serial]
    fn test_restores_directory_after_failure() {
        let temp = tempfile::TempDir::new().unwrap();
        let (mut graph, _) = graph();
        let lein: Arc<dyn Leiningen> = Arc::new(DirectoryRecorder {
            fail: true,
            ..Default::default()
        });
        let before = cwd();

        define_release_task(
            &mut graph,
            &lein,
            TaskOptions::new(ReleaseOptions::default())
                .with_directory(Override::Set(temp.path().to_path_buf())),
            |_| {},
        )
        .unwrap();

        assert!(graph.invoke("release", &[]).is_err());
        assert_eq!(cwd(), before);
    }

    #[test]
    #[serial]
    fn test_argument_names_bind_positional_arguments() {
        let (mut graph, _) = graph();
        let (_, lein) = recorder();

        define_start_task(
            &mut graph,
            &lein,
            TaskOptions::new(StartOptions::default())
                .with_argument_names(vec!["environment".to_string()]),
            |_| {},
        )
        .unwrap();

        assert!(graph.invoke("start", &["prod".to_string()]).is_ok());
        assert!(graph
            .invoke("start", &["prod".to_string(), "extra".to_string()])
            .is_err());
    }

    const DEFAULTS: &[(&str, &str)] = &[
        ("lint", "Lint all clojure files."),
        ("optimise", "Warn on reflection for all clojure files."),
        ("idiomise", "Transform all clojure files to be more idiomatic."),
        ("format", "Format all clojure files."),
        ("pedantise", "Hunt for 'bad' code in all clojure files."),
        ("style", "Make all clojure files conform to a style."),
        ("build", "Build standalone uberjar."),
        ("release", "Release library."),
        ("start", "Run the application."),
        ("test", "Run all tests."),
        ("check", "Perform all checks against clojure files."),
    ];

    const CHECK_MEMBERS: &[&str] = &["lint", "optimise", "idiomise", "format", "pedantise"];

    #[test]
    fn test_every_kind_defaults() {
        let (mut graph, _) = graph();
        let (_, lein) = recorder();

        for (kind, _) in DEFAULTS {
            graph
                .namespace("ns", |graph| {
                    buildfile::define_task(graph, &lein, kind, serde_json::Value::Null)
                })
                .unwrap();
        }

        for (kind, description) in DEFAULTS {
            let node = graph
                .get(&format!("ns:{}", kind))
                .unwrap_or_else(|| panic!("ns:{} not defined", kind));
            assert_eq!(node.id.to_string(), format!("ns:{}", kind));
            assert_eq!(node.description.as_deref(), Some(*description), "{}", kind);
            if *kind == "check" {
                assert_eq!(node.prerequisites, CHECK_MEMBERS.to_vec());
                assert_eq!(node.action_count(), 0);
            } else {
                assert_eq!(node.prerequisites, vec!["leiningen:ensure"], "{}", kind);
                assert_eq!(node.action_count(), 1, "{}", kind);
            }
        }
    }

    #[test]
    fn test_every_kind_without_ensure_task() {
        let (mut graph, _) = graph();
        let (_, lein) = recorder();

        for (kind, _) in DEFAULTS {
            graph
                .namespace("ns", |graph| {
                    buildfile::define_task(graph, &lein, kind, json!({"ensure_task_name": false}))
                })
                .unwrap();
        }

        for (kind, _) in DEFAULTS {
            let node = graph.get(&format!("ns:{}", kind)).unwrap();
            if *kind == "check" {
                assert_eq!(node.prerequisites, CHECK_MEMBERS.to_vec());
            } else {
                assert!(node.prerequisites.is_empty(), "{}", kind);
            }
        }
    }

    #[test]
    #[serial]
    fn test_invocation_arguments_reach_the_command() {
        let (mut graph, _) = graph();
        let (recording, lein) = recorder();

        let task = define_release_task(
            &mut graph,
            &lein,
            TaskOptions::new(ReleaseOptions::default())
                .with_argument_names(vec!["level".to_string()]),
            |_| {},
        )
        .unwrap();

        graph.invoke("release", &["minor".to_string()]).unwrap();
        assert_eq!(
            recording.last_call(),
            Some(LeinCall::Release(ReleaseArgs {
                level: Some("minor".to_string()),
                ..Default::default()
            }))
        );
        assert_eq!(task.level, None);

        graph.invoke("release", &[]).unwrap();
        assert_eq!(
            recording.last_call(),
            Some(LeinCall::Release(ReleaseArgs::default()))
        );
    }

    #[test]
    #[serial]
    fn test_checks_pass_arguments_to_members() {
        let (mut graph, _) = graph();
        let (recording, lein) = recorder();
        let options = ChecksOptions {
            argument_names: Some(vec!["profile".to_string()]),
            ..Default::default()
        };

        graph
            .namespace("library", |graph| define_check_tasks(graph, &lein, options, |_| {}))
            .unwrap();
        graph.invoke("library:check", &["ci".to_string()]).unwrap();

        let calls = recording.calls();
        assert_eq!(calls.len(), 5);
        for call in &calls {
            assert_eq!(call.command_line().profile.as_deref(), Some("ci"));
        }
    }
}
