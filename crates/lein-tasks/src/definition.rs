//! Resolving task options and registering tasks in the graph
//!
//! Every task kind goes through the same steps: start from the kind's
//! defaults, overlay caller options, let the caller adjust the result, derive
//! the description and prerequisites from what is left, then freeze the
//! configuration inside the task's action.

use std::path::PathBuf;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info};

use lein_tasks_core::error::{ConfigError, Result};
use lein_tasks_core::{in_directory, Override};
use lein_tasks_graph::{action, TaskArguments, TaskGraph, TaskRegistration};
use lein_tasks_leiningen::Leiningen;

/// Prerequisite every Leiningen task gets unless told otherwise
pub const DEFAULT_ENSURE_TASK_NAME: &str = "leiningen:ensure";

/// Directory tasks run in unless told otherwise
pub const DEFAULT_DIRECTORY: &str = ".";

/// Option keys shared by every task kind
pub const COMMON_OPTION_KEYS: &[&str] = &[
    "name",
    "description",
    "prerequisites",
    "directory",
    "ensure_task_name",
    "argument_names",
];

/// Configuration every task kind carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskParams {
    /// Unqualified task name
    pub name: String,
    /// `None` until derived from the kind's default
    pub description: Option<String>,
    /// `None` until derived from `ensure_task_name` (or the kind's own rule)
    pub prerequisites: Option<Vec<String>>,
    /// Directory to run in; `None` runs in the current directory
    pub directory: Option<PathBuf>,
    /// Task that makes Leiningen available; `None` adds no prerequisite
    pub ensure_task_name: Option<String>,
    /// Names positional invocation arguments bind to
    pub argument_names: Vec<String>,
}

impl TaskParams {
    /// Defaults for a task called `name`
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            prerequisites: None,
            directory: Some(PathBuf::from(DEFAULT_DIRECTORY)),
            ensure_task_name: Some(DEFAULT_ENSURE_TASK_NAME.to_string()),
            argument_names: Vec::new(),
        }
    }

    /// Overlay caller options
    pub fn apply(&mut self, options: CommonOptions) {
        if let Some(name) = options.name {
            self.name = name;
        }
        if options.description.is_some() {
            self.description = options.description;
        }
        if options.prerequisites.is_some() {
            self.prerequisites = options.prerequisites;
        }
        self.directory = options.directory.resolve(self.directory.take());
        self.ensure_task_name = options
            .ensure_task_name
            .resolve(self.ensure_task_name.take())
            .filter(|name| !name.is_empty());
        if let Some(argument_names) = options.argument_names {
            self.argument_names = argument_names;
        }
    }

    /// `[ensure_task_name]`, or nothing when it has been cleared
    pub fn ensure_prerequisites(&self) -> Vec<String> {
        self.ensure_task_name
            .iter()
            .filter(|name| !name.is_empty())
            .cloned()
            .collect()
    }
}

/// Caller options shared by every task kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CommonOptions {
    pub name: Option<String>,
    pub description: Option<String>,
    pub prerequisites: Option<Vec<String>>,
    /// `false` runs the task in the current directory
    pub directory: Override<PathBuf>,
    /// `false` drops the implicit prerequisite
    pub ensure_task_name: Override<String>,
    pub argument_names: Option<Vec<String>>,
}

/// Caller options for one task: shared keys plus the kind's own
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskOptions<O> {
    pub common: CommonOptions,
    pub kind: O,
}

impl<O: Default> TaskOptions<O> {
    /// Kind-specific options with no shared overrides
    pub fn new(kind: O) -> Self {
        Self {
            common: CommonOptions::default(),
            kind,
        }
    }

    /// Override the task name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.common.name = Some(name.into());
        self
    }

    /// Override the ensure task; `Override::Clear` removes the prerequisite
    pub fn with_ensure_task_name(mut self, ensure_task_name: Override<String>) -> Self {
        self.common.ensure_task_name = ensure_task_name;
        self
    }

    /// Override the directory; `Override::Clear` runs in place
    pub fn with_directory(mut self, directory: Override<PathBuf>) -> Self {
        self.common.directory = directory;
        self
    }

    /// Set the argument names
    pub fn with_argument_names(mut self, argument_names: Vec<String>) -> Self {
        self.common.argument_names = Some(argument_names);
        self
    }
}

impl<O: DeserializeOwned + Default> TaskOptions<O> {
    /// Parse untyped options (from a build file) for the `kind` task kind.
    ///
    /// Keys not recognised by either the shared or the kind-specific options
    /// are rejected.
    pub fn from_value(kind: &str, value: serde_json::Value) -> Result<Self> {
        let map = match value {
            serde_json::Value::Null => return Ok(Self::new(O::default())),
            serde_json::Value::Object(map) => map,
            other => {
                return Err(ConfigError::InvalidValue {
                    field: format!("{} options", kind),
                    message: format!("expected a table of options, found {}", other),
                }
                .into())
            }
        };

        let (common, specific): (serde_json::Map<_, _>, serde_json::Map<_, _>) = map
            .into_iter()
            .partition(|(key, _)| COMMON_OPTION_KEYS.contains(&key.as_str()));

        Ok(Self {
            common: parse_options(kind, common)?,
            kind: parse_options(kind, specific)?,
        })
    }
}

/// Set `field` from the invocation argument called `name`, when one was given
pub fn bind_argument(arguments: &TaskArguments, name: &str, field: &mut Option<String>) {
    if let Some(value) = arguments.get(name) {
        *field = Some(value.to_string());
    }
}

fn parse_options<T: DeserializeOwned>(
    kind: &str,
    map: serde_json::Map<String, serde_json::Value>,
) -> Result<T> {
    serde_json::from_value(serde_json::Value::Object(map)).map_err(|e| {
        let message = e.to_string();
        if message.starts_with("unknown field") {
            ConfigError::UnknownOption {
                kind: kind.to_string(),
                message,
            }
        } else {
            ConfigError::InvalidValue {
                field: format!("{} options", kind),
                message,
            }
        }
        .into()
    })
}

/// A task kind: its defaults, its resolved configuration and what it runs
pub trait TaskKind: Clone + Send + Sync + 'static {
    /// Kind name used in build files
    const KIND: &'static str;

    /// Name used when none is given
    const DEFAULT_NAME: &'static str;

    /// Kind-specific caller options
    type Options: DeserializeOwned + Default;

    /// Build the configuration from overlaid common parameters and kind options
    fn resolve(params: TaskParams, options: Self::Options) -> Self;

    fn params(&self) -> &TaskParams;

    fn params_mut(&mut self) -> &mut TaskParams;

    /// Description used when none is given
    fn default_description(&self) -> String;

    /// Prerequisites used when none are given
    fn default_prerequisites(&self) -> Vec<String> {
        self.params().ensure_prerequisites()
    }

    /// Message printed before the task runs; `None` for tasks without an action
    fn progress_message(&self) -> Option<String>;

    /// Run the matching Leiningen command with every resolved field
    fn invoke(&self, lein: &dyn Leiningen) -> Result<()>;

    /// Overlay invocation arguments named like one of the kind's fields
    fn apply_arguments(&mut self, _arguments: &TaskArguments) {}

    /// The task name
    fn name(&self) -> &str {
        &self.params().name
    }

    /// The effective description
    fn description(&self) -> String {
        self.params()
            .description
            .clone()
            .unwrap_or_else(|| self.default_description())
    }

    /// The effective prerequisites
    fn prerequisites(&self) -> Vec<String> {
        self.params()
            .prerequisites
            .clone()
            .unwrap_or_else(|| self.default_prerequisites())
    }
}

/// Resolve a task of kind `K` and register it under the graph's current scope.
///
/// `customize` sees the configuration after caller options are applied and
/// before the description and prerequisites are derived. The returned value
/// is the frozen configuration; each run applies its invocation arguments to a
/// copy of it (see [`TaskKind::apply_arguments`]).
pub fn define<K: TaskKind>(
    graph: &mut TaskGraph,
    lein: &Arc<dyn Leiningen>,
    options: TaskOptions<K::Options>,
    customize: impl FnOnce(&mut K),
) -> Result<Arc<K>> {
    let mut params = TaskParams::new(K::DEFAULT_NAME);
    params.apply(options.common);

    let mut task = K::resolve(params, options.kind);
    customize(&mut task);

    let description = task.description();
    let prerequisites = task.prerequisites();
    {
        let params = task.params_mut();
        params.description = Some(description.clone());
        params.prerequisites = Some(prerequisites.clone());
    }
    debug!(kind = K::KIND, task = %task.name(), ?prerequisites, "resolved task");

    let task = Arc::new(task);
    let mut registration = TaskRegistration::new(task.name())
        .with_description(description)
        .with_prerequisites(prerequisites)
        .with_argument_names(task.params().argument_names.clone());

    if let Some(message) = task.progress_message() {
        let frozen = task.clone();
        let lein = lein.clone();
        registration = registration.with_action(action(move |context| {
            let mut task = K::clone(&frozen);
            task.apply_arguments(context.arguments);
            in_directory(task.params().directory.as_deref(), || {
                context.progress(message.as_str());
                task.invoke(lein.as_ref())
            })
        }));
    }

    let node = graph.register(registration);
    info!(kind = K::KIND, task = %node.id, "defined task");

    Ok(task)
}
