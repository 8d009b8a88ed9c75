//! Task identifiers, scopes, arguments and actions

use std::fmt;
use std::sync::Arc;

use lein_tasks_core::error::{GraphError, Result};

use crate::reporter::{TaskEvent, TaskReporter};

/// Separator between namespace segments and the task name
pub const SEPARATOR: char = ':';

/// Fully qualified identifier of a registered task
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct TaskId {
    /// Namespace the task lives in, empty for top-level tasks
    pub namespace: String,
    /// Task name within its namespace (e.g., "lint", "check")
    pub name: String,
}

impl TaskId {
    /// Create a new task ID
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Parse a task ID from "namespace:name" format; a bare name is top-level
    pub fn parse(s: &str) -> Self {
        match s.rsplit_once(SEPARATOR) {
            Some((namespace, name)) => Self::new(namespace, name),
            None => Self::new("", s),
        }
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}{}{}", self.namespace, SEPARATOR, self.name)
        }
    }
}

/// Stack of namespace segments active while tasks are being defined
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    segments: Vec<String>,
}

impl Scope {
    /// The top-level scope
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a scope from a "a:b:c" path
    pub fn from_path(path: &str) -> Self {
        let mut scope = Self::root();
        scope.push(path);
        scope
    }

    /// Enter a (possibly nested) namespace
    pub fn push(&mut self, namespace: &str) -> usize {
        let segments: Vec<String> = namespace
            .split(SEPARATOR)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        let count = segments.len();
        self.segments.extend(segments);
        count
    }

    /// Leave the last `count` namespace segments
    pub fn pop(&mut self, count: usize) {
        let keep = self.segments.len().saturating_sub(count);
        self.segments.truncate(keep);
    }

    /// The scope as a "a:b" path
    pub fn path(&self) -> String {
        self.segments.join(&SEPARATOR.to_string())
    }

    /// Whether this is the top-level scope
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Qualify a task name with this scope
    pub fn qualify(&self, name: &str) -> TaskId {
        let full = if self.is_root() {
            name.to_string()
        } else {
            format!("{}{}{}", self.path(), SEPARATOR, name)
        };
        TaskId::parse(&full)
    }

    /// Candidate qualified names for a reference, innermost scope first
    pub fn candidates(&self, reference: &str) -> Vec<TaskId> {
        (0..=self.segments.len())
            .rev()
            .map(|depth| {
                let scope = Self {
                    segments: self.segments[..depth].to_vec(),
                };
                scope.qualify(reference)
            })
            .collect()
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Named values bound to a task's argument names at invocation time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskArguments {
    values: Vec<(String, String)>,
}

impl TaskArguments {
    /// Bind positional values to argument names, in order
    pub fn bind(task: &TaskId, names: &[String], values: &[String]) -> Result<Self> {
        if values.len() > names.len() {
            return Err(GraphError::ArgumentCount {
                task: task.to_string(),
                expected: names.len(),
                given: values.len(),
            }
            .into());
        }

        Ok(Self {
            values: names
                .iter()
                .cloned()
                .zip(values.iter().cloned())
                .collect(),
        })
    }

    /// The subset of values whose names appear in `names`, as handed to a prerequisite
    pub fn scoped(&self, names: &[String]) -> Self {
        Self {
            values: self
                .values
                .iter()
                .filter(|(name, _)| names.contains(name))
                .cloned()
                .collect(),
        }
    }

    /// Look up a value by argument name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Number of bound values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no values are bound
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Everything an action sees while it runs
pub struct ActionContext<'a> {
    /// The task being executed
    pub id: &'a TaskId,
    /// Values bound to the task's argument names
    pub arguments: &'a TaskArguments,
    reporter: &'a dyn TaskReporter,
}

impl<'a> ActionContext<'a> {
    /// Create a context for one action run
    pub fn new(
        id: &'a TaskId,
        arguments: &'a TaskArguments,
        reporter: &'a dyn TaskReporter,
    ) -> Self {
        Self {
            id,
            arguments,
            reporter,
        }
    }

    /// Emit a human-readable progress message for this task
    pub fn progress(&self, message: impl Into<String>) {
        self.reporter.report(&TaskEvent::Progress {
            id: self.id.clone(),
            message: message.into(),
        });
    }
}

/// The work a task performs when invoked
pub trait TaskAction: Send + Sync {
    /// Run the action
    fn execute(&self, context: &ActionContext<'_>) -> Result<()>;
}

impl<F> TaskAction for F
where
    F: Fn(&ActionContext<'_>) -> Result<()> + Send + Sync,
{
    fn execute(&self, context: &ActionContext<'_>) -> Result<()> {
        self(context)
    }
}

/// Wrap a closure as a shareable action
pub fn action<F>(f: F) -> Arc<dyn TaskAction>
where
    F: Fn(&ActionContext<'_>) -> Result<()> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// A request to add (or enhance) a task in the graph
#[derive(Clone)]
pub struct TaskRegistration {
    /// Unqualified task name
    pub name: String,
    /// One-line description shown in task listings
    pub description: Option<String>,
    /// Prerequisite references, resolved against the registering scope
    pub prerequisites: Vec<String>,
    /// Names positional invocation arguments bind to
    pub argument_names: Vec<String>,
    /// What the task does, if anything
    pub action: Option<Arc<dyn TaskAction>>,
}

impl TaskRegistration {
    /// Create a registration for a task with no prerequisites or action
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            prerequisites: Vec::new(),
            argument_names: Vec::new(),
            action: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a prerequisite reference
    pub fn with_prerequisite(mut self, prerequisite: impl Into<String>) -> Self {
        self.prerequisites.push(prerequisite.into());
        self
    }

    /// Replace the prerequisite references
    pub fn with_prerequisites(mut self, prerequisites: Vec<String>) -> Self {
        self.prerequisites = prerequisites;
        self
    }

    /// Set the argument names
    pub fn with_argument_names(mut self, argument_names: Vec<String>) -> Self {
        self.argument_names = argument_names;
        self
    }

    /// Set the action
    pub fn with_action(mut self, action: Arc<dyn TaskAction>) -> Self {
        self.action = Some(action);
        self
    }
}

impl fmt::Debug for TaskRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskRegistration")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("prerequisites", &self.prerequisites)
            .field("argument_names", &self.argument_names)
            .field("has_action", &self.action.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_id_display() {
        assert_eq!(TaskId::new("something", "lint").to_string(), "something:lint");
        assert_eq!(TaskId::new("", "lint").to_string(), "lint");
    }

    #[test]
    fn test_task_id_parse_nested() {
        let id = TaskId::parse("tools:leiningen:ensure");
        assert_eq!(id.namespace, "tools:leiningen");
        assert_eq!(id.name, "ensure");
    }

    #[test]
    fn test_task_id_parse_bare() {
        let id = TaskId::parse("check");
        assert_eq!(id.namespace, "");
        assert_eq!(id.name, "check");
    }

    #[test]
    fn test_scope_push_pop() {
        let mut scope = Scope::root();
        let outer = scope.push("tools");
        let inner = scope.push("leiningen:nested");
        assert_eq!(scope.path(), "tools:leiningen:nested");

        scope.pop(inner);
        assert_eq!(scope.path(), "tools");
        scope.pop(outer);
        assert!(scope.is_root());
    }

    #[test]
    fn test_scope_qualify() {
        let scope = Scope::from_path("something");
        assert_eq!(scope.qualify("lint").to_string(), "something:lint");
        assert_eq!(Scope::root().qualify("lint").to_string(), "lint");
    }

    #[test]
    fn test_scope_candidates_innermost_first() {
        let scope = Scope::from_path("a:b");
        let candidates: Vec<String> = scope
            .candidates("leiningen:ensure")
            .iter()
            .map(ToString::to_string)
            .collect();

        assert_eq!(
            candidates,
            vec![
                "a:b:leiningen:ensure",
                "a:leiningen:ensure",
                "leiningen:ensure"
            ]
        );
    }

    #[test]
    fn test_bind_arguments() {
        let id = TaskId::new("something", "lint");
        let names = vec!["deployment_identifier".to_string(), "region".to_string()];
        let args = TaskArguments::bind(&id, &names, &["prod".to_string()]).unwrap();

        assert_eq!(args.get("deployment_identifier"), Some("prod"));
        assert_eq!(args.get("region"), None);
        assert_eq!(args.len(), 1);
    }

    #[test]
    fn test_bind_too_many_arguments() {
        let id = TaskId::new("something", "lint");
        let result = TaskArguments::bind(&id, &[], &["extra".to_string()]);
        assert!(result.is_err());
    }

    #[test]
    fn test_scoped_arguments() {
        let id = TaskId::new("", "check");
        let names = vec!["a".to_string(), "b".to_string()];
        let args =
            TaskArguments::bind(&id, &names, &["1".to_string(), "2".to_string()]).unwrap();

        let scoped = args.scoped(&["b".to_string()]);
        assert_eq!(scoped.get("a"), None);
        assert_eq!(scoped.get("b"), Some("2"));
    }

    #[test]
    fn test_registration_builder() {
        let registration = TaskRegistration::new("lint")
            .with_description("Lint all clojure files.")
            .with_prerequisite("leiningen:ensure")
            .with_argument_names(vec!["region".to_string()]);

        assert_eq!(registration.name, "lint");
        assert_eq!(registration.prerequisites, vec!["leiningen:ensure"]);
        assert!(registration.action.is_none());
    }
}
