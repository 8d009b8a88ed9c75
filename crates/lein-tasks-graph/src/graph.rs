//! Task graph registration and on-demand execution

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, instrument};

use lein_tasks_core::error::{GraphError, Result};

use crate::reporter::{StdoutReporter, TaskEvent, TaskReporter};
use crate::task::{ActionContext, Scope, TaskAction, TaskArguments, TaskId, TaskRegistration};

/// A task registered in the graph
#[derive(Clone)]
pub struct TaskNode {
    /// Fully qualified task identifier
    pub id: TaskId,
    /// Scope the task was registered from; prerequisites resolve against it
    pub scope: Scope,
    /// One-line description
    pub description: Option<String>,
    /// Prerequisite references in declaration order
    pub prerequisites: Vec<String>,
    /// Names positional invocation arguments bind to
    pub argument_names: Vec<String>,
    actions: Vec<Arc<dyn TaskAction>>,
}

impl TaskNode {
    /// Number of actions attached to this task
    pub fn action_count(&self) -> usize {
        self.actions.len()
    }
}

impl fmt::Debug for TaskNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskNode")
            .field("id", &self.id)
            .field("scope", &self.scope)
            .field("description", &self.description)
            .field("prerequisites", &self.prerequisites)
            .field("argument_names", &self.argument_names)
            .field("actions", &self.actions.len())
            .finish()
    }
}

/// Namespace-scoped graph of tasks
///
/// Tasks are registered under the current scope and executed later, one at a
/// time, with their prerequisites run depth-first beforehand.
pub struct TaskGraph {
    nodes: HashMap<TaskId, TaskNode>,
    /// Registration order, for stable listings
    order: Vec<TaskId>,
    scope: Scope,
    reporter: Arc<dyn TaskReporter>,
}

impl TaskGraph {
    /// Create an empty graph that prints progress to standard output
    pub fn new() -> Self {
        Self::with_reporter(Arc::new(StdoutReporter))
    }

    /// Create an empty graph reporting through `reporter`
    pub fn with_reporter(reporter: Arc<dyn TaskReporter>) -> Self {
        Self {
            nodes: HashMap::new(),
            order: Vec::new(),
            scope: Scope::root(),
            reporter,
        }
    }

    /// The scope tasks are currently registered under
    pub fn current_scope(&self) -> &Scope {
        &self.scope
    }

    /// Run `f` with `namespace` pushed onto the scope
    pub fn namespace<R>(&mut self, namespace: &str, f: impl FnOnce(&mut Self) -> R) -> R {
        let pushed = self.scope.push(namespace);
        let result = f(self);
        self.scope.pop(pushed);
        result
    }

    /// Register a task under the current scope.
    ///
    /// Registering an existing name enhances that task: prerequisites and the
    /// action are appended, and a new description or argument list replaces the
    /// old one.
    pub fn register(&mut self, registration: TaskRegistration) -> &TaskNode {
        let id = self.scope.qualify(&registration.name);
        let TaskRegistration {
            description,
            prerequisites,
            argument_names,
            action,
            ..
        } = registration;

        if let Some(node) = self.nodes.get_mut(&id) {
            debug!(task = %id, "enhancing existing task");
            if description.is_some() {
                node.description = description;
            }
            if !argument_names.is_empty() {
                node.argument_names = argument_names;
            }
            node.prerequisites.extend(prerequisites);
            node.actions.extend(action);
        } else {
            info!(task = %id, prerequisites = ?prerequisites, "registering task");
            self.order.push(id.clone());
            self.nodes.insert(
                id.clone(),
                TaskNode {
                    id: id.clone(),
                    scope: self.scope.clone(),
                    description,
                    prerequisites,
                    argument_names,
                    actions: action.into_iter().collect(),
                },
            );
        }

        &self.nodes[&id]
    }

    /// Get a task by its fully qualified name
    pub fn get(&self, qualified_name: &str) -> Option<&TaskNode> {
        self.nodes.get(&TaskId::parse(qualified_name))
    }

    /// Whether a task with this fully qualified name exists
    pub fn contains(&self, qualified_name: &str) -> bool {
        self.get(qualified_name).is_some()
    }

    /// Resolve a reference from `scope`, innermost namespace first
    pub fn lookup(&self, reference: &str, scope: &Scope) -> Option<&TaskNode> {
        scope
            .candidates(reference)
            .iter()
            .find_map(|candidate| self.nodes.get(candidate))
    }

    /// Resolve a reference from the current scope
    pub fn resolve(&self, reference: &str) -> Result<&TaskNode> {
        self.lookup(reference, &self.scope)
            .ok_or_else(|| GraphError::TaskNotFound(reference.to_string()).into())
    }

    /// Resolved identifiers of a task's prerequisites, in declaration order
    pub fn prerequisite_tasks(&self, qualified_name: &str) -> Result<Vec<TaskId>> {
        let node = self
            .get(qualified_name)
            .ok_or_else(|| GraphError::TaskNotFound(qualified_name.to_string()))?;

        node.prerequisites
            .iter()
            .map(|reference| {
                self.lookup(reference, &node.scope)
                    .map(|n| n.id.clone())
                    .ok_or_else(|| GraphError::TaskNotFound(reference.to_string()).into())
            })
            .collect()
    }

    /// All tasks, in registration order
    pub fn tasks(&self) -> impl Iterator<Item = &TaskNode> {
        self.order.iter().filter_map(|id| self.nodes.get(id))
    }

    /// Number of registered tasks
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no tasks are registered
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The tasks `invoke` would run for `reference`, in execution order
    #[instrument(skip(self))]
    pub fn execution_plan(&self, reference: &str) -> Result<Vec<TaskId>> {
        let root = self.resolve(reference)?;
        let mut plan = Vec::new();
        let mut visited = HashSet::new();
        let mut stack = Vec::new();
        self.visit(root, &mut visited, &mut stack, &mut |node| {
            plan.push(node.id.clone());
            Ok(())
        })?;
        Ok(plan)
    }

    /// Invoke a task by reference with positional arguments.
    ///
    /// Prerequisites run first, depth-first in declaration order; each task runs
    /// at most once per invocation. The first failure stops the run and is
    /// returned unchanged.
    #[instrument(skip(self, arguments), fields(arguments = arguments.len()))]
    pub fn invoke(&self, reference: &str, arguments: &[String]) -> Result<()> {
        let root = self.resolve(reference)?;
        let bound = TaskArguments::bind(&root.id, &root.argument_names, arguments)?;
        info!(task = %root.id, "invoking task");

        let mut visited = HashSet::new();
        let mut stack = Vec::new();
        self.visit(root, &mut visited, &mut stack, &mut |node| {
            self.execute(node, &bound.scoped(&node.argument_names))
        })
    }

    fn visit<'g>(
        &'g self,
        node: &'g TaskNode,
        visited: &mut HashSet<TaskId>,
        stack: &mut Vec<TaskId>,
        on_ready: &mut dyn FnMut(&'g TaskNode) -> Result<()>,
    ) -> Result<()> {
        if stack.contains(&node.id) {
            let chain: Vec<String> = stack
                .iter()
                .chain(std::iter::once(&node.id))
                .map(ToString::to_string)
                .collect();
            return Err(GraphError::CyclicDependency(chain.join(" => ")).into());
        }
        if visited.contains(&node.id) {
            return Ok(());
        }

        stack.push(node.id.clone());
        for reference in &node.prerequisites {
            let prerequisite = self
                .lookup(reference, &node.scope)
                .ok_or_else(|| GraphError::TaskNotFound(reference.to_string()))?;
            self.visit(prerequisite, visited, stack, on_ready)?;
        }
        stack.pop();

        visited.insert(node.id.clone());
        on_ready(node)
    }

    fn execute(&self, node: &TaskNode, arguments: &TaskArguments) -> Result<()> {
        let start = Instant::now();
        self.reporter
            .report(&TaskEvent::Started { id: node.id.clone() });

        let context = ActionContext::new(&node.id, arguments, self.reporter.as_ref());
        for action in &node.actions {
            if let Err(e) = action.execute(&context) {
                self.reporter.report(&TaskEvent::Failed {
                    id: node.id.clone(),
                    duration: start.elapsed(),
                    error: e.to_string(),
                });
                return Err(e);
            }
        }

        self.reporter.report(&TaskEvent::Completed {
            id: node.id.clone(),
            duration: start.elapsed(),
        });
        Ok(())
    }

    /// Human-readable listing of described tasks, like a `-T` listing
    pub fn describe(&self) -> String {
        let described: Vec<&TaskNode> = self
            .tasks()
            .filter(|node| node.description.is_some())
            .collect();
        let width = described
            .iter()
            .map(|node| node.id.to_string().len())
            .max()
            .unwrap_or(0);

        let mut listing = String::new();
        for node in described {
            listing.push_str(&format!(
                "{:<width$}  # {}\n",
                node.id.to_string(),
                node.description.as_deref().unwrap_or_default(),
                width = width
            ));
        }
        listing
    }
}

impl Default for TaskGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TaskGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskGraph")
            .field("tasks", &self.order)
            .field("scope", &self.scope)
            .finish()
    }
}
