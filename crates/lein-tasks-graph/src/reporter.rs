//! Task execution reporting

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::task::TaskId;

/// Events emitted during task execution
#[derive(Debug, Clone, PartialEq)]
pub enum TaskEvent {
    /// A task's prerequisites are satisfied and its actions are about to run
    Started { id: TaskId },
    /// A task action describing what it is doing
    Progress { id: TaskId, message: String },
    /// A task completed successfully
    Completed { id: TaskId, duration: Duration },
    /// A task failed
    Failed {
        id: TaskId,
        duration: Duration,
        error: String,
    },
}

/// Trait for reporting task execution progress
pub trait TaskReporter: Send + Sync {
    /// Handle a task event
    fn report(&self, event: &TaskEvent);
}

/// Prints progress messages to standard output and logs the rest
#[derive(Debug, Default)]
pub struct StdoutReporter;

impl TaskReporter for StdoutReporter {
    fn report(&self, event: &TaskEvent) {
        match event {
            TaskEvent::Progress { message, .. } => println!("{}", message),
            other => TracingReporter.report(other),
        }
    }
}

/// Simple reporter that logs to tracing
#[derive(Debug, Default)]
pub struct TracingReporter;

impl TaskReporter for TracingReporter {
    fn report(&self, event: &TaskEvent) {
        match event {
            TaskEvent::Started { id } => {
                tracing::debug!("Starting {}", id);
            }
            TaskEvent::Progress { id, message } => {
                tracing::info!("[{}] {}", id, message);
            }
            TaskEvent::Completed { id, duration } => {
                tracing::info!("{} completed in {:.1}s", id, duration.as_secs_f64());
            }
            TaskEvent::Failed {
                id,
                duration,
                error,
            } => {
                tracing::error!(
                    "{} failed after {:.1}s: {}",
                    id,
                    duration.as_secs_f64(),
                    error
                );
            }
        }
    }
}

/// Reporter that collects events for later inspection (useful for testing)
#[derive(Debug, Default)]
pub struct CollectingReporter {
    events: Mutex<Vec<TaskEvent>>,
}

impl CollectingReporter {
    /// Get all collected events
    pub fn events(&self) -> Vec<TaskEvent> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Get the progress messages, in order
    pub fn messages(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                TaskEvent::Progress { message, .. } => Some(message),
                _ => None,
            })
            .collect()
    }

    /// Get the IDs of tasks that completed, in order
    pub fn completed(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                TaskEvent::Completed { id, .. } => Some(id.to_string()),
                _ => None,
            })
            .collect()
    }
}

impl TaskReporter for CollectingReporter {
    fn report(&self, event: &TaskEvent) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event.clone());
    }
}

impl<R: TaskReporter + ?Sized> TaskReporter for Arc<R> {
    fn report(&self, event: &TaskEvent) {
        (**self).report(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collecting_reporter() {
        let reporter = CollectingReporter::default();
        let id = TaskId::new("something", "lint");

        reporter.report(&TaskEvent::Started { id: id.clone() });
        reporter.report(&TaskEvent::Progress {
            id: id.clone(),
            message: "Linting all clojure files...".to_string(),
        });
        reporter.report(&TaskEvent::Completed {
            id,
            duration: Duration::from_secs(5),
        });

        assert_eq!(reporter.events().len(), 3);
        assert_eq!(reporter.messages(), vec!["Linting all clojure files..."]);
        assert_eq!(reporter.completed(), vec!["something:lint"]);
    }

    #[test]
    fn test_tracing_reporter() {
        let reporter = TracingReporter;
        let id = TaskId::new("something", "test");

        // Just verify it doesn't panic
        reporter.report(&TaskEvent::Started { id: id.clone() });
        reporter.report(&TaskEvent::Failed {
            id,
            duration: Duration::from_secs(1),
            error: "Command failed".to_string(),
        });
    }

    #[test]
    fn test_shared_reporter() {
        let collecting = Arc::new(CollectingReporter::default());
        let shared: Arc<dyn TaskReporter> = collecting.clone();

        shared.report(&TaskEvent::Started {
            id: TaskId::new("", "check"),
        });

        assert_eq!(collecting.events().len(), 1);
    }
}
