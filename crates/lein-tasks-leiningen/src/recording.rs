//! In-memory runner that records calls instead of running them

use std::sync::Mutex;

use lein_tasks_core::error::{ExecutionError, Result};

use crate::command::LeinCall;
use crate::traits::Leiningen;

/// Records every call, optionally failing them all
#[derive(Debug, Default)]
pub struct RecordingLeiningen {
    calls: Mutex<Vec<LeinCall>>,
    exit_code: Option<i32>,
}

impl RecordingLeiningen {
    /// A runner where every call succeeds
    pub fn new() -> Self {
        Self::default()
    }

    /// A runner where every call fails with the given exit code
    pub fn failing(exit_code: i32) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            exit_code: Some(exit_code),
        }
    }

    /// Calls made so far, in order
    pub fn calls(&self) -> Vec<LeinCall> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// The most recent call
    pub fn last_call(&self) -> Option<LeinCall> {
        self.calls().pop()
    }
}

impl Leiningen for RecordingLeiningen {
    fn execute(&self, call: LeinCall) -> Result<()> {
        let command = call.command_line().to_string();
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(call);

        match self.exit_code {
            Some(code) => Err(ExecutionError::CommandFailed {
                command,
                code: Some(code),
            }
            .into()),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::{CheckArgs, EastwoodArgs};
    use lein_tasks_core::error::Error;

    #[test]
    fn test_records_calls_in_order() {
        let lein = RecordingLeiningen::new();
        lein.eastwood(EastwoodArgs::default()).unwrap();
        lein.check(CheckArgs::default()).unwrap();

        let subcommands: Vec<&str> = lein.calls().iter().map(LeinCall::subcommand).collect();
        assert_eq!(subcommands, vec!["eastwood", "check"]);
        assert_eq!(lein.last_call(), Some(LeinCall::Check(CheckArgs::default())));
    }

    #[test]
    fn test_failing_runner_still_records() {
        let lein = RecordingLeiningen::failing(3);
        let result = lein.check(CheckArgs::default());

        match result {
            Err(Error::Execution(ExecutionError::CommandFailed { command, code })) => {
                assert_eq!(command, "lein check");
                assert_eq!(code, Some(3));
            }
            other => panic!("expected command failure, got {:?}", other),
        }
        assert_eq!(lein.calls().len(), 1);
    }
}
