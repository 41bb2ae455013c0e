use std::cell::RefCell;

use derive_more::Display;
use serde_json::Value;
use tracing::debug;

/// The operations a mock filesystem binding exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Operation {
    #[display("stat")]
    Stat,
    #[display("read_dir")]
    ReadDir,
    #[display("real_path")]
    RealPath,
    #[display("read_file")]
    ReadFile,
    #[display("write_file")]
    WriteFile,
    #[display("make_dir")]
    MakeDir,
}

/// Outcome of one recorded call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome {
    /// The value the operation returned or handed to its callback, as JSON.
    Returned(Value),
    /// The operation failed validation; the message names the violation.
    Failed(String),
}

/// One invocation of a mock operation, as seen by the recorder.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    operation: Operation,
    args: Vec<String>,
    outcome: CallOutcome,
}

impl RecordedCall {
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// The arguments as passed: path, then content and encoding where the
    /// operation takes them.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn outcome(&self) -> &CallOutcome {
        &self.outcome
    }
}

/// Records every call made through a mock filesystem binding.
///
/// Composed explicitly into the binding: each operation executes its real
/// logic and then reports here, so recording never alters argument passing or
/// return semantics. Failed calls are recorded too, with their violation
/// message as the outcome.
#[derive(Debug, Default)]
pub struct CallRecorder {
    calls: RefCell<Vec<RecordedCall>>,
}

impl CallRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&self, operation: Operation, args: Vec<String>, outcome: CallOutcome) {
        debug!("Recorded {} call with args {:?}", operation, args);
        self.calls.borrow_mut().push(RecordedCall {
            operation,
            args,
            outcome,
        });
    }

    /// Every recorded call, in invocation order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    /// The calls to one operation, in invocation order.
    pub fn calls_for(&self, operation: Operation) -> Vec<RecordedCall> {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.operation == operation)
            .cloned()
            .collect()
    }

    pub fn call_count(&self, operation: Operation) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.operation == operation)
            .count()
    }

    pub fn last_call(&self, operation: Operation) -> Option<RecordedCall> {
        self.calls
            .borrow()
            .iter()
            .rev()
            .find(|call| call.operation == operation)
            .cloned()
    }

    pub fn reset(&self) {
        self.calls.borrow_mut().clear();
    }
}
