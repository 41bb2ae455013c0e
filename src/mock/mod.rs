//! Mock filesystem binding over a fake tree.
//!
//! Exposes a filesystem-shaped operation surface backed by a
//! [`Tree`](crate::tree::Tree), with every invocation recorded for later
//! assertion.

mod filesystem;
mod recorder;
mod stat;

pub use filesystem::{MockFilesystem, MockFilesystemError};
pub use recorder::{CallOutcome, CallRecorder, Operation, RecordedCall};
pub use stat::Stat;
