//! In-memory fake file tree with a mock filesystem binding.
//!
//! A test harness seeds a [`Tree`] with [`DirectoryEntry`] and [`FileEntry`]
//! nodes, wraps it in a [`MockFilesystem`] and calls the mock operations
//! wherever real filesystem calls would occur. Each call resolves its path
//! against the tree, validates the target's kind, performs the read or
//! mutation, and is recorded for later assertion.
//!
//! Execution is strictly synchronous: even the `_callback` operation forms
//! run to completion and invoke their callback before returning. No real I/O
//! ever happens.
//!
//! ```
//! use mimicfs::{DirectoryEntry, FileEntry, MockFilesystem, Tree};
//!
//! let root = DirectoryEntry::with_children(
//!     "root",
//!     [
//!         FileEntry::with_text("a.txt", "hello").into(),
//!         DirectoryEntry::new("sub").into(),
//!     ],
//! );
//! let fs = MockFilesystem::new(Tree::with_entries("/", [root.into()]));
//!
//! assert_eq!(fs.read_dir("root").unwrap(), vec!["a.txt", "sub"]);
//! assert_eq!(fs.read_file("root/a.txt", None).unwrap(), "hello");
//! assert!(fs.stat("root/sub").unwrap().is_directory());
//! ```

mod entry;
mod ext;
mod mock;
mod tree;

pub use entry::{DirectoryEntry, Entry, FileEntry};
pub use ext::VirtualPathExt;
pub use mock::{
    CallOutcome, CallRecorder, MockFilesystem, MockFilesystemError, Operation, RecordedCall, Stat,
};
pub use tree::{Tree, TreeLookupError};
