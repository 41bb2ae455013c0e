//! Tree of fake entries with absolute-path indexing and resolution.

mod tree;

pub use tree::{Tree, TreeLookupError};
