use derive_more::{From, IsVariant};

use crate::entry::{DirectoryEntry, FileEntry};

/// A node in the fake tree: a file or a directory, never both and never
/// neither.
///
/// The closed union replaces capability flags: `is_file()` and
/// `is_directory()` are derived variant queries, so exactly one of them is
/// true for any value by construction. Like the concrete node types, `Entry`
/// is a cheap handle: cloning it aliases the underlying node.
#[derive(Debug, Clone, From, IsVariant)]
pub enum Entry {
    File(FileEntry),
    Directory(DirectoryEntry),
}

impl Entry {
    pub fn name(&self) -> String {
        match self {
            Entry::File(file) => file.name(),
            Entry::Directory(directory) => directory.name(),
        }
    }

    pub fn as_file(&self) -> Option<&FileEntry> {
        match self {
            Entry::File(file) => Some(file),
            Entry::Directory(_) => None,
        }
    }

    pub fn as_directory(&self) -> Option<&DirectoryEntry> {
        match self {
            Entry::File(_) => None,
            Entry::Directory(directory) => Some(directory),
        }
    }

    /// Whether two handles point at the same underlying node.
    pub fn same_entry(&self, other: &Entry) -> bool {
        match (self, other) {
            (Entry::File(a), Entry::File(b)) => a.same_node(b),
            (Entry::Directory(a), Entry::Directory(b)) => a.same_node(b),
            _ => false,
        }
    }
}
