use serde::Serialize;

use crate::entry::Entry;

/// Result of a `stat` call: the kind of the entry found at a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stat {
    is_directory: bool,
}

impl Stat {
    pub(crate) fn of(entry: &Entry) -> Self {
        Stat {
            is_directory: entry.is_directory(),
        }
    }

    pub fn is_directory(&self) -> bool {
        self.is_directory
    }

    pub fn is_file(&self) -> bool {
        !self.is_directory
    }
}
