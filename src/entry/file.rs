use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Value;

#[derive(Debug)]
struct FileInner {
    name: String,
    content: String,
}

/// A file node: a name plus mutable string content.
///
/// Cloning a `FileEntry` clones the handle, not the node; every clone reads
/// and writes the same content.
#[derive(Debug, Clone)]
pub struct FileEntry {
    inner: Rc<RefCell<FileInner>>,
}

impl FileEntry {
    /// Creates a file with empty content.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_text(name, "")
    }

    /// Creates a file storing `text` verbatim.
    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        FileEntry {
            inner: Rc::new(RefCell::new(FileInner {
                name: name.into(),
                content: text.into(),
            })),
        }
    }

    /// Creates a file from a structured value, serialized to JSON text once,
    /// here. Later content replacements store raw strings; the value is never
    /// re-serialized.
    pub fn with_json(name: impl Into<String>, value: Value) -> Self {
        Self::with_text(name, value.to_string())
    }

    pub fn name(&self) -> String {
        self.inner.borrow().name.clone()
    }

    pub fn content(&self) -> String {
        self.inner.borrow().content.clone()
    }

    /// Replaces the content with the raw string, without JSON coercion.
    pub fn set_content(&self, content: impl Into<String>) {
        self.inner.borrow_mut().content = content.into();
    }

    pub(crate) fn same_node(&self, other: &FileEntry) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}
