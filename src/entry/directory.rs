use std::cell::RefCell;
use std::rc::Rc;

use crate::entry::Entry;

#[derive(Debug)]
struct DirectoryInner {
    name: String,
    children: Vec<Entry>,
}

/// A directory node: a name plus an ordered, append-only child list.
///
/// Cloning a `DirectoryEntry` clones the handle, not the node; a child
/// appended through one clone is visible through every other.
#[derive(Debug, Clone)]
pub struct DirectoryEntry {
    inner: Rc<RefCell<DirectoryInner>>,
}

impl DirectoryEntry {
    /// Creates a directory with no children.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_children(name, [])
    }

    /// Creates a directory seeded with `children`, in order.
    pub fn with_children(
        name: impl Into<String>,
        children: impl IntoIterator<Item = Entry>,
    ) -> Self {
        DirectoryEntry {
            inner: Rc::new(RefCell::new(DirectoryInner {
                name: name.into(),
                children: children.into_iter().collect(),
            })),
        }
    }

    pub fn name(&self) -> String {
        self.inner.borrow().name.clone()
    }

    /// The child handles in insertion order.
    pub fn children(&self) -> Vec<Entry> {
        self.inner.borrow().children.clone()
    }

    /// The direct child names in insertion order.
    pub fn child_names(&self) -> Vec<String> {
        self.inner.borrow().children.iter().map(Entry::name).collect()
    }

    /// Appends a child, returning `&self` so calls can be chained.
    pub fn add_child(&self, entry: impl Into<Entry>) -> &Self {
        self.inner.borrow_mut().children.push(entry.into());
        self
    }

    /// Appends several children in order.
    pub fn add_children(&self, entries: impl IntoIterator<Item = Entry>) -> &Self {
        self.inner.borrow_mut().children.extend(entries);
        self
    }

    pub(crate) fn same_node(&self, other: &DirectoryEntry) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}
