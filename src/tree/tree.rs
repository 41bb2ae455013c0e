use std::cell::RefCell;

use hashlink::LinkedHashMap;
use snafu::{OptionExt, Snafu};
use tracing::{debug, warn};

use crate::entry::{DirectoryEntry, Entry};
use crate::ext::{VirtualPathExt, normalize_virtual_path, resolve_virtual_path};

/// Single source of truth for the fake hierarchy.
///
/// Owns the implicit root directory and two insertion-ordered caches over the
/// tree: absolute path to entry, and the same restricted to files. Both grow
/// as entries are added and are never pruned; a fresh `Tree` is the only way
/// to reset state.
#[derive(Debug)]
pub struct Tree {
    root_path: String,
    root: DirectoryEntry,
    index: RefCell<LinkedHashMap<String, Entry>>,
    file_index: RefCell<LinkedHashMap<String, Entry>>,
}

impl Tree {
    /// Creates an empty tree rooted at `root_path`.
    ///
    /// The root path is an explicit parameter so fixtures stay hermetic; a
    /// relative root is anchored at `/`. The root directory itself is always
    /// present and always indexed.
    pub fn new(root_path: impl AsRef<str>) -> Self {
        let root_path = normalize_root_path(root_path.as_ref());
        let root = DirectoryEntry::new(root_path.clone());

        let mut index = LinkedHashMap::new();
        index.insert(root_path.clone(), Entry::Directory(root.clone()));

        Tree {
            root_path,
            root,
            index: RefCell::new(index),
            file_index: RefCell::new(LinkedHashMap::new()),
        }
    }

    /// Creates a tree rooted at `root_path` and grafts `entries` under it.
    pub fn with_entries(
        root_path: impl AsRef<str>,
        entries: impl IntoIterator<Item = Entry>,
    ) -> Self {
        let tree = Self::new(root_path);
        tree.add_all(entries);
        tree
    }

    pub fn root_path(&self) -> &str {
        &self.root_path
    }

    pub fn root(&self) -> &DirectoryEntry {
        &self.root
    }

    /// Joins `name` against the root path.
    ///
    /// Pure: the result does not have to exist in the tree. Backslash
    /// separators are normalized before resolution.
    pub fn resolve(&self, name: impl AsRef<str>) -> String {
        resolve_virtual_path(&self.root_path, name.as_ref())
    }

    /// Grafts a single entry under the root directory and indexes its
    /// subtree.
    pub fn add(&self, entry: impl Into<Entry>) {
        self.add_all([entry.into()]);
    }

    /// Grafts each entry under the root directory in order.
    ///
    /// Every descendant's absolute path is computed depth-first and inserted
    /// into the index unless the path is already taken: the first entry at a
    /// path wins, and a later one stays reachable only through the tree.
    /// Files are additionally inserted into the files-only index.
    pub fn add_all(&self, entries: impl IntoIterator<Item = Entry>) {
        for entry in entries {
            self.root.add_child(entry.clone());
            self.index_subtree(&self.root_path, &entry);
        }
    }

    /// Never fails: resolves `name` and reports index membership.
    pub fn exists(&self, name: impl AsRef<str>) -> bool {
        self.index.borrow().contains_key(&self.resolve(name))
    }

    /// Resolves `name` and looks the path up in the index.
    pub fn get(&self, name: impl AsRef<str>) -> Result<Entry, TreeLookupError> {
        let path = self.resolve(name);
        self.index
            .borrow()
            .get(&path)
            .cloned()
            .context(NotFoundSnafu { path })
    }

    /// Snapshot of the whole index, iteration order = insertion order.
    pub fn list_all(&self) -> LinkedHashMap<String, Entry> {
        self.index.borrow().clone()
    }

    /// Snapshot of the files-only index.
    pub fn list_files(&self) -> LinkedHashMap<String, Entry> {
        self.file_index.borrow().clone()
    }

    fn index_subtree(&self, parent_path: &str, entry: &Entry) {
        let path = resolve_virtual_path(parent_path, &entry.name());

        let mut index = self.index.borrow_mut();
        if index.contains_key(&path) {
            warn!("Skipping duplicate index entry for '{}'", path);
        } else {
            debug!("Indexing '{}'", path);
            index.insert(path.clone(), entry.clone());
            if entry.is_file() {
                self.file_index.borrow_mut().insert(path.clone(), entry.clone());
            }
        }
        drop(index);

        if let Entry::Directory(directory) = entry {
            for child in directory.children() {
                self.index_subtree(&path, &child);
            }
        }
    }
}

impl Default for Tree {
    fn default() -> Self {
        Tree::new("/")
    }
}

fn normalize_root_path(root_path: &str) -> String {
    let root_path = root_path.normalized_separators();
    if root_path.starts_with('/') {
        normalize_virtual_path(&root_path)
    } else {
        normalize_virtual_path(&format!("/{root_path}"))
    }
}

#[derive(Debug, Snafu)]
pub enum TreeLookupError {
    #[snafu(display("ENOENT: no such file or directory, '{}'", path))]
    NotFound { path: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::FileEntry;
    use rstest::*;

    fn seeded_tree() -> Tree {
        Tree::with_entries(
            "/root",
            [
                FileEntry::with_text("a.txt", "hello").into(),
                DirectoryEntry::with_children(
                    "sub",
                    [FileEntry::with_text("nested.txt", "deep").into()],
                )
                .into(),
            ],
        )
    }

    #[test]
    fn root_is_always_present_and_a_directory() {
        let tree = Tree::new("/root");
        assert!(tree.exists("/root"));
        assert!(tree.get("/root").unwrap().is_directory());
    }

    #[rstest]
    #[case("/root", "/root")]
    #[case("root", "/root")]
    #[case("\\root\\fixture", "/root/fixture")]
    #[case("/root//fixture/", "/root/fixture")]
    #[case("/", "/")]
    fn root_path_is_normalized(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(Tree::new(input).root_path(), expected);
    }

    #[test]
    fn default_tree_is_rooted_at_slash() {
        let tree = Tree::default();
        assert_eq!(tree.root_path(), "/");
        assert!(tree.get("/").unwrap().is_directory());
    }

    #[rstest]
    #[case("a.txt", "/root/a.txt")]
    #[case("sub\\nested.txt", "/root/sub/nested.txt")]
    #[case("/elsewhere/b.txt", "/elsewhere/b.txt")]
    #[case("missing/deeply/nested", "/root/missing/deeply/nested")]
    fn resolve_is_pure_and_ignores_existence(#[case] name: &str, #[case] expected: &str) {
        let tree = Tree::new("/root");
        assert_eq!(tree.resolve(name), expected);
    }

    #[test]
    fn added_entries_are_indexed_under_their_absolute_path() {
        let tree = seeded_tree();

        assert!(tree.exists("a.txt"));
        assert!(tree.exists("/root/a.txt"));
        assert!(tree.exists("sub"));
        assert!(tree.exists("sub/nested.txt"));
        assert!(!tree.exists("missing.txt"));
    }

    #[test]
    fn get_returns_the_indexed_entry() {
        let tree = Tree::new("/root");
        let file = FileEntry::with_text("a.txt", "hello");
        tree.add(file.clone());

        let entry = tree.get("a.txt").unwrap();
        assert!(entry.same_entry(&file.into()));
    }

    #[test]
    fn get_fails_with_enoent_for_missing_paths() {
        let tree = Tree::new("/root");
        let error = tree.get("missing.txt").unwrap_err();
        assert!(matches!(error, TreeLookupError::NotFound { .. }));
        assert!(error.to_string().contains("ENOENT"));
        assert!(error.to_string().contains("/root/missing.txt"));
    }

    #[test]
    fn first_entry_at_a_path_wins_in_the_index() {
        let tree = Tree::new("/root");
        let first = FileEntry::with_text("a.txt", "first");
        let second = FileEntry::with_text("a.txt", "second");

        tree.add(first.clone());
        tree.add(second.clone());

        let indexed = tree.get("a.txt").unwrap();
        assert!(indexed.same_entry(&first.clone().into()));
        assert!(!indexed.same_entry(&second.into()));

        // The tree itself still gained the node: only the index kept the
        // older entry.
        assert_eq!(tree.root().children().len(), 2);
        assert_eq!(tree.get("a.txt").unwrap().as_file().unwrap().content(), "first");
    }

    #[test]
    fn list_files_holds_exactly_the_file_entries() {
        let tree = seeded_tree();
        let files = tree.list_files();

        assert_eq!(
            files.keys().collect::<Vec<_>>(),
            vec!["/root/a.txt", "/root/sub/nested.txt"]
        );
        assert!(files.values().all(Entry::is_file));
    }

    #[test]
    fn list_all_holds_root_directories_and_files_in_insertion_order() {
        let tree = seeded_tree();
        let all = tree.list_all();

        assert_eq!(
            all.keys().collect::<Vec<_>>(),
            vec!["/root", "/root/a.txt", "/root/sub", "/root/sub/nested.txt"]
        );
    }

    #[test]
    fn entries_added_after_construction_are_flattened_too() {
        let tree = seeded_tree();
        tree.add(DirectoryEntry::with_children(
            "late",
            [FileEntry::new("extra.txt").into()],
        ));

        assert!(tree.exists("late"));
        assert!(tree.exists("late/extra.txt"));
        assert!(tree.list_files().contains_key("/root/late/extra.txt"));
    }

    #[test]
    fn index_entries_alias_live_nodes() {
        let tree = seeded_tree();

        let handle = tree.get("a.txt").unwrap();
        handle.as_file().unwrap().set_content("rewritten");

        let again = tree.get("a.txt").unwrap();
        assert_eq!(again.as_file().unwrap().content(), "rewritten");
    }
}
