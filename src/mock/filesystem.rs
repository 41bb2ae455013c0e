use serde::Serialize;
use serde_json::Value;
use snafu::{OptionExt, ResultExt, Snafu};
use tracing::debug;

use crate::mock::recorder::{CallOutcome, CallRecorder, Operation};
use crate::mock::stat::Stat;
use crate::tree::{Tree, TreeLookupError};

/// Filesystem-shaped operation surface backed entirely by a [`Tree`].
///
/// Every operation exists in two forms: a synchronous one returning a value,
/// and a `_callback` twin invoking its callback exactly once, synchronously,
/// before the call returns. There is no deferral and no error-first
/// convention: a validation failure surfaces as the returned error before the
/// callback would ever run. Each call, successful or not, is reported to the
/// binding's [`CallRecorder`].
#[derive(Debug)]
pub struct MockFilesystem {
    tree: Tree,
    recorder: CallRecorder,
}

impl MockFilesystem {
    /// Binds a new mock filesystem to `tree`.
    pub fn new(tree: Tree) -> Self {
        MockFilesystem {
            tree,
            recorder: CallRecorder::new(),
        }
    }

    /// The backing tree, e.g. for grafting more entries mid-test.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// The record of every call made through this binding.
    pub fn recorder(&self) -> &CallRecorder {
        &self.recorder
    }

    /// Swaps the backing tree and clears the call record, keeping the
    /// binding identity: useful for pointing at a fresh fixture mid-test.
    pub fn rebind(&mut self, tree: Tree) {
        debug!("Rebinding mock filesystem to a tree rooted at '{}'", tree.root_path());
        self.tree = tree;
        self.recorder.reset();
    }

    /// Clears the call record while keeping the current tree.
    pub fn reset_calls(&self) {
        self.recorder.reset();
    }

    /// Looks up any existing entry and reports its kind.
    pub fn stat(&self, path: impl AsRef<str>) -> Result<Stat, MockFilesystemError> {
        let path = path.as_ref();
        self.run_recorded(Operation::Stat, vec![path.to_string()], |tree| {
            let entry = tree.get(path).context(NotFoundSnafu { path })?;
            Ok(Stat::of(&entry))
        })
    }

    /// Callback form of [`stat`](Self::stat).
    pub fn stat_callback(
        &self,
        path: impl AsRef<str>,
        callback: impl FnOnce(Stat),
    ) -> Result<(), MockFilesystemError> {
        let stat = self.stat(path)?;
        callback(stat);
        Ok(())
    }

    /// Lists the direct child names of a directory, in insertion order.
    pub fn read_dir(&self, path: impl AsRef<str>) -> Result<Vec<String>, MockFilesystemError> {
        let path = path.as_ref();
        self.run_recorded(Operation::ReadDir, vec![path.to_string()], |tree| {
            let entry = tree.get(path).context(NotFoundSnafu { path })?;
            let directory = entry.as_directory().context(NotADirectorySnafu { path })?;
            Ok(directory.child_names())
        })
    }

    /// Callback form of [`read_dir`](Self::read_dir).
    pub fn read_dir_callback(
        &self,
        path: impl AsRef<str>,
        callback: impl FnOnce(Vec<String>),
    ) -> Result<(), MockFilesystemError> {
        let names = self.read_dir(path)?;
        callback(names);
        Ok(())
    }

    /// Resolves `path` against the root. Pure: never consults the index,
    /// never fails.
    pub fn real_path(&self, path: impl AsRef<str>) -> String {
        let path = path.as_ref();
        let resolved = self.tree.resolve(path);
        self.recorder.record(
            Operation::RealPath,
            vec![path.to_string()],
            CallOutcome::Returned(Value::String(resolved.clone())),
        );
        resolved
    }

    /// Callback form of [`real_path`](Self::real_path).
    pub fn real_path_callback(&self, path: impl AsRef<str>, callback: impl FnOnce(String)) {
        callback(self.real_path(path));
    }

    /// Reads a file's content exactly as stored.
    ///
    /// The `encoding` argument is accepted for call-shape compatibility and
    /// recorded, never applied.
    pub fn read_file(
        &self,
        path: impl AsRef<str>,
        encoding: Option<&str>,
    ) -> Result<String, MockFilesystemError> {
        let path = path.as_ref();
        let args = args_with_encoding(vec![path.to_string()], encoding);
        self.run_recorded(Operation::ReadFile, args, |tree| {
            let entry = tree.get(path).context(NotFoundSnafu { path })?;
            let file = entry.as_file().context(NotAFileSnafu { path })?;
            Ok(file.content())
        })
    }

    /// Callback form of [`read_file`](Self::read_file).
    pub fn read_file_callback(
        &self,
        path: impl AsRef<str>,
        encoding: Option<&str>,
        callback: impl FnOnce(String),
    ) -> Result<(), MockFilesystemError> {
        let content = self.read_file(path, encoding)?;
        callback(content);
        Ok(())
    }

    /// Overwrites a file's content in place.
    ///
    /// The `encoding` argument is accepted and recorded, never applied; the
    /// raw string is stored without coercion.
    pub fn write_file(
        &self,
        path: impl AsRef<str>,
        content: impl Into<String>,
        encoding: Option<&str>,
    ) -> Result<(), MockFilesystemError> {
        let path = path.as_ref();
        let content = content.into();
        let args = args_with_encoding(vec![path.to_string(), content.clone()], encoding);
        self.run_recorded(Operation::WriteFile, args, |tree| {
            let entry = tree.get(path).context(NotFoundSnafu { path })?;
            let file = entry.as_file().context(NotAFileSnafu { path })?;
            file.set_content(content);
            Ok(())
        })
    }

    /// Callback form of [`write_file`](Self::write_file). The callback
    /// receives no payload: the mutation has no meaningful result to forward.
    pub fn write_file_callback(
        &self,
        path: impl AsRef<str>,
        content: impl Into<String>,
        encoding: Option<&str>,
        callback: impl FnOnce(),
    ) -> Result<(), MockFilesystemError> {
        self.write_file(path, content, encoding)?;
        callback();
        Ok(())
    }

    /// Deliberately a no-op: the call is recorded but the tree never changes
    /// and nothing can fail.
    pub fn make_dir(&self, path: impl AsRef<str>) {
        let path = path.as_ref();
        debug!("make_dir('{}') ignored by the mock", path);
        self.recorder.record(
            Operation::MakeDir,
            vec![path.to_string()],
            CallOutcome::Returned(Value::Null),
        );
    }

    /// Callback form of [`make_dir`](Self::make_dir).
    pub fn make_dir_callback(&self, path: impl AsRef<str>, callback: impl FnOnce()) {
        self.make_dir(path);
        callback();
    }

    /// Runs one operation and reports it to the recorder, successful or not,
    /// without altering its arguments or result.
    fn run_recorded<T: Serialize>(
        &self,
        operation: Operation,
        args: Vec<String>,
        run: impl FnOnce(&Tree) -> Result<T, MockFilesystemError>,
    ) -> Result<T, MockFilesystemError> {
        let result = run(&self.tree);
        let outcome = match &result {
            Ok(value) => {
                CallOutcome::Returned(serde_json::to_value(value).unwrap_or(Value::Null))
            }
            Err(error) => CallOutcome::Failed(error.to_string()),
        };
        self.recorder.record(operation, args, outcome);
        result
    }
}

fn args_with_encoding(mut args: Vec<String>, encoding: Option<&str>) -> Vec<String> {
    if let Some(encoding) = encoding {
        args.push(encoding.to_string());
    }
    args
}

#[derive(Debug, Snafu)]
pub enum MockFilesystemError {
    #[snafu(display("ENOENT: mock filesystem has no entry at '{}'", path))]
    NotFound {
        path: String,
        source: TreeLookupError,
    },
    #[snafu(display("'{}' is not a directory", path))]
    NotADirectory { path: String },
    #[snafu(display("'{}' is not a file", path))]
    NotAFile { path: String },
}
