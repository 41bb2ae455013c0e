/// Replaces backslash separators with forward slashes.
///
/// Paths in the fake tree are platform-independent, `/`-separated strings;
/// Windows-style input is accepted but never stored.
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// Normalizes a virtual path: collapses repeated separators, resolves `.` and
/// `..` components and strips any trailing separator.
///
/// `..` never escapes above the root of an absolute path. A relative path may
/// keep leading `..` components, since there is nothing to pop them against.
pub fn normalize_virtual_path(path: &str) -> String {
    let path = normalize_separators(path);
    let absolute = path.starts_with('/');

    let mut components: Vec<&str> = Vec::new();
    for component in path.split('/') {
        match component {
            // Empty components come from repeated or trailing separators
            "" | "." => {}
            ".." => {
                if !absolute && matches!(components.last(), None | Some(&"..")) {
                    components.push("..");
                } else {
                    components.pop();
                }
            }
            _ => components.push(component),
        }
    }

    if absolute {
        format!("/{}", components.join("/"))
    } else {
        components.join("/")
    }
}

/// Joins `name` against an absolute `root` path.
///
/// An absolute `name` is normalized as-is; a relative one is resolved under
/// `root`. Pure and total: the result does not have to exist anywhere.
pub fn resolve_virtual_path(root: &str, name: &str) -> String {
    let name = normalize_separators(name);
    if name.starts_with('/') {
        normalize_virtual_path(&name)
    } else {
        normalize_virtual_path(&format!("{root}/{name}"))
    }
}

pub trait VirtualPathExt {
    fn normalized_separators(&self) -> String;
}

impl VirtualPathExt for &str {
    fn normalized_separators(&self) -> String {
        normalize_separators(self)
    }
}

impl VirtualPathExt for String {
    fn normalized_separators(&self) -> String {
        normalize_separators(self)
    }
}
