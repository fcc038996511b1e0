//! Lexical path handling.
//!
//! Everything here works on the text of a path only. The filesystem is never
//! consulted, so symlinks are not resolved and `..` is folded lexically.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

/// Normalize a path lexically.
///
/// - repeated separators and `.` segments are dropped
/// - `name/..` cancels out; leading `..` of a relative path are kept
/// - `..` directly under the root is dropped (`/..` is `/`)
/// - an empty result becomes `.`
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use batchcp::normalize;
///
/// assert_eq!(normalize(Path::new("a//b/./../c.txt")), Path::new("a/c.txt"));
/// assert_eq!(normalize(Path::new("")), Path::new("."));
/// ```
pub fn normalize(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}

/// Final component of a path as it would be written out.
///
/// For a path that is only a root (or prefix) this is empty, so joining it
/// onto a directory yields the directory itself.
pub fn base_name(path: &Path) -> &OsStr {
    match path.components().next_back() {
        Some(Component::Normal(name)) => name,
        Some(Component::ParentDir) => OsStr::new(".."),
        Some(Component::CurDir) => OsStr::new("."),
        _ => OsStr::new(""),
    }
}

/// Destination path for copying `source` into the directory `dest`.
///
/// This is `dest` joined with the base name of the normalized source, then
/// normalized again.
///
/// ```
/// use std::path::Path;
/// use batchcp::destination_for;
///
/// let dst = destination_for(Path::new("a//b/./c.txt"), Path::new("out/"));
/// assert_eq!(dst, Path::new("out/c.txt"));
/// ```
pub fn destination_for(source: &Path, dest: &Path) -> PathBuf {
    let source = normalize(source);
    normalize(&dest.join(base_name(&source)))
}
