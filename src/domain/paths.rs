// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lexical path helpers.
//!
//! None of these functions touch the filesystem: symlinks are not resolved, and `..`
//! is collapsed against the preceding component the way a path join would.

use std::path::{Component, Path, PathBuf};

/// Collapses `.` and `..` components and redundant separators.
///
/// A `..` directly under the root is dropped; a leading `..` on a relative path is
/// kept. An empty result becomes `.`.
///
/// # Examples
///
/// ```
/// use counterparts::domain::paths::normalize;
/// use std::path::Path;
///
/// assert_eq!(normalize(Path::new("/a/./b/../c")), Path::new("/a/c"));
/// assert_eq!(normalize(Path::new("../x/./y")), Path::new("../x/y"));
/// assert_eq!(normalize(Path::new("a/..")), Path::new("."));
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

/// Makes `path` absolute against `base` and normalizes the result.
///
/// # Examples
///
/// ```
/// use counterparts::domain::paths::absolutize;
/// use std::path::Path;
///
/// assert_eq!(absolutize(Path::new("conf/../b"), Path::new("/etc")), Path::new("/etc/b"));
/// assert_eq!(absolutize(Path::new("/opt/x"), Path::new("/etc")), Path::new("/opt/x"));
/// ```
pub fn absolutize(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&base.join(path))
    }
}

/// Expresses `path` relative to the directory `start`.
///
/// Both are absolutized against `start` first, so a relative `path` only loses its
/// `.` components and collapses its `..` components, while an absolute one is
/// rewritten relative to `start`. Returns `.` when the two are the same directory.
///
/// # Examples
///
/// ```
/// use counterparts::domain::paths::relativize;
/// use std::path::Path;
///
/// assert_eq!(relativize(Path::new("./bashlib/lib"), Path::new("/home/u")), Path::new("bashlib/lib"));
/// assert_eq!(relativize(Path::new("/home/u/src/x"), Path::new("/home/u")), Path::new("src/x"));
/// assert_eq!(relativize(Path::new("/opt/x"), Path::new("/home/u")), Path::new("../../opt/x"));
/// ```
pub fn relativize(path: &Path, start: &Path) -> PathBuf {
    let target = absolutize(path, start);
    let start = normalize(start);

    let target_parts: Vec<_> = target.components().collect();
    let start_parts: Vec<_> = start.components().collect();
    let common = target_parts
        .iter()
        .zip(start_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..start_parts.len() {
        relative.push("..");
    }
    for part in &target_parts[common..] {
        relative.push(part.as_os_str());
    }

    if relative.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        relative
    }
}
