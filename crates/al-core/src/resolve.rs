//! Project resolution: which root does a file belong to?
//!
//! A root matches when the file path starts with it as a plain string prefix,
//! so `/a` also matches `/ab/x.less`. When several roots match, they are
//! ordered by comparing `a + b` against `b + a` and the smallest wins. For a
//! root that is a prefix of another this picks the shorter one.

use std::cmp::Ordering;

use camino::Utf8Path;

use crate::types::ProjectPath;

/// Finds the project root containing `file` among `roots`.
///
/// Returns `None` if no root is a prefix of `file`. The returned relative
/// path has leading separators removed.
///
/// # Examples
///
/// ```
/// use al_core::resolve;
/// use camino::Utf8Path;
///
/// let path = resolve(Utf8Path::new("/a/b/style.less"), &["/a/b", "/a"]).unwrap();
/// assert_eq!(path.root.as_str(), "/a");
/// assert_eq!(path.file.as_str(), "b/style.less");
/// ```
#[must_use]
pub fn resolve<P: AsRef<Utf8Path>>(file: &Utf8Path, roots: &[P]) -> Option<ProjectPath> {
    let file_str = file.as_str();

    let root = roots
        .iter()
        .map(|root| root.as_ref().as_str())
        .filter(|root| file_str.starts_with(root))
        .min_by(|a, b| concat_order(a, b))?;

    let relative = file_str[root.len()..].trim_start_matches(['/', '\\']);
    Some(ProjectPath::new(root, relative))
}

/// Orders two roots by comparing `a + b` with `b + a`.
fn concat_order(a: &str, b: &str) -> Ordering {
    a.bytes().chain(b.bytes()).cmp(b.bytes().chain(a.bytes()))
}
