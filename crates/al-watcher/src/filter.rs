//! File filtering for watch events.
//!
//! Filters run on the watcher thread, before events reach the channel, so the
//! consumer only ever sees files it may compile.
//!
//! # Examples
//!
//! ```
//! use al_watcher::{FileFilter, LessFilter};
//! use camino::Utf8Path;
//!
//! let filter = LessFilter::default();
//!
//! assert!(filter.should_process(Utf8Path::new("/site/less/style.less")));
//! assert!(!filter.should_process(Utf8Path::new("/site/css/style.css")));
//! assert!(!filter.should_process(Utf8Path::new("/site/node_modules/bootstrap/less/grid.less")));
//! ```

use camino::Utf8Path;
use smallvec::{SmallVec, smallvec};

/// A predicate deciding which file events to forward.
///
/// Filters must be [`Send`] and [`Sync`] because they are used from the
/// blocking watcher thread, and `'static` to be moved into it.
///
/// # Examples
///
/// ```
/// use al_watcher::FileFilter;
/// use camino::Utf8Path;
///
/// struct NoPartials;
///
/// impl FileFilter for NoPartials {
///     fn should_process(&self, path: &Utf8Path) -> bool {
///         !path.file_name().is_some_and(|name| name.starts_with('_'))
///     }
/// }
/// ```
pub trait FileFilter: Send + Sync + 'static {
    /// Returns `true` if the event for `path` should be sent to the channel.
    fn should_process(&self, path: &Utf8Path) -> bool;
}

/// A filter that accepts all files.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAllFilter;

impl FileFilter for AcceptAllFilter {
    #[inline]
    fn should_process(&self, _path: &Utf8Path) -> bool {
        true
    }
}

/// A filter for LESS sources.
///
/// By default the filter:
/// - accepts files with the `less` extension
/// - rejects any path with a `node_modules` directory component
///
/// Exclusions match whole path components, so `node_modules_backup/a.less`
/// still passes.
///
/// # Examples
///
/// ```
/// use al_watcher::{FileFilter, LessFilter};
/// use camino::Utf8Path;
///
/// let filter = LessFilter::new().exclude_segment("vendor");
/// assert!(!filter.should_process(Utf8Path::new("/site/vendor/reset.less")));
/// assert!(filter.should_process(Utf8Path::new("/site/less/reset.less")));
/// ```
#[derive(Debug, Clone)]
pub struct LessFilter {
    /// Accepted file extensions (without the leading dot).
    extensions: SmallVec<[String; 2]>,

    /// Path components that exclude a file.
    exclude_segments: SmallVec<[String; 4]>,
}

impl LessFilter {
    /// Creates a filter accepting `.less` files outside `node_modules`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            extensions: smallvec!["less".to_owned()],
            exclude_segments: smallvec!["node_modules".to_owned()],
        }
    }

    /// Adds another accepted extension.
    #[must_use]
    pub fn with_extension(mut self, ext: impl Into<String>) -> Self {
        let ext = ext.into();
        if !self.extensions.contains(&ext) {
            self.extensions.push(ext);
        }
        self
    }

    /// Adds a directory name that excludes every file beneath it.
    #[must_use]
    pub fn exclude_segment(mut self, segment: impl Into<String>) -> Self {
        let segment = segment.into();
        if !self.exclude_segments.contains(&segment) {
            self.exclude_segments.push(segment);
        }
        self
    }

    /// Removes all exclusions, including `node_modules`.
    #[must_use]
    pub fn without_exclusions(mut self) -> Self {
        self.exclude_segments.clear();
        self
    }

    fn has_accepted_extension(&self, path: &Utf8Path) -> bool {
        path.extension()
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }

    fn is_excluded(&self, path: &Utf8Path) -> bool {
        path.components().any(|component| {
            self.exclude_segments
                .iter()
                .any(|segment| segment == component.as_str())
        })
    }
}

impl Default for LessFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl FileFilter for LessFilter {
    fn should_process(&self, path: &Utf8Path) -> bool {
        self.has_accepted_extension(path) && !self.is_excluded(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_all_filter() {
        let filter = AcceptAllFilter;
        assert!(filter.should_process(Utf8Path::new("anything.txt")));
        assert!(filter.should_process(Utf8Path::new("")));
    }

    #[test]
    fn test_less_filter_extensions() {
        let filter = LessFilter::default();

        assert!(filter.should_process(Utf8Path::new("/site/less/style.less")));
        assert!(filter.should_process(Utf8Path::new("style.less")));

        assert!(!filter.should_process(Utf8Path::new("/site/css/style.css")));
        assert!(!filter.should_process(Utf8Path::new("/site/.lessconfig")));
        assert!(!filter.should_process(Utf8Path::new("/site/less/style.less.swp")));
        assert!(!filter.should_process(Utf8Path::new("/site/less")));
    }

    #[test]
    fn test_less_filter_excludes_node_modules() {
        let filter = LessFilter::default();

        assert!(!filter.should_process(Utf8Path::new("/site/node_modules/bs/less/grid.less")));
        assert!(filter.should_process(Utf8Path::new("/site/node_modules_old/grid.less")));
    }

    #[test]
    fn test_less_filter_custom_exclusion() {
        let filter = LessFilter::new().exclude_segment("vendor").exclude_segment("vendor");

        assert!(!filter.should_process(Utf8Path::new("/site/vendor/reset.less")));
        assert!(!filter.should_process(Utf8Path::new("/site/node_modules/reset.less")));
        assert!(filter.should_process(Utf8Path::new("/site/less/reset.less")));
    }

    #[test]
    fn test_less_filter_without_exclusions() {
        let filter = LessFilter::new().without_exclusions();
        assert!(filter.should_process(Utf8Path::new("/site/node_modules/bs/grid.less")));
    }

    #[test]
    fn test_less_filter_custom_extension() {
        let filter = LessFilter::new().with_extension("css");
        assert!(filter.should_process(Utf8Path::new("/site/css/style.css")));
        assert!(filter.should_process(Utf8Path::new("/site/less/style.less")));
    }
}
