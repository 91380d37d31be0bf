//! Error types for the al-watcher crate.

use camino::{Utf8Path, Utf8PathBuf};

/// Errors raised while starting or stopping a [`FileWatcher`](crate::FileWatcher).
///
/// Per-event problems (non-UTF-8 paths, debouncer hiccups) are logged and
/// skipped by the watcher thread and never surface here.
///
/// # Examples
///
/// ```
/// use al_watcher::WatchError;
///
/// let err = WatchError::root_not_found("/missing/site");
/// assert!(err.is_bad_root());
/// assert_eq!(err.root().map(|p| p.as_str()), Some("/missing/site"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    /// The notify backend failed to start or to watch a root.
    #[error("notify watcher error: {0}")]
    Notify(#[from] notify::Error),

    /// A project root does not exist.
    #[error("project root does not exist: {0}")]
    RootNotFound(Utf8PathBuf),

    /// A project root is a file, not a directory.
    #[error("project root is not a directory: {0}")]
    NotADirectory(Utf8PathBuf),

    /// The watcher was given no roots.
    #[error("no project roots to watch")]
    NoRoots,

    /// A project root could not be canonicalized.
    #[error("failed to resolve project root {root}: {source}")]
    Canonicalize {
        /// The root as given.
        root: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The watcher thread panicked.
    #[error("watcher thread stopped unexpectedly")]
    WorkerStopped,
}

impl WatchError {
    /// Creates a new [`WatchError::RootNotFound`] error.
    #[inline]
    pub fn root_not_found(root: impl Into<Utf8PathBuf>) -> Self {
        Self::RootNotFound(root.into())
    }

    /// Creates a new [`WatchError::Canonicalize`] error.
    pub fn canonicalize(root: &Utf8Path, source: std::io::Error) -> Self {
        Self::Canonicalize {
            root: root.to_owned(),
            source,
        }
    }

    /// Returns `true` if the error is fixed by passing different roots.
    #[inline]
    #[must_use]
    pub const fn is_bad_root(&self) -> bool {
        matches!(
            self,
            Self::RootNotFound(_) | Self::NotADirectory(_) | Self::NoRoots | Self::Canonicalize { .. }
        )
    }

    /// Returns the root associated with this error, if any.
    #[must_use]
    pub fn root(&self) -> Option<&Utf8Path> {
        match self {
            Self::RootNotFound(root) | Self::NotADirectory(root) | Self::Canonicalize { root, .. } => {
                Some(root)
            }
            Self::Notify(_) | Self::NoRoots | Self::WorkerStopped => None,
        }
    }
}
