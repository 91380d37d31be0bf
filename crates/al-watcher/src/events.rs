//! Event types for file change notifications.
//!
//! The debouncer collapses create/modify/delete into a single "something
//! happened" event. The watcher checks whether the file still exists when the
//! event arrives and reports a [`FileEventKind`] accordingly, which is enough
//! to tell a save from a removal.
//!
//! # Event Flow
//!
//! ```text
//! File System Change
//!        │
//!        ▼
//! notify-debouncer-mini (100ms debounce)
//!        │
//!        ▼
//!   LessFilter
//!        │
//!        ▼
//!   FileEvent { Written | Removed }
//!        │
//!        ▼
//!   Sent via channel to the watch loop
//! ```

use camino::Utf8PathBuf;

/// What happened to a watched file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileEventKind {
    /// The file exists after the change: created or written.
    Written,

    /// The file no longer exists.
    Removed,
}

/// A debounced file change with a UTF-8 path guarantee.
///
/// # Examples
///
/// ```
/// use al_watcher::{FileEvent, FileEventKind};
/// use camino::Utf8PathBuf;
///
/// let event = FileEvent::written(Utf8PathBuf::from("/site/less/style.less"));
/// assert_eq!(event.kind, FileEventKind::Written);
/// assert!(event.is_less());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileEvent {
    /// Absolute path of the file that changed.
    pub path: Utf8PathBuf,

    /// Whether the file was written or removed.
    pub kind: FileEventKind,
}

impl FileEvent {
    /// Creates a new event.
    #[inline]
    #[must_use]
    pub const fn new(path: Utf8PathBuf, kind: FileEventKind) -> Self {
        Self { path, kind }
    }

    /// Creates a [`FileEventKind::Written`] event.
    #[inline]
    #[must_use]
    pub fn written(path: Utf8PathBuf) -> Self {
        Self::new(path, FileEventKind::Written)
    }

    /// Creates a [`FileEventKind::Removed`] event.
    #[inline]
    #[must_use]
    pub fn removed(path: Utf8PathBuf) -> Self {
        Self::new(path, FileEventKind::Removed)
    }

    /// Classifies `path` by whether it currently exists on disk.
    #[must_use]
    pub fn observe(path: Utf8PathBuf) -> Self {
        if path.exists() {
            Self::written(path)
        } else {
            Self::removed(path)
        }
    }

    /// Returns `true` if this is a write (a save).
    #[inline]
    #[must_use]
    pub const fn is_write(&self) -> bool {
        matches!(self.kind, FileEventKind::Written)
    }

    /// Returns `true` if the file name ends in `.less`.
    #[must_use]
    pub fn is_less(&self) -> bool {
        self.path.extension() == Some("less")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_file_event_kinds() {
        let written = FileEvent::written(Utf8PathBuf::from("/site/a.less"));
        assert!(written.is_write());

        let removed = FileEvent::removed(Utf8PathBuf::from("/site/a.less"));
        assert!(!removed.is_write());
        assert_eq!(removed.kind, FileEventKind::Removed);
    }

    #[test]
    fn test_file_event_is_less() {
        assert!(FileEvent::written(Utf8PathBuf::from("less/style.less")).is_less());
        assert!(!FileEvent::written(Utf8PathBuf::from("css/style.css")).is_less());
        assert!(!FileEvent::written(Utf8PathBuf::from("Makefile")).is_less());
    }

    #[test]
    fn test_file_event_observe() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let path = Utf8PathBuf::from_path_buf(dir.path().join("a.less")).expect("Invalid path");

        assert_eq!(FileEvent::observe(path.clone()).kind, FileEventKind::Removed);

        fs::write(&path, "@a: 1;").expect("Failed to write file");
        assert_eq!(FileEvent::observe(path).kind, FileEventKind::Written);
    }
}
