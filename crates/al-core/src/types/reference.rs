//! Error references scraped from compiler diagnostics.
//!
//! This module provides the [`ErrorReference`] type used to offer a
//! "jump to error" action after a failed compile.

use std::fmt;

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// A position in a source file reported by the compiler.
///
/// # Field Conventions
///
/// - `line` is 0-indexed (first line is line 0)
/// - `column` is 0-indexed (first character is column 0)
///
/// The compiler reports 1-based numbers; the extractor converts them. The
/// [`Display`](fmt::Display) form is `path:line:column` with 1-based numbers,
/// the format editors accept on their command line.
///
/// # Examples
///
/// ```
/// use al_core::ErrorReference;
///
/// let reference = ErrorReference::new("/proj/less/style.less", 4, 2);
/// assert_eq!(reference.line, 4);
/// assert_eq!(reference.to_string(), "/proj/less/style.less:5:3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorReference {
    /// Absolute path of the file containing the error.
    pub path: Utf8PathBuf,

    /// Line number (0-indexed).
    pub line: u32,

    /// Column number (0-indexed).
    pub column: u32,
}

impl ErrorReference {
    /// Creates a new error reference.
    ///
    /// # Arguments
    ///
    /// * `path` - Absolute path of the file
    /// * `line` - Line number (0-indexed)
    /// * `column` - Column number (0-indexed)
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>, line: u32, column: u32) -> Self {
        Self {
            path: path.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for ErrorReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.path,
            self.line.saturating_add(1),
            self.column.saturating_add(1)
        )
    }
}
