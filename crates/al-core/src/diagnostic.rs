//! Compiler diagnostics: sanitizing and scraping for error references.
//!
//! Compiler output is colored with ANSI escape sequences. Everything shown to
//! the user or matched against a pattern goes through [`strip_ansi`] first;
//! [`Diagnostic::new`] does this on construction so a `Diagnostic` is always
//! clean.
//!
//! [`extract_error_reference`] looks for the `lessc` location line:
//!
//! ```text
//! Command failed: lessc /proj/less/style.less /proj/css/style.css
//! ParseError: Unrecognised input in /proj/less/style.less on line 5, column 3:
//! ```
//!
//! Only the second line is searched. Extraction is best effort; any failure
//! simply yields `None`.

use std::sync::OnceLock;

use camino::Utf8Path;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::ErrorReference;

/// Matches CSI/escape sequences emitted by colored terminal output.
const ANSI_PATTERN: &str =
    r"[\x1b\x{9b}][\[()#;?]*(?:[0-9]{1,4}(?:;[0-9]{0,4})*)?[0-9A-ORZcf-nqry=><]";

#[allow(clippy::expect_used)] // constant pattern
fn ansi_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(ANSI_PATTERN).expect("ANSI pattern is valid"))
}

/// Removes ANSI escape sequences from `text`.
///
/// # Examples
///
/// ```
/// use al_core::strip_ansi;
///
/// assert_eq!(strip_ansi("\u{1b}[31mParseError\u{1b}[39m: bad"), "ParseError: bad");
/// ```
#[must_use]
pub fn strip_ansi(text: &str) -> String {
    ansi_regex().replace_all(text, "").into_owned()
}

/// The sanitized output of a failed compile.
///
/// `message` is the human-readable summary (for `lessc`, the failed command
/// line followed by the compiler's stderr). `stack` carries everything known
/// about the failure for diagnosis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Summary text, ANSI-free.
    pub message: String,

    /// Full trace text, ANSI-free.
    pub stack: String,
}

impl Diagnostic {
    /// Creates a diagnostic, stripping ANSI sequences from both parts.
    #[must_use]
    pub fn new(message: impl AsRef<str>, stack: impl AsRef<str>) -> Self {
        Self {
            message: strip_ansi(message.as_ref()),
            stack: strip_ansi(stack.as_ref()),
        }
    }
}

/// Scrapes a `path on line N, column M:` reference from a diagnostic.
///
/// The path must start with `root`. Returned line and column are 0-based.
///
/// # Examples
///
/// ```
/// use al_core::extract_error_reference;
/// use camino::Utf8Path;
///
/// let text = "Command failed: lessc\n/proj/less/style.less on line 5, column 3:";
/// let reference = extract_error_reference(Utf8Path::new("/proj"), text).unwrap();
/// assert_eq!(reference.path.as_str(), "/proj/less/style.less");
/// assert_eq!((reference.line, reference.column), (4, 2));
/// ```
#[must_use]
pub fn extract_error_reference(root: &Utf8Path, text: &str) -> Option<ErrorReference> {
    let line = text.split('\n').nth(1)?;

    let pattern = format!(
        r"({}\S+) on line (\d+), column (\d+):",
        regex::escape(root.as_str())
    );
    let regex = match Regex::new(&pattern) {
        Ok(regex) => regex,
        Err(error) => {
            debug!(%error, root = %root, "Failed to build error reference pattern");
            return None;
        }
    };

    let captures = regex.captures(line)?;
    let path = captures.get(1)?.as_str();
    let row = one_based_to_zero(captures.get(2)?.as_str())?;
    let column = one_based_to_zero(captures.get(3)?.as_str())?;

    Some(ErrorReference::new(path, row, column))
}

fn one_based_to_zero(digits: &str) -> Option<u32> {
    let value = match digits.parse::<u32>() {
        Ok(value) => value,
        Err(error) => {
            debug!(%error, digits, "Failed to determine reference position");
            return None;
        }
    };
    let zero_based = value.checked_sub(1);
    if zero_based.is_none() {
        debug!(digits, "Reference position is not 1-based");
    }
    zero_based
}
