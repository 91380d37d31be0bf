//! Runtime error types.
//!
//! This module provides the [`RuntimeError`] type for failures while running
//! external programs (the compiler, the editor) and talking to the host.

use camino::Utf8PathBuf;
use thiserror::Error;

use al_core::ConfigError;

/// Errors that can occur in the runtime layer.
///
/// The orchestrator never returns these to its caller; it turns them into
/// notifications. They surface from host implementations and the editor
/// launcher.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RuntimeError {
    /// Configuration could not be loaded or written.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// An external program could not be started.
    #[error("failed to start '{program}': {source}")]
    Spawn {
        /// Program name as given.
        program: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// No editor is configured or detectable.
    #[error("no editor configured; set --editor, $VISUAL, or $EDITOR")]
    NoEditor,

    /// The editor exited unsuccessfully.
    #[error("editor exited with status: {0}")]
    EditorStatus(std::process::ExitStatus),

    /// A path could not be opened.
    #[error("cannot open '{path}': {reason}")]
    Open {
        /// The path that was requested.
        path: Utf8PathBuf,
        /// Why it could not be opened.
        reason: String,
    },
}

impl RuntimeError {
    /// Creates a [`RuntimeError::Spawn`] error.
    #[must_use]
    pub fn spawn(program: impl Into<String>, source: std::io::Error) -> Self {
        Self::Spawn {
            program: program.into(),
            source,
        }
    }

    /// Creates a [`RuntimeError::Open`] error.
    #[must_use]
    pub fn open(path: impl Into<Utf8PathBuf>, reason: impl Into<String>) -> Self {
        Self::Open {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Returns `true` if the user can fix this through settings or flags.
    #[must_use]
    pub const fn is_user_actionable(&self) -> bool {
        match self {
            Self::Config(error) => error.is_user_actionable(),
            Self::NoEditor | Self::Open { .. } => true,
            Self::Spawn { .. } | Self::EditorStatus(_) => false,
        }
    }
}

/// Renders an error and its `source()` chain, one cause per line.
///
/// Used as the stack text of failure notifications.
#[must_use]
pub fn error_stack(error: &dyn std::error::Error) -> String {
    let mut stack = format!("Error: {error}");
    let mut source = error.source();
    while let Some(cause) = source {
        stack.push_str("\nCaused by: ");
        stack.push_str(&cause.to_string());
        source = cause.source();
    }
    stack
}
