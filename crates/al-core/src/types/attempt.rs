//! Compile attempt types.
//!
//! This module provides the values describing one run of the compile
//! pipeline: what triggered it ([`Trigger`]), how it ended
//! ([`CompileOutcome`]), and the record tying them together
//! ([`CompileAttempt`]).

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use super::project::{ProjectConfig, ProjectPath};
use super::reference::ErrorReference;
use crate::diagnostic::Diagnostic;
use crate::validate::ConfigField;

/// What started a compile attempt.
///
/// # Examples
///
/// ```
/// use al_core::Trigger;
///
/// assert!(!Trigger::Manual.is_auto());
/// assert!(Trigger::save("/proj/less/style.less").is_auto());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    /// An explicit compile command. Ignores `AUTO_COMPILE`.
    Manual,

    /// A file was saved. Gated by `AUTO_COMPILE`.
    Save(Utf8PathBuf),
}

impl Trigger {
    /// Creates a save trigger for `path`.
    #[inline]
    #[must_use]
    pub fn save(path: impl Into<Utf8PathBuf>) -> Self {
        Self::Save(path.into())
    }

    /// Returns `true` if the attempt was triggered by a save.
    #[inline]
    #[must_use]
    pub const fn is_auto(&self) -> bool {
        matches!(self, Self::Save(_))
    }

    /// Returns the saved path for save triggers.
    #[must_use]
    pub fn saved_path(&self) -> Option<&Utf8Path> {
        match self {
            Self::Save(path) => Some(path),
            Self::Manual => None,
        }
    }
}

/// Why an attempt stopped before the config was validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum AbortReason {
    /// No active file to start from.
    NoActiveFile,

    /// The active file is not inside any known project root.
    NoProject,

    /// The project has no `.lessconfig`, or it is empty.
    NoConfig,

    /// The `.lessconfig` could not be read.
    ConfigUnreadable,
}

/// Why a valid attempt did not invoke the compiler.
///
/// Skips are normal terminal states and produce no notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum SkipReason {
    /// The active file is not a `.less` file.
    NotLess,

    /// Triggered by a save while `AUTO_COMPILE=false`.
    AutoCompileDisabled,
}

/// The terminal state of a compile attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum CompileOutcome {
    /// The compiler exited successfully.
    Success {
        /// Source file as written in the config.
        source_file: String,
    },

    /// The `.lessconfig` is missing or mistyping fields.
    ValidationFailed {
        /// Every invalid field, in check order.
        fields: Vec<ConfigField>,
    },

    /// The compiler failed or could not be started.
    CompileFailed {
        /// Sanitized compiler output.
        diagnostic: Diagnostic,
        /// Location scraped from the diagnostic, if any.
        reference: Option<ErrorReference>,
    },

    /// The compiler was intentionally not run.
    Skipped {
        /// Why the compiler was not run.
        reason: SkipReason,
    },

    /// The attempt stopped before validation.
    Aborted {
        /// Why the attempt stopped.
        reason: AbortReason,
    },
}

impl CompileOutcome {
    /// Returns `true` if the outcome is [`CompileOutcome::Success`].
    #[inline]
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Returns `true` for outcomes the user should treat as failures.
    ///
    /// Validation and compile failures count; skips and aborts do not.
    #[inline]
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::ValidationFailed { .. } | Self::CompileFailed { .. }
        )
    }

    /// Returns the error reference of a failed compile, if one was found.
    #[must_use]
    pub fn reference(&self) -> Option<&ErrorReference> {
        match self {
            Self::CompileFailed { reference, .. } => reference.as_ref(),
            _ => None,
        }
    }
}

/// One run of the compile pipeline.
///
/// Transient: created per trigger and discarded once reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompileAttempt {
    /// What started the attempt.
    pub trigger: Trigger,

    /// The resolved project, if resolution got that far.
    pub project: Option<ProjectPath>,

    /// The validated config, if validation got that far.
    pub config: Option<ProjectConfig>,

    /// How the attempt ended.
    pub outcome: CompileOutcome,
}

impl CompileAttempt {
    /// Creates an attempt that stopped before a project was resolved.
    #[must_use]
    pub const fn aborted(trigger: Trigger, reason: AbortReason) -> Self {
        Self {
            trigger,
            project: None,
            config: None,
            outcome: CompileOutcome::Aborted { reason },
        }
    }

    /// Returns `true` if the trigger was a save.
    #[inline]
    #[must_use]
    pub const fn is_auto(&self) -> bool {
        self.trigger.is_auto()
    }
}
