//! User-facing notifications.
//!
//! The compile pipeline reports every outcome the user should see as a
//! [`Notification`] handed to a [`Notifier`]. The host decides how to render
//! them (the CLI prints to stderr).

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::types::ErrorReference;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    /// The operation completed.
    Success,

    /// Informational message.
    Info,

    /// Something the user can fix (missing project, invalid config, ...).
    Warning,

    /// An operation failed.
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}

/// A follow-up the user may take from a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationAction {
    /// Open the referenced file at the reported position.
    JumpTo(ErrorReference),
}

/// A message for the user.
///
/// # Examples
///
/// ```
/// use al_core::{Level, Notification};
///
/// let note = Notification::error("Failed to compile 'less/style.less'!")
///     .with_detail("Command failed: lessc ...")
///     .dismissable();
/// assert_eq!(note.level, Level::Error);
/// assert!(note.dismissable);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Severity.
    pub level: Level,

    /// One-line summary.
    pub title: String,

    /// Longer description, if any.
    pub detail: Option<String>,

    /// Diagnostic trace, if any.
    pub stack: Option<String>,

    /// Stays visible until the user dismisses it.
    pub dismissable: bool,

    /// Optional follow-up action.
    pub action: Option<NotificationAction>,
}

impl Notification {
    /// Creates a notification with only a level and title.
    #[must_use]
    pub fn new(level: Level, title: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            detail: None,
            stack: None,
            dismissable: false,
            action: None,
        }
    }

    /// Creates a success notification.
    #[must_use]
    pub fn success(title: impl Into<String>) -> Self {
        Self::new(Level::Success, title)
    }

    /// Creates an info notification.
    #[must_use]
    pub fn info(title: impl Into<String>) -> Self {
        Self::new(Level::Info, title)
    }

    /// Creates a warning notification.
    #[must_use]
    pub fn warning(title: impl Into<String>) -> Self {
        Self::new(Level::Warning, title)
    }

    /// Creates an error notification.
    #[must_use]
    pub fn error(title: impl Into<String>) -> Self {
        Self::new(Level::Error, title)
    }

    /// Sets the detail text.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Sets the stack text.
    #[must_use]
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    /// Marks the notification as dismissable.
    #[must_use]
    pub const fn dismissable(mut self) -> Self {
        self.dismissable = true;
        self
    }

    /// Attaches a follow-up action.
    #[must_use]
    pub fn with_action(mut self, action: NotificationAction) -> Self {
        self.action = Some(action);
        self
    }

    /// Returns the jump target, if the action is [`NotificationAction::JumpTo`].
    #[must_use]
    pub fn jump_target(&self) -> Option<&ErrorReference> {
        match &self.action {
            Some(NotificationAction::JumpTo(reference)) => Some(reference),
            None => None,
        }
    }
}

/// Sink for notifications.
pub trait Notifier {
    /// Shows `notification` to the user.
    fn notify(&self, notification: Notification);
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification);
    }
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification);
    }
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder(RefCell<Vec<Notification>>);

    impl Notifier for Recorder {
        fn notify(&self, notification: Notification) {
            self.0.borrow_mut().push(notification);
        }
    }

    #[test]
    fn test_builders() {
        let reference = ErrorReference::new("/proj/a.less", 4, 2);
        let note = Notification::error("Failed")
            .with_detail("detail")
            .with_stack("stack")
            .dismissable()
            .with_action(NotificationAction::JumpTo(reference.clone()));

        assert_eq!(note.level, Level::Error);
        assert_eq!(note.title, "Failed");
        assert_eq!(note.detail.as_deref(), Some("detail"));
        assert_eq!(note.stack.as_deref(), Some("stack"));
        assert!(note.dismissable);
        assert_eq!(note.jump_target(), Some(&reference));
    }

    #[test]
    fn test_plain_notification_defaults() {
        let note = Notification::success("Done");
        assert_eq!(note.level, Level::Success);
        assert!(note.detail.is_none());
        assert!(!note.dismissable);
        assert!(note.jump_target().is_none());
    }

    #[test]
    fn test_notifier_through_references() {
        let recorder = Recorder::default();
        {
            let by_ref = &recorder;
            by_ref.notify(Notification::info("one"));
            let boxed: Box<&Recorder> = Box::new(&recorder);
            boxed.notify(Notification::warning("two"));
        }
        let titles: Vec<_> = recorder.0.borrow().iter().map(|n| n.title.clone()).collect();
        assert_eq!(titles, vec!["one", "two"]);
    }

    #[test]
    fn test_level_display() {
        assert_eq!(Level::Warning.to_string(), "warning");
        assert_eq!(
            serde_json::to_string(&Level::Success).unwrap(),
            r#""success""#
        );
    }
}
