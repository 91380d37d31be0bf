//! Terminal rendering of notifications.

use std::io::{self, Write};

use al_core::{Level, Notification, Notifier};
use crossterm::style::Stylize;
use tracing::debug;

/// Prints notifications to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalNotifier {
    color: bool,
    verbose: bool,
}

impl TerminalNotifier {
    /// Creates a notifier. `verbose` also prints stack traces.
    pub const fn new(color: bool, verbose: bool) -> Self {
        Self { color, verbose }
    }

    /// Formats `notification` as it will be printed.
    pub fn render(&self, notification: &Notification) -> String {
        let mut out = format!(
            "{}: {}\n",
            self.label(notification.level),
            notification.title
        );

        if let Some(detail) = notification.detail.as_deref() {
            for line in detail.lines() {
                out.push_str("  ");
                out.push_str(line);
                out.push('\n');
            }
        }

        if self.verbose {
            if let Some(stack) = notification.stack.as_deref() {
                for line in stack.lines() {
                    out.push_str("    ");
                    out.push_str(line);
                    out.push('\n');
                }
            }
        }

        if let Some(reference) = notification.jump_target() {
            out.push_str(&format!(
                "  --> {}:{}:{}\n",
                reference.path,
                reference.line + 1,
                reference.column + 1
            ));
        }

        out
    }

    fn label(self, level: Level) -> String {
        let label = level.to_string();
        if !self.color {
            return label;
        }
        let styled = match level {
            Level::Success => label.green(),
            Level::Info => label.cyan(),
            Level::Warning => label.yellow(),
            Level::Error => label.red(),
        };
        styled.to_string()
    }

    /// Writes the rendered `notification` to `out`.
    pub fn write_to(&self, out: &mut impl Write, notification: &Notification) -> io::Result<()> {
        out.write_all(self.render(notification).as_bytes())?;
        out.flush()
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        let mut handle = io::stderr().lock();
        if let Err(error) = self.write_to(&mut handle, &notification) {
            debug!(%error, title = %notification.title, "Failed to write notification");
        }
    }
}
