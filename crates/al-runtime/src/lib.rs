//! Compile orchestration for autoless.
//!
//! This crate drives a compile from a trigger to a notification. It talks
//! to its environment through three seams:
//!
//! - [`Workspace`]: the active file, the project roots, and opening files
//! - [`Notifier`](al_core::Notifier): where results are reported
//! - [`CommandRunner`]: how the compiler process is run
//!
//! [`CompileOrchestrator`] runs the pipeline; [`Session`] wires it to
//! per-file save subscriptions.
//!
//! # Example
//!
//! ```no_run
//! use al_core::{Config, Notification, Notifier};
//! use al_runtime::{CompileOrchestrator, RuntimeError, Session, SystemRunner, Workspace};
//! use camino::{Utf8Path, Utf8PathBuf};
//!
//! struct Site;
//!
//! impl Workspace for Site {
//!     fn active_file(&self) -> Option<Utf8PathBuf> {
//!         None
//!     }
//!
//!     fn project_roots(&self) -> Vec<Utf8PathBuf> {
//!         vec![Utf8PathBuf::from("/work/site")]
//!     }
//!
//!     fn open(&self, _: &Utf8Path, _: Option<(u32, u32)>) -> Result<(), RuntimeError> {
//!         Ok(())
//!     }
//! }
//!
//! struct Log;
//!
//! impl Notifier for Log {
//!     fn notify(&self, notification: Notification) {
//!         eprintln!("{}: {}", notification.level, notification.title);
//!     }
//! }
//!
//! let orchestrator = CompileOrchestrator::new(Site, Log, SystemRunner, &Config::default());
//! let mut session = Session::start(orchestrator);
//!
//! let style = Utf8Path::new("/work/site/less/style.less");
//! session.editor_opened(style);
//! session.editor_saved(style);
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod compiler;
pub mod editor;
pub mod error;
pub mod host;
pub mod orchestrator;
pub mod registry;
pub mod session;
pub mod toolchain;

pub use compiler::{
    CommandOutput, CommandRunner, CompileCommand, CompileSuccess, CompilerInvoker, SystemRunner,
};
pub use editor::{EditorInvocation, EditorLauncher, absolute_path};
pub use error::{RuntimeError, error_stack};
pub use host::Workspace;
pub use orchestrator::CompileOrchestrator;
pub use registry::{EditorId, EventKind, SubscriptionId, SubscriptionRegistry};
pub use session::Session;
