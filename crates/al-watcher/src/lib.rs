//! Debounced save detection for LESS sources.
//!
//! This crate turns filesystem changes under the project roots into a stream
//! of [`FileEvent`]s, using `notify` with `notify-debouncer-mini` on a
//! blocking thread and a bounded tokio channel to hand events to async code.
//!
//! # Overview
//!
//! - One watcher covers every project root
//! - Rapid writes (editors writing a temp file then renaming) collapse into
//!   one event within the debounce window (100ms by default)
//! - [`LessFilter`] drops everything but `.less` files outside `node_modules`
//! - Each event says whether the file was written or removed, so the
//!   consumer can tell saves from deletions
//!
//! # Usage
//!
//! ```no_run
//! use al_core::WatchConfig;
//! use al_watcher::{FileWatcher, LessFilter};
//! use camino::Utf8PathBuf;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let roots = [Utf8PathBuf::from("/work/site")];
//!     let mut watcher = FileWatcher::new(&roots, &WatchConfig::default(), LessFilter::default()).await?;
//!
//!     while let Some(event) = watcher.recv().await {
//!         if event.is_write() {
//!             println!("Saved: {}", event.path);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Error Handling
//!
//! ```
//! use al_watcher::WatchError;
//!
//! fn explain(err: &WatchError) -> String {
//!     match err.root() {
//!         Some(root) if err.is_bad_root() => format!("check --root {root}: {err}"),
//!         _ => err.to_string(),
//!     }
//! }
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod error;
pub mod events;
pub mod filter;
pub mod watcher;

pub use error::WatchError;
pub use events::{FileEvent, FileEventKind};
pub use filter::{AcceptAllFilter, FileFilter, LessFilter};
pub use watcher::FileWatcher;
