//! File watcher with async event streaming.
//!
//! This module provides the [`FileWatcher`] type that bridges the synchronous
//! `notify` debouncer to the async tokio runtime. One debouncer watches every
//! project root.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Blocking Thread (spawn_blocking)             │
//! │  ┌──────────────────┐    ┌────────────────┐    ┌────────────┐   │
//! │  │ RecommendedWatcher│ -> │ Debouncer      │ -> │ Callback   │   │
//! │  │ (all roots)      │    │ (100ms window) │    │ (LessFilter)│  │
//! │  └──────────────────┘    └────────────────┘    └─────┬──────┘   │
//! └──────────────────────────────────────────────────────│──────────┘
//!                                                        │
//!                                          blocking_send │
//!                                                        ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Async Runtime (tokio)                        │
//! │  ┌──────────────────┐    ┌────────────────┐                     │
//! │  │ FileWatcher      │    │ mpsc::Receiver │ -> watch loop       │
//! │  │ (shutdown ctrl)  │    │ (events)       │                     │
//! │  └──────────────────┘    └────────────────┘                     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use al_core::WatchConfig;
use camino::{Utf8Path, Utf8PathBuf};
use notify::RecursiveMode;
use notify_debouncer_mini::{DebounceEventResult, DebouncedEvent, new_debouncer};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::error::WatchError;
use crate::events::FileEvent;
use crate::filter::FileFilter;

/// Default channel capacity for file events.
const DEFAULT_CHANNEL_CAPACITY: usize = 100;

/// A watcher over one or more project roots that streams events to async code.
///
/// # Lifecycle
///
/// 1. **Creation**: `FileWatcher::new()` validates and canonicalizes every
///    root, creates the channels, and spawns a blocking task running the
///    debouncer.
/// 2. **Event Reception**: `recv()` / `try_recv()` yield events that already
///    passed the filter.
/// 3. **Shutdown**: `shutdown()` stops the task and awaits it. Dropping the
///    watcher sends the shutdown signal without waiting.
///
/// # Examples
///
/// ```no_run
/// use al_core::WatchConfig;
/// use al_watcher::{FileWatcher, LessFilter};
/// use camino::Utf8PathBuf;
///
/// # async fn example() -> Result<(), al_watcher::WatchError> {
/// let roots = [Utf8PathBuf::from("./site"), Utf8PathBuf::from("./admin")];
/// let mut watcher = FileWatcher::new(&roots, &WatchConfig::default(), LessFilter::default()).await?;
///
/// while let Some(event) = watcher.recv().await {
///     println!("Saved: {}", event.path);
/// }
/// # Ok(())
/// # }
/// ```
pub struct FileWatcher {
    /// Shutdown signal sender. `None` once shutdown has started.
    shutdown_tx: Option<oneshot::Sender<()>>,

    /// Handle to the blocking watcher task.
    task_handle: Option<JoinHandle<Result<(), WatchError>>>,

    /// Event receiver for async consumption.
    event_rx: mpsc::Receiver<FileEvent>,

    /// Canonicalized roots being watched.
    watch_paths: Vec<Utf8PathBuf>,
}

impl std::fmt::Debug for FileWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWatcher")
            .field("watch_paths", &self.watch_paths)
            .field("is_running", &self.is_running())
            .finish_non_exhaustive()
    }
}

impl FileWatcher {
    /// Starts watching every path in `roots`.
    ///
    /// Roots are canonicalized and de-duplicated.
    ///
    /// # Errors
    ///
    /// Returns [`WatchError::NoRoots`] if `roots` is empty, or a root error
    /// ([`WatchError::RootNotFound`], [`WatchError::NotADirectory`],
    /// [`WatchError::Canonicalize`]) for the first bad root.
    pub async fn new<P, F>(roots: &[P], config: &WatchConfig, filter: F) -> Result<Self, WatchError>
    where
        P: AsRef<Utf8Path>,
        F: FileFilter,
    {
        Self::with_capacity(roots, config, filter, DEFAULT_CHANNEL_CAPACITY).await
    }

    /// Starts a watcher with a custom channel capacity.
    ///
    /// # Errors
    ///
    /// Same as [`FileWatcher::new`].
    #[allow(clippy::unused_async)] // Async for API consistency with shutdown()
    pub async fn with_capacity<P, F>(
        roots: &[P],
        config: &WatchConfig,
        filter: F,
        channel_capacity: usize,
    ) -> Result<Self, WatchError>
    where
        P: AsRef<Utf8Path>,
        F: FileFilter,
    {
        let watch_paths = canonical_roots(roots)?;

        let (event_tx, event_rx) = mpsc::channel(channel_capacity);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let roots = watch_paths.clone();
        let config = *config;
        let task_handle =
            tokio::task::spawn_blocking(move || watch_blocking(&roots, config, &event_tx, shutdown_rx, filter));

        Ok(Self {
            shutdown_tx: Some(shutdown_tx),
            task_handle: Some(task_handle),
            event_rx,
            watch_paths,
        })
    }

    /// Receives the next file event.
    ///
    /// Returns `None` once the watcher has stopped.
    pub async fn recv(&mut self) -> Option<FileEvent> {
        self.event_rx.recv().await
    }

    /// Tries to receive a file event without waiting.
    pub fn try_recv(&mut self) -> Result<FileEvent, mpsc::error::TryRecvError> {
        self.event_rx.try_recv()
    }

    /// Returns the canonicalized roots being watched.
    #[must_use]
    pub fn watch_paths(&self) -> &[Utf8PathBuf] {
        &self.watch_paths
    }

    /// Returns `true` if the watcher task is still running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.shutdown_tx.is_some() && self.task_handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stops the watcher and waits for its thread to finish.
    ///
    /// # Errors
    ///
    /// Returns the error the watcher thread stopped with, or
    /// [`WatchError::WorkerStopped`] if it panicked.
    pub async fn shutdown(mut self) -> Result<(), WatchError> {
        if let Some(tx) = self.shutdown_tx.take() {
            // Receiver is gone if the task already exited
            let _ = tx.send(());
        }

        if let Some(handle) = self.task_handle.take() {
            match handle.await {
                Ok(result) => result?,
                Err(_join_error) => return Err(WatchError::WorkerStopped),
            }
        }

        Ok(())
    }
}

impl Drop for FileWatcher {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        // The task exits on its own once it sees the signal.
    }
}

/// Validates, canonicalizes and de-duplicates watch roots.
fn canonical_roots<P: AsRef<Utf8Path>>(roots: &[P]) -> Result<Vec<Utf8PathBuf>, WatchError> {
    if roots.is_empty() {
        return Err(WatchError::NoRoots);
    }

    let mut paths: Vec<Utf8PathBuf> = Vec::with_capacity(roots.len());
    for root in roots {
        let root = root.as_ref();
        if !root.exists() {
            return Err(WatchError::root_not_found(root));
        }
        if !root.is_dir() {
            return Err(WatchError::NotADirectory(root.to_owned()));
        }
        let canonical = root
            .canonicalize_utf8()
            .map_err(|e| WatchError::canonicalize(root, e))?;
        if !paths.contains(&canonical) {
            paths.push(canonical);
        }
    }
    Ok(paths)
}

/// Runs one debouncer over `roots` until the shutdown signal arrives.
fn watch_blocking<F: FileFilter>(
    roots: &[Utf8PathBuf],
    config: WatchConfig,
    events: &mpsc::Sender<FileEvent>,
    shutdown_rx: oneshot::Receiver<()>,
    filter: F,
) -> Result<(), WatchError> {
    let sender = events.clone();
    let mut debouncer = new_debouncer(
        Duration::from_millis(config.debounce_ms),
        move |result: DebounceEventResult| match result {
            Ok(batch) => forward(batch, &filter, &sender),
            Err(error) => tracing::warn!(%error, "Debouncer error"),
        },
    )?;

    let mode = if config.recursive {
        RecursiveMode::Recursive
    } else {
        RecursiveMode::NonRecursive
    };
    for root in roots {
        debouncer.watcher().watch(root.as_std_path(), mode)?;
        tracing::info!(root = %root, recursive = config.recursive, "Watching project root");
    }

    // Parks this thread; the debouncer delivers events from its own thread
    let _ = shutdown_rx.blocking_recv();
    drop(debouncer);

    tracing::info!(roots = roots.len(), "File watcher stopped");
    Ok(())
}

/// Sends every accepted path in one debounced batch to the consumer.
fn forward<F: FileFilter>(batch: Vec<DebouncedEvent>, filter: &F, sender: &mpsc::Sender<FileEvent>) {
    for path in batch.into_iter().map(|event| event.path) {
        let path = match Utf8PathBuf::from_path_buf(path) {
            Ok(path) => path,
            Err(path) => {
                tracing::warn!(path = %path.display(), "Skipping non-UTF-8 path");
                continue;
            }
        };

        if !filter.should_process(&path) {
            tracing::trace!(path = %path, "Ignored change");
            continue;
        }

        if sender.blocking_send(FileEvent::observe(path)).is_err() {
            tracing::debug!("Event receiver dropped");
            return;
        }
    }
}
