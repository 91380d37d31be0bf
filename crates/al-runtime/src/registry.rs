//! Bookkeeping for open files and their event subscriptions.
//!
//! Each open file holds a save subscription and a destroy subscription.
//! Closing the file removes both tokens at once, so nothing is left behind
//! for a file that is no longer open.

use std::fmt;

use camino::{Utf8Path, Utf8PathBuf};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::debug;

/// Identifies an open file in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EditorId(u64);

impl fmt::Display for EditorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "editor#{}", self.0)
    }
}

/// Identifies a single subscription token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// The host event a subscription listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// The file was saved.
    Save,

    /// The file was closed.
    Destroy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Subscription {
    id: SubscriptionId,
    kind: EventKind,
}

#[derive(Debug)]
struct Entry {
    path: Utf8PathBuf,
    subscriptions: SmallVec<[Subscription; 2]>,
}

/// Open files and the subscription tokens registered for each.
///
/// Opening a path that is already open returns its existing id.
///
/// # Examples
///
/// ```
/// use al_runtime::{EventKind, SubscriptionRegistry};
/// use camino::Utf8Path;
///
/// let mut registry = SubscriptionRegistry::new();
/// let id = registry.open(Utf8Path::new("/site/less/style.less"));
/// assert!(registry.subscriber(Utf8Path::new("/site/less/style.less"), EventKind::Save).is_some());
///
/// registry.close(id);
/// assert!(registry.subscriber(Utf8Path::new("/site/less/style.less"), EventKind::Save).is_none());
/// ```
#[derive(Debug, Default)]
pub struct SubscriptionRegistry {
    entries: FxHashMap<EditorId, Entry>,
    by_path: FxHashMap<Utf8PathBuf, EditorId>,
    next_editor: u64,
    next_subscription: u64,
}

impl SubscriptionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers save and destroy subscriptions for `path`.
    pub fn open(&mut self, path: &Utf8Path) -> EditorId {
        if let Some(&id) = self.by_path.get(path) {
            return id;
        }

        let id = EditorId(self.next_editor);
        self.next_editor += 1;

        let subscriptions = [EventKind::Save, EventKind::Destroy]
            .into_iter()
            .map(|kind| {
                let id = SubscriptionId(self.next_subscription);
                self.next_subscription += 1;
                Subscription { id, kind }
            })
            .collect();

        self.entries.insert(
            id,
            Entry {
                path: path.to_owned(),
                subscriptions,
            },
        );
        self.by_path.insert(path.to_owned(), id);
        debug!(%id, path = %path, "Registered subscriptions");
        id
    }

    /// Removes `id` and every subscription it holds.
    ///
    /// Returns the number of subscriptions released (0 if `id` was unknown).
    pub fn close(&mut self, id: EditorId) -> usize {
        let Some(entry) = self.entries.remove(&id) else {
            return 0;
        };
        self.by_path.remove(&entry.path);
        debug!(%id, path = %entry.path, released = entry.subscriptions.len(), "Released subscriptions");
        entry.subscriptions.len()
    }

    /// Returns the id registered for `path`, if it is open.
    #[must_use]
    pub fn id_of(&self, path: &Utf8Path) -> Option<EditorId> {
        self.by_path.get(path).copied()
    }

    /// Returns the live subscription of `kind` for `path`, if any.
    #[must_use]
    pub fn subscriber(&self, path: &Utf8Path, kind: EventKind) -> Option<SubscriptionId> {
        let id = self.by_path.get(path)?;
        self.entries
            .get(id)?
            .subscriptions
            .iter()
            .find(|subscription| subscription.kind == kind)
            .map(|subscription| subscription.id)
    }

    /// Returns the number of live subscriptions.
    #[must_use]
    pub fn subscription_count(&self) -> usize {
        self.entries.values().map(|entry| entry.subscriptions.len()).sum()
    }

    /// Returns the number of open files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no files are open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Releases every subscription, returning how many were released.
    pub fn dispose_all(&mut self) -> usize {
        let released = self.subscription_count();
        self.entries.clear();
        self.by_path.clear();
        if released > 0 {
            debug!(released, "Disposed all subscriptions");
        }
        released
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STYLE: &str = "/site/less/style.less";
    const VARS: &str = "/site/less/vars.less";

    #[test]
    fn test_open_registers_both_subscriptions() {
        let mut registry = SubscriptionRegistry::new();
        registry.open(Utf8Path::new(STYLE));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.subscription_count(), 2);
        let save = registry.subscriber(Utf8Path::new(STYLE), EventKind::Save);
        let destroy = registry.subscriber(Utf8Path::new(STYLE), EventKind::Destroy);
        assert!(save.is_some());
        assert!(destroy.is_some());
        assert_ne!(save, destroy);
    }

    #[test]
    fn test_open_is_idempotent_per_path() {
        let mut registry = SubscriptionRegistry::new();
        let first = registry.open(Utf8Path::new(STYLE));
        let second = registry.open(Utf8Path::new(STYLE));

        assert_eq!(first, second);
        assert_eq!(registry.subscription_count(), 2);
        assert_eq!(registry.id_of(Utf8Path::new(STYLE)), Some(first));
    }

    #[test]
    fn test_close_removes_all_tokens() {
        let mut registry = SubscriptionRegistry::new();
        let style = registry.open(Utf8Path::new(STYLE));
        registry.open(Utf8Path::new(VARS));

        assert_eq!(registry.close(style), 2);
        assert_eq!(registry.subscription_count(), 2);
        assert!(registry.subscriber(Utf8Path::new(STYLE), EventKind::Save).is_none());
        assert!(registry.subscriber(Utf8Path::new(STYLE), EventKind::Destroy).is_none());
        assert!(registry.subscriber(Utf8Path::new(VARS), EventKind::Save).is_some());

        // Closing twice is harmless
        assert_eq!(registry.close(style), 0);
    }

    #[test]
    fn test_reopen_after_close_gets_new_tokens() {
        let mut registry = SubscriptionRegistry::new();
        let first = registry.open(Utf8Path::new(STYLE));
        let old_save = registry.subscriber(Utf8Path::new(STYLE), EventKind::Save);
        registry.close(first);

        let second = registry.open(Utf8Path::new(STYLE));
        assert_ne!(first, second);
        assert_ne!(registry.subscriber(Utf8Path::new(STYLE), EventKind::Save), old_save);
    }

    #[test]
    fn test_dispose_all() {
        let mut registry = SubscriptionRegistry::new();
        registry.open(Utf8Path::new(STYLE));
        registry.open(Utf8Path::new(VARS));

        assert_eq!(registry.dispose_all(), 4);
        assert!(registry.is_empty());
        assert_eq!(registry.subscription_count(), 0);
        assert_eq!(registry.dispose_all(), 0);
    }

    #[test]
    fn test_editor_id_display() {
        let mut registry = SubscriptionRegistry::new();
        let id = registry.open(Utf8Path::new(STYLE));
        assert_eq!(id.to_string(), "editor#0");
    }
}
