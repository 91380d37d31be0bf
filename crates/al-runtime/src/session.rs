//! Plugin lifecycle: activation, per-file subscriptions, deactivation.

use al_core::{CompileAttempt, Notifier, Trigger};
use camino::Utf8Path;
use tracing::{debug, info};

use crate::compiler::CommandRunner;
use crate::host::Workspace;
use crate::orchestrator::CompileOrchestrator;
use crate::registry::{EditorId, EventKind, SubscriptionRegistry};

/// An active plugin session.
///
/// Every opened file gets a save subscription that compiles on save and a
/// destroy subscription that releases both when the file closes. Stopping
/// (or dropping) the session releases everything that is still registered.
#[derive(Debug)]
pub struct Session<W, N, R> {
    orchestrator: CompileOrchestrator<W, N, R>,
    registry: SubscriptionRegistry,
}

impl<W, N, R> Session<W, N, R>
where
    W: Workspace,
    N: Notifier,
    R: CommandRunner,
{
    /// Activates a session around `orchestrator`.
    pub fn start(orchestrator: CompileOrchestrator<W, N, R>) -> Self {
        info!("Session started");
        Self {
            orchestrator,
            registry: SubscriptionRegistry::new(),
        }
    }

    /// Returns the orchestrator for manual commands.
    pub const fn orchestrator(&self) -> &CompileOrchestrator<W, N, R> {
        &self.orchestrator
    }

    /// Returns the subscription registry.
    pub const fn registry(&self) -> &SubscriptionRegistry {
        &self.registry
    }

    /// A file was opened.
    pub fn editor_opened(&mut self, path: &Utf8Path) -> EditorId {
        self.registry.open(path)
    }

    /// A file was saved. Compiles if the file holds a save subscription.
    pub fn editor_saved(&mut self, path: &Utf8Path) -> Option<CompileAttempt> {
        if self.registry.subscriber(path, EventKind::Save).is_none() {
            debug!(path = %path, "Save for unsubscribed file ignored");
            return None;
        }
        Some(self.orchestrator.compile(&Trigger::save(path)))
    }

    /// A file was closed. Returns the number of subscriptions released.
    pub fn editor_closed(&mut self, path: &Utf8Path) -> usize {
        if self.registry.subscriber(path, EventKind::Destroy).is_none() {
            return 0;
        }
        self.registry
            .id_of(path)
            .map_or(0, |id| self.registry.close(id))
    }

    /// Returns `true` if `path` is registered.
    #[must_use]
    pub fn is_open(&self, path: &Utf8Path) -> bool {
        self.registry.id_of(path).is_some()
    }

    /// Deactivates the session, returning the number of subscriptions released.
    pub fn stop(&mut self) -> usize {
        let released = self.registry.dispose_all();
        info!(released, "Session stopped");
        released
    }
}

impl<W, N, R> Drop for Session<W, N, R> {
    fn drop(&mut self) {
        self.registry.dispose_all();
    }
}
