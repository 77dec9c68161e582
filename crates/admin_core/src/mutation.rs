//! Create/update/delete orchestration against the remote source, keeping the
//! bound collection coherent.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use shared::error::RemoteError;
use tokio::sync::Mutex;
use tracing::warn;

use crate::{
    collection::CollectionQuery,
    notify::{NotificationKind, NotificationSink},
    remote::EntityGateway,
};

/// Raises the shared busy flag for the duration of one write. Writes are not
/// deduplicated; the flag reads as busy while at least one is in flight.
struct PendingWrite {
    counter: Arc<AtomicUsize>,
}

impl PendingWrite {
    fn begin(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self {
            counter: Arc::clone(counter),
        }
    }
}

impl Drop for PendingWrite {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Runs writes for one entity type. A successful write refreshes the bound
/// collection (strictly after the remote acknowledgment) and emits a success
/// notification; a failed write emits one error notification naming the
/// entity and leaves the collection untouched. Failures are never retried
/// here; retrying is a user decision.
///
/// Cheap to clone; clones share the gateway, the bound collection, and the
/// busy flag, so a page can hand copies to its form submit handlers.
pub struct MutationOrchestrator<G: EntityGateway> {
    gateway: Arc<G>,
    collection: Arc<Mutex<CollectionQuery<G::Entity>>>,
    notifier: Arc<dyn NotificationSink>,
    entity_name: String,
    in_flight: Arc<AtomicUsize>,
}

impl<G: EntityGateway> Clone for MutationOrchestrator<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            collection: Arc::clone(&self.collection),
            notifier: Arc::clone(&self.notifier),
            entity_name: self.entity_name.clone(),
            in_flight: Arc::clone(&self.in_flight),
        }
    }
}

impl<G: EntityGateway> MutationOrchestrator<G> {
    pub fn new(
        entity_name: impl Into<String>,
        gateway: Arc<G>,
        collection: Arc<Mutex<CollectionQuery<G::Entity>>>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            gateway,
            collection,
            notifier,
            entity_name: entity_name.into(),
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    pub fn entity_name(&self) -> &str {
        &self.entity_name
    }

    pub async fn create(&self, draft: G::Draft) -> Option<G::Entity> {
        let _pending = PendingWrite::begin(&self.in_flight);
        match self.gateway.create(draft).await {
            Ok(entity) => {
                self.acknowledge("created").await;
                Some(entity)
            }
            Err(err) => {
                self.report_failure("create", &err);
                None
            }
        }
    }

    pub async fn update(&self, id: G::Id, draft: G::Draft) -> Option<G::Entity> {
        let _pending = PendingWrite::begin(&self.in_flight);
        match self.gateway.update(id, draft).await {
            Ok(entity) => {
                self.acknowledge("updated").await;
                Some(entity)
            }
            Err(err) => {
                self.report_failure("update", &err);
                None
            }
        }
    }

    /// Performs the destructive call. Asking the user to confirm is the
    /// caller's step; none happens here.
    pub async fn delete(&self, id: G::Id) -> bool {
        let _pending = PendingWrite::begin(&self.in_flight);
        match self.gateway.delete(id).await {
            Ok(()) => {
                self.acknowledge("deleted").await;
                true
            }
            Err(err) => {
                self.report_failure("delete", &err);
                false
            }
        }
    }

    async fn acknowledge(&self, verb: &str) {
        self.collection.lock().await.refresh().await;
        self.notifier.notify(
            &format!("{} {verb}", self.entity_name),
            NotificationKind::Success,
        );
    }

    fn report_failure(&self, operation: &str, err: &RemoteError) {
        warn!(entity = %self.entity_name, operation, error = %err, "remote write failed");
        self.notifier.notify(
            &format!("Failed to {operation} {}: {}", self.entity_name, err.message),
            NotificationKind::Error,
        );
    }
}

#[cfg(test)]
#[path = "tests/mutation_tests.rs"]
mod tests;
