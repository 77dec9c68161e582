//! Page wiring contract: one collection, one mutation orchestrator, and form
//! factories per entity type. Rendering stays with the embedding UI.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    collection::{CollectionQuery, SearchPredicate},
    form::{FormController, SubmitHandler},
    mutation::MutationOrchestrator,
    notify::NotificationSink,
    remote::{CollectionSource, EntityGateway, GatewaySource},
    validation::ValidationSchema,
};

/// Everything one CRUD page owns for one entity collection. Instances are
/// never shared across pages; the gateway and notifier collaborators are.
pub struct EntityPage<G: EntityGateway + 'static> {
    collection: Arc<Mutex<CollectionQuery<G::Entity>>>,
    mutations: MutationOrchestrator<G>,
}

impl<G> EntityPage<G>
where
    G: EntityGateway + 'static,
    G::Draft: Clone,
    G::Id: Clone,
{
    pub fn new(
        entity_name: &str,
        gateway: Arc<G>,
        page_size: usize,
        matches: SearchPredicate<G::Entity>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        let source: Arc<dyn CollectionSource<G::Entity>> =
            Arc::new(GatewaySource(Arc::clone(&gateway)));
        let collection = Arc::new(Mutex::new(CollectionQuery::new(
            source, page_size, matches,
        )));
        let mutations =
            MutationOrchestrator::new(entity_name, gateway, Arc::clone(&collection), notifier);
        Self {
            collection,
            mutations,
        }
    }

    pub fn collection(&self) -> &Arc<Mutex<CollectionQuery<G::Entity>>> {
        &self.collection
    }

    pub fn mutations(&self) -> &MutationOrchestrator<G> {
        &self.mutations
    }

    /// Form for the create dialog, seeded with default draft values and
    /// submitting through [`MutationOrchestrator::create`].
    pub fn create_form(
        &self,
        initial: G::Draft,
        schema: ValidationSchema<G::Draft>,
    ) -> FormController<G::Draft> {
        FormController::new(
            initial,
            schema,
            Arc::new(CreateSubmit {
                mutations: self.mutations.clone(),
            }),
        )
    }

    /// Form for the edit dialog, seeded with the selected row's draft and
    /// submitting through [`MutationOrchestrator::update`].
    pub fn edit_form(
        &self,
        id: G::Id,
        initial: G::Draft,
        schema: ValidationSchema<G::Draft>,
    ) -> FormController<G::Draft> {
        FormController::new(
            initial,
            schema,
            Arc::new(UpdateSubmit {
                id,
                mutations: self.mutations.clone(),
            }),
        )
    }
}

struct CreateSubmit<G: EntityGateway> {
    mutations: MutationOrchestrator<G>,
}

#[async_trait]
impl<G> SubmitHandler<G::Draft> for CreateSubmit<G>
where
    G: EntityGateway + 'static,
    G::Draft: Clone,
{
    async fn on_submit(&self, values: &G::Draft) -> Result<()> {
        match self.mutations.create(values.clone()).await {
            Some(_) => Ok(()),
            None => Err(anyhow!(
                "create {} rejected by remote source",
                self.mutations.entity_name()
            )),
        }
    }
}

struct UpdateSubmit<G: EntityGateway> {
    id: G::Id,
    mutations: MutationOrchestrator<G>,
}

#[async_trait]
impl<G> SubmitHandler<G::Draft> for UpdateSubmit<G>
where
    G: EntityGateway + 'static,
    G::Draft: Clone,
    G::Id: Clone,
{
    async fn on_submit(&self, values: &G::Draft) -> Result<()> {
        match self
            .mutations
            .update(self.id.clone(), values.clone())
            .await
        {
            Some(_) => Ok(()),
            None => Err(anyhow!(
                "update {} rejected by remote source",
                self.mutations.entity_name()
            )),
        }
    }
}

#[cfg(test)]
#[path = "tests/page_tests.rs"]
mod tests;
