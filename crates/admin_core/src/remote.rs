//! Collaborator traits for the remote system of record.
//!
//! The controllers never talk to the network themselves; they call these
//! traits, which a transport crate (or a test double) implements. Every call
//! must fail through the returned `Result`, never by panicking, and
//! implementations must be safely callable concurrently.

use std::{marker::PhantomData, sync::Arc};

use async_trait::async_trait;
use shared::error::RemoteError;

/// Read side of a remote collection.
#[async_trait]
pub trait CollectionSource<R>: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<R>, RemoteError>;
}

/// Full CRUD surface for one entity type.
#[async_trait]
pub trait EntityGateway: Send + Sync {
    type Entity: Send + Sync + 'static;
    type Draft: Send + Sync + 'static;
    type Id: Send + Sync + 'static;

    async fn fetch_all(&self) -> Result<Vec<Self::Entity>, RemoteError>;
    async fn create(&self, draft: Self::Draft) -> Result<Self::Entity, RemoteError>;
    async fn update(&self, id: Self::Id, draft: Self::Draft)
        -> Result<Self::Entity, RemoteError>;
    async fn delete(&self, id: Self::Id) -> Result<(), RemoteError>;
}

/// Adapts a gateway's read side into a [`CollectionSource`], so one gateway
/// instance backs both the collection and the mutations of a page.
pub struct GatewaySource<G>(pub Arc<G>);

#[async_trait]
impl<G: EntityGateway> CollectionSource<G::Entity> for GatewaySource<G> {
    async fn fetch_all(&self) -> Result<Vec<G::Entity>, RemoteError> {
        self.0.fetch_all().await
    }
}

/// Gateway for a page whose transport has not been wired yet; every call
/// fails with an unavailable error.
pub struct MissingGateway<E, D, I> {
    _marker: PhantomData<fn() -> (E, D, I)>,
}

impl<E, D, I> MissingGateway<E, D, I> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<E, D, I> Default for MissingGateway<E, D, I> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E, D, I> EntityGateway for MissingGateway<E, D, I>
where
    E: Send + Sync + 'static,
    D: Send + Sync + 'static,
    I: Send + Sync + 'static,
{
    type Entity = E;
    type Draft = D;
    type Id = I;

    async fn fetch_all(&self) -> Result<Vec<E>, RemoteError> {
        Err(RemoteError::unavailable("entity gateway is not wired"))
    }

    async fn create(&self, _draft: D) -> Result<E, RemoteError> {
        Err(RemoteError::unavailable("entity gateway is not wired"))
    }

    async fn update(&self, _id: I, _draft: D) -> Result<E, RemoteError> {
        Err(RemoteError::unavailable("entity gateway is not wired"))
    }

    async fn delete(&self, _id: I) -> Result<(), RemoteError> {
        Err(RemoteError::unavailable("entity gateway is not wired"))
    }
}
