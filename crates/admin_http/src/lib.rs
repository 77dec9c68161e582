//! reqwest-backed [`EntityGateway`] over the backend's REST conventions.
//!
//! One gateway instance serves one resource: `GET`/`POST` on
//! `/{resource}` and `PUT`/`DELETE` on `/{resource}/{id}`, bearer-
//! authenticated from the [`SessionContext`]. Failures are normalized into
//! [`RemoteError`]: the backend's structured error body when present,
//! otherwise a code derived from the HTTP status, and `Unavailable` for
//! transport-level failures.

use std::{fmt::Display, marker::PhantomData, sync::Arc};

use admin_core::{EntityGateway, SessionContext};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use shared::error::{ApiError, ErrorCode, RemoteError};
use tracing::debug;

pub struct HttpEntityGateway<E, D, I> {
    http: Client,
    session: Arc<SessionContext>,
    resource: String,
    _marker: PhantomData<fn() -> (E, D, I)>,
}

impl<E, D, I> HttpEntityGateway<E, D, I> {
    pub fn new(session: Arc<SessionContext>, resource: impl Into<String>) -> Self {
        Self::with_client(Client::new(), session, resource)
    }

    /// Gateways of one console share a client; connection pooling is per
    /// client.
    pub fn with_client(
        http: Client,
        session: Arc<SessionContext>,
        resource: impl Into<String>,
    ) -> Self {
        Self {
            http,
            session,
            resource: resource.into(),
            _marker: PhantomData,
        }
    }

    fn collection_url(&self) -> String {
        self.session.endpoint(&self.resource)
    }

    fn item_url(&self, id: &impl Display) -> String {
        format!("{}/{id}", self.collection_url())
    }
}

fn transport_error(err: reqwest::Error) -> RemoteError {
    RemoteError::unavailable(err.to_string())
}

fn code_for_status(status: StatusCode) -> ErrorCode {
    match status {
        StatusCode::UNAUTHORIZED => ErrorCode::Unauthorized,
        StatusCode::FORBIDDEN => ErrorCode::Forbidden,
        StatusCode::NOT_FOUND => ErrorCode::NotFound,
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ErrorCode::Validation,
        StatusCode::TOO_MANY_REQUESTS => ErrorCode::RateLimited,
        StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
            ErrorCode::Unavailable
        }
        _ => ErrorCode::Internal,
    }
}

async fn check_status(response: Response) -> Result<Response, RemoteError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    // Prefer the backend's structured error body when it sent one.
    match response.json::<ApiError>().await {
        Ok(body) => Err(RemoteError::from(body)),
        Err(_) => Err(RemoteError::new(
            code_for_status(status),
            format!("http status {status}"),
        )),
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, RemoteError> {
    response.json::<T>().await.map_err(|err| {
        RemoteError::new(
            ErrorCode::Internal,
            format!("invalid response body: {err}"),
        )
    })
}

#[async_trait]
impl<E, D, I> EntityGateway for HttpEntityGateway<E, D, I>
where
    E: DeserializeOwned + Send + Sync + 'static,
    D: Serialize + Send + Sync + 'static,
    I: Display + Send + Sync + 'static,
{
    type Entity = E;
    type Draft = D;
    type Id = I;

    async fn fetch_all(&self) -> Result<Vec<E>, RemoteError> {
        debug!(resource = %self.resource, "fetching collection");
        let response = self
            .http
            .get(self.collection_url())
            .bearer_auth(self.session.bearer_token())
            .send()
            .await
            .map_err(transport_error)?;
        decode(check_status(response).await?).await
    }

    async fn create(&self, draft: D) -> Result<E, RemoteError> {
        debug!(resource = %self.resource, "creating entity");
        let response = self
            .http
            .post(self.collection_url())
            .bearer_auth(self.session.bearer_token())
            .json(&draft)
            .send()
            .await
            .map_err(transport_error)?;
        decode(check_status(response).await?).await
    }

    async fn update(&self, id: I, draft: D) -> Result<E, RemoteError> {
        debug!(resource = %self.resource, id = %id, "updating entity");
        let response = self
            .http
            .put(self.item_url(&id))
            .bearer_auth(self.session.bearer_token())
            .json(&draft)
            .send()
            .await
            .map_err(transport_error)?;
        decode(check_status(response).await?).await
    }

    async fn delete(&self, id: I) -> Result<(), RemoteError> {
        debug!(resource = %self.resource, id = %id, "deleting entity");
        let response = self
            .http
            .delete(self.item_url(&id))
            .bearer_auth(self.session.bearer_token())
            .send()
            .await
            .map_err(transport_error)?;
        check_status(response).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/http_tests.rs"]
mod tests;
