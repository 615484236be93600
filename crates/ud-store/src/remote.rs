//! REST backend
//!
//! `GET /users`, `GET /users/{id}`, `POST /users`, `PUT /users/{id}`,
//! `DELETE /users/{id}` relative to the configured base URL. The endpoint is
//! the system of record; nothing is cached locally.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use tracing::{debug, warn};
use ud_core::error::ErrorBody;
use ud_core::{UdError, UdResult};
use ud_models::{User, UserFormData};
use url::Url;

use crate::store::UserStore;

#[derive(Debug, Clone)]
pub struct RemoteUserStore {
    client: Client,
    base: Url,
}

impl RemoteUserStore {
    pub fn new(base_url: &str) -> UdResult<Self> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> UdResult<Self> {
        let base = Url::parse(base_url)
            .map_err(|e| UdError::Config(format!("invalid API_URL {}: {}", base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(UdError::Config(format!(
                "API_URL {} cannot carry a path",
                base_url
            )));
        }
        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// `{base}/users` or `{base}/users/{id}`, with the id percent-encoded
    fn users_url(&self, id: Option<&str>) -> Url {
        let mut url = self.base.clone();
        // cannot_be_a_base was rejected in the constructor
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("users");
            if let Some(id) = id {
                segments.push(id);
            }
        }
        url
    }

    /// Turn a non-success response into the matching error
    async fn error_from(response: Response) -> UdError {
        let status = response.status();
        let url = response.url().clone();
        let body = response.json::<ErrorBody>().await.ok();

        match (status, body) {
            (StatusCode::UNPROCESSABLE_ENTITY, Some(body)) => {
                UdError::Validation(body.validation_errors())
            }
            (_, Some(body)) => UdError::Transport(format!("{} returned {}: {}", url, status, body.message)),
            (_, None) => UdError::Transport(format!("{} returned {}", url, status)),
        }
    }
}

fn transport(err: reqwest::Error) -> UdError {
    warn!(error = %err, "User endpoint request failed");
    UdError::transport(err)
}

#[async_trait]
impl UserStore for RemoteUserStore {
    async fn get_all(&self) -> UdResult<Vec<User>> {
        let url = self.users_url(None);
        debug!(%url, "GET users");

        let response = self.client.get(url).send().await.map_err(transport)?;
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        response.json().await.map_err(transport)
    }

    async fn get_by_id(&self, id: &str) -> UdResult<Option<User>> {
        let url = self.users_url(Some(id));
        debug!(%url, "GET user");

        let response = self.client.get(url).send().await.map_err(transport)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        response.json().await.map(Some).map_err(transport)
    }

    async fn create(&self, data: UserFormData) -> UdResult<User> {
        let url = self.users_url(None);
        debug!(%url, "POST user");

        let response = self
            .client
            .post(url)
            .json(&data)
            .send()
            .await
            .map_err(transport)?;
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        response.json().await.map_err(transport)
    }

    async fn update(&self, id: &str, data: UserFormData) -> UdResult<User> {
        let url = self.users_url(Some(id));
        debug!(%url, "PUT user");

        let response = self
            .client
            .put(url)
            .json(&data)
            .send()
            .await
            .map_err(transport)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(UdError::not_found("User", id));
        }
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        response.json().await.map_err(transport)
    }

    async fn delete(&self, id: &str) -> UdResult<()> {
        let url = self.users_url(Some(id));
        debug!(%url, "DELETE user");

        let response = self.client.delete(url).send().await.map_err(transport)?;
        if response.status() == StatusCode::NOT_FOUND || response.status().is_success() {
            return Ok(());
        }
        Err(Self::error_from(response).await)
    }
}
