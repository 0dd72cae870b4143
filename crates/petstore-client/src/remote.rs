use std::time::Duration;

use async_trait::async_trait;
use petstore_core::{Observation, Pet, PetId, PetstoreConfig};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Response, StatusCode, Url};
use tracing::{debug, instrument};

use crate::api::{PetApi, Receipt};
use crate::error::{ClientError, ClientResult, Operation};

const APPLICATION_JSON: &str = "application/json";

/// Configuration for the remote pet store client
#[derive(Debug, Clone)]
pub struct RemotePetClientConfig {
    /// Base address of the API, without the `/pet` suffix
    pub base_url: String,
    /// Timeout for each request
    pub timeout: Duration,
}

impl Default for RemotePetClientConfig {
    fn default() -> Self {
        let defaults = PetstoreConfig::default();
        Self {
            base_url: defaults.base_url.clone(),
            timeout: defaults.request_timeout(),
        }
    }
}

impl From<&PetstoreConfig> for RemotePetClientConfig {
    fn from(config: &PetstoreConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout: config.request_timeout(),
        }
    }
}

/// Client for the pet store REST API
#[derive(Debug, Clone)]
pub struct RemotePetClient {
    pets_url: String,
    client: Client,
}

impl RemotePetClient {
    /// Creates a client from the provided configuration
    pub fn new(config: RemotePetClientConfig) -> ClientResult<Self> {
        let base = Url::parse(config.base_url.trim())
            .map_err(|_| ClientError::InvalidBaseUrl(config.base_url.clone()))?;
        if !matches!(base.scheme(), "http" | "https")
            || base.query().is_some()
            || base.fragment().is_some()
        {
            return Err(ClientError::InvalidBaseUrl(config.base_url));
        }

        let mut pets_url = base;
        pets_url
            .path_segments_mut()
            .map_err(|_| ClientError::InvalidBaseUrl(config.base_url.clone()))?
            .pop_if_empty()
            .push("pet");

        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            pets_url: pets_url.to_string(),
            client,
        })
    }

    /// Creates a client for `base_url` with the given timeout
    pub fn with_url_and_timeout(base_url: impl Into<String>, timeout: Duration) -> ClientResult<Self> {
        Self::new(RemotePetClientConfig {
            base_url: base_url.into(),
            timeout,
        })
    }

    /// Creates a client from the suite configuration
    pub fn from_config(config: &PetstoreConfig) -> ClientResult<Self> {
        Self::new(config.into())
    }

    /// Collection endpoint, `{base}/pet`.
    pub fn pets_url(&self) -> &str {
        &self.pets_url
    }

    fn pet_url(&self, id: PetId) -> String {
        format!("{}/{}", self.pets_url, id)
    }

    /// Reads the body and accepts the response only if its status is in `accepted`.
    async fn expect_status(
        operation: Operation,
        response: Response,
        accepted: &[StatusCode],
    ) -> ClientResult<Receipt> {
        let status = response.status();
        let body = response.text().await?;
        debug!(%operation, status = status.as_u16(), %body, "Received response");

        if accepted.contains(&status) {
            Ok(Receipt {
                status: status.as_u16(),
                body,
            })
        } else {
            Err(ClientError::UnexpectedStatus {
                operation,
                status: status.as_u16(),
                body,
            })
        }
    }
}

#[async_trait]
impl PetApi for RemotePetClient {
    #[instrument(skip(self, pet), fields(pet_id = pet.id))]
    async fn create(&self, pet: &Pet) -> ClientResult<Receipt> {
        let response = self
            .client
            .post(&self.pets_url)
            .header(CONTENT_TYPE, APPLICATION_JSON)
            .json(pet)
            .send()
            .await?;

        Self::expect_status(Operation::Create, response, &[StatusCode::OK]).await
    }

    #[instrument(skip(self))]
    async fn fetch_by_id(&self, id: PetId) -> ClientResult<Observation> {
        let response = self
            .client
            .get(self.pet_url(id))
            .header(ACCEPT, APPLICATION_JSON)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(status = status.as_u16(), %body, "Fetched pet");

        let observation = if status == StatusCode::NOT_FOUND {
            Observation::NotFound { body }
        } else if status.is_success() {
            match serde_json::from_str::<Pet>(&body) {
                Ok(pet) => Observation::Found {
                    status: status.as_u16(),
                    pet,
                    body,
                },
                Err(e) => {
                    debug!(error = %e, "Success response did not contain a pet");
                    Observation::Unexpected {
                        status: status.as_u16(),
                        body,
                    }
                }
            }
        } else {
            Observation::Unexpected {
                status: status.as_u16(),
                body,
            }
        };

        Ok(observation)
    }

    #[instrument(skip(self, pet), fields(pet_id = pet.id))]
    async fn replace(&self, pet: &Pet) -> ClientResult<Receipt> {
        let response = self
            .client
            .put(&self.pets_url)
            .header(CONTENT_TYPE, APPLICATION_JSON)
            .json(pet)
            .send()
            .await?;

        Self::expect_status(Operation::Replace, response, &[StatusCode::OK]).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: PetId) -> ClientResult<Receipt> {
        let response = self
            .client
            .delete(self.pet_url(id))
            .header(ACCEPT, APPLICATION_JSON)
            .send()
            .await?;

        Self::expect_status(
            Operation::Delete,
            response,
            &[StatusCode::OK, StatusCode::NO_CONTENT],
        )
        .await
    }
}
