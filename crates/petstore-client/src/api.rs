use async_trait::async_trait;
use petstore_core::{Observation, Pet, PetId};

use crate::error::ClientResult;

/// Acknowledgement of a successful mutating call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    /// Status code returned by the store
    pub status: u16,
    /// Raw response body
    pub body: String,
}

/// The four operations the suite performs against the store
#[async_trait]
pub trait PetApi: Send + Sync {
    /// Send the full pet. Succeeds only on `200 OK`.
    async fn create(&self, pet: &Pet) -> ClientResult<Receipt>;

    /// Fetch a pet. Any HTTP answer is an [`Observation`]; only transport
    /// failures are errors.
    async fn fetch_by_id(&self, id: PetId) -> ClientResult<Observation>;

    /// Fully replace the pet with the same identifier. Succeeds only on `200 OK`.
    async fn replace(&self, pet: &Pet) -> ClientResult<Receipt>;

    /// Remove a pet. Succeeds on `200 OK` or `204 No Content`.
    async fn delete(&self, id: PetId) -> ClientResult<Receipt>;
}
