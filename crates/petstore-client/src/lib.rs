//! Remote entity client for the pet store API.
//!
//! Four operations map onto four HTTP calls under `{base}/pet`. Mutating
//! calls fail immediately on an unexpected status; nothing here retries.
//! Eventual consistency is handled one level up by
//! [`petstore_core::VerificationLoop`].

pub mod api;
pub mod error;
pub mod remote;

pub use api::{PetApi, Receipt};
pub use error::{ClientError, ClientResult, Operation};
pub use remote::{RemotePetClient, RemotePetClientConfig};
