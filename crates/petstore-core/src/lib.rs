//!
//! Petstore Core - domain model and verification loop for the pet store suite
//!
//! This crate defines the pet entity as it travels over the wire, the
//! observations a fetch can produce, the suite configuration, and the
//! verification loop that polls the remote store until an expected state
//! shows up or the retry budget runs out.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Domain layer - pet entity and fetch observations
pub mod domain;

/// Verification loop, expectations and retry policy
pub mod verification;

/// Suite configuration
pub mod config;

/// Error types
pub mod error;

// Re-export key types
pub use config::PetstoreConfig;
pub use domain::observation::Observation;
pub use domain::pet::{Category, Pet, PetId, Tag, DEFAULT_PET_ID};
pub use error::{CoreError, CoreResult};
pub use verification::{
    Backoff, Expectation, LastObservation, RetryPolicy, VerificationError, VerificationLoop,
    Verified,
};
