//! Testing utilities for the pet store suite.
//!
//! The centrepiece is [`FakePetStore`], an in-process HTTP server speaking
//! the same four endpoints as the public demo API. It can hold writes back
//! for a number of reads to reproduce eventual consistency, and it can be
//! told to reject the next write.

pub mod error;
pub mod fake_store;

pub use error::TestError;
pub use fake_store::{FakePetStore, FakePetStoreBuilder, StoreStats};
