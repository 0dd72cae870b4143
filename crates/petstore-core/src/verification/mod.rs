//! Verification loop.
//!
//! The remote store is eventually consistent: a write acknowledged with 200
//! may take a while to show up on reads. [`VerificationLoop`] reconciles that
//! by fetching, checking an [`Expectation`], and waiting between attempts
//! until the expectation holds or the [`RetryPolicy`] budget is spent.
//!
//! Every non-matching outcome (wrong fields, "not found", unexpected status,
//! transport error) counts as "not yet". Only budget exhaustion is a failure.

mod expectation;
mod policy;

use std::fmt;
use std::future::Future;

use thiserror::Error;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::domain::observation::Observation;

pub use expectation::Expectation;
pub use policy::{Backoff, RetryPolicy};

/// The last thing seen before the budget ran out
#[derive(Debug, Clone, PartialEq)]
pub enum LastObservation {
    /// No attempt was made
    Nothing,
    /// The store answered
    Observed(Observation),
    /// The request itself failed
    Failed(String),
}

impl LastObservation {
    /// HTTP status of the last answer, if the store answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            LastObservation::Observed(observation) => Some(observation.status_code()),
            _ => None,
        }
    }
}

impl fmt::Display for LastObservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LastObservation::Nothing => write!(f, "nothing observed"),
            LastObservation::Observed(observation) => write!(f, "{}", observation),
            LastObservation::Failed(reason) => write!(f, "request failed: {}", reason),
        }
    }
}

/// Verification failure
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VerificationError {
    /// The expectation never held within the retry budget
    #[error("expected {expectation}, still not observed after {attempts} attempts; last observation: {last}")]
    Exhausted {
        /// Number of fetches performed
        attempts: u32,
        /// Human-readable expectation
        expectation: String,
        /// Diagnostic for the final attempt
        last: LastObservation,
    },
}

impl VerificationError {
    /// HTTP status seen on the final attempt.
    pub fn last_status(&self) -> Option<u16> {
        match self {
            VerificationError::Exhausted { last, .. } => last.status_code(),
        }
    }
}

/// Successful verification
#[derive(Debug, Clone, PartialEq)]
pub struct Verified {
    /// 1-based attempt on which the expectation held
    pub attempts: u32,
    /// The matching observation
    pub observation: Observation,
}

/// Polls the remote store until an expectation holds
#[derive(Debug, Clone, Copy, Default)]
pub struct VerificationLoop {
    policy: RetryPolicy,
}

impl VerificationLoop {
    /// Creates a loop with the given policy.
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    /// Policy in use.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Runs the loop.
    ///
    /// `fetch` is invoked once per attempt. Returns on the first attempt whose
    /// observation satisfies `expectation`; no wait follows the final attempt.
    pub async fn run<F, Fut, E>(
        &self,
        expectation: &Expectation,
        mut fetch: F,
    ) -> Result<Verified, VerificationError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<Observation, E>>,
        E: fmt::Display,
    {
        let max_attempts = self.policy.max_attempts();
        let mut last = LastObservation::Nothing;

        for attempt in 1..=max_attempts {
            match fetch().await {
                Ok(observation) => {
                    info!(
                        attempt,
                        status = observation.status_code(),
                        body = %observation.body(),
                        "Polled remote store"
                    );
                    if expectation.is_met(&observation) {
                        info!(attempt, %expectation, "Expected state observed");
                        return Ok(Verified {
                            attempts: attempt,
                            observation,
                        });
                    }
                    last = LastObservation::Observed(observation);
                }
                Err(err) => {
                    warn!(attempt, error = %err, "Fetch failed, treating as not yet");
                    last = LastObservation::Failed(err.to_string());
                }
            }

            if attempt < max_attempts {
                sleep(self.policy.delay_after(attempt)).await;
            }
        }

        warn!(attempts = max_attempts, %expectation, %last, "Retry budget exhausted");
        Err(VerificationError::Exhausted {
            attempts: max_attempts,
            expectation: expectation.to_string(),
            last,
        })
    }
}
