use std::time::Duration;

use crate::error::{CoreError, CoreResult};

/// How the wait between attempts evolves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    /// Same wait after every attempt
    Fixed,
    /// Wait grows by `multiplier` after every attempt, capped at `max_interval`
    Exponential {
        /// Growth factor applied per attempt
        multiplier: u32,
        /// Upper bound for a single wait
        max_interval: Duration,
    },
}

/// Retry budget and pacing for a verification loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    interval: Duration,
    backoff: Backoff,
}

impl RetryPolicy {
    /// Attempts made before giving up
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

    /// Wait between attempts
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(10);

    /// Fixed-interval policy.
    pub fn fixed(max_attempts: u32, interval: Duration) -> CoreResult<Self> {
        Self::validate_attempts(max_attempts)?;
        Ok(Self {
            max_attempts,
            interval,
            backoff: Backoff::Fixed,
        })
    }

    /// Exponential policy starting at `interval`.
    ///
    /// A multiplier of 1 degrades to a fixed interval.
    pub fn exponential(
        max_attempts: u32,
        interval: Duration,
        multiplier: u32,
        max_interval: Duration,
    ) -> CoreResult<Self> {
        Self::validate_attempts(max_attempts)?;
        if multiplier == 0 {
            return Err(CoreError::ValidationError(
                "backoff multiplier must be at least 1".to_string(),
            ));
        }
        if max_interval < interval {
            return Err(CoreError::ValidationError(format!(
                "max interval {:?} is shorter than the base interval {:?}",
                max_interval, interval
            )));
        }

        let backoff = if multiplier == 1 {
            Backoff::Fixed
        } else {
            Backoff::Exponential {
                multiplier,
                max_interval,
            }
        };

        Ok(Self {
            max_attempts,
            interval,
            backoff,
        })
    }

    fn validate_attempts(max_attempts: u32) -> CoreResult<()> {
        if max_attempts == 0 {
            return Err(CoreError::ValidationError(
                "retry budget must allow at least one attempt".to_string(),
            ));
        }
        Ok(())
    }

    /// Maximum number of fetches.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Base wait between attempts.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Backoff strategy.
    pub fn backoff(&self) -> Backoff {
        self.backoff
    }

    /// Wait that follows the given (1-based) attempt.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        match self.backoff {
            Backoff::Fixed => self.interval,
            Backoff::Exponential {
                multiplier,
                max_interval,
            } => {
                let exponent = attempt.saturating_sub(1);
                let factor = multiplier.checked_pow(exponent).unwrap_or(u32::MAX);
                self.interval.saturating_mul(factor).min(max_interval)
            }
        }
    }

    /// Total time spent waiting when every attempt misses.
    ///
    /// There is no wait after the final attempt.
    pub fn worst_case_wait(&self) -> Duration {
        (1..self.max_attempts)
            .map(|attempt| self.delay_after(attempt))
            .fold(Duration::ZERO, Duration::saturating_add)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            interval: Self::DEFAULT_INTERVAL,
            backoff: Backoff::Fixed,
        }
    }
}
