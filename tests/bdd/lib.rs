//! # Pet store BDD suite
//!
//! Runs the Gherkin scenarios under `features/` against either an
//! in-process fake pet store (the default) or the configured remote API.
//!
//! ```bash
//! # Hermetic run against the fake store
//! cargo test -p petstore-bdd-tests --test bdd
//!
//! # Against the public demo API (scenarios tagged @fake-only are skipped)
//! cargo test -p petstore-bdd-tests --test bdd -- --target remote
//!
//! # A single feature
//! cargo test -p petstore-bdd-tests --test bdd -- --name "Pet lifecycle"
//! ```

use std::time::Duration;

use petstore_core::{CoreResult, PetId, PetstoreConfig, RetryPolicy};

/// Tag marking scenarios that need control over the store.
pub const FAKE_ONLY_TAG: &str = "fake-only";

/// Poll interval used against the fake store.
pub const FAKE_POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Last status code for failure messages, e.g. `200` or `no response`.
pub fn describe_status(status: Option<u16>) -> String {
    match status {
        Some(code) => code.to_string(),
        None => "no response".to_string(),
    }
}

/// Where the scenarios send their requests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum RunTarget {
    /// Fresh in-process fake store per scenario
    #[default]
    Fake,
    /// `base_url` from the configuration
    Remote,
}

impl RunTarget {
    /// Whether a scenario with `tags` can run against this target.
    pub fn accepts<'a>(&self, mut tags: impl Iterator<Item = &'a String>) -> bool {
        match self {
            RunTarget::Fake => true,
            RunTarget::Remote => !tags.any(|tag| tag == FAKE_ONLY_TAG),
        }
    }
}

/// Everything a scenario needs to talk to its target
#[derive(Debug, Clone)]
pub struct SuiteSettings {
    pub target: RunTarget,
    pub config: PetstoreConfig,
    pub policy: RetryPolicy,
    pub settle_delay: Duration,
}

impl SuiteSettings {
    /// Settings for `target`.
    ///
    /// Against the fake store the attempt budget is always the default one
    /// and the interval is [`FAKE_POLL_INTERVAL`] with no settle delay.
    pub fn for_target(target: RunTarget, config: PetstoreConfig) -> CoreResult<Self> {
        let (policy, settle_delay) = match target {
            RunTarget::Fake => (
                RetryPolicy::fixed(RetryPolicy::DEFAULT_MAX_ATTEMPTS, FAKE_POLL_INTERVAL)?,
                Duration::ZERO,
            ),
            RunTarget::Remote => (config.retry_policy()?, config.settle_delay()),
        };
        Ok(Self {
            target,
            config,
            policy,
            settle_delay,
        })
    }

    pub fn pet_id(&self) -> PetId {
        self.config.pet_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fake_target_uses_fast_fixed_policy() {
        let settings = SuiteSettings::for_target(RunTarget::Fake, PetstoreConfig::default()).unwrap();

        assert_eq!(settings.policy.max_attempts(), 5);
        assert_eq!(settings.policy.interval(), FAKE_POLL_INTERVAL);
        assert_eq!(settings.settle_delay, Duration::ZERO);
    }

    #[test]
    fn remote_target_follows_configuration() {
        let settings =
            SuiteSettings::for_target(RunTarget::Remote, PetstoreConfig::default()).unwrap();

        assert_eq!(settings.policy, RetryPolicy::default());
        assert_eq!(settings.settle_delay, Duration::from_secs(10));
        assert_eq!(settings.pet_id(), 1_234_567_890);
    }

    #[test]
    fn status_is_printed_bare() {
        assert_eq!(describe_status(Some(200)), "200");
        assert_eq!(describe_status(None), "no response");
    }

    #[test]
    fn remote_target_skips_fake_only_scenarios() {
        let tags = vec!["fake-only".to_string()];

        assert!(RunTarget::Fake.accepts(tags.iter()));
        assert!(!RunTarget::Remote.accepts(tags.iter()));
        assert!(RunTarget::Remote.accepts(Vec::<String>::new().iter()));
    }
}
