use cucumber::World;
use petstore_bdd_tests::{RunTarget, SuiteSettings};
use petstore_client::{ClientError, ClientResult, Receipt, RemotePetClient};
use petstore_core::{PetId, PetstoreConfig, VerificationLoop, Verified};
use petstore_test_utils::FakePetStore;
use tracing::debug;

/// World struct that holds state across step definitions
#[derive(Debug, World)]
#[world(init = Self::new)]
pub struct PetWorld {
    pub settings: Option<SuiteSettings>,
    pub client: Option<RemotePetClient>,
    /// Only set when running against the fake target
    pub store: Option<FakePetStore>,
    pub pet_id: PetId,
    pub last_write: Option<ClientResult<Receipt>>,
    pub last_verification: Option<Verified>,
}

impl PetWorld {
    fn new() -> Self {
        Self {
            settings: None,
            client: None,
            store: None,
            pet_id: PetstoreConfig::default().pet_id,
            last_write: None,
            last_verification: None,
        }
    }

    /// Points the world at its target, starting a fresh fake store if needed.
    pub async fn connect(&mut self, settings: SuiteSettings) -> anyhow::Result<()> {
        let base_url = match settings.target {
            RunTarget::Fake => {
                let store = FakePetStore::start().await?;
                let url = store.base_url().to_string();
                self.store = Some(store);
                url
            }
            RunTarget::Remote => settings.config.base_url.clone(),
        };
        debug!(%base_url, target = ?settings.target, "Scenario connected");

        self.client = Some(RemotePetClient::with_url_and_timeout(
            base_url,
            settings.config.request_timeout(),
        )?);
        self.pet_id = settings.pet_id();
        self.settings = Some(settings);
        Ok(())
    }

    pub fn client(&self) -> &RemotePetClient {
        self.client
            .as_ref()
            .expect("Pet store client not initialized")
    }

    pub fn store(&self) -> &FakePetStore {
        self.store
            .as_ref()
            .expect("This step needs the fake pet store (run with --target fake)")
    }

    pub fn settings(&self) -> &SuiteSettings {
        self.settings
            .as_ref()
            .expect("Suite settings not initialized")
    }

    pub fn verification_loop(&self) -> VerificationLoop {
        VerificationLoop::new(self.settings().policy)
    }

    /// Waits for the backend to settle after a mutating call.
    pub async fn settle(&self) {
        let delay = self.settings().settle_delay;
        if !delay.is_zero() {
            debug!(?delay, "Waiting for the store to settle");
            tokio::time::sleep(delay).await;
        }
    }

    pub fn last_write_error(&self) -> &ClientError {
        match &self.last_write {
            Some(Err(err)) => err,
            Some(Ok(receipt)) => panic!("Expected the write to fail, got {:?}", receipt),
            None => panic!("No write was attempted"),
        }
    }
}
