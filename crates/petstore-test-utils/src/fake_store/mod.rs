//! In-process fake of the pet store API.

mod routes;
mod state;

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use parking_lot::Mutex;
use petstore_core::{Pet, PetId};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::{error, info};

use crate::error::TestError;
use routes::SharedState;
use state::StoreState;

pub use state::StoreStats;

/// Builder for [`FakePetStore`]
#[derive(Debug, Default)]
pub struct FakePetStoreBuilder {
    read_lag: u32,
    seed: Vec<Pet>,
}

impl FakePetStoreBuilder {
    /// Creates a builder for a store with no lag and no pets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of fetches that still see the old state after each write.
    pub fn with_read_lag(mut self, read_lag: u32) -> Self {
        self.read_lag = read_lag;
        self
    }

    /// Pet present from the start.
    pub fn with_pet(mut self, pet: Pet) -> Self {
        self.seed.push(pet);
        self
    }

    /// Binds an ephemeral port on localhost and starts serving.
    pub async fn start(self) -> Result<FakePetStore, TestError> {
        let mut store_state = StoreState::new(self.read_lag);
        for pet in self.seed {
            store_state.seed(pet);
        }
        let state: SharedState = Arc::new(Mutex::new(store_state));

        let listener = TcpListener::bind(SocketAddr::from((Ipv4Addr::LOCALHOST, 0))).await?;
        let addr = listener.local_addr()?;
        let app = routes::router(state.clone());

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        tokio::spawn(async move {
            let shutdown = async {
                shutdown_rx.await.ok();
            };
            if let Err(e) = axum::serve(listener, app)
                .with_graceful_shutdown(shutdown)
                .await
            {
                error!("Fake pet store stopped with error: {}", e);
            }
        });

        info!(%addr, read_lag = self.read_lag, "Fake pet store listening");

        Ok(FakePetStore {
            base_url: format!("http://{}", addr),
            state,
            shutdown: Some(shutdown_tx),
        })
    }
}

/// Running fake pet store. Stops serving when dropped.
#[derive(Debug)]
pub struct FakePetStore {
    base_url: String,
    state: SharedState,
    shutdown: Option<oneshot::Sender<()>>,
}

impl FakePetStore {
    /// Starts building a store.
    pub fn builder() -> FakePetStoreBuilder {
        FakePetStoreBuilder::new()
    }

    /// Starts a store with default settings.
    pub async fn start() -> Result<Self, TestError> {
        Self::builder().start().await
    }

    /// Base address to hand to the client, e.g. `http://127.0.0.1:40123`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Changes the lag applied to subsequent writes.
    pub fn set_read_lag(&self, read_lag: u32) {
        self.state.lock().set_read_lag(read_lag);
    }

    /// Makes the next create, replace or delete fail with `status`.
    pub fn reject_next_write(&self, status: u16) {
        self.state.lock().reject_next_write(status);
    }

    /// Request counters so far.
    pub fn stats(&self) -> StoreStats {
        self.state.lock().stats()
    }

    /// Pet as a reader would currently see it, without counting as a read.
    pub fn visible_pet(&self, id: PetId) -> Option<Pet> {
        self.state.lock().visible(id).cloned()
    }

    /// Stops serving. Idempotent.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for FakePetStore {
    fn drop(&mut self) {
        self.shutdown();
    }
}
