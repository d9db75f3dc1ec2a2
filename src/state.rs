use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::client::chat::ChatClient;
use crate::client::plan::PlanClient;
use crate::config::Config;
use crate::store::{KeyValueStore, MemoryStore};

#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    store: Arc<dyn KeyValueStore>,
    plan_client: PlanClient,
    chat_client: ChatClient,
    plan_in_flight: Arc<AtomicBool>,
    tracking: Arc<Mutex<()>>,
}

/// Held while a plan request runs; releases the in-flight flag on drop.
pub struct PlanRequestGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for PlanRequestGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self::with_store(config, Arc::new(MemoryStore::new()))
    }

    pub fn with_store(config: Config, store: Arc<dyn KeyValueStore>) -> Self {
        let http = reqwest::Client::new();
        Self {
            plan_client: PlanClient::new(http.clone(), &config),
            chat_client: ChatClient::new(http, &config),
            config: Arc::new(config),
            store,
            plan_in_flight: Arc::new(AtomicBool::new(false)),
            tracking: Arc::new(Mutex::new(())),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    pub fn plan_client(&self) -> &PlanClient {
        &self.plan_client
    }

    pub fn chat_client(&self) -> &ChatClient {
        &self.chat_client
    }

    /// `None` while another plan request is running.
    pub fn try_begin_plan_request(&self) -> Option<PlanRequestGuard> {
        self.plan_in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| PlanRequestGuard {
                flag: self.plan_in_flight.clone(),
            })
    }

    /// Serializes read-modify-write cycles on the tracking keys.
    pub async fn lock_tracking(&self) -> MutexGuard<'_, ()> {
        self.tracking.lock().await
    }
}
