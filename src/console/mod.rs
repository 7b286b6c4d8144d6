//! Console composition root
//!
//! `Console` wires the API client, durable storage, the store and the agent
//! cache together and exposes one async operation per backend call. Every
//! operation follows the same shape: allocate a ticket, dispatch `Pending`,
//! call the backend, dispatch `Fulfilled` or `Rejected`. Failures come back
//! as a `Rejection` value; nothing panics or escapes as an `ApiError`.

mod account;
mod agents;
mod catalog;
mod preferences;
mod selection;

pub use selection::SelectionRefresh;

use crate::api::ApiClient;
use crate::config::Config;
use crate::error::{ApiError, Outcome, Rejection};
use crate::models::{Agent, AgentId};
use crate::state::{Action, AgentAction, AuthAction, EntityCache, Preferences, PreferencesAction};
use crate::state::{Request, Store, Ticket};
use crate::storage::{keys, ClientStorage, StorageError};
use parking_lot::Mutex;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// How `fetch_agent` treats the cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchMode {
    /// Serve a fresh cached agent without a network call
    #[default]
    PreferCache,
    /// Always ask the backend
    Refresh,
}

/// Client-side console: store, storage, API client and agent cache
#[derive(Debug)]
pub struct Console {
    api: ApiClient,
    store: Arc<Store>,
    storage: Arc<ClientStorage>,
    agent_cache: Mutex<EntityCache<AgentId, Agent>>,
}

impl Console {
    /// Open storage from `config`, build the client and restore persisted state
    ///
    /// # Errors
    /// * `StorageError` if the storage file exists but cannot be read
    pub async fn start(config: &Config) -> Result<Self, StorageError> {
        let storage = Arc::new(ClientStorage::open(config.storage_path())?);
        let api = ApiClient::new(config.api.base_url.clone(), storage);
        let console = Self::from_parts(api, Arc::new(Store::default()), config.cache.agent_ttl);
        console.restore().await;
        Ok(console)
    }

    /// Assemble a console from already-built parts
    ///
    /// Storage is taken from the API client so both read the same session.
    pub fn from_parts(api: ApiClient, store: Arc<Store>, agent_ttl: Option<Duration>) -> Self {
        let storage = api.storage().clone();
        Self {
            api,
            store,
            storage,
            agent_cache: Mutex::new(EntityCache::new(agent_ttl)),
        }
    }

    /// Load session, preferences and the last active agent id into the store
    pub async fn restore(&self) {
        match self.storage.session() {
            Ok(Some(session)) => {
                debug!(email = %session.user.email, "Restored session");
                self.store
                    .dispatch(Action::Auth(AuthAction::Restored(session)))
                    .await;
            }
            Ok(None) => {}
            Err(e) => {
                warn!("Discarding unreadable session: {}", e);
                if let Err(e) = self.storage.clear_session() {
                    warn!("Failed to clear session: {}", e);
                }
            }
        }

        let prefs = Preferences::load(&self.storage);
        self.store
            .dispatch(Action::Preferences(PreferencesAction::Restored(prefs)))
            .await;

        match self.storage.get_json::<AgentId>(keys::ACTIVE_AGENT_ID) {
            Ok(Some(id)) => {
                self.store
                    .dispatch(Action::Agent(AgentAction::SetActiveId(id)))
                    .await;
            }
            Ok(None) => {}
            Err(e) => warn!("Ignoring stored active agent id: {}", e),
        }
    }

    /// The store, for reading state and subscribing to actions
    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    /// The API client
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Durable storage
    pub fn storage(&self) -> &Arc<ClientStorage> {
        &self.storage
    }

    /// Run one request through its pending/fulfilled/rejected lifecycle
    async fn run<T, W, F>(&self, operation: &'static str, wrap: W, call: F) -> Outcome<T>
    where
        T: Clone,
        W: Fn(Request<T>) -> Action,
        F: Future<Output = Result<T, ApiError>>,
    {
        let ticket = self.store.next_ticket();
        self.run_ticketed(ticket, operation, wrap, call).await
    }

    /// `run` with a caller-allocated ticket
    async fn run_ticketed<T, W, F>(
        &self,
        ticket: Ticket,
        operation: &'static str,
        wrap: W,
        call: F,
    ) -> Outcome<T>
    where
        T: Clone,
        W: Fn(Request<T>) -> Action,
        F: Future<Output = Result<T, ApiError>>,
    {
        self.store.dispatch(wrap(Request::pending(ticket))).await;

        match call.await {
            Ok(payload) => {
                self.store
                    .dispatch(wrap(Request::fulfilled(ticket, payload.clone())))
                    .await;
                Ok(payload)
            }
            Err(err) => {
                let rejection = Rejection::from(&err);
                warn!(
                    operation,
                    ticket = ticket.seq(),
                    status = ?err.status(),
                    error = %err,
                    "Request rejected"
                );
                self.store
                    .dispatch(wrap(Request::rejected(ticket, rejection.reason())))
                    .await;
                Err(rejection)
            }
        }
    }

    /// Forget everything tied to the signed-in user
    async fn clear_user_state(&self) -> Result<(), StorageError> {
        let fence = self.store.reset().await;
        self.agent_cache.lock().clear(fence);
        let session = self.storage.clear_session();
        let active = self.storage.remove(keys::ACTIVE_AGENT_ID);
        info!("Cleared user state");
        session.and(active)
    }
}
