//! Active agent selection
//!
//! Changing the active agent is the one place where slices are coupled:
//! the agent detail, the user profile and the phone numbers are refetched
//! together. `set_active_agent_id` is the only way the id changes, so the
//! fan-out lives here instead of in a generic listener.

use super::{Console, FetchMode};
use crate::error::Outcome;
use crate::models::{Agent, AgentId, PhoneNumber, UserProfile};
use crate::state::{Action, AgentAction};
use crate::storage::keys;
use tracing::{info, warn};

/// Outcome of each refetch triggered by a selection
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionRefresh {
    /// Agent detail fetch
    pub agent: Outcome<Agent>,
    /// Profile fetch
    pub profile: Outcome<UserProfile>,
    /// Phone number fetch
    pub phone_numbers: Outcome<Vec<PhoneNumber>>,
}

impl SelectionRefresh {
    /// True when all three refetches succeeded
    pub fn all_succeeded(&self) -> bool {
        self.agent.is_ok() && self.profile.is_ok() && self.phone_numbers.is_ok()
    }
}

impl Console {
    /// Make `id` the active agent and refetch what depends on it
    ///
    /// The three fetches run concurrently and settle independently; one
    /// failing does not affect the others. Selecting the current agent again
    /// refetches everything again, and the agent itself always bypasses the
    /// cache.
    pub async fn set_active_agent_id(&self, id: AgentId) -> SelectionRefresh {
        self.store
            .dispatch(Action::Agent(AgentAction::SetActiveId(id)))
            .await;
        if let Err(e) = self.storage.set_json(keys::ACTIVE_AGENT_ID, &id) {
            warn!("Failed to persist active agent id: {}", e);
        }

        info!(agent_id = id, "Active agent changed, refreshing");
        let (agent, profile, phone_numbers) = tokio::join!(
            self.fetch_agent(id, FetchMode::Refresh),
            self.fetch_profile(),
            self.fetch_phone_numbers(),
        );

        SelectionRefresh {
            agent,
            profile,
            phone_numbers,
        }
    }
}
