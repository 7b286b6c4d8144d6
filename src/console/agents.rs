//! Agent operations

use super::{Console, FetchMode};
use crate::error::{ApiError, Outcome};
use crate::models::{Agent, AgentId, AgentUpdate, NewAgent};
use crate::state::{Action, AgentAction, Request};
use crate::storage::keys;
use tracing::{debug, warn};

impl Console {
    /// Fetch every agent
    pub async fn fetch_agents(&self) -> Outcome<Vec<Agent>> {
        let ticket = self.store.next_ticket();
        let agents = self
            .run_ticketed(
                ticket,
                "fetch_agents",
                |r| Action::Agent(AgentAction::FetchList(r)),
                self.api.list_agents(),
            )
            .await?;
        let mut cache = self.agent_cache.lock();
        for agent in &agents {
            cache.insert(agent.id, agent.clone(), ticket);
        }
        Ok(agents)
    }

    /// Load one agent into the detail record
    ///
    /// With `FetchMode::PreferCache` a fresh cached agent is served without
    /// a network call; it still goes through pending/fulfilled so the detail
    /// record switches to it. A response that loses a race against a newer
    /// request for the same agent does not reach the cache.
    pub async fn fetch_agent(&self, id: AgentId, mode: FetchMode) -> Outcome<Agent> {
        if mode == FetchMode::PreferCache {
            let cached = self.agent_cache.lock().get_fresh(&id);
            if let Some(agent) = cached {
                debug!(agent_id = id, "Serving agent from cache");
                let ticket = self.store.next_ticket();
                self.store
                    .dispatch(Action::Agent(AgentAction::Fetch(Request::pending(ticket))))
                    .await;
                self.store
                    .dispatch(Action::Agent(AgentAction::Fetch(Request::fulfilled(
                        ticket,
                        agent.clone(),
                    ))))
                    .await;
                return Ok(agent);
            }
        }

        let ticket = self.store.next_ticket();
        let agent = self
            .run_ticketed(
                ticket,
                "fetch_agent",
                |r| Action::Agent(AgentAction::Fetch(r)),
                self.api.get_agent(id),
            )
            .await?;
        self.agent_cache.lock().insert(agent.id, agent.clone(), ticket);
        Ok(agent)
    }

    /// Create an agent from the wizard form
    pub async fn create_agent(&self, agent: &NewAgent) -> Outcome<Agent> {
        let ticket = self.store.next_ticket();
        let created = self
            .run_ticketed(
                ticket,
                "create_agent",
                |r| Action::Agent(AgentAction::Create(r)),
                self.api.create_agent(agent),
            )
            .await?;
        self.agent_cache
            .lock()
            .insert(created.id, created.clone(), ticket);
        Ok(created)
    }

    /// Send the changed fields of one agent
    pub async fn update_agent(&self, id: AgentId, update: &AgentUpdate) -> Outcome<Agent> {
        let ticket = self.store.next_ticket();
        let updated = self
            .run_ticketed(
                ticket,
                "update_agent",
                |r| Action::Agent(AgentAction::Update(r)),
                self.api.update_agent(id, update),
            )
            .await?;
        self.agent_cache
            .lock()
            .insert(updated.id, updated.clone(), ticket);
        Ok(updated)
    }

    /// Delete an agent; clears the selection if it was the active one
    pub async fn delete_agent(&self, id: AgentId) -> Outcome<()> {
        let was_active = self.store.read(|s| s.agents.active_id == Some(id)).await;
        let ticket = self.store.next_ticket();
        self.run_ticketed(
            ticket,
            "delete_agent",
            |r| Action::Agent(AgentAction::Delete(r)),
            async {
                self.api.delete_agent(id).await?;
                Ok::<_, ApiError>(id)
            },
        )
        .await?;

        self.agent_cache.lock().invalidate(id, ticket);
        if was_active {
            if let Err(e) = self.storage.remove(keys::ACTIVE_AGENT_ID) {
                warn!("Failed to forget active agent: {}", e);
            }
        }
        Ok(())
    }
}
