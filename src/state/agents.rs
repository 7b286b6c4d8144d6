// Agent slice
// Agent list, the detail record of one agent, and the active agent id

use super::actions::AgentAction;
use super::slice::{Phase, Slice, Ticket};
use crate::models::{Agent, AgentId};
use serde::Serialize;

/// Agent slice state
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AgentState {
    /// Every agent of the account
    pub list: Slice<Vec<Agent>>,
    /// Full configuration of the agent being edited
    pub detail: Slice<Agent>,
    /// Agent currently selected in the console, if any
    pub active_id: Option<AgentId>,
}

impl AgentState {
    /// Apply an agent action
    pub fn reduce(&mut self, action: AgentAction) {
        match action {
            AgentAction::SetActiveId(id) => self.active_id = Some(id),
            AgentAction::FetchList(request) => self.list.replace(request),
            AgentAction::Fetch(request) => self.detail.replace(request),
            AgentAction::Create(request) => self.list.merge(request, |list, agent| {
                list.get_or_insert_with(Vec::new).push(agent);
            }),
            AgentAction::Update(request) => {
                let accepted = self.list.accepts(request.ticket);
                if let (true, Phase::Fulfilled(agent)) = (accepted, &request.phase) {
                    if let Some(slot) = self
                        .list
                        .data
                        .as_mut()
                        .and_then(|list| list.iter_mut().find(|a| a.id == agent.id))
                    {
                        *slot = agent.clone();
                    }
                }
                self.detail.replace(request);
            }
            AgentAction::Delete(request) => {
                let accepted = self.list.accepts(request.ticket);
                if let (true, Phase::Fulfilled(id)) = (accepted, &request.phase) {
                    let id = *id;
                    if self.detail.data.as_ref().is_some_and(|a| a.id == id) {
                        self.detail.data = None;
                    }
                    if self.active_id == Some(id) {
                        self.active_id = None;
                    }
                }
                self.list.merge(request, |list, id| {
                    if let Some(list) = list {
                        list.retain(|agent| agent.id != id);
                    }
                });
            }
        }
    }

    /// Detail record of the active agent, when it is loaded
    pub fn active_agent(&self) -> Option<&Agent> {
        let id = self.active_id?;
        self.detail.data.as_ref().filter(|agent| agent.id == id)
    }

    /// Agent with `id` from either the detail record or the list
    pub fn find(&self, id: AgentId) -> Option<&Agent> {
        self.detail
            .data
            .as_ref()
            .filter(|agent| agent.id == id)
            .or_else(|| {
                self.list
                    .data
                    .as_ref()
                    .and_then(|list| list.iter().find(|agent| agent.id == id))
            })
    }

    /// Agents sorted by name (unnamed last)
    pub fn sorted_list(&self) -> Vec<&Agent> {
        let mut agents: Vec<&Agent> = self.list.data.iter().flatten().collect();
        agents.sort_by(|a, b| match (&a.name, &b.name) {
            (Some(a), Some(b)) => a.cmp(b),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.id.cmp(&b.id),
        });
        agents
    }

    pub(crate) fn reset(&mut self, fence: Ticket) {
        self.list.reset(fence);
        self.detail.reset(fence);
        self.active_id = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::slice::{Request, RequestStatus};

    fn agent(id: AgentId, name: &str) -> Agent {
        Agent {
            id,
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    fn t(seq: u64) -> Ticket {
        Ticket::new(seq)
    }

    #[test]
    fn test_fetch_sets_detail() {
        let mut state = AgentState::default();
        state.reduce(AgentAction::Fetch(Request::pending(t(1))));
        assert_eq!(state.detail.status, RequestStatus::Loading);

        state.reduce(AgentAction::Fetch(Request::fulfilled(t(1), agent(5, "Nina"))));
        assert_eq!(state.detail.status, RequestStatus::Succeeded);
        assert_eq!(state.detail.data, Some(agent(5, "Nina")));
    }

    #[test]
    fn test_failed_update_keeps_loaded_agent() {
        let mut state = AgentState::default();
        state.reduce(AgentAction::Fetch(Request::pending(t(1))));
        state.reduce(AgentAction::Fetch(Request::fulfilled(t(1), agent(7, "Otto"))));

        state.reduce(AgentAction::Update(Request::pending(t(2))));
        state.reduce(AgentAction::Update(Request::rejected(t(2), "Prompt too long")));

        assert_eq!(state.detail.status, RequestStatus::Failed);
        assert_eq!(state.detail.error.as_deref(), Some("Prompt too long"));
        assert_eq!(state.detail.data.as_ref().map(|a| a.id), Some(7));
    }

    #[test]
    fn test_update_patches_list_entry() {
        let mut state = AgentState::default();
        state.reduce(AgentAction::FetchList(Request::fulfilled(
            t(1),
            vec![agent(1, "Ada"), agent(2, "Bo")],
        )));

        state.reduce(AgentAction::Update(Request::pending(t(2))));
        state.reduce(AgentAction::Update(Request::fulfilled(t(2), agent(2, "Bob"))));

        let names: Vec<_> = state
            .sorted_list()
            .iter()
            .map(|a| a.name.clone().unwrap_or_default())
            .collect();
        assert_eq!(names, vec!["Ada", "Bob"]);
        assert_eq!(state.detail.data, Some(agent(2, "Bob")));
    }

    #[test]
    fn test_create_appends() {
        let mut state = AgentState::default();
        state.reduce(AgentAction::Create(Request::pending(t(1))));
        state.reduce(AgentAction::Create(Request::fulfilled(t(1), agent(3, "New"))));

        assert_eq!(state.list.data, Some(vec![agent(3, "New")]));
        assert_eq!(state.list.status, RequestStatus::Succeeded);
    }

    #[test]
    fn test_delete_clears_selection() {
        let mut state = AgentState::default();
        state.reduce(AgentAction::FetchList(Request::fulfilled(
            t(1),
            vec![agent(1, "Ada"), agent(2, "Bo")],
        )));
        state.reduce(AgentAction::SetActiveId(2));
        state.reduce(AgentAction::Fetch(Request::fulfilled(t(2), agent(2, "Bo"))));
        assert!(state.active_agent().is_some());

        state.reduce(AgentAction::Delete(Request::pending(t(3))));
        state.reduce(AgentAction::Delete(Request::fulfilled(t(3), 2)));

        assert_eq!(state.list.data, Some(vec![agent(1, "Ada")]));
        assert!(state.detail.data.is_none());
        assert!(state.active_id.is_none());
        assert!(state.active_agent().is_none());
    }

    #[test]
    fn test_delete_from_before_reset_keeps_new_selection() {
        let mut state = AgentState::default();
        state.reduce(AgentAction::Delete(Request::pending(t(1))));
        state.reset(t(2));

        state.reduce(AgentAction::SetActiveId(2));
        state.reduce(AgentAction::Fetch(Request::pending(t(3))));
        state.reduce(AgentAction::Fetch(Request::fulfilled(t(3), agent(2, "Bo"))));
        state.reduce(AgentAction::Delete(Request::fulfilled(t(1), 2)));

        assert_eq!(state.active_id, Some(2));
        assert_eq!(state.detail.data, Some(agent(2, "Bo")));
    }

    #[test]
    fn test_update_from_before_reset_is_ignored() {
        let mut state = AgentState::default();
        state.reduce(AgentAction::Update(Request::pending(t(1))));
        state.reset(t(2));
        state.reduce(AgentAction::FetchList(Request::fulfilled(t(3), vec![agent(2, "Bo")])));

        state.reduce(AgentAction::Update(Request::fulfilled(t(1), agent(2, "Old"))));

        assert_eq!(state.list.data, Some(vec![agent(2, "Bo")]));
        assert!(state.detail.data.is_none());
    }

    #[test]
    fn test_active_agent_requires_matching_detail() {
        let mut state = AgentState::default();
        state.reduce(AgentAction::Fetch(Request::fulfilled(t(1), agent(1, "Ada"))));
        state.reduce(AgentAction::SetActiveId(9));
        assert!(state.active_agent().is_none());
        assert!(state.find(1).is_some());
        assert!(state.find(9).is_none());
    }

    #[test]
    fn test_sorted_list_unnamed_last() {
        let mut state = AgentState::default();
        let unnamed = Agent {
            id: 4,
            ..Default::default()
        };
        state.reduce(AgentAction::FetchList(Request::fulfilled(
            t(1),
            vec![unnamed, agent(2, "Zed"), agent(3, "Amy")],
        )));

        let ids: Vec<_> = state.sorted_list().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![3, 2, 4]);
    }
}
