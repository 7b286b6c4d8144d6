//! Agent endpoints

use super::client::ApiClient;
use crate::error::ApiError;
use crate::models::{Agent, AgentId, AgentUpdate, NewAgent};

impl ApiClient {
    /// GET /agent
    pub async fn list_agents(&self) -> Result<Vec<Agent>, ApiError> {
        self.get("/agent").await
    }

    /// GET /agent/:id
    pub async fn get_agent(&self, id: AgentId) -> Result<Agent, ApiError> {
        self.get(&format!("/agent/{}", id)).await
    }

    /// POST /agent
    pub async fn create_agent(&self, agent: &NewAgent) -> Result<Agent, ApiError> {
        self.post("/agent", agent).await
    }

    /// PATCH /agent/:id with only the changed fields
    pub async fn update_agent(&self, id: AgentId, update: &AgentUpdate) -> Result<Agent, ApiError> {
        self.patch(&format!("/agent/{}", id), update).await
    }

    /// DELETE /agent/:id
    pub async fn delete_agent(&self, id: AgentId) -> Result<(), ApiError> {
        self.delete(&format!("/agent/{}", id)).await
    }
}
