// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use async_trait::async_trait;

use crate::domain::agent::{Agent, AgentDraft, AgentId, AgentStatus};
use crate::domain::error::HubError;

/// Command and query surface over the agent fleet.
///
/// Unknown ids are reported as [`HubError::AgentNotFound`] rather than
/// ignored.
#[async_trait]
pub trait AgentLifecycleService: Send + Sync {
    async fn create_agent(&self, draft: AgentDraft) -> Result<Agent, HubError>;
    async fn update_agent(&self, id: AgentId, draft: AgentDraft) -> Result<Agent, HubError>;
    /// Also drops the agent's conversation and cancels its pending replies.
    async fn remove_agent(&self, id: AgentId) -> Result<Agent, HubError>;
    async fn get_agent(&self, id: AgentId) -> Result<Agent, HubError>;
    async fn list_agents(&self) -> Result<Vec<Agent>, HubError>;
    /// First supervisor in listing order.
    async fn supervisor(&self) -> Result<Option<Agent>, HubError>;
    /// Everyone except supervisors, in listing order.
    async fn regular_agents(&self) -> Result<Vec<Agent>, HubError>;
    async fn seed(&self, agents: Vec<Agent>) -> Result<usize, HubError>;
    async fn set_status(&self, id: AgentId, status: AgentStatus) -> Result<Agent, HubError>;
}
