// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Repository Implementations
//!
//! In-memory implementations of the repository abstractions defined in
//! `crate::domain::repository`. Nothing survives the session.
//!
//! # Architecture
//!
//! - **Layer:** Infrastructure
//! - **Purpose:** Hold domain aggregates for the lifetime of a session
//! - **Pattern:** Repository (DDD), Adapter (Hexagonal Architecture)
//!
//! Locks are `parking_lot` and never held across an `.await`.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::agent::{Agent, AgentId};
use crate::domain::chat::ChatMessage;
use crate::domain::repository::{AgentRepository, ConversationRepository, RepositoryError};

/// Insertion-ordered agent store.
#[derive(Clone, Default)]
pub struct InMemoryAgentRepository {
    agents: Arc<RwLock<Vec<Agent>>>,
}

impl InMemoryAgentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AgentRepository for InMemoryAgentRepository {
    async fn insert(&self, agent: &Agent) -> Result<(), RepositoryError> {
        let mut agents = self.agents.write();
        if agents.iter().any(|a| a.id == agent.id) {
            return Err(RepositoryError::Duplicate(agent.id));
        }
        agents.push(agent.clone());
        Ok(())
    }

    async fn modify(
        &self,
        id: AgentId,
        f: &mut (dyn for<'a> FnMut(&'a mut Agent) + Send),
    ) -> Result<Agent, RepositoryError> {
        let mut agents = self.agents.write();
        let slot = agents
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(RepositoryError::AgentNotFound(id))?;
        f(slot);
        Ok(slot.clone())
    }

    async fn find_by_id(&self, id: AgentId) -> Result<Option<Agent>, RepositoryError> {
        let agents = self.agents.read();
        Ok(agents.iter().find(|a| a.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Agent>, RepositoryError> {
        let agents = self.agents.read();
        Ok(agents
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name.trim()))
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<Agent>, RepositoryError> {
        Ok(self.agents.read().clone())
    }

    async fn update_all(
        &self,
        f: &mut (dyn for<'a> FnMut(&'a mut Agent) + Send),
    ) -> Result<usize, RepositoryError> {
        let mut agents = self.agents.write();
        for agent in agents.iter_mut() {
            f(agent);
        }
        Ok(agents.len())
    }

    async fn delete(&self, id: AgentId) -> Result<Agent, RepositoryError> {
        let mut agents = self.agents.write();
        let index = agents
            .iter()
            .position(|a| a.id == id)
            .ok_or(RepositoryError::AgentNotFound(id))?;
        Ok(agents.remove(index))
    }
}

#[derive(Clone, Default)]
pub struct InMemoryConversationRepository {
    logs: Arc<RwLock<HashMap<AgentId, Vec<ChatMessage>>>>,
}

impl InMemoryConversationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConversationRepository for InMemoryConversationRepository {
    async fn append(&self, agent_id: AgentId, message: ChatMessage) -> Result<(), RepositoryError> {
        self.logs.write().entry(agent_id).or_default().push(message);
        Ok(())
    }

    async fn log(&self, agent_id: AgentId) -> Result<Vec<ChatMessage>, RepositoryError> {
        Ok(self.logs.read().get(&agent_id).cloned().unwrap_or_default())
    }

    async fn delete_log(&self, agent_id: AgentId) -> Result<bool, RepositoryError> {
        Ok(self.logs.write().remove(&agent_id).is_some())
    }
}
