// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Domain Repository Interfaces
//!
//! Storage contracts for the two owned stores, following the DDD Repository
//! pattern: interface defined here, implemented in
//! `crate::infrastructure::repositories`.
//!
//! | Trait | Owns | Implementation |
//! |-------|------|----------------|
//! | `AgentRepository` | `Agent` records, insertion ordered | `InMemoryAgentRepository` |
//! | `ConversationRepository` | per-agent `ChatMessage` logs | `InMemoryConversationRepository` |
//!
//! Nothing outside the application services holds a repository handle, so
//! every mutation passes through a command entry point.

use async_trait::async_trait;

use crate::domain::agent::{Agent, AgentId};
use crate::domain::chat::ChatMessage;

/// Repository interface for Agent aggregates
#[async_trait]
pub trait AgentRepository: Send + Sync {
    /// Insert a new agent; fails if the id is already taken
    async fn insert(&self, agent: &Agent) -> Result<(), RepositoryError>;

    /// Mutate one agent in place under the write lock, returning the result
    async fn modify(
        &self,
        id: AgentId,
        f: &mut (dyn for<'a> FnMut(&'a mut Agent) + Send),
    ) -> Result<Agent, RepositoryError>;

    /// Find agent by ID
    async fn find_by_id(&self, id: AgentId) -> Result<Option<Agent>, RepositoryError>;

    /// Find agent by display name (case-insensitive)
    async fn find_by_name(&self, name: &str) -> Result<Option<Agent>, RepositoryError>;

    /// List all agents in insertion order
    async fn list_all(&self) -> Result<Vec<Agent>, RepositoryError>;

    /// Apply `f` to every stored agent under a single write lock.
    /// Returns the number of agents visited.
    async fn update_all(
        &self,
        f: &mut (dyn for<'a> FnMut(&'a mut Agent) + Send),
    ) -> Result<usize, RepositoryError>;

    /// Delete agent by ID, returning the removed record
    async fn delete(&self, id: AgentId) -> Result<Agent, RepositoryError>;
}

/// Repository interface for per-agent conversation logs
#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Append to the agent's log, creating an empty log first if needed
    async fn append(&self, agent_id: AgentId, message: ChatMessage) -> Result<(), RepositoryError>;

    /// Ordered messages for the agent; empty if no log exists
    async fn log(&self, agent_id: AgentId) -> Result<Vec<ChatMessage>, RepositoryError>;

    /// Drop the agent's log entirely. Returns whether a log existed.
    async fn delete_log(&self, agent_id: AgentId) -> Result<bool, RepositoryError>;
}

/// Repository errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("Agent not found: {0}")]
    AgentNotFound(AgentId),

    #[error("Agent already exists: {0}")]
    Duplicate(AgentId),
}
