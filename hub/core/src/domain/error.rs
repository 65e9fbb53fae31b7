// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Domain and application error types.

use crate::domain::agent::AgentId;
use crate::domain::repository::RepositoryError;

/// Input rejected before it reaches a store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Field '{0}' is required")]
    EmptyField(&'static str),

    #[error("Message text cannot be empty")]
    EmptyMessage,

    #[error("Unknown agent type: {0}")]
    UnknownAgentType(String),
}

/// Errors surfaced by the hub's command interface.
#[derive(Debug, thiserror::Error)]
pub enum HubError {
    #[error("Agent not found: {0}")]
    AgentNotFound(AgentId),

    #[error("No agent matches '{0}'")]
    NoSuchAgent(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Repository error: {0}")]
    Repository(RepositoryError),

    #[error("Session has been shut down")]
    SessionClosed,
}

impl From<RepositoryError> for HubError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::AgentNotFound(id) => HubError::AgentNotFound(id),
            other => HubError::Repository(other),
        }
    }
}

impl HubError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, HubError::AgentNotFound(_) | HubError::NoSuchAgent(_))
    }
}
