// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Domain events published after every state change.
//!
//! The presentation layer subscribes through
//! `crate::infrastructure::event_bus::EventBus` and re-renders on receipt.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::agent::{Agent, AgentId};
use crate::domain::chat::ChatMessage;
use crate::domain::language::View;
use crate::domain::stats::SystemStats;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HubEvent {
    AgentCreated {
        agent: Agent,
        created_at: DateTime<Utc>,
    },
    AgentUpdated {
        agent: Agent,
        updated_at: DateTime<Utc>,
    },
    AgentRemoved {
        agent_id: AgentId,
        cancelled_replies: usize,
        removed_at: DateTime<Utc>,
    },
    MessageAppended {
        agent_id: AgentId,
        message: ChatMessage,
    },
    SimulationTicked {
        tick: u64,
        agents_updated: usize,
        stats: SystemStats,
        ticked_at: DateTime<Utc>,
    },
    LanguageChanged {
        requested: String,
        language: String,
    },
    ViewChanged {
        view: View,
    },
    ChatOpened {
        agent_id: AgentId,
    },
}

impl HubEvent {
    /// Agent the event concerns, if any.
    pub fn agent_id(&self) -> Option<AgentId> {
        match self {
            HubEvent::AgentCreated { agent, .. } | HubEvent::AgentUpdated { agent, .. } => Some(agent.id),
            HubEvent::AgentRemoved { agent_id, .. }
            | HubEvent::MessageAppended { agent_id, .. }
            | HubEvent::ChatOpened { agent_id } => Some(*agent_id),
            HubEvent::SimulationTicked { .. }
            | HubEvent::LanguageChanged { .. }
            | HubEvent::ViewChanged { .. } => None,
        }
    }
}
