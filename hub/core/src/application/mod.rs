// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

pub mod agent;
pub mod conversation;
pub mod language;
pub mod lifecycle;
pub mod session;
pub mod simulation;

pub use agent::AgentLifecycleService;
pub use conversation::{ConversationConfig, ConversationService};
pub use language::LanguageHandle;
pub use lifecycle::StandardAgentLifecycleService;
pub use session::HubSession;
pub use simulation::{SimulationDriver, SimulationDriverConfig};
