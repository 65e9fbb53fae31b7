// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Hub Session
//!
//! Composition root for one dashboard session. Owns the two stores, the
//! simulation driver, the event bus, and the presentation state (language,
//! active view, selected chat agent).
//!
//! All background work hangs off a single session [`CancellationToken`]:
//! [`HubSession::shutdown`] (or dropping the session) stops the simulation
//! loop and every pending chat reply.

use std::sync::Arc;

use anyhow::Context;
use parking_lot::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::application::agent::AgentLifecycleService;
use crate::application::conversation::{ConversationConfig, ConversationService};
use crate::application::language::{resolve, LanguageHandle};
use crate::application::lifecycle::StandardAgentLifecycleService;
use crate::application::simulation::{SimulationDriver, SimulationDriverConfig};
use crate::domain::agent::{Agent, AgentDraft, AgentId};
use crate::domain::chat::ChatMessage;
use crate::domain::error::HubError;
use crate::domain::events::HubEvent;
use crate::domain::hub_config::HubConfigManifest;
use crate::domain::language::{find_language, Language, View};
use crate::domain::repository::{AgentRepository, ConversationRepository};
use crate::domain::stats::{FleetPerformance, SystemStats};
use crate::infrastructure::event_bus::{EventBus, EventReceiver};
use crate::infrastructure::localization;
use crate::infrastructure::random::SharedRng;
use crate::infrastructure::repositories::{InMemoryAgentRepository, InMemoryConversationRepository};
use crate::infrastructure::seed::seed_fleet;

#[derive(Debug, Clone, Copy, Default)]
struct UiState {
    view: View,
    selected_agent: Option<AgentId>,
}

pub struct HubSession {
    config: HubConfigManifest,
    agents: Arc<StandardAgentLifecycleService>,
    conversations: Arc<ConversationService>,
    simulation: Arc<SimulationDriver>,
    event_bus: EventBus,
    language: LanguageHandle,
    ui: RwLock<UiState>,
    shutdown_token: CancellationToken,
    simulation_task: Mutex<Option<JoinHandle<()>>>,
}

impl HubSession {
    /// Wire up an empty, idle session. Nothing is seeded or spawned.
    pub fn new(config: HubConfigManifest) -> anyhow::Result<Self> {
        config.validate().context("Invalid hub configuration")?;

        let shutdown_token = CancellationToken::new();
        let event_bus = EventBus::new(config.spec.events.capacity);
        let rng = SharedRng::from_seed(config.spec.simulation.seed);
        let language = LanguageHandle::new(&config.spec.session.default_language);

        let agent_repository: Arc<dyn AgentRepository> = Arc::new(InMemoryAgentRepository::new());
        let conversation_repository: Arc<dyn ConversationRepository> =
            Arc::new(InMemoryConversationRepository::new());

        let conversations = Arc::new(ConversationService::new(
            agent_repository.clone(),
            conversation_repository,
            event_bus.clone(),
            rng.clone(),
            language.clone(),
            ConversationConfig::from_manifest(&config),
            shutdown_token.clone(),
        ));
        let agents = Arc::new(StandardAgentLifecycleService::new(
            agent_repository.clone(),
            conversations.clone(),
            event_bus.clone(),
            rng.clone(),
        ));
        let simulation = Arc::new(SimulationDriver::new(
            agent_repository,
            event_bus.clone(),
            rng,
            SimulationDriverConfig::from_manifest(&config),
            shutdown_token.child_token(),
        ));

        Ok(Self {
            config,
            agents,
            conversations,
            simulation,
            event_bus,
            language,
            ui: RwLock::new(UiState::default()),
            shutdown_token,
            simulation_task: Mutex::new(None),
        })
    }

    /// Build a session, seed the startup fleet if configured, compute the
    /// first stats snapshot and launch the simulation loop.
    pub async fn start(config: HubConfigManifest) -> anyhow::Result<Self> {
        let session = Self::new(config)?;

        if session.config.spec.session.seed_fleet {
            session
                .agents
                .seed(seed_fleet(session.language.code()))
                .await
                .context("Failed to seed agent fleet")?;
        }
        session
            .simulation
            .refresh_stats()
            .await
            .context("Failed to compute initial stats")?;

        let handle = session.simulation.clone().start();
        *session.simulation_task.lock() = Some(handle);

        info!(
            language = session.language.code(),
            seeded = session.config.spec.session.seed_fleet,
            "Hub session started"
        );
        Ok(session)
    }

    fn ensure_open(&self) -> Result<(), HubError> {
        if self.shutdown_token.is_cancelled() {
            Err(HubError::SessionClosed)
        } else {
            Ok(())
        }
    }

    // ---- commands ----

    pub async fn create_agent(&self, draft: AgentDraft) -> Result<Agent, HubError> {
        self.ensure_open()?;
        self.agents.create_agent(draft).await
    }

    pub async fn update_agent(&self, id: AgentId, draft: AgentDraft) -> Result<Agent, HubError> {
        self.ensure_open()?;
        self.agents.update_agent(id, draft).await
    }

    /// Removing the agent open in chat also sends the view back to the
    /// dashboard.
    pub async fn remove_agent(&self, id: AgentId) -> Result<Agent, HubError> {
        self.ensure_open()?;
        let removed = self.agents.remove_agent(id).await?;

        let reset = {
            let mut ui = self.ui.write();
            if ui.selected_agent == Some(id) {
                *ui = UiState::default();
                true
            } else {
                false
            }
        };
        if reset {
            debug!(agent_id = %id, "Selected agent removed, returning to dashboard");
            self.event_bus.publish(HubEvent::ViewChanged { view: View::Dashboard });
        }
        Ok(removed)
    }

    pub async fn send_message(&self, agent_id: AgentId, text: &str) -> Result<ChatMessage, HubError> {
        self.ensure_open()?;
        self.conversations.send_message(agent_id, text).await
    }

    /// Switch the display language. Unsupported codes fall back to the
    /// configured fallback language instead of failing.
    pub fn select_language(&self, code: &str) -> &'static Language {
        let fallback = &self.config.spec.session.fallback_language;
        let language = resolve(code, fallback);
        if find_language(code).is_none() {
            warn!(requested = code, fallback = language.code, "Unsupported language requested, falling back");
        }

        self.language.set(language);
        info!(language = language.code, "Language selected");
        self.event_bus.publish(HubEvent::LanguageChanged {
            requested: code.to_string(),
            language: language.code.to_string(),
        });
        language
    }

    /// Returns the view actually shown. The chat view needs a selected agent;
    /// without one the current view is kept.
    pub fn select_view(&self, view: View) -> View {
        let applied = {
            let mut ui = self.ui.write();
            if view == View::Chat && ui.selected_agent.is_none() {
                debug!("Chat view requested with no agent selected, ignoring");
                return ui.view;
            }
            ui.view = view;
            view
        };
        self.event_bus.publish(HubEvent::ViewChanged { view: applied });
        applied
    }

    pub async fn open_chat(&self, agent_id: AgentId) -> Result<Agent, HubError> {
        self.ensure_open()?;
        let agent = self.agents.get_agent(agent_id).await?;
        {
            let mut ui = self.ui.write();
            ui.selected_agent = Some(agent_id);
            ui.view = View::Chat;
        }
        self.event_bus.publish(HubEvent::ChatOpened { agent_id });
        self.event_bus.publish(HubEvent::ViewChanged { view: View::Chat });
        Ok(agent)
    }

    // ---- read model ----

    pub async fn agents(&self) -> Result<Vec<Agent>, HubError> {
        self.agents.list_agents().await
    }

    pub async fn supervisor(&self) -> Result<Option<Agent>, HubError> {
        self.agents.supervisor().await
    }

    pub async fn regular_agents(&self) -> Result<Vec<Agent>, HubError> {
        self.agents.regular_agents().await
    }

    /// Agent addressed by id or by display name.
    pub async fn find_agent(&self, needle: &str) -> Result<Agent, HubError> {
        self.agents.resolve(needle).await
    }

    pub fn stats(&self) -> SystemStats {
        self.simulation.stats()
    }

    pub async fn fleet_performance(&self) -> Result<FleetPerformance, HubError> {
        Ok(FleetPerformance::from_agents(&self.agents.list_agents().await?))
    }

    pub async fn messages(&self, agent_id: AgentId) -> Result<Vec<ChatMessage>, HubError> {
        self.conversations.log(agent_id).await
    }

    pub async fn pending_replies(&self, agent_id: AgentId) -> usize {
        self.conversations.pending_replies(agent_id).await
    }

    pub fn language(&self) -> &'static Language {
        self.language.get()
    }

    pub fn view(&self) -> View {
        self.ui.read().view
    }

    pub fn selected_agent(&self) -> Option<AgentId> {
        self.ui.read().selected_agent
    }

    pub fn translate(&self, key: &str) -> String {
        localization::translate(self.language.code(), key)
    }

    pub fn subscribe(&self) -> EventReceiver {
        self.event_bus.subscribe()
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    pub fn lifecycle(&self) -> &Arc<StandardAgentLifecycleService> {
        &self.agents
    }

    pub fn simulation(&self) -> &Arc<SimulationDriver> {
        &self.simulation
    }

    pub fn config(&self) -> &HubConfigManifest {
        &self.config
    }

    pub fn is_shut_down(&self) -> bool {
        self.shutdown_token.is_cancelled()
    }

    /// Cancel all background work and wait for the simulation loop to exit.
    pub async fn shutdown(&self) {
        if self.shutdown_token.is_cancelled() {
            return;
        }
        info!("Shutting down hub session");
        self.shutdown_token.cancel();

        let handle = self.simulation_task.lock().take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                warn!("Simulation task ended abnormally: {}", e);
            }
        }
        info!(ticks = self.simulation.tick_count(), "Hub session stopped");
    }
}

impl Drop for HubSession {
    fn drop(&mut self) {
        self.shutdown_token.cancel();
    }
}
