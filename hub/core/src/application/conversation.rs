// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Conversation Service
//!
//! Owns every per-agent chat log and the simulated reply generator.
//!
//! Each user message schedules exactly one deferred agent reply on its own
//! child [`CancellationToken`]. Reply tokens hang off a per-agent token, which
//! in turn hangs off the session token:
//!
//! ```text
//! session ─┬─ agent A ─┬─ reply 1
//!          │           └─ reply 2
//!          └─ agent B ─── reply 3
//! ```
//!
//! Cancelling an agent (log deletion) or the session therefore cancels every
//! reply below it. Delivery and cancellation both take the `pending` lock, and
//! a reply re-checks its token under that lock before appending, so a reply
//! can never land in a deleted log or in a log recreated under the same id.
//!
//! Replies are independent timers: several may be in flight for one agent and
//! they land in delay order, not send order.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::application::language::LanguageHandle;
use crate::domain::agent::AgentId;
use crate::domain::chat::ChatMessage;
use crate::domain::error::{HubError, ValidationError};
use crate::domain::events::HubEvent;
use crate::domain::hub_config::HubConfigManifest;
use crate::domain::repository::{AgentRepository, ConversationRepository};
use crate::infrastructure::event_bus::EventBus;
use crate::infrastructure::localization::canned_replies;
use crate::infrastructure::random::SharedRng;

/// Reply delay window; each reply waits a uniform draw from `[min, max]`.
#[derive(Debug, Clone)]
pub struct ConversationConfig {
    pub reply_delay_min: Duration,
    pub reply_delay_max: Duration,
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            reply_delay_min: Duration::from_millis(1000),
            reply_delay_max: Duration::from_millis(3000),
        }
    }
}

impl ConversationConfig {
    pub fn from_manifest(manifest: &HubConfigManifest) -> Self {
        Self {
            reply_delay_min: manifest.spec.chat.reply_delay_min(),
            reply_delay_max: manifest.spec.chat.reply_delay_max(),
        }
    }
}

struct PendingReplies {
    generation: u64,
    token: CancellationToken,
    count: usize,
}

#[derive(Default)]
struct PendingState {
    next_generation: u64,
    agents: HashMap<AgentId, PendingReplies>,
}

impl PendingState {
    /// Forget one finished or cancelled reply, unless its agent entry has
    /// since been replaced.
    fn release(&mut self, agent_id: AgentId, generation: u64) {
        if let Some(entry) = self.agents.get_mut(&agent_id) {
            if entry.generation == generation {
                entry.count = entry.count.saturating_sub(1);
                if entry.count == 0 {
                    self.agents.remove(&agent_id);
                }
            }
        }
    }
}

pub struct ConversationService {
    agents: Arc<dyn AgentRepository>,
    conversations: Arc<dyn ConversationRepository>,
    event_bus: EventBus,
    rng: SharedRng,
    language: LanguageHandle,
    config: ConversationConfig,
    shutdown_token: CancellationToken,
    pending: Arc<Mutex<PendingState>>,
}

impl ConversationService {
    pub fn new(
        agents: Arc<dyn AgentRepository>,
        conversations: Arc<dyn ConversationRepository>,
        event_bus: EventBus,
        rng: SharedRng,
        language: LanguageHandle,
        config: ConversationConfig,
        shutdown_token: CancellationToken,
    ) -> Self {
        Self {
            agents,
            conversations,
            event_bus,
            rng,
            language,
            config,
            shutdown_token,
            pending: Arc::new(Mutex::new(PendingState::default())),
        }
    }

    /// Append a user message and schedule the agent's reply.
    ///
    /// Returns as soon as the user message is stored. The text is trimmed;
    /// whitespace-only input is rejected without side effects.
    pub async fn send_message(&self, agent_id: AgentId, text: &str) -> Result<ChatMessage, HubError> {
        let content = text.trim();
        if content.is_empty() {
            return Err(ValidationError::EmptyMessage.into());
        }
        if self.shutdown_token.is_cancelled() {
            return Err(HubError::SessionClosed);
        }

        // Held until the reply is registered so a concurrent delete_log
        // either sees it or runs before the existence check.
        let mut pending = self.pending.lock().await;

        if self.agents.find_by_id(agent_id).await?.is_none() {
            return Err(HubError::AgentNotFound(agent_id));
        }

        let message = ChatMessage::from_user(content);
        self.conversations.append(agent_id, message.clone()).await?;
        self.event_bus.publish(HubEvent::MessageAppended {
            agent_id,
            message: message.clone(),
        });

        let state = &mut *pending;
        let next_generation = state.next_generation + 1;
        let entry = state.agents.entry(agent_id).or_insert_with(|| PendingReplies {
            generation: next_generation,
            token: self.shutdown_token.child_token(),
            count: 0,
        });
        if entry.generation == next_generation {
            state.next_generation = next_generation;
        }
        entry.count += 1;

        let delay = self.reply_delay();
        let reply = DeferredReply {
            agent_id,
            generation: entry.generation,
            delay,
            token: entry.token.child_token(),
            conversations: self.conversations.clone(),
            event_bus: self.event_bus.clone(),
            rng: self.rng.clone(),
            language: self.language.clone(),
            pending: self.pending.clone(),
        };
        drop(pending);

        debug!(agent_id = %agent_id, delay_ms = delay.as_millis() as u64, "Scheduled agent reply");
        tokio::spawn(reply.run());

        Ok(message)
    }

    /// Ordered log for the agent; empty when nothing was ever sent.
    pub async fn log(&self, agent_id: AgentId) -> Result<Vec<ChatMessage>, HubError> {
        Ok(self.conversations.log(agent_id).await?)
    }

    /// Cancel the agent's pending replies and drop its log.
    /// Returns the number of replies that were cancelled.
    pub async fn delete_log(&self, agent_id: AgentId) -> Result<usize, HubError> {
        let mut pending = self.pending.lock().await;

        let cancelled = match pending.agents.remove(&agent_id) {
            Some(entry) => {
                entry.token.cancel();
                entry.count
            }
            None => 0,
        };
        let existed = self.conversations.delete_log(agent_id).await?;

        if cancelled > 0 || existed {
            info!(agent_id = %agent_id, cancelled, "Deleted conversation log");
        }
        Ok(cancelled)
    }

    /// Replies scheduled for the agent that have neither landed nor been cancelled.
    pub async fn pending_replies(&self, agent_id: AgentId) -> usize {
        self.pending
            .lock()
            .await
            .agents
            .get(&agent_id)
            .map_or(0, |entry| entry.count)
    }

    pub async fn total_pending_replies(&self) -> usize {
        self.pending.lock().await.agents.values().map(|e| e.count).sum()
    }

    fn reply_delay(&self) -> Duration {
        let min = self.config.reply_delay_min.as_millis() as u64;
        let max = self.config.reply_delay_max.as_millis() as u64;
        let (low, high) = if min <= max { (min, max) } else { (max, min) };
        Duration::from_millis(self.rng.with(|r| r.random_range(low..=high)))
    }
}

/// One scheduled reply, detached onto the runtime.
struct DeferredReply {
    agent_id: AgentId,
    generation: u64,
    delay: Duration,
    token: CancellationToken,
    conversations: Arc<dyn ConversationRepository>,
    event_bus: EventBus,
    rng: SharedRng,
    language: LanguageHandle,
    pending: Arc<Mutex<PendingState>>,
}

impl DeferredReply {
    async fn run(self) {
        tokio::select! {
            _ = tokio::time::sleep(self.delay) => {}
            _ = self.token.cancelled() => {
                debug!(agent_id = %self.agent_id, "Agent reply cancelled before delivery");
                self.pending.lock().await.release(self.agent_id, self.generation);
                return;
            }
        }

        let mut pending = self.pending.lock().await;
        if self.token.is_cancelled() {
            debug!(agent_id = %self.agent_id, "Agent reply cancelled at delivery");
            pending.release(self.agent_id, self.generation);
            return;
        }

        let replies = canned_replies(self.language.code());
        let content = self.rng.with(|r| replies[r.random_range(0..replies.len())]);
        let message = ChatMessage::from_agent(content);

        match self.conversations.append(self.agent_id, message.clone()).await {
            Ok(()) => {
                debug!(agent_id = %self.agent_id, "Agent reply delivered");
                self.event_bus.publish(HubEvent::MessageAppended {
                    agent_id: self.agent_id,
                    message,
                });
            }
            Err(e) => warn!(agent_id = %self.agent_id, "Failed to deliver agent reply: {}", e),
        }
        pending.release(self.agent_id, self.generation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::agent::{Agent, AgentDraft, AgentType};
    use crate::domain::chat::Sender;
    use crate::infrastructure::repositories::{
        InMemoryAgentRepository, InMemoryConversationRepository,
    };

    async fn service_with_agent() -> (ConversationService, AgentId, CancellationToken) {
        let agents = Arc::new(InMemoryAgentRepository::new());
        let rng = SharedRng::seeded(3);
        let agent = rng.with(|r| {
            Agent::create(
                AgentDraft {
                    name: "Echo".into(),
                    role: "Tester".into(),
                    description: "Replies".into(),
                    api_key: "k".into(),
                    agent_type: AgentType::Custom,
                },
                r,
            )
        });
        agents.insert(&agent).await.unwrap();
        let token = CancellationToken::new();
        let service = ConversationService::new(
            agents,
            Arc::new(InMemoryConversationRepository::new()),
            EventBus::new(64),
            rng,
            LanguageHandle::new("en"),
            ConversationConfig::default(),
            token.clone(),
        );
        (service, agent.id, token)
    }

    #[tokio::test(start_paused = true)]
    async fn test_user_message_is_trimmed_and_stored_immediately() {
        let (service, id, _token) = service_with_agent().await;

        let message = service.send_message(id, "  Hello  ").await.unwrap();
        assert_eq!(message.content, "Hello");
        assert_eq!(message.sender, Sender::User);

        let log = service.log(id).await.unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(service.pending_replies(id).await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_lands_inside_window() {
        let (service, id, _token) = service_with_agent().await;
        service.send_message(id, "Hello").await.unwrap();

        tokio::time::sleep(Duration::from_millis(999)).await;
        assert_eq!(service.log(id).await.unwrap().len(), 1);

        tokio::time::sleep(Duration::from_millis(2002)).await;
        let log = service.log(id).await.unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log[1].sender, Sender::Agent);
        assert!(canned_replies("en").contains(&log[1].content.as_str()));
        assert_eq!(service.pending_replies(id).await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_whitespace_message_rejected_without_scheduling() {
        let (service, id, _token) = service_with_agent().await;
        let err = service.send_message(id, " \t\n").await.unwrap_err();
        assert!(matches!(err, HubError::Validation(ValidationError::EmptyMessage)));
        assert!(service.log(id).await.unwrap().is_empty());
        assert_eq!(service.pending_replies(id).await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_agent_rejected() {
        let (service, _id, _token) = service_with_agent().await;
        let stranger = AgentId::new();
        let err = service.send_message(stranger, "hi").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(service.log(stranger).await.unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_delete_log_cancels_every_pending_reply() {
        let (service, id, _token) = service_with_agent().await;
        for text in ["one", "two", "three"] {
            service.send_message(id, text).await.unwrap();
        }
        assert_eq!(service.pending_replies(id).await, 3);

        assert_eq!(service.delete_log(id).await.unwrap(), 3);
        tokio::time::sleep(Duration::from_secs(5)).await;

        assert!(service.log(id).await.unwrap().is_empty());
        assert_eq!(service.total_pending_replies().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_cancellation_stops_replies() {
        let (service, id, token) = service_with_agent().await;
        service.send_message(id, "Hello").await.unwrap();
        token.cancel();

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(service.log(id).await.unwrap().len(), 1);
        assert!(matches!(
            service.send_message(id, "again").await,
            Err(HubError::SessionClosed)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_uses_language_at_delivery() {
        let (service, id, _token) = service_with_agent().await;
        service.send_message(id, "Привет").await.unwrap();
        service.language.set(crate::domain::language::find_language("ru").unwrap());

        tokio::time::sleep(Duration::from_secs(4)).await;
        let log = service.log(id).await.unwrap();
        assert!(canned_replies("ru").contains(&log[1].content.as_str()));
    }
}
