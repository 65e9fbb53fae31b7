// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info};

use crate::application::agent::AgentLifecycleService;
use crate::application::conversation::ConversationService;
use crate::domain::agent::{Agent, AgentDraft, AgentId, AgentStatus};
use crate::domain::error::HubError;
use crate::domain::events::HubEvent;
use crate::domain::repository::AgentRepository;
use crate::infrastructure::event_bus::EventBus;
use crate::infrastructure::random::SharedRng;
use crate::infrastructure::seed::seed_id_by_name;

pub struct StandardAgentLifecycleService {
    repository: Arc<dyn AgentRepository>,
    conversations: Arc<ConversationService>,
    event_bus: EventBus,
    rng: SharedRng,
}

impl StandardAgentLifecycleService {
    pub fn new(
        repository: Arc<dyn AgentRepository>,
        conversations: Arc<ConversationService>,
        event_bus: EventBus,
        rng: SharedRng,
    ) -> Self {
        Self {
            repository,
            conversations,
            event_bus,
            rng,
        }
    }

    /// Agent whose id or display name matches `needle`.
    pub async fn resolve(&self, needle: &str) -> Result<Agent, HubError> {
        if let Ok(id) = AgentId::from_string(needle.trim()) {
            return self.get_agent(id).await;
        }
        if let Some(agent) = self.repository.find_by_name(needle).await? {
            return Ok(agent);
        }
        // Seed agents answer to their name in every language.
        if let Some(id) = seed_id_by_name(needle) {
            if let Some(agent) = self.repository.find_by_id(id).await? {
                return Ok(agent);
            }
        }
        Err(HubError::NoSuchAgent(needle.to_string()))
    }
}

#[async_trait]
impl AgentLifecycleService for StandardAgentLifecycleService {
    async fn create_agent(&self, draft: AgentDraft) -> Result<Agent, HubError> {
        draft.validate()?;

        let agent = self.rng.with(|rng| Agent::create(draft, rng));
        self.repository.insert(&agent).await?;

        info!(agent_id = %agent.id, name = %agent.name, agent_type = %agent.agent_type, "Agent created");
        self.event_bus.publish(HubEvent::AgentCreated {
            agent: agent.clone(),
            created_at: Utc::now(),
        });
        Ok(agent)
    }

    async fn update_agent(&self, id: AgentId, draft: AgentDraft) -> Result<Agent, HubError> {
        draft.validate()?;

        let mut draft = Some(draft);
        let agent = self
            .repository
            .modify(id, &mut |agent: &mut Agent| {
                if let Some(draft) = draft.take() {
                    agent.apply_draft(draft);
                }
            })
            .await?;

        info!(agent_id = %id, "Agent updated");
        self.event_bus.publish(HubEvent::AgentUpdated {
            agent: agent.clone(),
            updated_at: Utc::now(),
        });
        Ok(agent)
    }

    async fn remove_agent(&self, id: AgentId) -> Result<Agent, HubError> {
        let removed = self.repository.delete(id).await?;
        let cancelled_replies = self.conversations.delete_log(id).await?;

        info!(agent_id = %id, cancelled_replies, "Agent removed");
        self.event_bus.publish(HubEvent::AgentRemoved {
            agent_id: id,
            cancelled_replies,
            removed_at: Utc::now(),
        });
        Ok(removed)
    }

    async fn get_agent(&self, id: AgentId) -> Result<Agent, HubError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(HubError::AgentNotFound(id))
    }

    async fn list_agents(&self) -> Result<Vec<Agent>, HubError> {
        Ok(self.repository.list_all().await?)
    }

    async fn supervisor(&self) -> Result<Option<Agent>, HubError> {
        Ok(self
            .repository
            .list_all()
            .await?
            .into_iter()
            .find(Agent::is_supervisor))
    }

    async fn regular_agents(&self) -> Result<Vec<Agent>, HubError> {
        let mut agents = self.repository.list_all().await?;
        agents.retain(|a| !a.is_supervisor());
        Ok(agents)
    }

    async fn seed(&self, agents: Vec<Agent>) -> Result<usize, HubError> {
        let count = agents.len();
        for agent in agents {
            self.repository.insert(&agent).await?;
            debug!(agent_id = %agent.id, name = %agent.name, "Seeded agent");
            self.event_bus.publish(HubEvent::AgentCreated {
                agent,
                created_at: Utc::now(),
            });
        }
        info!(count, "Seeded agent fleet");
        Ok(count)
    }

    async fn set_status(&self, id: AgentId, status: AgentStatus) -> Result<Agent, HubError> {
        let agent = self
            .repository
            .modify(id, &mut |agent: &mut Agent| agent.status = status)
            .await?;

        info!(agent_id = %id, status = %status, "Agent status changed");
        self.event_bus.publish(HubEvent::AgentUpdated {
            agent: agent.clone(),
            updated_at: Utc::now(),
        });
        Ok(agent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::conversation::ConversationConfig;
    use crate::application::language::LanguageHandle;
    use crate::domain::agent::AgentType;
    use crate::domain::error::ValidationError;
    use crate::infrastructure::repositories::{
        InMemoryAgentRepository, InMemoryConversationRepository,
    };
    use crate::domain::repository::RepositoryError;
    use crate::infrastructure::seed::seed_fleet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio_util::sync::CancellationToken;

    /// Runs a simulation-style drift around every read and mutation, so
    /// a copy taken before the drift would overwrite it.
    struct DriftingRepository {
        inner: InMemoryAgentRepository,
        drifts: AtomicUsize,
    }

    impl DriftingRepository {
        async fn drift(&self) {
            self.inner
                .update_all(&mut |agent: &mut Agent| agent.performance.drift(-1.0, -1.0))
                .await
                .unwrap();
            self.drifts.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl AgentRepository for DriftingRepository {
        async fn insert(&self, agent: &Agent) -> Result<(), RepositoryError> {
            self.inner.insert(agent).await
        }

        async fn modify(
            &self,
            id: AgentId,
            f: &mut (dyn for<'a> FnMut(&'a mut Agent) + Send),
        ) -> Result<Agent, RepositoryError> {
            self.drift().await;
            self.inner.modify(id, f).await
        }

        async fn find_by_id(&self, id: AgentId) -> Result<Option<Agent>, RepositoryError> {
            let found = self.inner.find_by_id(id).await;
            self.drift().await;
            found
        }

        async fn find_by_name(&self, name: &str) -> Result<Option<Agent>, RepositoryError> {
            self.inner.find_by_name(name).await
        }

        async fn list_all(&self) -> Result<Vec<Agent>, RepositoryError> {
            self.inner.list_all().await
        }

        async fn update_all(
            &self,
            f: &mut (dyn for<'a> FnMut(&'a mut Agent) + Send),
        ) -> Result<usize, RepositoryError> {
            self.inner.update_all(f).await
        }

        async fn delete(&self, id: AgentId) -> Result<Agent, RepositoryError> {
            self.inner.delete(id).await
        }
    }

    fn service() -> StandardAgentLifecycleService {
        service_with(Arc::new(InMemoryAgentRepository::new()))
    }

    fn service_with(repository: Arc<dyn AgentRepository>) -> StandardAgentLifecycleService {
        let rng = SharedRng::seeded(11);
        let event_bus = EventBus::new(64);
        let conversations = Arc::new(ConversationService::new(
            repository.clone(),
            Arc::new(InMemoryConversationRepository::new()),
            event_bus.clone(),
            rng.clone(),
            LanguageHandle::new("en"),
            ConversationConfig::default(),
            CancellationToken::new(),
        ));
        StandardAgentLifecycleService::new(repository, conversations, event_bus, rng)
    }

    fn draft(agent_type: AgentType) -> AgentDraft {
        AgentDraft {
            name: "X".into(),
            role: "Y".into(),
            description: "Z".into(),
            api_key: "K".into(),
            agent_type,
        }
    }

    #[tokio::test]
    async fn test_create_agent_seeds_ranges() {
        let service = service();
        let agent = service.create_agent(draft(AgentType::Search)).await.unwrap();

        assert_eq!(agent.status, AgentStatus::Active);
        assert_eq!(agent.agent_type, AgentType::Search);
        assert!((85.0..=95.0).contains(&agent.performance.accuracy));
        assert!((80.0..=95.0).contains(&agent.performance.efficiency));
        assert!((75.0..=95.0).contains(&agent.performance.uniqueness));
        assert!((90.0..=100.0).contains(&agent.performance.value));
        assert!((70.0..=95.0).contains(&agent.performance.demand));
        assert!((50..150).contains(&agent.total_tasks));
        assert!((85.0..=95.0).contains(&agent.success_rate));
        assert_eq!(agent.last_activity, agent.last_training);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_fields_without_insert() {
        let service = service();
        let mut bad = draft(AgentType::Custom);
        bad.api_key = "   ".into();

        let err = service.create_agent(bad).await.unwrap_err();
        assert!(matches!(err, HubError::Validation(ValidationError::EmptyField("apiKey"))));
        assert!(service.list_agents().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_preserves_runtime_fields() {
        let service = service();
        let original = service.create_agent(draft(AgentType::Custom)).await.unwrap();

        let edited = AgentDraft {
            name: "New".into(),
            role: "Role".into(),
            description: "Desc".into(),
            api_key: "K2".into(),
            agent_type: AgentType::Crew,
        };
        let updated = service.update_agent(original.id, edited).await.unwrap();

        assert_eq!(updated.name, "New");
        assert_eq!(updated.agent_type, AgentType::Crew);
        assert_eq!(updated.performance, original.performance);
        assert_eq!(updated.status, original.status);
        assert_eq!(updated.last_activity, original.last_activity);
        assert_eq!(updated.last_training, original.last_training);
        assert_eq!(updated.total_tasks, original.total_tasks);
        assert_eq!(updated.success_rate, original.success_rate);
        assert_eq!(service.get_agent(original.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_unknown_ids_are_not_found() {
        let service = service();
        let ghost = AgentId::new();
        assert!(service.update_agent(ghost, draft(AgentType::Custom)).await.unwrap_err().is_not_found());
        assert!(service.remove_agent(ghost).await.unwrap_err().is_not_found());
        assert!(service.set_status(ghost, AgentStatus::Idle).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_supervisor_split_and_resolve() {
        let service = service();
        service.seed(seed_fleet("en")).await.unwrap();

        let supervisor = service.supervisor().await.unwrap().unwrap();
        assert_eq!(supervisor.name, "ARIA-X1");
        let regular = service.regular_agents().await.unwrap();
        assert_eq!(regular.len(), 4);
        assert!(regular.iter().all(|a| !a.is_supervisor()));

        assert_eq!(service.resolve("quantanalyst").await.unwrap().name, "QuantAnalyst");
        let by_id = service.resolve(&supervisor.id.to_string()).await.unwrap();
        assert_eq!(by_id.id, supervisor.id);
        assert!(service.resolve("nobody").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_set_status() {
        let service = service();
        let agent = service.create_agent(draft(AgentType::Custom)).await.unwrap();
        let updated = service.set_status(agent.id, AgentStatus::Error).await.unwrap();
        assert_eq!(updated.status, AgentStatus::Error);
        assert_eq!(updated.performance, agent.performance);
    }

    #[tokio::test]
    async fn test_edits_keep_concurrent_drift() {
        let repository = Arc::new(DriftingRepository {
            inner: InMemoryAgentRepository::new(),
            drifts: AtomicUsize::new(0),
        });
        let service = service_with(repository.clone());
        let original = service.create_agent(draft(AgentType::Custom)).await.unwrap();

        service.update_agent(original.id, draft(AgentType::Search)).await.unwrap();
        service.set_status(original.id, AgentStatus::Idle).await.unwrap();

        let drifts = repository.drifts.load(Ordering::SeqCst) as f64;
        assert!(drifts >= 2.0);
        let stored = repository.inner.find_by_id(original.id).await.unwrap().unwrap();
        assert_eq!(stored.agent_type, AgentType::Search);
        assert_eq!(stored.status, AgentStatus::Idle);
        assert!((stored.performance.accuracy - (original.performance.accuracy - drifts)).abs() < 1e-9);
        assert!((stored.performance.efficiency - (original.performance.efficiency - drifts)).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_resolve_seed_agent_by_name_in_other_language() {
        let service = service();
        service.seed(seed_fleet("ru")).await.unwrap();

        let supervisor = service.resolve("ARIA-X1").await.unwrap();
        assert!(supervisor.is_supervisor());
        assert_ne!(supervisor.name, "ARIA-X1");

        service.remove_agent(supervisor.id).await.unwrap();
        assert!(matches!(
            service.resolve("ARIA-X1").await.unwrap_err(),
            HubError::NoSuchAgent(_)
        ));
    }
}
