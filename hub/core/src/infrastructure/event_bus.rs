// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Event Bus Implementation - Pub/Sub for Hub Events
//
// In-memory fan-out over a tokio broadcast channel. Every store mutation
// publishes a HubEvent; renderers subscribe and redraw on receipt.
// Events published with no subscribers are dropped.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::domain::agent::AgentId;
use crate::domain::events::HubEvent;

/// Event bus for publishing and subscribing to hub events
#[derive(Clone)]
pub struct EventBus {
    sender: Arc<broadcast::Sender<HubEvent>>,
}

impl EventBus {
    /// Capacity is how many events a slow subscriber may fall behind
    /// before it starts losing the oldest ones.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Create event bus with default capacity (1000)
    pub fn with_default_capacity() -> Self {
        Self::new(1000)
    }

    /// Publish an event to all subscribers
    pub fn publish(&self, event: HubEvent) {
        debug!(?event, "Publishing hub event");

        let receiver_count = self.sender.send(event).unwrap_or(0);
        if receiver_count == 0 {
            debug!("No subscribers listening to event");
        }
    }

    /// Subscribe to all hub events
    pub fn subscribe(&self) -> EventReceiver {
        EventReceiver {
            receiver: self.sender.subscribe(),
        }
    }

    /// Subscribe to events concerning a single agent
    pub fn subscribe_agent(&self, agent_id: AgentId) -> AgentEventReceiver {
        AgentEventReceiver {
            receiver: self.sender.subscribe(),
            agent_id,
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

fn map_recv_error(e: broadcast::error::RecvError) -> EventBusError {
    match e {
        broadcast::error::RecvError::Closed => EventBusError::Closed,
        broadcast::error::RecvError::Lagged(n) => {
            warn!("Event receiver lagged by {} events", n);
            EventBusError::Lagged(n)
        }
    }
}

/// Receiver for all hub events
pub struct EventReceiver {
    receiver: broadcast::Receiver<HubEvent>,
}

impl EventReceiver {
    /// Wait for the next event
    pub async fn recv(&mut self) -> Result<HubEvent, EventBusError> {
        self.receiver.recv().await.map_err(map_recv_error)
    }

    /// Try to receive an event without blocking
    pub fn try_recv(&mut self) -> Result<HubEvent, EventBusError> {
        self.receiver.try_recv().map_err(|e| match e {
            broadcast::error::TryRecvError::Empty => EventBusError::Empty,
            broadcast::error::TryRecvError::Closed => EventBusError::Closed,
            broadcast::error::TryRecvError::Lagged(n) => {
                warn!("Event receiver lagged by {} events", n);
                EventBusError::Lagged(n)
            }
        })
    }
}

/// Receiver filtered to one agent
pub struct AgentEventReceiver {
    receiver: broadcast::Receiver<HubEvent>,
    agent_id: AgentId,
}

impl AgentEventReceiver {
    /// Next event whose `agent_id()` matches; other events are skipped
    pub async fn recv(&mut self) -> Result<HubEvent, EventBusError> {
        loop {
            let event = self.receiver.recv().await.map_err(map_recv_error)?;
            if event.agent_id() == Some(self.agent_id) {
                return Ok(event);
            }
        }
    }
}

/// Errors that can occur when receiving events
#[derive(Debug, thiserror::Error)]
pub enum EventBusError {
    #[error("Event bus is closed")]
    Closed,

    #[error("No events available")]
    Empty,

    #[error("Receiver lagged by {0} events (events were dropped)")]
    Lagged(u64),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chat::ChatMessage;
    use crate::domain::language::View;

    #[tokio::test]
    async fn test_event_bus_publish_subscribe() {
        let event_bus = EventBus::new(10);
        let mut receiver = event_bus.subscribe();

        event_bus.publish(HubEvent::ViewChanged { view: View::Management });

        match receiver.recv().await.unwrap() {
            HubEvent::ViewChanged { view } => assert_eq!(view, View::Management),
            other => panic!("Wrong event type received: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_agent_event_filtering() {
        let event_bus = EventBus::new(10);
        let agent_id = AgentId::new();
        let other_agent = AgentId::new();
        let mut receiver = event_bus.subscribe_agent(agent_id);

        event_bus.publish(HubEvent::MessageAppended {
            agent_id: other_agent,
            message: ChatMessage::from_user("not for us"),
        });
        event_bus.publish(HubEvent::ViewChanged { view: View::Chat });
        event_bus.publish(HubEvent::MessageAppended {
            agent_id,
            message: ChatMessage::from_user("hello"),
        });

        match receiver.recv().await.unwrap() {
            HubEvent::MessageAppended { agent_id: id, message } => {
                assert_eq!(id, agent_id);
                assert_eq!(message.content, "hello");
            }
            other => panic!("Wrong event type received: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_multiple_subscribers() {
        let event_bus = EventBus::new(10);
        let mut receiver1 = event_bus.subscribe();
        let mut receiver2 = event_bus.subscribe();
        assert_eq!(event_bus.subscriber_count(), 2);

        event_bus.publish(HubEvent::ChatOpened { agent_id: AgentId::new() });

        assert!(receiver1.recv().await.is_ok());
        assert!(receiver2.recv().await.is_ok());
        assert!(matches!(receiver1.try_recv(), Err(EventBusError::Empty)));
    }

    #[tokio::test]
    async fn test_lagging_receiver_reports_drop_count() {
        let event_bus = EventBus::new(2);
        let mut receiver = event_bus.subscribe();
        for _ in 0..5 {
            event_bus.publish(HubEvent::ViewChanged { view: View::Dashboard });
        }
        assert!(matches!(receiver.recv().await, Err(EventBusError::Lagged(3))));
    }
}
