//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{RwLock, broadcast};

use saga_core::engine::PopupKind;
use saga_core::state::GamePhase;

/// Topics for event routing.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Ordered narration lines (the session log stream).
    Narration,
    /// Transient popups (item/xp/heal/info/quest).
    Popup,
    /// Session lifecycle: phase changes, level-ups, game over, saves.
    Session,
}

/// Event wrapper carrying the typed payload for each topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BusEvent {
    Narration(String),
    Popup { kind: PopupKind, text: String },
    PhaseChanged { phase: GamePhase },
    LevelUp { level: u32 },
    GameOver,
    Saved { slot: String },
    SaveFailed { slot: String, reason: String },
}

impl BusEvent {
    pub fn topic(&self) -> Topic {
        match self {
            BusEvent::Narration(_) => Topic::Narration,
            BusEvent::Popup { .. } => Topic::Popup,
            BusEvent::PhaseChanged { .. }
            | BusEvent::LevelUp { .. }
            | BusEvent::GameOver
            | BusEvent::Saved { .. }
            | BusEvent::SaveFailed { .. } => Topic::Session,
        }
    }
}

/// Topic-based event bus.
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about.
pub struct EventBus {
    channels: Arc<RwLock<HashMap<Topic, broadcast::Sender<BusEvent>>>>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic.
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut channels = HashMap::new();

        // Pre-create channels for each topic
        channels.insert(Topic::Narration, broadcast::channel(capacity).0);
        channels.insert(Topic::Popup, broadcast::channel(capacity).0);
        channels.insert(Topic::Session, broadcast::channel(capacity).0);

        Self {
            channels: Arc::new(RwLock::new(channels)),
        }
    }

    /// Publish an event to its corresponding topic.
    pub fn publish(&self, event: BusEvent) {
        let topic = event.topic();

        // Use try_read to avoid blocking in async context; publishing is
        // best-effort.
        match self.channels.try_read() {
            Ok(channels) => {
                if let Some(tx) = channels.get(&topic)
                    && tx.send(event).is_err()
                {
                    // No subscribers for this topic - normal, not an error
                    tracing::trace!("No subscribers for topic {:?}", topic);
                }
            }
            Err(_) => {
                tracing::debug!("Failed to acquire event bus lock for topic {:?}", topic);
            }
        }
    }

    /// Subscribe to a specific topic.
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<BusEvent> {
        let channels = self
            .channels
            .try_read()
            .expect("Failed to acquire read lock on event channels");
        channels
            .get(&topic)
            .expect("Topic channel not initialized")
            .subscribe()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            channels: Arc::clone(&self.channels),
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn events_route_to_their_topic_only() {
        let bus = EventBus::new();
        let mut narration = bus.subscribe(Topic::Narration);
        let mut session = bus.subscribe(Topic::Session);

        bus.publish(BusEvent::Narration("The rain begins.".into()));
        bus.publish(BusEvent::GameOver);

        assert!(matches!(
            narration.try_recv(),
            Ok(BusEvent::Narration(line)) if line == "The rain begins."
        ));
        assert!(narration.try_recv().is_err());
        assert!(matches!(session.try_recv(), Ok(BusEvent::GameOver)));
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        let bus = EventBus::new();
        bus.publish(BusEvent::LevelUp { level: 2 });
    }
}
