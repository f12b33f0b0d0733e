//! Cloneable façade for issuing events to the session worker.
//!
//! [`SessionHandle`] hides channel plumbing and offers async helpers for
//! dispatching reducer events or streaming bus events from specific topics.

use tokio::sync::{broadcast, mpsc, oneshot};

use saga_core::engine::{Effect, SessionEvent};
use saga_core::state::SessionState;

use super::errors::{Result, SessionError};
use crate::events::{BusEvent, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the session worker.
#[derive(Clone)]
pub struct SessionHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl SessionHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    /// Applies one reducer event and returns its observable effects.
    ///
    /// Events queue on the worker's channel, so one event is fully resolved
    /// before the next is accepted.
    pub async fn dispatch(&self, event: SessionEvent) -> Result<Vec<Effect>> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Dispatch {
                event,
                reply: reply_tx,
            })
            .await
            .map_err(|_| SessionError::CommandChannelClosed)?;

        reply_rx.await.map_err(SessionError::ReplyChannelClosed)
    }

    /// Query the current session state (read-only snapshot).
    pub async fn query_state(&self) -> Result<SessionState> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Query { reply: reply_tx })
            .await
            .map_err(|_| SessionError::CommandChannelClosed)?;

        reply_rx.await.map_err(SessionError::ReplyChannelClosed)
    }

    /// Subscribe to bus events from a specific topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<BusEvent> {
        self.event_bus.subscribe(topic)
    }

    /// Get a reference to the event bus for advanced usage.
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
