//! Session worker that owns the authoritative [`SessionState`].
//!
//! Receives commands from [`crate::api::SessionHandle`], applies events
//! through [`saga_core::engine::SessionEngine`], and publishes observable
//! effects to the event bus. Because the worker processes one command at a
//! time, one event is always fully resolved before the next is accepted.

use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use saga_core::config::BalanceTable;
use saga_core::engine::{Effect, SessionEngine, SessionEvent};
use saga_core::rng::DiceSource;
use saga_core::state::SessionState;

use crate::events::{BusEvent, EventBus};

/// Commands that can be sent to the session worker.
pub enum Command {
    /// Apply one reducer event; replies with the resulting effects.
    Dispatch {
        event: SessionEvent,
        reply: oneshot::Sender<Vec<Effect>>,
    },
    /// Query the current session state (read-only snapshot).
    Query { reply: oneshot::Sender<SessionState> },
}

/// Background task that applies session events.
///
/// The worker is the only writer of the canonical state; the dice source
/// lives here so every draw flows through one generator.
pub struct SessionWorker {
    state: SessionState,
    table: BalanceTable,
    dice: Box<dyn DiceSource + Send>,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
}

impl SessionWorker {
    pub fn new(
        table: BalanceTable,
        dice: Box<dyn DiceSource + Send>,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            state: SessionState::new(),
            table,
            dice,
            command_rx,
            event_bus,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                Some(cmd) = self.command_rx.recv() => {
                    self.handle_command(cmd);
                }
                else => break,
            }
        }
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Dispatch { event, reply } => {
                let phase_before = self.state.phase;
                let effects =
                    SessionEngine::new(&mut self.state, &self.table).apply(event, self.dice.as_mut());

                if self.state.phase != phase_before {
                    self.event_bus.publish(BusEvent::PhaseChanged {
                        phase: self.state.phase,
                    });
                }
                for effect in &effects {
                    self.publish_effect(effect);
                }

                if reply.send(effects).is_err() {
                    debug!("Dispatch reply channel closed (caller dropped)");
                }
            }
            Command::Query { reply } => {
                if reply.send(self.state.clone()).is_err() {
                    debug!("Query reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn publish_effect(&self, effect: &Effect) {
        match effect {
            Effect::Log(line) => self.event_bus.publish(BusEvent::Narration(line.clone())),
            Effect::Popup { kind, text } => self.event_bus.publish(BusEvent::Popup {
                kind: *kind,
                text: text.clone(),
            }),
            Effect::LevelUp { level } => {
                self.event_bus.publish(BusEvent::LevelUp { level: *level });
            }
            Effect::GameOver => self.event_bus.publish(BusEvent::GameOver),
            // Request effects are answered by the orchestrator, not surfaced
            Effect::SceneRequest
            | Effect::EncounterRequest
            | Effect::SocialRequest
            | Effect::ExploreRequest { .. }
            | Effect::WorldRequest
            | Effect::EnemyPhase
            | Effect::SaveReady { .. } => {}
        }
    }
}
