//! High-level session orchestrator.
//!
//! [`Session`] owns the background worker, answers the reducer's request
//! effects (content, persistence), and drives the paced enemy phase. The
//! reducer itself stays pure; everything timed, fallible, or external
//! happens here.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use saga_core::config::BalanceTable;
use saga_core::engine::{Effect, SessionEvent};
use saga_core::rng::{DiceSource, PcgDice};
use saga_core::state::GamePhase;

use crate::api::{ContentProvider, FallbackContent, Result, SessionError, SessionHandle};
use crate::events::{BusEvent, EventBus, Topic};
use crate::repository::{
    AssetRepository, InMemoryAssetRepo, InMemorySaveRepo, SaveMetadata, SaveRepository,
};
use crate::workers::SessionWorker;

/// Runtime configuration shared across the orchestrator and worker.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub table: BalanceTable,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Cosmetic pause between enemy action slots. Purely pacing; resolution
    /// order never depends on it.
    pub enemy_step_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            table: BalanceTable::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
            enemy_step_delay: Duration::from_millis(600),
        }
    }
}

/// Coordination state for the enemy phase driver: a single in-flight loop
/// flag plus a generation token so a stale loop can never act after combat
/// has moved on.
#[derive(Debug, Default)]
struct EnemyPhaseGuard {
    active: bool,
    operation: u64,
}

/// Main orchestrator for one play session.
pub struct Session {
    handle: SessionHandle,
    content: FallbackContent,
    saves: Arc<dyn SaveRepository>,
    assets: Arc<dyn AssetRepository>,
    config: SessionConfig,
    worker_handle: JoinHandle<()>,
    enemy_phase: EnemyPhaseGuard,
}

impl Session {
    /// Create a new session builder.
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    /// Get a cloneable handle to the session worker.
    pub fn handle(&self) -> SessionHandle {
        self.handle.clone()
    }

    /// Subscribe to bus events for a topic.
    pub fn subscribe(&self, topic: Topic) -> tokio::sync::broadcast::Receiver<BusEvent> {
        self.handle.subscribe(topic)
    }

    /// The asset store backing portraits and maps. The session only ever
    /// forwards ids into it.
    pub fn assets(&self) -> Arc<dyn AssetRepository> {
        Arc::clone(&self.assets)
    }

    /// Applies one event, then answers every request effect it produced
    /// (content generation, save I/O, the enemy phase) before returning.
    pub async fn dispatch(&mut self, event: SessionEvent) -> Result<Vec<Effect>> {
        let effects = self.handle.dispatch(event).await?;
        self.run_follow_ups(effects.clone()).await?;
        Ok(effects)
    }

    /// Captures the current session into a slot.
    pub async fn save(&mut self, slot: &str) -> Result<Vec<Effect>> {
        let timestamp = chrono::Utc::now().timestamp_millis();
        self.dispatch(SessionEvent::SaveRequested {
            slot: slot.to_owned(),
            timestamp,
        })
        .await
    }

    /// Restores a slot. Structural validation happens in the reducer; a
    /// storage fault surfaces here without touching session state.
    pub async fn load(&mut self, slot: &str) -> Result<Vec<Effect>> {
        let record = self
            .saves
            .get(slot)?
            .ok_or_else(|| SessionError::EmptySlot(slot.to_owned()))?;
        self.dispatch(SessionEvent::LoadGame { record }).await
    }

    /// Metadata for every occupied save slot.
    pub fn list_saves(&self) -> Result<Vec<SaveMetadata>> {
        Ok(self.saves.list()?)
    }

    /// Shutdown the session gracefully.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);
        self.worker_handle.await.map_err(SessionError::WorkerJoin)
    }

    /// Answers request effects until none remain. Content requests turn
    /// into follow-up events whose own effects join the queue; the enemy
    /// phase is driven to completion inline.
    async fn run_follow_ups(&mut self, effects: Vec<Effect>) -> Result<()> {
        let mut queue: VecDeque<Effect> = effects.into();
        while let Some(effect) = queue.pop_front() {
            match effect {
                Effect::WorldRequest => {
                    let (world, start) = saga_content::catalog::starter_world();
                    let more = self
                        .handle
                        .dispatch(SessionEvent::WorldReady { world, start })
                        .await?;
                    queue.extend(more);

                    let state = self.handle.query_state().await?;
                    if let Some(player) = &state.player {
                        for item in saga_content::catalog::starter_kit(player.class) {
                            let granted = self
                                .handle
                                .dispatch(SessionEvent::GrantItem { item })
                                .await?;
                            queue.extend(granted);
                        }
                    }
                }
                Effect::SceneRequest => {
                    let more = self.answer_scene_request().await?;
                    queue.extend(more);
                }
                Effect::EncounterRequest => {
                    let state = self.handle.query_state().await?;
                    let Some(player) = state.player else { continue };
                    let (enemies, degraded) = self.content.encounter(&player).await;
                    let more = self
                        .handle
                        .dispatch(SessionEvent::EncounterReady { enemies, degraded })
                        .await?;
                    queue.extend(more);
                }
                Effect::SocialRequest => {
                    let state = self.handle.query_state().await?;
                    let Some(player) = state.player else { continue };
                    let (encounter, degraded) = self.content.social(&player).await;
                    let more = self
                        .handle
                        .dispatch(SessionEvent::SocialReady { encounter, degraded })
                        .await?;
                    queue.extend(more);
                }
                Effect::ExploreRequest { action } => {
                    let state = self.handle.query_state().await?;
                    let Some(player) = state.player else { continue };
                    let (result, degraded) = self.content.explore(&player, &action).await;
                    let more = self
                        .handle
                        .dispatch(SessionEvent::ExploreOutcome { result, degraded })
                        .await?;
                    queue.extend(more);
                }
                Effect::EnemyPhase => {
                    self.drive_enemy_phase().await?;
                }
                Effect::SaveReady { slot, record } => {
                    if let Err(error) = self.saves.put(&slot, &record) {
                        warn!(%slot, %error, "saving failed");
                        self.handle.event_bus().publish(BusEvent::SaveFailed {
                            slot: slot.clone(),
                            reason: error.to_string(),
                        });
                        self.handle
                            .dispatch(SessionEvent::AppendLog {
                                line: format!("Saving failed: {error}."),
                            })
                            .await?;
                        return Err(error.into());
                    }
                    self.handle.event_bus().publish(BusEvent::Saved { slot });
                }
                Effect::Log(_)
                | Effect::Popup { .. }
                | Effect::LevelUp { .. }
                | Effect::GameOver => {}
            }
        }
        Ok(())
    }

    /// Fetches scene content for the current location and delivers it.
    /// Returns the effects of the `SceneReady` application (log lines and
    /// popups only; scenes never produce further requests).
    async fn answer_scene_request(&mut self) -> Result<Vec<Effect>> {
        let state = self.handle.query_state().await?;
        let Some(player) = state.player else {
            return Ok(Vec::new());
        };
        let Some(location) = state.world.location(state.location) else {
            return Ok(Vec::new());
        };
        let (scene, degraded) = self.content.scene(&player, location).await;
        self.handle
            .dispatch(SessionEvent::SceneReady { scene, degraded })
            .await
    }

    /// Runs the enemy phase: one paced step per enemy slot, in list order.
    ///
    /// A second loop may not start while one is active, and every step
    /// re-checks both the generation token and that combat is still live,
    /// so an abandoned battle aborts without further mutation.
    async fn drive_enemy_phase(&mut self) -> Result<()> {
        if self.enemy_phase.active {
            warn!("enemy phase requested while one is already running");
            return Ok(());
        }
        self.enemy_phase.active = true;
        self.enemy_phase.operation = self.enemy_phase.operation.wrapping_add(1);
        let operation = self.enemy_phase.operation;

        let result = self.run_enemy_phase(operation).await;
        self.enemy_phase.active = false;
        result
    }

    async fn run_enemy_phase(&mut self, operation: u64) -> Result<()> {
        let enemy_count = self.handle.query_state().await?.enemies.len();

        for index in 0..enemy_count {
            if operation != self.enemy_phase.operation {
                debug!(operation, "discarding stale enemy phase");
                return Ok(());
            }
            let state = self.handle.query_state().await?;
            if state.phase != GamePhase::Combat || state.is_player_turn {
                return Ok(());
            }

            if !self.config.enemy_step_delay.is_zero() {
                tokio::time::sleep(self.config.enemy_step_delay).await;
            }

            let effects = self
                .handle
                .dispatch(SessionEvent::EnemyTurn { index })
                .await?;
            if effects.contains(&Effect::GameOver) {
                // defeat halts the phase without running remaining enemies
                return Ok(());
            }
            if effects.contains(&Effect::SceneRequest) {
                // the battle resolved (victory pre-check) mid-phase
                self.answer_scene_request().await?;
                return Ok(());
            }
        }

        let effects = self.handle.dispatch(SessionEvent::EnemyPhaseEnd).await?;
        if effects.contains(&Effect::SceneRequest) {
            self.answer_scene_request().await?;
        }
        Ok(())
    }
}

/// Builder wiring providers, repositories, and dice into a running session.
pub struct SessionBuilder {
    config: SessionConfig,
    content: Option<Box<dyn ContentProvider>>,
    saves: Option<Arc<dyn SaveRepository>>,
    assets: Option<Arc<dyn AssetRepository>>,
    dice: Option<Box<dyn DiceSource + Send>>,
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self {
            config: SessionConfig::default(),
            content: None,
            saves: None,
            assets: None,
            dice: None,
        }
    }

    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Plug in a narrative generator. Without one the session plays from
    /// the built-in content.
    pub fn with_content(mut self, provider: impl ContentProvider + 'static) -> Self {
        self.content = Some(Box::new(provider));
        self
    }

    pub fn with_saves(mut self, saves: Arc<dyn SaveRepository>) -> Self {
        self.saves = Some(saves);
        self
    }

    pub fn with_assets(mut self, assets: Arc<dyn AssetRepository>) -> Self {
        self.assets = Some(assets);
        self
    }

    /// Inject a dice source. Tests script the draws; production defaults to
    /// a PCG generator seeded from OS entropy.
    pub fn with_dice(mut self, dice: impl DiceSource + Send + 'static) -> Self {
        self.dice = Some(Box::new(dice));
        self
    }

    /// Spawns the worker and returns the running session.
    pub fn build(self) -> Session {
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let (command_tx, command_rx) = mpsc::channel(self.config.command_buffer_size);

        let dice = self
            .dice
            .unwrap_or_else(|| Box::new(PcgDice::seeded(rand::random())));
        let worker = SessionWorker::new(
            self.config.table.clone(),
            dice,
            command_rx,
            event_bus.clone(),
        );
        let worker_handle = tokio::spawn(worker.run());

        let content = match self.content {
            Some(provider) => FallbackContent::new(provider),
            None => FallbackContent::builtin(),
        };

        Session {
            handle: SessionHandle::new(command_tx, event_bus),
            content,
            saves: self
                .saves
                .unwrap_or_else(|| Arc::new(InMemorySaveRepo::new())),
            assets: self
                .assets
                .unwrap_or_else(|| Arc::new(InMemoryAssetRepo::new())),
            config: self.config,
            worker_handle,
            enemy_phase: EnemyPhaseGuard::default(),
        }
    }
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}
