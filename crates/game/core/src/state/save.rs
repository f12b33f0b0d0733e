//! Save records and structural validation.
//!
//! The engine builds and validates save payloads; actually persisting them
//! is the save store's job in the runtime layer.

use super::player::Player;
use super::session::{GameAction, GamePhase, RingLog, SessionState};
use super::world::{LocationId, World};

/// Current save format version. Records with another version are rejected.
pub const SAVE_VERSION: u32 = 1;

/// Why a save record was rejected on load.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SaveError {
    #[error("unsupported save version {0} (expected {SAVE_VERSION})")]
    UnsupportedVersion(u32),
    #[error("save record has an empty world graph")]
    EmptyWorld,
    #[error("save location {0:?} is not part of the world graph")]
    UnknownLocation(LocationId),
    #[error("player health exceeds its maximum")]
    CorruptPlayer,
    #[error("session has no player to save")]
    NoPlayer,
}

/// A complete, self-contained save payload for one slot.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaveRecord {
    pub id: String,
    /// Unix milliseconds, stamped by the caller (the engine holds no clock).
    pub timestamp: i64,
    pub version: u32,
    pub player: Player,
    pub story_text: String,
    pub actions: Vec<GameAction>,
    pub log: Vec<String>,
    pub world: World,
    pub location: LocationId,
}

impl SaveRecord {
    /// Captures the current session into a record. Fails when there is no
    /// player yet.
    pub fn capture(
        state: &SessionState,
        id: impl Into<String>,
        timestamp: i64,
    ) -> Result<Self, SaveError> {
        let player = state.player.clone().ok_or(SaveError::NoPlayer)?;
        Ok(Self {
            id: id.into(),
            timestamp,
            version: SAVE_VERSION,
            player,
            story_text: state.story_text.clone(),
            actions: state.actions.clone(),
            log: state.log.to_lines(),
            world: state.world.clone(),
            location: state.location,
        })
    }

    /// Structural validation applied before a record is accepted for
    /// restore. Storage faults aside, this is what keeps a bad file from
    /// corrupting a running session.
    pub fn validate(&self) -> Result<(), SaveError> {
        if self.version != SAVE_VERSION {
            return Err(SaveError::UnsupportedVersion(self.version));
        }
        if self.world.is_empty() {
            return Err(SaveError::EmptyWorld);
        }
        if !self.world.contains(self.location) {
            return Err(SaveError::UnknownLocation(self.location));
        }
        if self.player.hp.current() > self.player.hp.max() {
            return Err(SaveError::CorruptPlayer);
        }
        Ok(())
    }

    /// Rebuilds a session from this record. The record must already be
    /// validated.
    pub fn restore(self) -> SessionState {
        SessionState {
            phase: GamePhase::Exploring,
            player: Some(self.player),
            enemies: Vec::new(),
            story_text: self.story_text,
            actions: self.actions,
            log: RingLog::from_lines(self.log),
            is_player_turn: false,
            social: None,
            world: self.world,
            location: self.location,
        }
    }
}
