//! The closed event set accepted by the session reducer.
//!
//! Every way the outside world can poke the session is a variant here and
//! is matched exhaustively; an unrecognized event is unrepresentable.
//! Events that do not apply to the current phase resolve to silent no-ops.

use crate::combat::PlayerAction;
use crate::state::{
    ClassKind, Enemy, GameAction, Item, LocationId, SaveRecord, SocialEncounter, World,
};

/// Generated scene content for the current location.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenePayload {
    pub text: String,
    /// Location-specific actions; travel actions are appended by the
    /// reducer from the world graph.
    pub actions: Vec<GameAction>,
    pub found_item: Option<Item>,
}

/// Generated result of poking around the current location.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExplorePayload {
    pub outcome: String,
    pub found_item: Option<Item>,
    pub trigger_combat: bool,
    pub trigger_social: bool,
}

/// An input to the session reducer.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    /// Reset everything and open character creation.
    NewGame,
    /// Finish character creation.
    CreateCharacter { name: String, class: ClassKind },
    /// The content layer delivered the world graph for a fresh game.
    WorldReady { world: World, start: LocationId },
    /// The content layer delivered scene text for the current location.
    SceneReady { scene: ScenePayload, degraded: bool },
    /// Travel along a connection of the current location.
    Move { target: LocationId },
    /// Poke around the current location.
    Explore,
    /// Seek out a fight directly.
    SeekEncounter,
    /// The content layer delivered an exploration result.
    ExploreOutcome { result: ExplorePayload, degraded: bool },
    /// The content layer delivered an encounter; replaces the enemy list.
    EncounterReady { enemies: Vec<Enemy>, degraded: bool },
    /// The content layer delivered a social encounter.
    SocialReady {
        encounter: SocialEncounter,
        degraded: bool,
    },
    /// The player picked a social choice by index.
    SocialChoice { index: usize },
    /// A narrative beat closed out a journal quest.
    QuestResolved {
        id: String,
        success: bool,
        outcome: String,
    },
    /// Consume an inventory item (out of combat; in combat it routes
    /// through the combat engine and costs the turn).
    UseItem { name: String },
    /// A player combat command.
    Combat(PlayerAction),
    /// Run one enemy's action slot.
    EnemyTurn { index: usize },
    /// The enemy phase driver finished iterating.
    EnemyPhaseEnd,
    /// Append a narration line to the session log.
    AppendLog { line: String },
    /// Narrative XP award.
    GrantXp { amount: u64 },
    /// Narrative item award.
    GrantItem { item: Item },
    /// Capture a save record for the given slot. The caller stamps the
    /// timestamp; the engine holds no clock.
    SaveRequested { slot: String, timestamp: i64 },
    /// Restore a previously captured record.
    LoadGame { record: SaveRecord },
}
