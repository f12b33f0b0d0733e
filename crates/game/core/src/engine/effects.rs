//! Observable effects returned by the reducer.
//!
//! Effects are the only channel from the pure core to the outside: the
//! runtime surfaces log lines and popups to the player and answers the
//! request effects (scene, encounter, save) by dispatching follow-up
//! events.

use crate::state::{GameAction, SaveRecord};

/// Tag for transient UI popups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PopupKind {
    Item,
    Xp,
    Heal,
    Info,
    Quest,
}

/// A single observable consequence of an accepted event.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Ordered narration line (ring-buffered in the session log).
    Log(String),
    /// Transient popup for the presentation layer.
    Popup { kind: PopupKind, text: String },
    /// The player reached a new level.
    LevelUp { level: u32 },
    /// The session entered its terminal state.
    GameOver,
    /// Ask the content layer for scene text at the current location.
    SceneRequest,
    /// Ask the content layer for an encounter.
    EncounterRequest,
    /// Ask the content layer for a social encounter.
    SocialRequest,
    /// Ask the content layer to resolve an exploration.
    ExploreRequest { action: GameAction },
    /// Ask the content layer for a fresh world graph.
    WorldRequest,
    /// The enemy phase should be driven (paced, cancelable) by the runtime.
    EnemyPhase,
    /// A save payload ready for the save store.
    SaveReady { slot: String, record: SaveRecord },
}
