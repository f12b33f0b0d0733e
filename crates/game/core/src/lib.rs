//! Pure, deterministic game logic for the saga session engine.
//!
//! This crate owns the data model, the combat resolution engine, the
//! progression rules, and the session reducer. It performs no I/O, holds no
//! clock, and draws randomness only through the injectable [`rng::DiceSource`]
//! so every battle can be replayed under a seeded generator. Runtime layers
//! clone or query the state but mutate it exclusively through
//! [`engine::SessionEngine`].
pub mod combat;
pub mod config;
pub mod engine;
pub mod progression;
pub mod rng;
pub mod state;

pub use combat::{
    CombatEvent, Combatant, EnemyMove, EnemyTurnOutcome, PlayerAction, PlayerActionOutcome,
    StatusTick, TurnHandoff,
};
pub use config::{BalanceTable, GameLimits};
pub use engine::{
    Effect, ExplorePayload, PopupKind, ScenePayload, SessionEngine, SessionEvent,
};
pub use progression::VictoryGrant;
pub use rng::{DiceSource, PcgDice, ScriptedDice};
pub use state::{
    AiPersonality, AssetId, ClassKind, Element, Enemy, EnemyAbility, GameAction, GameActionKind,
    GamePhase, Inventory, Item, ItemKind, ItemStack, Journal, Location, LocationId, Player, Pool,
    Quest,
    QuestStatus, RingLog, SAVE_VERSION, SaveError, SaveRecord, SessionState, SocialChoice,
    SocialEncounter, SocialReward, StatusEffect, StatusEffectKind, StatusEffects, World,
};
