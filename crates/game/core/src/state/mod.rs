//! Authoritative session state representation.
//!
//! This module owns the data structures that describe the player, enemies,
//! the world graph, the journal, and session bookkeeping. Runtime layers
//! clone or query this state but mutate it exclusively through the reducer
//! in [`crate::engine`].

mod common;
mod enemy;
mod item;
mod player;
mod quest;
mod save;
mod session;
mod status;
mod world;

pub use common::{AssetId, Pool};
pub use enemy::{AiPersonality, Element, Enemy, EnemyAbility};
pub use item::{Inventory, Item, ItemKind, ItemStack};
pub use player::{ClassKind, Player};
pub use quest::{Journal, Quest, QuestStatus};
pub use save::{SAVE_VERSION, SaveError, SaveRecord};
pub use session::{
    GameAction, GameActionKind, GamePhase, RingLog, SessionState, SocialChoice, SocialEncounter,
    SocialReward,
};
pub use status::{StatusEffect, StatusEffectKind, StatusEffects};
pub use world::{Location, LocationId, World};
