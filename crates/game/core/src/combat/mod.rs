//! Turn-based combat resolution.
//!
//! Combat is a sequence of discrete, synchronous resolution steps: one
//! player action, then one step per living enemy in list order. The runtime
//! layer paces and cancels between steps; this module owns ordering,
//! arithmetic, and terminal-state detection.

pub mod ai;
pub mod damage;
pub mod engine;
mod event;
pub mod status;

pub use ai::EnemyMove;
pub use engine::{
    EnemyTurnOutcome, PlayerAction, PlayerActionOutcome, TurnHandoff, resolve_enemy_turn,
    resolve_player_action,
};
pub use event::{Combatant, CombatEvent};
pub use status::StatusTick;
