//! Damage arithmetic and the mitigation chain.
//!
//! All functions are total: inputs are clamped, outputs are non-negative
//! integers, and a target's HP after a hit is `max(0, hp - mitigated)` via
//! the pool's own clamping.

use crate::config::BalanceTable;
use crate::rng::DiceSource;
use crate::state::{Enemy, Player, StatusEffectKind};

/// Rolls base damage: `floor(attack_value + uniform(-spread, spread))`,
/// clamped at zero.
pub fn roll_base(attack_value: f64, spread: f64, dice: &mut dyn DiceSource) -> u32 {
    let raw = attack_value + dice.range(-spread, spread);
    raw.floor().max(0.0) as u32
}

/// Applies the critical roll: damage is multiplied after the jitter roll
/// and before any target mitigation.
pub fn roll_crit(damage: u32, table: &BalanceTable, dice: &mut dyn DiceSource) -> (u32, bool) {
    if dice.chance(table.crit_chance) {
        (damage * table.crit_multiplier, true)
    } else {
        (damage, false)
    }
}

/// Chill on the attacker: outgoing damage loses a fixed fraction.
pub fn chilled_output(damage: u32, table: &BalanceTable) -> u32 {
    scale(damage, 1.0 - table.chill_output_reduction)
}

/// Mitigation for damage arriving at an enemy: shield halves (floor), then
/// the bearer's own status modifiers apply.
pub fn mitigate_enemy_bound(damage: u32, enemy: &Enemy, table: &BalanceTable) -> u32 {
    let mut damage = damage;
    if enemy.is_shielded {
        damage /= 2;
    }
    status_modifiers(damage, &enemy.status_effects, table)
}

/// Mitigation for physical damage arriving at the player: Defend halves
/// (minimum 1), status modifiers apply, then flat defense subtracts
/// (minimum 1).
pub fn mitigate_player_bound(damage: u32, player: &Player, table: &BalanceTable) -> u32 {
    let mut damage = damage;
    if player.is_defending {
        damage = (damage / 2).max(1);
    }
    damage = status_modifiers(damage, &player.status_effects, table);
    damage.saturating_sub(player.defense).max(1)
}

/// DrainLife mitigation: Defend halves (minimum 1), then flat defense
/// subtracts (minimum 1). Status modifiers do not apply to drains.
pub fn mitigate_drain(damage: u32, player: &Player) -> u32 {
    let mut damage = damage;
    if player.is_defending {
        damage = (damage / 2).max(1);
    }
    damage.saturating_sub(player.defense).max(1)
}

/// Grounded raises damage taken; EarthArmor lowers it. Applied from the
/// target's own effect set by the attacker's damage computation.
fn status_modifiers(
    damage: u32,
    effects: &crate::state::StatusEffects,
    table: &BalanceTable,
) -> u32 {
    let mut damage = damage;
    if effects.has(StatusEffectKind::Grounded) {
        damage = scale(damage, 1.0 + table.grounded_vulnerability);
    }
    if effects.has(StatusEffectKind::EarthArmor) {
        damage = scale(damage, 1.0 - table.earth_armor_reduction);
    }
    damage
}

#[inline]
fn scale(damage: u32, factor: f64) -> u32 {
    (f64::from(damage) * factor).floor().max(0.0) as u32
}
