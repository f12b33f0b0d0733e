//! Status effect resolution at the start of a combatant's action slot.

use crate::config::BalanceTable;
use crate::rng::DiceSource;
use crate::state::{StatusEffectKind, StatusEffects};

/// Outcome of advancing a combatant's effects by one of its turns.
///
/// The caller applies `burn_damage` to the bearer and honors `stunned` by
/// skipping the action; `chilled` marks this turn's outgoing attacks for
/// reduced damage. Durations have already been decremented and `expired`
/// effects removed by the time this returns.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusTick {
    pub burn_damage: u32,
    pub stunned: bool,
    pub chilled: bool,
    pub expired: Vec<StatusEffectKind>,
}

/// Advances effects one turn: Burn ticks, Shock rolls for a stun, every
/// duration drops by 1, and spent effects are removed.
///
/// Invoked exactly once per action slot, before any command or AI
/// resolution for that slot. Effects apply to the turn they tick on even
/// when that tick is their last.
pub fn advance(
    effects: &mut StatusEffects,
    table: &BalanceTable,
    dice: &mut dyn DiceSource,
) -> StatusTick {
    let mut tick = StatusTick::default();

    if let Some(burn) = effects
        .iter()
        .find(|e| e.kind == StatusEffectKind::Burn)
    {
        let source_attack = burn.source_attack.unwrap_or(0);
        tick.burn_damage = (f64::from(source_attack) * table.burn_factor).floor() as u32;
    }

    tick.chilled = effects.has(StatusEffectKind::Chill);

    if effects.has(StatusEffectKind::Shock) {
        tick.stunned = dice.chance(table.shock_stun_chance);
    }

    for effect in effects.iter_mut() {
        effect.remaining_turns = effect.remaining_turns.saturating_sub(1);
    }
    tick.expired = effects.drain_expired();

    tick
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedDice;

    fn table() -> BalanceTable {
        BalanceTable::default()
    }

    #[test]
    fn burn_ticks_from_stored_attack() {
        let mut effects = StatusEffects::empty();
        effects.apply(StatusEffectKind::Burn, 3, Some(14));

        let mut dice = ScriptedDice::new([0.99]);
        let tick = advance(&mut effects, &table(), &mut dice);

        // floor(14 * 0.25)
        assert_eq!(tick.burn_damage, 3);
        assert!(!tick.stunned);
        assert!(effects.has(StatusEffectKind::Burn));
    }

    #[test]
    fn shock_stun_still_decrements_exactly_once() {
        let mut effects = StatusEffects::empty();
        effects.apply(StatusEffectKind::Shock, 2, None);

        // draw below the stun chance forces the stun
        let mut dice = ScriptedDice::new([0.0]);
        let tick = advance(&mut effects, &table(), &mut dice);

        assert!(tick.stunned);
        let shock = effects.iter().next().unwrap();
        assert_eq!(shock.remaining_turns, 1);
    }

    #[test]
    fn effects_expire_after_their_final_tick() {
        let mut effects = StatusEffects::empty();
        effects.apply(StatusEffectKind::Chill, 1, None);

        let mut dice = ScriptedDice::new([0.99]);
        let tick = advance(&mut effects, &table(), &mut dice);

        // chill still covers the turn it expires on
        assert!(tick.chilled);
        assert_eq!(tick.expired, vec![StatusEffectKind::Chill]);
        assert!(effects.is_empty());
    }

    #[test]
    fn stun_roll_can_miss() {
        let mut effects = StatusEffects::empty();
        effects.apply(StatusEffectKind::Shock, 3, None);

        let mut dice = ScriptedDice::new([0.99]);
        let tick = advance(&mut effects, &table(), &mut dice);
        assert!(!tick.stunned);
    }

    #[test]
    fn empty_set_is_a_quiet_tick() {
        let mut effects = StatusEffects::empty();
        let mut dice = ScriptedDice::new([0.0]);
        let tick = advance(&mut effects, &table(), &mut dice);
        assert_eq!(tick, StatusTick::default());
        // no draw consumed without a shock effect
        assert_eq!(dice.consumed(), 0);
    }
}
