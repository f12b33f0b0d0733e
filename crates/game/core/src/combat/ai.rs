//! Enemy action selection.
//!
//! A pure function of the enemy's personality, HP fraction, shield state,
//! and one or two dice draws. Keeping it free of battle bookkeeping makes
//! every band testable with scripted draws.

use crate::rng::DiceSource;
use crate::state::{AiPersonality, Enemy, EnemyAbility};

/// What the enemy will do with its action slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyMove {
    Attack,
    Ability(EnemyAbility),
}

/// Picks the enemy's move.
///
/// Per-personality weighting:
///
/// | Personality | Behavior |
/// |---|---|
/// | Aggressive | 70% attack, 20% ability, 10% attack again |
/// | Defensive  | hurt + defensive ability: 60% to use it; else 40/40/20 |
/// | Strategic  | heal when hurt; shield when exposed; else 60% attack |
/// | Wild       | coin flip |
///
/// An enemy with no usable ability always attacks, and a shielded enemy
/// never re-selects Shield.
pub fn decide(enemy: &Enemy, dice: &mut dyn DiceSource) -> EnemyMove {
    let Some(ability) = usable_ability(enemy) else {
        return EnemyMove::Attack;
    };

    match enemy.personality {
        AiPersonality::Aggressive => {
            let roll = dice.unit();
            if roll < 0.70 {
                EnemyMove::Attack
            } else if roll < 0.90 {
                EnemyMove::Ability(ability)
            } else {
                EnemyMove::Attack
            }
        }
        AiPersonality::Defensive => {
            let hurt = enemy.hp_fraction() < 0.5;
            let defensive = matches!(ability, EnemyAbility::Heal | EnemyAbility::Shield);
            if hurt && defensive && dice.chance(0.6) {
                return EnemyMove::Ability(ability);
            }
            let roll = dice.unit();
            if roll < 0.4 {
                EnemyMove::Attack
            } else if roll < 0.8 {
                EnemyMove::Ability(ability)
            } else {
                EnemyMove::Attack
            }
        }
        AiPersonality::Strategic => {
            if ability == EnemyAbility::Heal && enemy.hp_fraction() < 0.4 {
                return EnemyMove::Ability(EnemyAbility::Heal);
            }
            if ability == EnemyAbility::Shield && dice.chance(0.7) {
                return EnemyMove::Ability(EnemyAbility::Shield);
            }
            if dice.chance(0.6) {
                EnemyMove::Attack
            } else {
                EnemyMove::Ability(ability)
            }
        }
        AiPersonality::Wild => {
            if dice.chance(0.5) {
                EnemyMove::Attack
            } else {
                EnemyMove::Ability(ability)
            }
        }
    }
}

/// The enemy's ability, filtered for current usability: a shielded enemy
/// falls through to its basic attack rather than re-raising the shield.
fn usable_ability(enemy: &Enemy) -> Option<EnemyAbility> {
    match enemy.ability {
        Some(EnemyAbility::Shield) if enemy.is_shielded => None,
        other => other,
    }
}
