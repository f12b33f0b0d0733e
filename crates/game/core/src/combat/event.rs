//! Observable combat occurrences.
//!
//! Every resolution step returns the events it produced; the reducer turns
//! them into log lines and popups for the presentation layer. Formatting
//! lives here so battle narration reads the same everywhere.

use core::fmt;

use crate::state::StatusEffectKind;

/// Which side of the battle an event refers to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Combatant {
    Player,
    /// An enemy, by display name.
    Foe(String),
}

/// A single observable occurrence during combat resolution.
#[derive(Clone, Debug, PartialEq)]
pub enum CombatEvent {
    /// A direct hit landed after full mitigation.
    Struck {
        attacker: Combatant,
        target: Combatant,
        damage: u32,
        critical: bool,
    },
    /// The player unleashed a class ability.
    AbilityCast { name: String },
    /// Burn ticked on the bearer before it acted.
    Burned { target: Combatant, damage: u32 },
    /// Shock consumed the bearer's action slot.
    Stunned { target: Combatant },
    StatusInflicted {
        target: Combatant,
        effect: StatusEffectKind,
    },
    StatusFaded {
        target: Combatant,
        effect: StatusEffectKind,
    },
    ShieldRaised { name: String },
    ShieldFaded { name: String },
    Healed { target: Combatant, amount: u32 },
    /// DrainLife: damage dealt and the portion recovered by the enemy.
    Drained {
        name: String,
        damage: u32,
        healed: u32,
    },
    /// The player braced to halve the coming enemy phase's hits.
    Guarding,
    ItemUsed { item: String },
    FleeFailed,
    Fled,
    /// A combatant's HP reached zero.
    Downed { target: Combatant },
}

impl fmt::Display for CombatEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CombatEvent::Struck {
                attacker: Combatant::Player,
                target: Combatant::Foe(name),
                damage,
                critical,
            } => {
                if *critical {
                    write!(f, "Critical hit! You strike the {name} for {damage} damage.")
                } else {
                    write!(f, "You strike the {name} for {damage} damage.")
                }
            }
            CombatEvent::Struck {
                attacker: Combatant::Foe(name),
                damage,
                critical,
                ..
            } => {
                if *critical {
                    write!(f, "A crushing blow! The {name} hits you for {damage} damage.")
                } else {
                    write!(f, "The {name} hits you for {damage} damage.")
                }
            }
            CombatEvent::Struck { .. } => write!(f, "The blow lands."),
            CombatEvent::AbilityCast { name } => write!(f, "You unleash {name}!"),
            CombatEvent::Burned {
                target: Combatant::Player,
                damage,
            } => write!(f, "The flames sear you for {damage} damage."),
            CombatEvent::Burned {
                target: Combatant::Foe(name),
                damage,
            } => write!(f, "The {name} burns for {damage} damage."),
            CombatEvent::Stunned {
                target: Combatant::Player,
            } => write!(f, "Shock locks your muscles. You cannot act!"),
            CombatEvent::Stunned {
                target: Combatant::Foe(name),
            } => write!(f, "The {name} is stunned and loses its turn."),
            CombatEvent::StatusInflicted {
                target: Combatant::Player,
                effect,
            } => write!(f, "You are afflicted with {effect}."),
            CombatEvent::StatusInflicted {
                target: Combatant::Foe(name),
                effect,
            } => write!(f, "The {name} is afflicted with {effect}."),
            CombatEvent::StatusFaded {
                target: Combatant::Player,
                effect,
            } => write!(f, "{effect} wears off."),
            CombatEvent::StatusFaded {
                target: Combatant::Foe(name),
                effect,
            } => write!(f, "{effect} wears off the {name}."),
            CombatEvent::ShieldRaised { name } => {
                write!(f, "The {name} raises a shimmering shield.")
            }
            CombatEvent::ShieldFaded { name } => write!(f, "The {name}'s shield fades."),
            CombatEvent::Healed {
                target: Combatant::Player,
                amount,
            } => write!(f, "You recover {amount} HP."),
            CombatEvent::Healed {
                target: Combatant::Foe(name),
                amount,
            } => write!(f, "The {name} mends its wounds, recovering {amount} HP."),
            CombatEvent::Drained {
                name,
                damage,
                healed,
            } => write!(
                f,
                "The {name} drains {damage} HP from you, restoring {healed} to itself."
            ),
            CombatEvent::Guarding => write!(f, "You brace behind your guard."),
            CombatEvent::ItemUsed { item } => write!(f, "You use the {item}."),
            CombatEvent::FleeFailed => write!(f, "You fail to escape!"),
            CombatEvent::Fled => write!(f, "You slip away from the fight."),
            CombatEvent::Downed {
                target: Combatant::Player,
            } => write!(f, "You collapse."),
            CombatEvent::Downed {
                target: Combatant::Foe(name),
            } => write!(f, "The {name} is defeated!"),
        }
    }
}
