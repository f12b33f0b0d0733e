//! Enemy combatants.
//!
//! Enemies are created per encounter by the content layer and discarded
//! when combat ends; nothing about them persists between battles.

use super::common::{AssetId, Pool};
use super::item::Item;
use super::status::{StatusEffectKind, StatusEffects};

/// Special action an enemy may carry in addition to its basic attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnemyAbility {
    /// Restore a fraction of max HP.
    Heal,
    /// Raise a shield that halves incoming damage until the next own turn.
    Shield,
    /// Damage the player and recover part of the dealt damage.
    DrainLife,
    /// Two lighter hits in one action.
    MultiAttack,
}

/// Behavioral profile steering ability-vs-attack selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AiPersonality {
    Aggressive,
    Defensive,
    Strategic,
    Wild,
}

/// Elemental affinity; attacks may inflict the mapped status effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Element {
    Fire,
    Ice,
    Lightning,
    Earth,
}

impl Element {
    /// The status effect an attack of this element can inflict.
    pub fn inflicted_status(self) -> StatusEffectKind {
        match self {
            Element::Fire => StatusEffectKind::Burn,
            Element::Ice => StatusEffectKind::Chill,
            Element::Lightning => StatusEffectKind::Shock,
            Element::Earth => StatusEffectKind::Grounded,
        }
    }
}

/// A single enemy in the current encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Enemy {
    pub name: String,
    pub description: String,
    pub hp: Pool,
    pub attack: u32,
    pub ability: Option<EnemyAbility>,
    pub personality: AiPersonality,
    /// Shield raised by the Shield ability; fades at the start of the
    /// enemy's next own turn.
    pub is_shielded: bool,
    pub status_effects: StatusEffects,
    pub element: Option<Element>,
    /// Dropped into the player's inventory on victory.
    pub loot: Option<Item>,
    pub portrait: Option<AssetId>,
}

impl Enemy {
    pub fn new(name: impl Into<String>, description: impl Into<String>, max_hp: u32, attack: u32) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            hp: Pool::full(max_hp),
            attack,
            ability: None,
            personality: AiPersonality::Wild,
            is_shielded: false,
            status_effects: StatusEffects::empty(),
            element: None,
            loot: None,
            portrait: None,
        }
    }

    pub fn with_ability(mut self, ability: EnemyAbility) -> Self {
        self.ability = Some(ability);
        self
    }

    pub fn with_personality(mut self, personality: AiPersonality) -> Self {
        self.personality = personality;
        self
    }

    pub fn with_element(mut self, element: Element) -> Self {
        self.element = Some(element);
        self
    }

    pub fn with_loot(mut self, loot: Item) -> Self {
        self.loot = Some(loot);
        self
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        !self.hp.is_empty()
    }

    /// Remaining HP as a fraction of max, in `[0, 1]`.
    pub fn hp_fraction(&self) -> f64 {
        self.hp.fraction()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hp_clamps_to_pool_bounds() {
        let mut enemy = Enemy::new("Goblin", "Small and mean.", 30, 6);
        enemy.hp.deplete(50);
        assert!(!enemy.is_alive());
        enemy.hp.restore(12);
        assert_eq!(enemy.hp.current(), 12);
    }

    #[test]
    fn element_maps_to_status() {
        assert_eq!(Element::Fire.inflicted_status(), StatusEffectKind::Burn);
        assert_eq!(Element::Ice.inflicted_status(), StatusEffectKind::Chill);
        assert_eq!(Element::Lightning.inflicted_status(), StatusEffectKind::Shock);
        assert_eq!(Element::Earth.inflicted_status(), StatusEffectKind::Grounded);
    }
}
