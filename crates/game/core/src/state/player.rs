//! The player character.

use super::common::Pool;
use super::item::Inventory;
use super::quest::Journal;
use super::status::StatusEffects;

/// Player character class. Determines base stats, the class ability, and
/// which secondary resource pool (if any) the character carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClassKind {
    Warrior,
    Mage,
    Rogue,
}

impl ClassKind {
    /// `(max_hp, attack, defense)` at level 1.
    pub fn base_stats(self) -> (u32, u32, u32) {
        match self {
            ClassKind::Warrior => (70, 12, 5),
            ClassKind::Mage => (50, 10, 3),
            ClassKind::Rogue => (60, 11, 4),
        }
    }

    /// Display name of the class ability.
    pub fn ability_name(self) -> &'static str {
        match self {
            ClassKind::Warrior => "Crushing Blow",
            ClassKind::Mage => "Fireball",
            ClassKind::Rogue => "Twin Daggers",
        }
    }
}

/// The player character. Created once at character creation and replaced
/// only by a new game or a load.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub name: String,
    pub class: ClassKind,
    pub level: u32,
    pub hp: Pool,
    /// Mana, Mage only.
    pub mp: Option<Pool>,
    /// Energy, Rogue only.
    pub ep: Option<Pool>,
    pub attack: u32,
    pub defense: u32,
    pub xp: u64,
    pub xp_to_next_level: u64,
    /// Set by the Defend action; lasts through the following enemy phase.
    pub is_defending: bool,
    pub inventory: Inventory,
    pub status_effects: StatusEffects,
    pub journal: Journal,
}

impl Player {
    /// Starting experience required for the first level-up.
    pub const FIRST_LEVEL_THRESHOLD: u64 = 100;

    /// Starting max MP for a Mage.
    pub const MAGE_BASE_MP: u32 = 30;

    /// Starting max EP for a Rogue.
    pub const ROGUE_BASE_EP: u32 = 20;

    /// Creates a fresh level-1 character of the given class.
    pub fn create(name: impl Into<String>, class: ClassKind) -> Self {
        let (max_hp, attack, defense) = class.base_stats();
        Self {
            name: name.into(),
            class,
            level: 1,
            hp: Pool::full(max_hp),
            mp: matches!(class, ClassKind::Mage).then(|| Pool::full(Self::MAGE_BASE_MP)),
            ep: matches!(class, ClassKind::Rogue).then(|| Pool::full(Self::ROGUE_BASE_EP)),
            attack,
            defense,
            xp: 0,
            xp_to_next_level: Self::FIRST_LEVEL_THRESHOLD,
            is_defending: false,
            inventory: Inventory::empty(),
            status_effects: StatusEffects::empty(),
            journal: Journal::new(),
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        !self.hp.is_empty()
    }

    /// The resource pool backing the class ability, if the class has one.
    pub fn ability_pool_mut(&mut self) -> Option<&mut Pool> {
        match self.class {
            ClassKind::Warrior => None,
            ClassKind::Mage => self.mp.as_mut(),
            ClassKind::Rogue => self.ep.as_mut(),
        }
    }
}
