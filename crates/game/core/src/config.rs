//! Capacity limits and balance tunables.

/// Compile-time capacity limits used as type parameters for bounded state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GameLimits;

impl GameLimits {
    /// Maximum simultaneous status effects per combatant.
    pub const MAX_STATUS_EFFECTS: usize = 8;
    /// Ring-buffered session log length; oldest lines are evicted first.
    pub const MAX_LOG_LINES: usize = 100;
}

/// Every tunable combat and progression number in one place.
///
/// Defaults are the shipped balance; content packs may override the whole
/// table (see saga-content loaders). All fractions are applied with `floor`
/// so resolution stays in integer damage space.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BalanceTable {
    // ========================================================================
    // Attack resolution
    // ========================================================================
    /// Probability of a critical hit on basic attacks and class abilities.
    pub crit_chance: f64,
    /// Damage multiplier applied after the jitter roll, before mitigation.
    pub crit_multiplier: u32,
    /// Basic attacks roll `floor(attack + uniform(-spread, spread))`.
    pub attack_spread: f64,

    // ========================================================================
    // Status effects
    // ========================================================================
    /// Burn ticks for `floor(source_attack * burn_factor)` at the bearer's
    /// slot start.
    pub burn_factor: f64,
    /// Chill removes this fraction of the bearer's outgoing attack damage.
    pub chill_output_reduction: f64,
    /// Probability a shocked combatant loses its action slot entirely.
    pub shock_stun_chance: f64,
    /// Grounded bearers take this fraction of extra damage.
    pub grounded_vulnerability: f64,
    /// Earth-armored bearers shed this fraction of incoming damage.
    pub earth_armor_reduction: f64,
    /// Turns a freshly applied status effect lasts.
    pub status_duration: u8,

    // ========================================================================
    // Elemental affinities (chance an attack inflicts the mapped status)
    // ========================================================================
    pub fire_status_chance: f64,
    pub ice_status_chance: f64,
    pub lightning_status_chance: f64,
    pub earth_status_chance: f64,

    // ========================================================================
    // Enemy abilities
    // ========================================================================
    /// Heal restores `floor(max_hp * enemy_heal_fraction)`.
    pub enemy_heal_fraction: f64,
    /// DrainLife hits for `floor(attack * drain_factor + uniform(-2, 2))`.
    pub drain_factor: f64,
    /// Fraction of dealt drain damage returned to the enemy as healing.
    pub drain_recovery: f64,
    /// Each MultiAttack hit rolls `floor(attack * multi_attack_factor +
    /// uniform(-spread, spread))`.
    pub multi_attack_factor: f64,
    pub multi_attack_spread: f64,

    // ========================================================================
    // Player class abilities
    // ========================================================================
    pub warrior_strike_factor: f64,
    pub mage_fireball_factor: f64,
    pub mage_fireball_cost: u32,
    pub rogue_twin_factor: f64,
    pub rogue_twin_cost: u32,

    // ========================================================================
    // Escape
    // ========================================================================
    pub flee_chance: f64,

    // ========================================================================
    // Progression
    // ========================================================================
    /// Max HP gained per level.
    pub level_hp_growth: u32,
    /// Attack gained per level.
    pub level_attack_growth: u32,
    /// Next threshold is `floor(previous * xp_threshold_growth)`.
    pub xp_threshold_growth: f64,
    /// Mage max-MP growth per level (pool refills on level-up).
    pub mage_mp_growth: u32,
    /// Rogue max-EP growth per level (pool refills on level-up).
    pub rogue_ep_growth: u32,
    /// Post-victory HP regeneration as a fraction of max HP.
    pub victory_hp_regen: f64,
    /// Post-victory MP/EP regeneration as a fraction of the pool max,
    /// at least 1 when the pool exists.
    pub victory_pool_regen: f64,
}

impl Default for BalanceTable {
    fn default() -> Self {
        Self {
            crit_chance: 0.1,
            crit_multiplier: 2,
            attack_spread: 2.0,

            burn_factor: 0.25,
            chill_output_reduction: 0.3,
            shock_stun_chance: 0.35,
            grounded_vulnerability: 0.25,
            earth_armor_reduction: 0.25,
            status_duration: 3,

            fire_status_chance: 0.3,
            ice_status_chance: 0.3,
            lightning_status_chance: 0.25,
            earth_status_chance: 0.3,

            enemy_heal_fraction: 0.25,
            drain_factor: 0.8,
            drain_recovery: 0.5,
            multi_attack_factor: 0.7,
            multi_attack_spread: 1.0,

            warrior_strike_factor: 1.5,
            mage_fireball_factor: 1.8,
            mage_fireball_cost: 10,
            rogue_twin_factor: 0.8,
            rogue_twin_cost: 5,

            flee_chance: 0.5,

            level_hp_growth: 20,
            level_attack_growth: 5,
            xp_threshold_growth: 1.5,
            mage_mp_growth: 10,
            rogue_ep_growth: 5,
            victory_hp_regen: 0.05,
            victory_pool_regen: 0.15,
        }
    }
}

impl BalanceTable {
    /// Chance that an elemental attack inflicts its mapped status effect.
    pub fn element_status_chance(&self, element: crate::state::Element) -> f64 {
        use crate::state::Element;
        match element {
            Element::Fire => self.fire_status_chance,
            Element::Ice => self.ice_status_chance,
            Element::Lightning => self.lightning_status_chance,
            Element::Earth => self.earth_status_chance,
        }
    }
}
