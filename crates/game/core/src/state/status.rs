//! Status effect system for combatants.
//!
//! Status effects are timed battle conditions that tick at the start of the
//! bearer's action slot. Durations are counted in the bearer's own turns and
//! are decremented by the resolver in [`crate::combat::status`].

use arrayvec::ArrayVec;

use crate::config::GameLimits;

/// Types of status effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusEffectKind {
    /// Damage over time; ticks for a fraction of the inflicting attacker's
    /// attack value before the bearer acts.
    Burn,
    /// The bearer's next attacks deal reduced damage.
    Chill,
    /// The bearer may lose its action slot entirely.
    Shock,
    /// The bearer takes increased damage.
    Grounded,
    /// The bearer takes reduced damage.
    EarthArmor,
}

/// A single timed effect on a combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: StatusEffectKind,
    /// Remaining bearer turns; the effect is removed when this reaches 0
    /// after the per-turn decrement.
    pub remaining_turns: u8,
    /// Burn stores the inflicting attacker's attack value for tick damage.
    pub source_attack: Option<u32>,
}

/// Active status effects on a combatant.
///
/// At most one effect of each kind is held: reapplying a kind refreshes its
/// duration (and Burn's stored attack) instead of stacking.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { GameLimits::MAX_STATUS_EFFECTS }>,
}

impl StatusEffects {
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    /// Checks if an effect of the given kind is active.
    pub fn has(&self, kind: StatusEffectKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    /// Applies an effect. An existing effect of the same kind is refreshed
    /// (duration and stored attack replaced) rather than duplicated.
    pub fn apply(&mut self, kind: StatusEffectKind, duration: u8, source_attack: Option<u32>) {
        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == kind) {
            existing.remaining_turns = duration;
            existing.source_attack = source_attack;
            return;
        }

        if !self.effects.is_full() {
            self.effects.push(StatusEffect {
                kind,
                remaining_turns: duration,
                source_attack,
            });
        }
    }

    /// Removes an effect immediately.
    pub fn remove(&mut self, kind: StatusEffectKind) {
        self.effects.retain(|e| e.kind != kind);
    }

    /// Drops every effect. Battle-scoped effects are cleared this way when
    /// combat ends.
    pub fn clear(&mut self) {
        self.effects.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut StatusEffect> {
        self.effects.iter_mut()
    }

    /// Removes effects whose duration has run out. Returns the kinds that
    /// expired, in storage order.
    pub fn drain_expired(&mut self) -> Vec<StatusEffectKind> {
        let expired: Vec<StatusEffectKind> = self
            .effects
            .iter()
            .filter(|e| e.remaining_turns == 0)
            .map(|e| e.kind)
            .collect();
        self.effects.retain(|e| e.remaining_turns > 0);
        expired
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }
}
