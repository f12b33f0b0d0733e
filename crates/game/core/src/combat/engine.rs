//! Player action resolution and the enemy turn step.
//!
//! Both entry points are synchronous and guard themselves against stale
//! invocation: an action arriving outside the player's turn, or an enemy
//! step after combat has ended, resolves to a no-op instead of an error.
//! The session reducer applies phase transitions from the returned
//! [`TurnHandoff`]; the runtime layer paces and cancels between steps.

use super::damage;
use super::event::{Combatant, CombatEvent};
use super::status;
use super::{ai, EnemyMove};
use crate::config::BalanceTable;
use crate::rng::DiceSource;
use crate::state::{
    ClassKind, Enemy, EnemyAbility, GamePhase, ItemKind, Player, SessionState, StatusEffectKind,
};

/// A combat command issued by the player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlayerAction {
    /// Basic attack against the enemy at `target`.
    Attack { target: usize },
    /// The class ability against the enemy at `target`.
    Ability { target: usize },
    /// Halve incoming physical damage until the next player action.
    Defend,
    /// Attempt to escape the battle.
    Flee,
    /// Consume an inventory item by name.
    UseItem { name: String },
}

/// Where control goes after a resolution step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnHandoff {
    /// The event did not apply to the current state; nothing changed.
    Ignored,
    /// The enemy phase should run next.
    EnemyPhase,
    /// Every enemy is down; victory resolution follows.
    Victory,
    /// The player is down; the session ends.
    Defeat,
    /// The player escaped; combat tears down without rewards.
    Fled,
}

/// Result of resolving one player action.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerActionOutcome {
    pub events: Vec<CombatEvent>,
    pub handoff: TurnHandoff,
}

impl PlayerActionOutcome {
    fn ignored() -> Self {
        Self {
            events: Vec::new(),
            handoff: TurnHandoff::Ignored,
        }
    }
}

/// Result of one enemy's action slot.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EnemyTurnOutcome {
    pub events: Vec<CombatEvent>,
    /// Set when this slot dropped the player to 0 HP; the phase must halt
    /// without running the remaining enemies.
    pub player_defeated: bool,
}

/// Resolves one player combat action.
///
/// Order within the slot: the previous turn's guard is cleared, the
/// player's status effects tick (Burn may end the battle, Shock may consume
/// the slot), then the command resolves. Victory is checked whenever enemy
/// HP changes.
pub fn resolve_player_action(
    state: &mut SessionState,
    action: &PlayerAction,
    table: &BalanceTable,
    dice: &mut dyn DiceSource,
) -> PlayerActionOutcome {
    if state.phase != GamePhase::Combat || !state.is_player_turn {
        return PlayerActionOutcome::ignored();
    }

    // Feasibility before any mutation, so an invalid command never costs
    // the turn.
    {
        let Some(player) = state.player.as_ref() else {
            return PlayerActionOutcome::ignored();
        };
        if !player.is_alive() {
            return PlayerActionOutcome::ignored();
        }
        match action {
            PlayerAction::Attack { target } | PlayerAction::Ability { target } => {
                if !state.enemies.get(*target).is_some_and(Enemy::is_alive) {
                    return PlayerActionOutcome::ignored();
                }
                if matches!(action, PlayerAction::Ability { .. })
                    && !can_afford_ability(player, table)
                {
                    return PlayerActionOutcome::ignored();
                }
            }
            PlayerAction::UseItem { name } => {
                if player.inventory.count(name) == 0 {
                    return PlayerActionOutcome::ignored();
                }
            }
            PlayerAction::Defend | PlayerAction::Flee => {}
        }
    }

    let mut events = Vec::new();
    let Some(player) = state.player.as_mut() else {
        return PlayerActionOutcome::ignored();
    };

    player.is_defending = false;

    let tick = status::advance(&mut player.status_effects, table, dice);
    if tick.burn_damage > 0 {
        player.hp.deplete(tick.burn_damage);
        events.push(CombatEvent::Burned {
            target: Combatant::Player,
            damage: tick.burn_damage,
        });
        if !player.is_alive() {
            events.push(CombatEvent::Downed {
                target: Combatant::Player,
            });
            state.is_player_turn = false;
            return PlayerActionOutcome {
                events,
                handoff: TurnHandoff::Defeat,
            };
        }
    }
    for kind in &tick.expired {
        events.push(CombatEvent::StatusFaded {
            target: Combatant::Player,
            effect: *kind,
        });
    }
    if tick.stunned {
        events.push(CombatEvent::Stunned {
            target: Combatant::Player,
        });
        state.is_player_turn = false;
        return PlayerActionOutcome {
            events,
            handoff: TurnHandoff::EnemyPhase,
        };
    }

    match action {
        PlayerAction::Attack { target } => {
            if let Some(enemy) = state.enemies.get_mut(*target) {
                strike_enemy(
                    f64::from(player.attack),
                    tick.chilled,
                    enemy,
                    table,
                    dice,
                    &mut events,
                );
            }
        }
        PlayerAction::Ability { target } => {
            if let Some(enemy) = state.enemies.get_mut(*target) {
                resolve_class_ability(player, enemy, tick.chilled, table, dice, &mut events);
            }
        }
        PlayerAction::Defend => {
            player.is_defending = true;
            events.push(CombatEvent::Guarding);
        }
        PlayerAction::Flee => {
            if dice.chance(table.flee_chance) {
                events.push(CombatEvent::Fled);
                state.is_player_turn = false;
                return PlayerActionOutcome {
                    events,
                    handoff: TurnHandoff::Fled,
                };
            }
            events.push(CombatEvent::FleeFailed);
        }
        PlayerAction::UseItem { name } => {
            if let Some(item) = player.inventory.consume(name) {
                events.push(CombatEvent::ItemUsed {
                    item: item.name.clone(),
                });
                match item.kind {
                    ItemKind::Potion { heal } => {
                        let gained = player.hp.restore(heal);
                        events.push(CombatEvent::Healed {
                            target: Combatant::Player,
                            amount: gained,
                        });
                    }
                    ItemKind::Ward { effect, duration } => {
                        player.status_effects.apply(effect, duration, None);
                        events.push(CombatEvent::StatusInflicted {
                            target: Combatant::Player,
                            effect,
                        });
                    }
                }
            }
        }
    }

    state.is_player_turn = false;
    if state.all_enemies_defeated() {
        return PlayerActionOutcome {
            events,
            handoff: TurnHandoff::Victory,
        };
    }
    PlayerActionOutcome {
        events,
        handoff: TurnHandoff::EnemyPhase,
    }
}

/// Resolves one enemy's action slot.
///
/// Slot order: status tick (Burn can kill the enemy, Shock can consume the
/// slot), shield fade, AI selection, action resolution. Returns with
/// `player_defeated` set the moment the player drops; the caller must stop
/// iterating the remaining enemies.
pub fn resolve_enemy_turn(
    state: &mut SessionState,
    index: usize,
    table: &BalanceTable,
    dice: &mut dyn DiceSource,
) -> EnemyTurnOutcome {
    if state.phase != GamePhase::Combat || state.is_player_turn {
        return EnemyTurnOutcome::default();
    }
    let Some(player) = state.player.as_mut() else {
        return EnemyTurnOutcome::default();
    };
    if !player.is_alive() {
        return EnemyTurnOutcome::default();
    }
    let Some(enemy) = state.enemies.get_mut(index) else {
        return EnemyTurnOutcome::default();
    };
    if !enemy.is_alive() {
        return EnemyTurnOutcome::default();
    }

    let mut events = Vec::new();
    let name = enemy.name.clone();

    let tick = status::advance(&mut enemy.status_effects, table, dice);
    if tick.burn_damage > 0 {
        enemy.hp.deplete(tick.burn_damage);
        events.push(CombatEvent::Burned {
            target: Combatant::Foe(name.clone()),
            damage: tick.burn_damage,
        });
        if !enemy.is_alive() {
            events.push(CombatEvent::Downed {
                target: Combatant::Foe(name),
            });
            return EnemyTurnOutcome {
                events,
                player_defeated: false,
            };
        }
    }
    for kind in &tick.expired {
        events.push(CombatEvent::StatusFaded {
            target: Combatant::Foe(name.clone()),
            effect: *kind,
        });
    }
    if tick.stunned {
        events.push(CombatEvent::Stunned {
            target: Combatant::Foe(name),
        });
        return EnemyTurnOutcome {
            events,
            player_defeated: false,
        };
    }

    if enemy.is_shielded {
        enemy.is_shielded = false;
        events.push(CombatEvent::ShieldFaded { name: name.clone() });
    }

    match ai::decide(enemy, dice) {
        EnemyMove::Ability(EnemyAbility::Heal) => {
            let amount = (f64::from(enemy.hp.max()) * table.enemy_heal_fraction).floor() as u32;
            let gained = enemy.hp.restore(amount);
            events.push(CombatEvent::Healed {
                target: Combatant::Foe(name),
                amount: gained,
            });
        }
        EnemyMove::Ability(EnemyAbility::Shield) => {
            enemy.is_shielded = true;
            events.push(CombatEvent::ShieldRaised { name });
        }
        EnemyMove::Ability(EnemyAbility::DrainLife) => {
            let raw = damage::roll_base(
                f64::from(enemy.attack) * table.drain_factor,
                table.attack_spread,
                dice,
            );
            let dealt = damage::mitigate_drain(raw, player);
            player.hp.deplete(dealt);
            let healed = (f64::from(dealt) * table.drain_recovery).floor() as u32;
            enemy.hp.restore(healed);
            events.push(CombatEvent::Drained {
                name,
                damage: dealt,
                healed,
            });
        }
        EnemyMove::Ability(EnemyAbility::MultiAttack) => {
            for _ in 0..2 {
                let raw = damage::roll_base(
                    f64::from(enemy.attack) * table.multi_attack_factor,
                    table.multi_attack_spread,
                    dice,
                );
                let dealt = damage::mitigate_player_bound(raw, player, table);
                player.hp.deplete(dealt);
                events.push(CombatEvent::Struck {
                    attacker: Combatant::Foe(name.clone()),
                    target: Combatant::Player,
                    damage: dealt,
                    critical: false,
                });
                if !player.is_alive() {
                    break;
                }
            }
        }
        EnemyMove::Attack => {
            let raw = damage::roll_base(f64::from(enemy.attack), table.attack_spread, dice);
            let (mut rolled, critical) = damage::roll_crit(raw, table, dice);
            if tick.chilled {
                rolled = damage::chilled_output(rolled, table);
            }
            let dealt = damage::mitigate_player_bound(rolled, player, table);
            player.hp.deplete(dealt);
            events.push(CombatEvent::Struck {
                attacker: Combatant::Foe(name.clone()),
                target: Combatant::Player,
                damage: dealt,
                critical,
            });

            if player.is_alive()
                && let Some(element) = enemy.element
                && dice.chance(table.element_status_chance(element))
            {
                let effect = element.inflicted_status();
                let stored =
                    (effect == StatusEffectKind::Burn).then_some(enemy.attack);
                player
                    .status_effects
                    .apply(effect, table.status_duration, stored);
                events.push(CombatEvent::StatusInflicted {
                    target: Combatant::Player,
                    effect,
                });
            }
        }
    }

    let player_defeated = !player.is_alive();
    if player_defeated {
        events.push(CombatEvent::Downed {
            target: Combatant::Player,
        });
    }
    EnemyTurnOutcome {
        events,
        player_defeated,
    }
}

/// One mitigated hit against an enemy: jitter, crit, attacker chill, then
/// the target's shield and status modifiers.
fn strike_enemy(
    attack_value: f64,
    chilled: bool,
    enemy: &mut Enemy,
    table: &BalanceTable,
    dice: &mut dyn DiceSource,
    events: &mut Vec<CombatEvent>,
) {
    let raw = damage::roll_base(attack_value, table.attack_spread, dice);
    let (mut rolled, critical) = damage::roll_crit(raw, table, dice);
    if chilled {
        rolled = damage::chilled_output(rolled, table);
    }
    let dealt = damage::mitigate_enemy_bound(rolled, enemy, table);
    enemy.hp.deplete(dealt);
    events.push(CombatEvent::Struck {
        attacker: Combatant::Player,
        target: Combatant::Foe(enemy.name.clone()),
        damage: dealt,
        critical,
    });
    if !enemy.is_alive() {
        events.push(CombatEvent::Downed {
            target: Combatant::Foe(enemy.name.clone()),
        });
    }
}

fn resolve_class_ability(
    player: &mut Player,
    enemy: &mut Enemy,
    chilled: bool,
    table: &BalanceTable,
    dice: &mut dyn DiceSource,
    events: &mut Vec<CombatEvent>,
) {
    events.push(CombatEvent::AbilityCast {
        name: player.class.ability_name().into(),
    });
    let cost = ability_cost(player.class, table);
    if let Some(pool) = player.ability_pool_mut() {
        pool.try_spend(cost);
    }

    match player.class {
        ClassKind::Warrior => {
            strike_enemy(
                f64::from(player.attack) * table.warrior_strike_factor,
                chilled,
                enemy,
                table,
                dice,
                events,
            );
        }
        ClassKind::Mage => {
            strike_enemy(
                f64::from(player.attack) * table.mage_fireball_factor,
                chilled,
                enemy,
                table,
                dice,
                events,
            );
            if enemy.is_alive() && dice.chance(table.fire_status_chance) {
                enemy.status_effects.apply(
                    StatusEffectKind::Burn,
                    table.status_duration,
                    Some(player.attack),
                );
                events.push(CombatEvent::StatusInflicted {
                    target: Combatant::Foe(enemy.name.clone()),
                    effect: StatusEffectKind::Burn,
                });
            }
        }
        ClassKind::Rogue => {
            // two-hit split, each hit independently mitigated
            for _ in 0..2 {
                strike_enemy(
                    f64::from(player.attack) * table.rogue_twin_factor,
                    chilled,
                    enemy,
                    table,
                    dice,
                    events,
                );
                if !enemy.is_alive() {
                    break;
                }
            }
        }
    }
}

fn ability_cost(class: ClassKind, table: &BalanceTable) -> u32 {
    match class {
        ClassKind::Warrior => 0,
        ClassKind::Mage => table.mage_fireball_cost,
        ClassKind::Rogue => table.rogue_twin_cost,
    }
}

fn can_afford_ability(player: &Player, table: &BalanceTable) -> bool {
    let cost = ability_cost(player.class, table);
    match player.class {
        ClassKind::Warrior => true,
        ClassKind::Mage => player.mp.is_some_and(|pool| pool.current() >= cost),
        ClassKind::Rogue => player.ep.is_some_and(|pool| pool.current() >= cost),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedDice;
    use crate::state::{AiPersonality, Element, Item};

    fn table() -> BalanceTable {
        BalanceTable::default()
    }

    fn combat_state(player: Player, enemies: Vec<Enemy>) -> SessionState {
        let mut state = SessionState::new();
        state.world.add_location("Arena", "");
        state.player = Some(player);
        state.enemies = enemies;
        state.phase = GamePhase::Combat;
        state.is_player_turn = true;
        state
    }

    // draws: [jitter, crit] per basic attack; 0.5 keeps jitter at 0 and
    // 0.9 stays out of the crit band
    const PLAIN_ATTACK: [f64; 2] = [0.5, 0.9];

    #[test]
    fn warrior_fells_a_grunt_on_the_fourth_swing() {
        let player = Player::create("Brakka", ClassKind::Warrior); // attack 12
        let enemy = Enemy::new("Grunt", "", 40, 6);
        let mut state = combat_state(player, vec![enemy]);
        let mut dice = ScriptedDice::new(PLAIN_ATTACK);

        for swing in 1..=4 {
            state.is_player_turn = true;
            let outcome = resolve_player_action(
                &mut state,
                &PlayerAction::Attack { target: 0 },
                &table(),
                &mut dice,
            );
            let hp = state.enemies[0].hp.current();
            if swing < 4 {
                assert_eq!(hp, 40 - 12 * swing);
                assert_eq!(outcome.handoff, TurnHandoff::EnemyPhase);
            } else {
                assert_eq!(hp, 0);
                assert_eq!(outcome.handoff, TurnHandoff::Victory);
                assert!(outcome
                    .events
                    .iter()
                    .any(|e| matches!(e, CombatEvent::Downed { .. })));
            }
        }
    }

    #[test]
    fn action_outside_player_turn_is_a_silent_no_op() {
        let player = Player::create("Brakka", ClassKind::Warrior);
        let mut state = combat_state(player, vec![Enemy::new("Grunt", "", 40, 6)]);
        state.is_player_turn = false;

        let before = state.clone();
        let mut dice = ScriptedDice::new(PLAIN_ATTACK);
        let outcome = resolve_player_action(
            &mut state,
            &PlayerAction::Attack { target: 0 },
            &table(),
            &mut dice,
        );

        assert_eq!(outcome.handoff, TurnHandoff::Ignored);
        assert!(outcome.events.is_empty());
        assert_eq!(state, before);
    }

    #[test]
    fn attacking_a_downed_enemy_is_refused_without_cost() {
        let player = Player::create("Brakka", ClassKind::Warrior);
        let mut dead = Enemy::new("Husk", "", 10, 2);
        dead.hp.deplete(10);
        let mut state = combat_state(player, vec![dead, Enemy::new("Grunt", "", 40, 6)]);

        let mut dice = ScriptedDice::new(PLAIN_ATTACK);
        let outcome = resolve_player_action(
            &mut state,
            &PlayerAction::Attack { target: 0 },
            &table(),
            &mut dice,
        );
        assert_eq!(outcome.handoff, TurnHandoff::Ignored);
        assert!(state.is_player_turn);
    }

    #[test]
    fn flee_success_exits_without_touching_enemies() {
        let player = Player::create("Brakka", ClassKind::Warrior);
        let mut state = combat_state(player, vec![Enemy::new("Grunt", "", 40, 6)]);

        let mut dice = ScriptedDice::new([0.1]); // under flee_chance
        let outcome =
            resolve_player_action(&mut state, &PlayerAction::Flee, &table(), &mut dice);

        assert_eq!(outcome.handoff, TurnHandoff::Fled);
        assert_eq!(state.enemies[0].hp.current(), 40);
        assert!(outcome.events.contains(&CombatEvent::Fled));
    }

    #[test]
    fn flee_failure_consumes_the_turn() {
        let player = Player::create("Brakka", ClassKind::Warrior);
        let mut state = combat_state(player, vec![Enemy::new("Grunt", "", 40, 6)]);

        let mut dice = ScriptedDice::new([0.9]);
        let outcome =
            resolve_player_action(&mut state, &PlayerAction::Flee, &table(), &mut dice);

        assert_eq!(outcome.handoff, TurnHandoff::EnemyPhase);
        assert!(!state.is_player_turn);
        assert!(outcome.events.contains(&CombatEvent::FleeFailed));
    }

    #[test]
    fn shock_can_steal_the_player_slot() {
        let mut player = Player::create("Brakka", ClassKind::Warrior);
        player
            .status_effects
            .apply(StatusEffectKind::Shock, 2, None);
        let mut state = combat_state(player, vec![Enemy::new("Grunt", "", 40, 6)]);

        let mut dice = ScriptedDice::new([0.0]); // forces the stun
        let outcome = resolve_player_action(
            &mut state,
            &PlayerAction::Attack { target: 0 },
            &table(),
            &mut dice,
        );

        assert_eq!(outcome.handoff, TurnHandoff::EnemyPhase);
        assert_eq!(state.enemies[0].hp.current(), 40);
        let player = state.player.as_ref().unwrap();
        let shock = player.status_effects.iter().next().unwrap();
        assert_eq!(shock.remaining_turns, 1);
    }

    #[test]
    fn burn_can_end_the_battle_before_the_player_acts() {
        let mut player = Player::create("Brakka", ClassKind::Warrior);
        player.hp.deplete(68); // 2 HP left
        player
            .status_effects
            .apply(StatusEffectKind::Burn, 3, Some(14)); // ticks for 3
        let mut state = combat_state(player, vec![Enemy::new("Grunt", "", 40, 6)]);

        let mut dice = ScriptedDice::new(PLAIN_ATTACK);
        let outcome = resolve_player_action(
            &mut state,
            &PlayerAction::Attack { target: 0 },
            &table(),
            &mut dice,
        );

        assert_eq!(outcome.handoff, TurnHandoff::Defeat);
        assert_eq!(state.enemies[0].hp.current(), 40);
    }

    #[test]
    fn mage_fireball_spends_mana_and_can_ignite() {
        let player = Player::create("Ilsette", ClassKind::Mage); // attack 10, 30 MP
        let mut state = combat_state(player, vec![Enemy::new("Grunt", "", 40, 6)]);

        // jitter 0.5, no crit, burn roll under the fire chance
        let mut dice = ScriptedDice::new([0.5, 0.9, 0.1]);
        let outcome = resolve_player_action(
            &mut state,
            &PlayerAction::Ability { target: 0 },
            &table(),
            &mut dice,
        );

        assert_eq!(outcome.handoff, TurnHandoff::EnemyPhase);
        // floor(10 * 1.8)
        assert_eq!(state.enemies[0].hp.current(), 40 - 18);
        assert!(state.enemies[0]
            .status_effects
            .has(StatusEffectKind::Burn));
        let player = state.player.as_ref().unwrap();
        assert_eq!(player.mp.unwrap().current(), 20);
    }

    #[test]
    fn rogue_twin_daggers_hit_twice() {
        let player = Player::create("Vex", ClassKind::Rogue); // attack 11, 20 EP
        let mut state = combat_state(player, vec![Enemy::new("Grunt", "", 40, 6)]);

        let mut dice = ScriptedDice::new([0.5, 0.9, 0.5, 0.9]);
        let outcome = resolve_player_action(
            &mut state,
            &PlayerAction::Ability { target: 0 },
            &table(),
            &mut dice,
        );

        // floor(11 * 0.8) = 8, twice
        assert_eq!(state.enemies[0].hp.current(), 40 - 16);
        assert_eq!(
            outcome
                .events
                .iter()
                .filter(|e| matches!(e, CombatEvent::Struck { .. }))
                .count(),
            2
        );
        let player = state.player.as_ref().unwrap();
        assert_eq!(player.ep.unwrap().current(), 15);
    }

    #[test]
    fn drained_mage_cannot_cast() {
        let mut player = Player::create("Ilsette", ClassKind::Mage);
        if let Some(pool) = player.mp.as_mut() {
            pool.deplete(25); // 5 left, cost is 10
        }
        let mut state = combat_state(player, vec![Enemy::new("Grunt", "", 40, 6)]);

        let mut dice = ScriptedDice::new(PLAIN_ATTACK);
        let outcome = resolve_player_action(
            &mut state,
            &PlayerAction::Ability { target: 0 },
            &table(),
            &mut dice,
        );
        assert_eq!(outcome.handoff, TurnHandoff::Ignored);
        assert!(state.is_player_turn);
    }

    #[test]
    fn potion_heals_and_consumes_the_turn() {
        let mut player = Player::create("Brakka", ClassKind::Warrior);
        player.hp.deplete(30);
        player.inventory.add(Item::new(
            "Minor Potion",
            "",
            ItemKind::Potion { heal: 20 },
            5,
        ));
        let mut state = combat_state(player, vec![Enemy::new("Grunt", "", 40, 6)]);

        let mut dice = ScriptedDice::new([0.9]);
        let outcome = resolve_player_action(
            &mut state,
            &PlayerAction::UseItem {
                name: "Minor Potion".into(),
            },
            &table(),
            &mut dice,
        );

        assert_eq!(outcome.handoff, TurnHandoff::EnemyPhase);
        let player = state.player.as_ref().unwrap();
        assert_eq!(player.hp.current(), 60);
        assert!(player.inventory.is_empty());
    }

    // ------------------------------------------------------------------
    // Enemy slots
    // ------------------------------------------------------------------

    fn enemy_phase_state(player: Player, enemies: Vec<Enemy>) -> SessionState {
        let mut state = combat_state(player, enemies);
        state.is_player_turn = false;
        state
    }

    #[test]
    fn enemy_attack_runs_the_full_mitigation_chain() {
        let mut player = Player::create("Brakka", ClassKind::Warrior);
        player.defense = 2;
        player.is_defending = true;
        let enemy = Enemy::new("Raider", "", 40, 10);
        let mut state = enemy_phase_state(player, vec![enemy]);

        // jitter 0.5 -> 10, no crit; defend -> 5; defense 2 -> 3
        let mut dice = ScriptedDice::new([0.5, 0.9]);
        let outcome = resolve_enemy_turn(&mut state, 0, &table(), &mut dice);

        assert!(!outcome.player_defeated);
        assert_eq!(state.player.as_ref().unwrap().hp.current(), 70 - 3);
    }

    #[test]
    fn shield_fades_before_the_enemy_acts() {
        let player = Player::create("Brakka", ClassKind::Warrior);
        let mut enemy = Enemy::new("Warden", "", 40, 6);
        enemy.is_shielded = true;
        let mut state = enemy_phase_state(player, vec![enemy]);

        let mut dice = ScriptedDice::new([0.5, 0.9]);
        let outcome = resolve_enemy_turn(&mut state, 0, &table(), &mut dice);

        assert!(!state.enemies[0].is_shielded);
        assert!(outcome
            .events
            .iter()
            .any(|e| matches!(e, CombatEvent::ShieldFaded { .. })));
    }

    #[test]
    fn drain_life_feeds_the_enemy() {
        let player = Player::create("Brakka", ClassKind::Warrior); // defense 5
        let mut enemy = Enemy::new("Leech", "", 40, 10)
            .with_personality(AiPersonality::Wild)
            .with_ability(EnemyAbility::DrainLife);
        enemy.hp.deplete(10); // room to heal back
        let mut state = enemy_phase_state(player, vec![enemy]);

        // wild roll 0.7 picks the ability, jitter 0.5 keeps the roll flat
        let mut dice = ScriptedDice::new([0.7, 0.5]);
        let outcome = resolve_enemy_turn(&mut state, 0, &table(), &mut dice);

        // floor(10 * 0.8) = 8, minus defense 5 -> 3 dealt; heals floor(1.5)
        assert_eq!(state.player.as_ref().unwrap().hp.current(), 67);
        assert_eq!(state.enemies[0].hp.current(), 31);
        assert!(outcome
            .events
            .iter()
            .any(|e| matches!(e, CombatEvent::Drained { damage: 3, healed: 1, .. })));
    }

    #[test]
    fn multi_attack_lands_two_mitigated_hits() {
        let player = Player::create("Brakka", ClassKind::Warrior); // defense 5
        let enemy = Enemy::new("Flurry", "", 40, 10)
            .with_personality(AiPersonality::Wild)
            .with_ability(EnemyAbility::MultiAttack);
        let mut state = enemy_phase_state(player, vec![enemy]);

        // ability roll, then one jitter per hit
        let mut dice = ScriptedDice::new([0.7, 0.5, 0.5]);
        let outcome = resolve_enemy_turn(&mut state, 0, &table(), &mut dice);

        // floor(10 * 0.7) = 7 each, minus defense 5 -> 2 per hit
        assert_eq!(state.player.as_ref().unwrap().hp.current(), 70 - 4);
        assert_eq!(
            outcome
                .events
                .iter()
                .filter(|e| matches!(e, CombatEvent::Struck { .. }))
                .count(),
            2
        );
    }

    #[test]
    fn elemental_attack_can_inflict_its_status() {
        let player = Player::create("Brakka", ClassKind::Warrior);
        let enemy = Enemy::new("Cinder Wisp", "", 30, 9).with_element(Element::Fire);
        let mut state = enemy_phase_state(player, vec![enemy]);

        // jitter, no crit, element roll under the fire chance
        let mut dice = ScriptedDice::new([0.5, 0.9, 0.05]);
        resolve_enemy_turn(&mut state, 0, &table(), &mut dice);

        let player = state.player.as_ref().unwrap();
        let burn = player
            .status_effects
            .iter()
            .find(|e| e.kind == StatusEffectKind::Burn)
            .expect("burn applied");
        // burn stores the attacker's attack for future ticks
        assert_eq!(burn.source_attack, Some(9));
    }

    #[test]
    fn lethal_hit_flags_the_defeat_immediately() {
        let mut player = Player::create("Brakka", ClassKind::Warrior);
        player.hp.deplete(69); // 1 HP left
        let enemy = Enemy::new("Raider", "", 40, 10);
        let mut state = enemy_phase_state(player, vec![enemy]);

        let mut dice = ScriptedDice::new([0.5, 0.9]);
        let outcome = resolve_enemy_turn(&mut state, 0, &table(), &mut dice);

        assert!(outcome.player_defeated);
        assert!(outcome
            .events
            .iter()
            .any(|e| matches!(e, CombatEvent::Downed { target: Combatant::Player })));
    }

    #[test]
    fn dead_enemy_slot_is_skipped() {
        let player = Player::create("Brakka", ClassKind::Warrior);
        let mut dead = Enemy::new("Husk", "", 10, 2);
        dead.hp.deplete(10);
        let mut state = enemy_phase_state(player, vec![dead]);

        let mut dice = ScriptedDice::new([0.5, 0.9]);
        let outcome = resolve_enemy_turn(&mut state, 0, &table(), &mut dice);
        assert!(outcome.events.is_empty());
        assert_eq!(state.player.as_ref().unwrap().hp.current(), 70);
    }

    #[test]
    fn enemy_burn_tick_can_finish_it() {
        let player = Player::create("Brakka", ClassKind::Warrior);
        let mut enemy = Enemy::new("Grunt", "", 40, 6);
        enemy.hp.deplete(38); // 2 HP
        enemy
            .status_effects
            .apply(StatusEffectKind::Burn, 2, Some(12)); // ticks for 3
        let mut state = enemy_phase_state(player, vec![enemy]);

        let mut dice = ScriptedDice::new([0.5]);
        let outcome = resolve_enemy_turn(&mut state, 0, &table(), &mut dice);

        assert!(!state.enemies[0].is_alive());
        assert!(outcome
            .events
            .iter()
            .any(|e| matches!(e, CombatEvent::Downed { .. })));
        // the player was never touched
        assert_eq!(state.player.as_ref().unwrap().hp.current(), 70);
    }
}
