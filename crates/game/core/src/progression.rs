//! Experience, leveling, loot, and post-battle recovery.

use crate::config::BalanceTable;
use crate::state::{ClassKind, Enemy, Item, Player};

/// Everything a victory granted, for the reducer to narrate.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VictoryGrant {
    pub xp_gained: u64,
    /// Loot templates appended to the inventory, in enemy list order.
    pub loot: Vec<Item>,
    pub levels_gained: u32,
    pub hp_restored: u32,
    pub mp_restored: u32,
    pub ep_restored: u32,
}

/// Resolves a won battle: XP from every defeated enemy, loot stacking,
/// resource regeneration, then leveling (which may step several times on a
/// large XP surplus).
pub fn grant_victory(
    player: &mut Player,
    defeated: &[Enemy],
    table: &BalanceTable,
) -> VictoryGrant {
    let mut grant = VictoryGrant::default();

    for enemy in defeated {
        grant.xp_gained += u64::from(enemy.hp.max() / 2) + u64::from(enemy.attack);
        if let Some(loot) = &enemy.loot {
            player.inventory.add(loot.clone());
            grant.loot.push(loot.clone());
        }
    }

    grant.hp_restored = player
        .hp
        .restore((f64::from(player.hp.max()) * table.victory_hp_regen).floor() as u32);
    if let Some(mp) = player.mp.as_mut() {
        let amount = ((f64::from(mp.max()) * table.victory_pool_regen).floor() as u32).max(1);
        grant.mp_restored = mp.restore(amount);
    }
    if let Some(ep) = player.ep.as_mut() {
        let amount = ((f64::from(ep.max()) * table.victory_pool_regen).floor() as u32).max(1);
        grant.ep_restored = ep.restore(amount);
    }

    grant.levels_gained = grant_xp(player, grant.xp_gained, table);
    grant
}

/// Adds experience and applies as many level-up steps as the new total
/// covers. Leftover XP carries over; it is never reset to zero.
///
/// Each step: +1 level, bigger HP pool and attack, threshold grows by the
/// configured factor, and class pools grow and refill.
pub fn grant_xp(player: &mut Player, amount: u64, table: &BalanceTable) -> u32 {
    player.xp += amount;

    let mut levels = 0;
    while player.xp >= player.xp_to_next_level {
        player.xp -= player.xp_to_next_level;
        player.level += 1;
        levels += 1;

        player.hp.grow(table.level_hp_growth);
        player.attack += table.level_attack_growth;
        player.xp_to_next_level =
            (player.xp_to_next_level as f64 * table.xp_threshold_growth).floor() as u64;

        match player.class {
            ClassKind::Warrior => {}
            ClassKind::Mage => {
                if let Some(mp) = player.mp.as_mut() {
                    mp.grow_and_refill(table.mage_mp_growth);
                }
            }
            ClassKind::Rogue => {
                if let Some(ep) = player.ep.as_mut() {
                    ep.grow_and_refill(table.rogue_ep_growth);
                }
            }
        }
    }
    levels
}
