//! Shipped content: the starter world, item templates, and enemy roster.

use saga_core::state::{
    AiPersonality, ClassKind, Element, Enemy, EnemyAbility, Item, ItemKind, LocationId,
    StatusEffectKind, World,
};

/// Builds the starter overworld and returns it with the starting location.
pub fn starter_world() -> (World, LocationId) {
    let mut world = World::new();
    let crossroads = world.add_location(
        "Dusty Crossroads",
        "Four worn paths meet beneath a leaning signpost.",
    );
    let mill = world.add_location(
        "Abandoned Mill",
        "The great wheel hangs still over a dry channel.",
    );
    let hollow = world.add_location(
        "Whispering Hollow",
        "Wind moves through the trees like a held breath.",
    );
    let ruin = world.add_location(
        "Sunken Ruin",
        "Broken columns jut from black water.",
    );
    let camp = world.add_location(
        "Ashen Camp",
        "Cold firepits ring a torn banner nobody came back for.",
    );

    world.connect(crossroads, mill);
    world.connect(crossroads, hollow);
    world.connect(hollow, ruin);
    world.connect(mill, camp);
    world.connect(camp, ruin);

    (world, crossroads)
}

/// The everyday healing draught.
pub fn minor_potion() -> Item {
    Item::new(
        "Minor Potion",
        "A stoppered vial of red cordial. Restores a little health.",
        ItemKind::Potion { heal: 20 },
        5,
    )
}

/// A one-use charm that hardens the skin like stone.
pub fn stonehide_ward() -> Item {
    Item::new(
        "Stonehide Ward",
        "A river pebble wrapped in copper wire. Blunts incoming blows for a time.",
        ItemKind::Ward {
            effect: StatusEffectKind::EarthArmor,
            duration: 3,
        },
        3,
    )
}

/// Items every new character sets out with.
pub fn starter_kit(_class: ClassKind) -> Vec<Item> {
    vec![minor_potion(), minor_potion(), stonehide_ward()]
}

/// The weak placeholder foe used when encounter generation fails.
pub fn default_enemy() -> Enemy {
    Enemy::new(
        "Lost Shade",
        "A dim outline of someone who wandered too far.",
        20,
        5,
    )
    .with_personality(AiPersonality::Wild)
}

/// Hand-authored foes for generators and tests to draw from.
pub fn enemy_roster() -> Vec<Enemy> {
    vec![
        Enemy::new("Goblin Raider", "All elbows, rust, and bad intent.", 34, 8)
            .with_personality(AiPersonality::Aggressive)
            .with_ability(EnemyAbility::MultiAttack)
            .with_loot(minor_potion()),
        Enemy::new("Bog Witch", "Her smile has too many teeth in it.", 30, 7)
            .with_personality(AiPersonality::Strategic)
            .with_ability(EnemyAbility::Heal)
            .with_element(Element::Ice),
        Enemy::new("Stone Sentinel", "It was a statue until you blinked.", 48, 6)
            .with_personality(AiPersonality::Defensive)
            .with_ability(EnemyAbility::Shield)
            .with_element(Element::Earth)
            .with_loot(stonehide_ward()),
        Enemy::new("Ember Wraith", "Heat shimmer wearing a grudge.", 28, 9)
            .with_personality(AiPersonality::Wild)
            .with_ability(EnemyAbility::DrainLife)
            .with_element(Element::Fire),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starter_world_is_connected_from_the_start() {
        let (world, start) = starter_world();
        assert!(world.contains(start));
        assert!(!world.neighbors(start).is_empty());
        // every location is reachable from every other in this graph
        for location in world.locations() {
            assert!(
                !location.connections().is_empty(),
                "{} is isolated",
                location.name
            );
        }
    }

    #[test]
    fn default_enemy_is_genuinely_weak() {
        let shade = default_enemy();
        assert!(shade.hp.max() <= 25);
        assert!(shade.ability.is_none());
    }

    #[test]
    fn roster_shields_and_heals_are_defensively_minded() {
        let roster = enemy_roster();
        for enemy in roster {
            if matches!(enemy.ability, Some(EnemyAbility::Shield)) {
                assert!(!enemy.is_shielded);
            }
            assert!(enemy.hp.max() > 0);
        }
    }
}
