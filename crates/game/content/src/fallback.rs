//! Deterministic substitutes for failed generator calls.
//!
//! Each function mirrors one generator operation and returns a fixed,
//! sensible payload. The session must play correctly when every generator
//! call lands here.

use saga_core::engine::{ExplorePayload, ScenePayload};
use saga_core::state::{Enemy, GameAction, Location, SocialChoice, SocialEncounter, SocialReward};

use crate::catalog;

/// Placeholder scene for a location the generator could not describe.
pub fn scene(location: &Location) -> ScenePayload {
    ScenePayload {
        text: format!(
            "{} Nothing here demands your attention, but the road goes on.",
            location.description
        ),
        actions: vec![
            GameAction::explore("Explore the area"),
            GameAction::encounter("Seek out trouble"),
        ],
        found_item: None,
    }
}

/// Placeholder encounter: a single weak foe.
pub fn encounter() -> Vec<Enemy> {
    vec![catalog::default_enemy()]
}

/// Placeholder social beat with one small kindness on offer.
pub fn social() -> SocialEncounter {
    SocialEncounter {
        description: "A tired traveler rests by the roadside and raises a hand in greeting.".into(),
        choices: vec![
            SocialChoice {
                label: "Share your provisions".into(),
                outcome: "You trade food and stories. The road feels shorter for it.".into(),
                reward: SocialReward::Xp(15),
            },
            SocialChoice {
                label: "Nod and move on".into(),
                outcome: "You exchange nods and keep your own company.".into(),
                reward: SocialReward::None,
            },
        ],
    }
}

/// Placeholder exploration result: nothing happens.
pub fn explore(_action: &GameAction) -> ExplorePayload {
    ExplorePayload {
        outcome: "You search for a while and find nothing of note.".into(),
        found_item: None,
        trigger_combat: false,
        trigger_social: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use saga_core::state::World;

    #[test]
    fn fallback_scene_always_offers_actions() {
        let mut world = World::new();
        let id = world.add_location("Dusty Crossroads", "Four worn paths meet.");
        let payload = scene(world.location(id).unwrap());
        assert!(!payload.text.is_empty());
        assert_eq!(payload.actions.len(), 2);
        assert!(payload.found_item.is_none());
    }

    #[test]
    fn fallback_encounter_is_one_weak_enemy() {
        let enemies = encounter();
        assert_eq!(enemies.len(), 1);
        assert!(enemies[0].is_alive());
    }

    #[test]
    fn fallback_explore_triggers_nothing() {
        let payload = explore(&GameAction::explore("Explore the area"));
        assert!(!payload.trigger_combat);
        assert!(!payload.trigger_social);
        assert!(payload.found_item.is_none());
    }

    #[test]
    fn fallback_social_offers_a_choice() {
        let beat = social();
        assert!(beat.choices.len() >= 2);
    }
}
