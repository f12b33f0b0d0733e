//! The session reducer: one pure transition per event.
//!
//! [`SessionEngine`] wraps mutable access to the canonical
//! [`SessionState`], applies exactly one [`SessionEvent`] at a time, and
//! returns the observable [`Effect`]s. Events that do not apply to the
//! current phase are silent no-ops; the event set itself is closed and
//! matched exhaustively.

mod effects;
mod events;

pub use effects::{Effect, PopupKind};
pub use events::{ExplorePayload, ScenePayload, SessionEvent};

use std::mem;

use crate::combat::{self, CombatEvent, Combatant, PlayerAction};
use crate::config::BalanceTable;
use crate::progression;
use crate::rng::DiceSource;
use crate::state::{
    GameAction, GamePhase, Item, ItemKind, LocationId, Player, SaveRecord, SessionState,
    SocialEncounter, SocialReward, World,
};

/// Applies events to the session state it borrows.
pub struct SessionEngine<'a> {
    state: &'a mut SessionState,
    table: &'a BalanceTable,
}

impl<'a> SessionEngine<'a> {
    pub fn new(state: &'a mut SessionState, table: &'a BalanceTable) -> Self {
        Self { state, table }
    }

    pub fn state(&self) -> &SessionState {
        self.state
    }

    /// Applies one event and returns its observable effects.
    ///
    /// Every `Effect::Log` line is also appended to the session's
    /// ring-buffered log before returning.
    pub fn apply(&mut self, event: SessionEvent, dice: &mut dyn DiceSource) -> Vec<Effect> {
        let effects = match event {
            SessionEvent::NewGame => self.new_game(),
            SessionEvent::CreateCharacter { name, class } => self.create_character(name, class),
            SessionEvent::WorldReady { world, start } => self.world_ready(world, start),
            SessionEvent::SceneReady { scene, degraded } => self.scene_ready(scene, degraded),
            SessionEvent::Move { target } => self.travel(target),
            SessionEvent::Explore => self.explore(),
            SessionEvent::SeekEncounter => self.seek_encounter(),
            SessionEvent::ExploreOutcome { result, degraded } => {
                self.explore_outcome(result, degraded)
            }
            SessionEvent::EncounterReady { enemies, degraded } => {
                self.encounter_ready(enemies, degraded)
            }
            SessionEvent::SocialReady { encounter, degraded } => {
                self.social_ready(encounter, degraded)
            }
            SessionEvent::SocialChoice { index } => self.social_choice(index),
            SessionEvent::QuestResolved {
                id,
                success,
                outcome,
            } => self.quest_resolved(&id, success, outcome),
            SessionEvent::UseItem { name } => self.use_item(name, dice),
            SessionEvent::Combat(action) => self.combat_action(action, dice),
            SessionEvent::EnemyTurn { index } => self.enemy_turn(index, dice),
            SessionEvent::EnemyPhaseEnd => self.enemy_phase_end(),
            SessionEvent::AppendLog { line } => vec![Effect::Log(line)],
            SessionEvent::GrantXp { amount } => self.grant_xp(amount),
            SessionEvent::GrantItem { item } => self.grant_item(item),
            SessionEvent::SaveRequested { slot, timestamp } => self.save_requested(slot, timestamp),
            SessionEvent::LoadGame { record } => self.load_game(record),
        };

        for effect in &effects {
            if let Effect::Log(line) = effect {
                self.state.log.push(line.clone());
            }
        }
        effects
    }

    // ========================================================================
    // Session lifecycle
    // ========================================================================

    fn new_game(&mut self) -> Vec<Effect> {
        *self.state = SessionState::new();
        self.state.phase = GamePhase::CharacterCreation;
        vec![Effect::Log("A new tale begins.".into())]
    }

    fn create_character(&mut self, name: String, class: crate::state::ClassKind) -> Vec<Effect> {
        if self.state.phase != GamePhase::CharacterCreation {
            return Vec::new();
        }
        let player = Player::create(name, class);
        let intro = format!("{} the {} steps onto the road.", player.name, player.class);
        self.state.player = Some(player);
        self.state.phase = GamePhase::Loading;
        vec![Effect::Log(intro), Effect::WorldRequest]
    }

    fn world_ready(&mut self, world: World, start: LocationId) -> Vec<Effect> {
        if self.state.phase != GamePhase::Loading || !world.contains(start) {
            return Vec::new();
        }
        self.state.world = world;
        self.state.location = start;
        self.state.world.mark_explored(start);
        vec![Effect::SceneRequest]
    }

    // ========================================================================
    // Exploration
    // ========================================================================

    fn scene_ready(&mut self, scene: ScenePayload, degraded: bool) -> Vec<Effect> {
        if !matches!(self.state.phase, GamePhase::Loading | GamePhase::Exploring) {
            return Vec::new();
        }
        let mut effects = Vec::new();
        if degraded {
            effects.push(Effect::Log(
                "The vision is hazy, but the path ahead is clear enough.".into(),
            ));
        }

        self.state.story_text = scene.text;
        let mut actions = scene.actions;
        for &neighbor in self.state.world.neighbors(self.state.location) {
            let label = match self.state.world.location(neighbor) {
                Some(place) => format!("Travel to {}", place.name),
                None => continue,
            };
            actions.push(GameAction::travel(label, neighbor));
        }
        self.state.actions = actions;
        self.state.phase = GamePhase::Exploring;

        if let Some(item) = scene.found_item {
            self.receive_item(item, &mut effects);
        }
        effects
    }

    fn travel(&mut self, target: LocationId) -> Vec<Effect> {
        if self.state.phase != GamePhase::Exploring
            || !self.state.world.is_connected(self.state.location, target)
        {
            return Vec::new();
        }
        self.state.location = target;
        self.state.world.mark_explored(target);
        let name = self
            .state
            .world
            .location(target)
            .map(|place| place.name.clone())
            .unwrap_or_default();
        vec![
            Effect::Log(format!("You travel to {name}.")),
            Effect::SceneRequest,
        ]
    }

    fn explore(&mut self) -> Vec<Effect> {
        if self.state.phase != GamePhase::Exploring || self.state.player.is_none() {
            return Vec::new();
        }
        let action = self
            .state
            .actions
            .iter()
            .find(|a| matches!(a.kind, crate::state::GameActionKind::Explore))
            .cloned()
            .unwrap_or_else(|| GameAction::explore("Explore the area"));
        vec![Effect::ExploreRequest { action }]
    }

    fn seek_encounter(&mut self) -> Vec<Effect> {
        if self.state.phase != GamePhase::Exploring || self.state.player.is_none() {
            return Vec::new();
        }
        vec![Effect::EncounterRequest]
    }

    fn explore_outcome(&mut self, result: ExplorePayload, degraded: bool) -> Vec<Effect> {
        if self.state.phase != GamePhase::Exploring {
            return Vec::new();
        }
        let mut effects = Vec::new();
        if degraded {
            effects.push(Effect::Log("Nothing stirs beyond the ordinary.".into()));
        }
        effects.push(Effect::Log(result.outcome));
        if let Some(item) = result.found_item {
            self.receive_item(item, &mut effects);
        }
        if result.trigger_combat {
            effects.push(Effect::EncounterRequest);
        } else if result.trigger_social {
            effects.push(Effect::SocialRequest);
        }
        effects
    }

    // ========================================================================
    // Combat
    // ========================================================================

    fn encounter_ready(&mut self, enemies: Vec<crate::state::Enemy>, degraded: bool) -> Vec<Effect> {
        if self.state.phase != GamePhase::Exploring || enemies.is_empty() {
            return Vec::new();
        }
        let mut effects = Vec::new();
        if degraded {
            effects.push(Effect::Log("A familiar menace takes shape.".into()));
        }
        for enemy in &enemies {
            effects.push(Effect::Log(format!("A {} appears!", enemy.name)));
        }
        self.state.enemies = enemies;
        self.state.social = None;
        self.state.phase = GamePhase::Combat;
        self.state.is_player_turn = true;
        effects
    }

    fn combat_action(&mut self, action: PlayerAction, dice: &mut dyn DiceSource) -> Vec<Effect> {
        let outcome = combat::resolve_player_action(self.state, &action, self.table, dice);
        let mut effects = combat_effects(&outcome.events);
        match outcome.handoff {
            combat::TurnHandoff::Ignored => Vec::new(),
            combat::TurnHandoff::EnemyPhase => {
                effects.push(Effect::EnemyPhase);
                effects
            }
            combat::TurnHandoff::Victory => {
                self.resolve_victory(&mut effects);
                effects
            }
            combat::TurnHandoff::Defeat => {
                self.resolve_defeat(&mut effects);
                effects
            }
            combat::TurnHandoff::Fled => {
                self.teardown_battle();
                effects.push(Effect::SceneRequest);
                effects
            }
        }
    }

    fn enemy_turn(&mut self, index: usize, dice: &mut dyn DiceSource) -> Vec<Effect> {
        if self.state.phase != GamePhase::Combat || self.state.is_player_turn {
            return Vec::new();
        }
        // Victory pre-empts the slot: checked before the enemy acts, so a
        // battle decided mid-phase never runs the remaining enemies.
        if self.state.all_enemies_defeated() {
            let mut effects = Vec::new();
            self.resolve_victory(&mut effects);
            return effects;
        }
        let outcome = combat::resolve_enemy_turn(self.state, index, self.table, dice);
        let mut effects = combat_effects(&outcome.events);
        if outcome.player_defeated {
            self.resolve_defeat(&mut effects);
        }
        effects
    }

    fn enemy_phase_end(&mut self) -> Vec<Effect> {
        if self.state.phase != GamePhase::Combat || self.state.is_player_turn {
            return Vec::new();
        }
        if self.state.all_enemies_defeated() {
            let mut effects = Vec::new();
            self.resolve_victory(&mut effects);
            return effects;
        }
        self.state.is_player_turn = true;
        Vec::new()
    }

    /// Victory resolution runs once: the enemy list is taken out of the
    /// state first, so a stray second trigger finds nothing to resolve.
    fn resolve_victory(&mut self, effects: &mut Vec<Effect>) {
        let defeated = mem::take(&mut self.state.enemies);
        let Some(player) = self.state.player.as_mut() else {
            return;
        };

        let grant = progression::grant_victory(player, &defeated, self.table);
        effects.push(Effect::Log("The battle is won.".into()));
        effects.push(Effect::Popup {
            kind: PopupKind::Xp,
            text: format!("+{} XP", grant.xp_gained),
        });
        for item in &grant.loot {
            effects.push(Effect::Log(format!("You claim the {}.", item.name)));
            effects.push(Effect::Popup {
                kind: PopupKind::Item,
                text: item.name.clone(),
            });
        }
        if grant.hp_restored > 0 {
            effects.push(Effect::Popup {
                kind: PopupKind::Heal,
                text: format!("+{} HP", grant.hp_restored),
            });
        }
        if grant.levels_gained > 0 {
            effects.push(Effect::Log(format!("You reach level {}!", player.level)));
            effects.push(Effect::LevelUp {
                level: player.level,
            });
        }

        player.status_effects.clear();
        player.is_defending = false;
        self.state.phase = GamePhase::Exploring;
        self.state.is_player_turn = false;
        effects.push(Effect::SceneRequest);
    }

    fn resolve_defeat(&mut self, effects: &mut Vec<Effect>) {
        self.state.phase = GamePhase::GameOver;
        self.state.is_player_turn = false;
        effects.push(Effect::Log("Darkness takes you.".into()));
        effects.push(Effect::GameOver);
    }

    /// Clears battle-scoped state after a successful escape.
    fn teardown_battle(&mut self) {
        self.state.enemies.clear();
        if let Some(player) = self.state.player.as_mut() {
            player.status_effects.clear();
            player.is_defending = false;
        }
        self.state.phase = GamePhase::Exploring;
        self.state.is_player_turn = false;
    }

    // ========================================================================
    // Social encounters
    // ========================================================================

    fn social_ready(&mut self, encounter: SocialEncounter, degraded: bool) -> Vec<Effect> {
        if self.state.phase != GamePhase::Exploring {
            return Vec::new();
        }
        let mut effects = Vec::new();
        if degraded {
            effects.push(Effect::Log("A stranger of few words approaches.".into()));
        }
        effects.push(Effect::Log(encounter.description.clone()));
        self.state.social = Some(encounter);
        self.state.phase = GamePhase::SocialEncounter;
        effects
    }

    fn social_choice(&mut self, index: usize) -> Vec<Effect> {
        if self.state.phase != GamePhase::SocialEncounter {
            return Vec::new();
        }
        let valid = self
            .state
            .social
            .as_ref()
            .is_some_and(|enc| index < enc.choices.len());
        if !valid {
            return Vec::new();
        }
        let Some(encounter) = self.state.social.take() else {
            return Vec::new();
        };
        let choice = &encounter.choices[index];

        let mut effects = vec![Effect::Log(choice.outcome.clone())];
        if let Some(player) = self.state.player.as_mut() {
            player.journal.record(choice.outcome.clone());
        }
        match choice.reward.clone() {
            SocialReward::None => {}
            SocialReward::Xp(amount) => self.award_xp(amount, &mut effects),
            SocialReward::Item(item) => self.receive_item(item, &mut effects),
            SocialReward::Quest(quest) => {
                effects.push(Effect::Log(format!("New quest: {}.", quest.title)));
                effects.push(Effect::Popup {
                    kind: PopupKind::Quest,
                    text: quest.title.clone(),
                });
                if let Some(player) = self.state.player.as_mut() {
                    // generators consult flags to avoid re-offering a quest
                    player.journal.set_flag(format!("quest:{}", quest.id));
                    player.journal.add_quest(quest);
                }
            }
        }
        self.state.phase = GamePhase::Exploring;
        effects
    }

    fn quest_resolved(&mut self, id: &str, success: bool, outcome: String) -> Vec<Effect> {
        if self.state.phase == GamePhase::GameOver {
            return Vec::new();
        }
        let Some(player) = self.state.player.as_mut() else {
            return Vec::new();
        };
        let Some(quest) = player.journal.quest_mut(id) else {
            return Vec::new();
        };
        let changed = if success {
            quest.complete(Some(outcome.clone()))
        } else {
            quest.fail(Some(outcome.clone()))
        };
        if !changed {
            // terminal quests never transition again
            return Vec::new();
        }
        let title = quest.title.clone();
        player.journal.set_flag(format!("quest:{id}:closed"));
        player.journal.record(outcome.clone());

        vec![
            Effect::Log(outcome),
            Effect::Log(format!(
                "Quest {}: {title}.",
                if success { "completed" } else { "failed" }
            )),
            Effect::Popup {
                kind: PopupKind::Quest,
                text: title,
            },
        ]
    }

    // ========================================================================
    // Items and awards
    // ========================================================================

    fn use_item(&mut self, name: String, dice: &mut dyn DiceSource) -> Vec<Effect> {
        match self.state.phase {
            GamePhase::Combat => self.combat_action(PlayerAction::UseItem { name }, dice),
            GamePhase::Exploring => {
                let Some(player) = self.state.player.as_mut() else {
                    return Vec::new();
                };
                let Some(item) = player.inventory.consume(&name) else {
                    return Vec::new();
                };
                let mut effects = Vec::new();
                match item.kind {
                    ItemKind::Potion { heal } => {
                        let gained = player.hp.restore(heal);
                        effects.push(Effect::Log(format!("You drink the {}.", item.name)));
                        effects.push(Effect::Popup {
                            kind: PopupKind::Heal,
                            text: format!("+{gained} HP"),
                        });
                    }
                    ItemKind::Ward { effect, duration } => {
                        player.status_effects.apply(effect, duration, None);
                        effects.push(Effect::Log(format!(
                            "You invoke the {}; {} surrounds you.",
                            item.name, effect
                        )));
                    }
                }
                effects
            }
            _ => Vec::new(),
        }
    }

    fn grant_xp(&mut self, amount: u64) -> Vec<Effect> {
        if self.state.phase == GamePhase::GameOver || self.state.player.is_none() {
            return Vec::new();
        }
        let mut effects = Vec::new();
        self.award_xp(amount, &mut effects);
        effects
    }

    fn grant_item(&mut self, item: Item) -> Vec<Effect> {
        if self.state.phase == GamePhase::GameOver || self.state.player.is_none() {
            return Vec::new();
        }
        let mut effects = Vec::new();
        self.receive_item(item, &mut effects);
        effects
    }

    fn award_xp(&mut self, amount: u64, effects: &mut Vec<Effect>) {
        let Some(player) = self.state.player.as_mut() else {
            return;
        };
        effects.push(Effect::Popup {
            kind: PopupKind::Xp,
            text: format!("+{amount} XP"),
        });
        let levels = progression::grant_xp(player, amount, self.table);
        if levels > 0 {
            effects.push(Effect::Log(format!("You reach level {}!", player.level)));
            effects.push(Effect::LevelUp {
                level: player.level,
            });
        }
    }

    fn receive_item(&mut self, item: Item, effects: &mut Vec<Effect>) {
        let Some(player) = self.state.player.as_mut() else {
            return;
        };
        effects.push(Effect::Log(format!("You receive the {}.", item.name)));
        effects.push(Effect::Popup {
            kind: PopupKind::Item,
            text: item.name.clone(),
        });
        player.inventory.add(item);
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    fn save_requested(&mut self, slot: String, timestamp: i64) -> Vec<Effect> {
        if self.state.phase != GamePhase::Exploring {
            return Vec::new();
        }
        let Ok(record) = SaveRecord::capture(self.state, slot.clone(), timestamp) else {
            return Vec::new();
        };
        vec![
            Effect::Log("You take a moment to record your tale.".into()),
            Effect::SaveReady { slot, record },
        ]
    }

    fn load_game(&mut self, record: SaveRecord) -> Vec<Effect> {
        if !matches!(
            self.state.phase,
            GamePhase::StartScreen | GamePhase::Exploring | GamePhase::GameOver
        ) {
            return Vec::new();
        }
        if let Err(error) = record.validate() {
            return vec![Effect::Log(format!(
                "The saved tale cannot be resumed: {error}."
            ))];
        }
        *self.state = record.restore();
        vec![Effect::Log("The tale resumes where it left off.".into())]
    }
}

/// Maps combat events to narration and popups.
fn combat_effects(events: &[CombatEvent]) -> Vec<Effect> {
    let mut effects = Vec::with_capacity(events.len());
    for event in events {
        effects.push(Effect::Log(event.to_string()));
        if let CombatEvent::Healed {
            target: Combatant::Player,
            amount,
        } = event
        {
            effects.push(Effect::Popup {
                kind: PopupKind::Heal,
                text: format!("+{amount} HP"),
            });
        }
    }
    effects
}
