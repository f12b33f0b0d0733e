//! Top-level session state.

use std::collections::VecDeque;

use super::enemy::Enemy;
use super::item::Item;
use super::player::Player;
use super::quest::Quest;
use super::world::{LocationId, World};
use crate::config::GameLimits;

/// The single active mode of the session. Exactly one phase is current;
/// the reducer ignores events that do not apply to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GamePhase {
    StartScreen,
    CharacterCreation,
    Loading,
    Exploring,
    Combat,
    SocialEncounter,
    GameOver,
}

/// A menu entry the player can pick while exploring.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameAction {
    pub label: String,
    pub kind: GameActionKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameActionKind {
    /// Travel to a connected location.
    Move { target: LocationId },
    /// Poke around the current location.
    Explore,
    /// Seek out trouble directly.
    Encounter,
}

impl GameAction {
    pub fn travel(label: impl Into<String>, target: LocationId) -> Self {
        Self {
            label: label.into(),
            kind: GameActionKind::Move { target },
        }
    }

    pub fn explore(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: GameActionKind::Explore,
        }
    }

    pub fn encounter(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: GameActionKind::Encounter,
        }
    }
}

/// What picking a social choice grants.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SocialReward {
    None,
    Xp(u64),
    Item(Item),
    Quest(Quest),
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SocialChoice {
    pub label: String,
    /// Narration shown after the choice resolves.
    pub outcome: String,
    pub reward: SocialReward,
}

/// A non-combat encounter awaiting a player choice.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SocialEncounter {
    pub description: String,
    pub choices: Vec<SocialChoice>,
}

/// Bounded session log. Oldest lines are evicted once the buffer is full.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RingLog {
    lines: VecDeque<String>,
}

impl RingLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: impl Into<String>) {
        if self.lines.len() == GameLimits::MAX_LOG_LINES {
            self.lines.pop_front();
        }
        self.lines.push_back(line.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn to_lines(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }

    pub fn from_lines(lines: Vec<String>) -> Self {
        let mut log = Self::new();
        for line in lines {
            log.push(line);
        }
        log
    }
}

/// The canonical session snapshot. One lives at a time; the reducer is the
/// only writer, and every accepted event replaces its contents in place.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionState {
    pub phase: GamePhase,
    /// Absent until character creation completes.
    pub player: Option<Player>,
    /// Current encounter, in initiative order. Empty outside combat.
    pub enemies: Vec<Enemy>,
    pub story_text: String,
    pub actions: Vec<GameAction>,
    pub log: RingLog,
    pub is_player_turn: bool,
    pub social: Option<SocialEncounter>,
    pub world: World,
    pub location: LocationId,
}

impl SessionState {
    /// Fresh session at the start screen.
    pub fn new() -> Self {
        Self {
            phase: GamePhase::StartScreen,
            player: None,
            enemies: Vec::new(),
            story_text: String::new(),
            actions: Vec::new(),
            log: RingLog::new(),
            is_player_turn: false,
            social: None,
            world: World::new(),
            location: LocationId(0),
        }
    }

    /// True when the enemy list is non-empty and every entry is defeated.
    pub fn all_enemies_defeated(&self) -> bool {
        !self.enemies.is_empty() && self.enemies.iter().all(|e| !e.is_alive())
    }

    pub fn living_enemies(&self) -> impl Iterator<Item = (usize, &Enemy)> {
        self.enemies.iter().enumerate().filter(|(_, e)| e.is_alive())
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_log_evicts_oldest() {
        let mut log = RingLog::new();
        for i in 0..GameLimits::MAX_LOG_LINES + 5 {
            log.push(format!("line {i}"));
        }
        assert_eq!(log.len(), GameLimits::MAX_LOG_LINES);
        assert_eq!(log.iter().next(), Some("line 5"));
    }

    #[test]
    fn victory_requires_nonempty_enemy_list() {
        let mut state = SessionState::new();
        assert!(!state.all_enemies_defeated());

        let mut dead = Enemy::new("Husk", "", 10, 2);
        dead.hp.deplete(10);
        state.enemies.push(dead);
        assert!(state.all_enemies_defeated());

        state.enemies.push(Enemy::new("Husk", "", 10, 2));
        assert!(!state.all_enemies_defeated());
    }
}
