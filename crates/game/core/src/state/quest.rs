//! Quests and the player journal.

use std::collections::BTreeSet;

/// Quest lifecycle. Transitions are one-way: `Active` may move to
/// `Completed` or `Failed`; terminal states never change again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QuestStatus {
    Active,
    Completed,
    Failed,
}

/// A quest recorded in the journal.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quest {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: QuestStatus,
    pub giver: Option<String>,
    pub outcome: Option<String>,
    pub reward_text: Option<String>,
}

impl Quest {
    pub fn active(id: impl Into<String>, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            status: QuestStatus::Active,
            giver: None,
            outcome: None,
            reward_text: None,
        }
    }

    pub fn with_giver(mut self, giver: impl Into<String>) -> Self {
        self.giver = Some(giver.into());
        self
    }

    /// Marks the quest completed. Returns false (unchanged) if the quest
    /// already reached a terminal state.
    pub fn complete(&mut self, outcome: Option<String>) -> bool {
        if self.status != QuestStatus::Active {
            return false;
        }
        self.status = QuestStatus::Completed;
        self.outcome = outcome;
        true
    }

    /// Marks the quest failed. Returns false if already terminal.
    pub fn fail(&mut self, outcome: Option<String>) -> bool {
        if self.status != QuestStatus::Active {
            return false;
        }
        self.status = QuestStatus::Failed;
        self.outcome = outcome;
        true
    }
}

/// The player's journal: quests, narrative flags, and an append-only
/// history of notable events.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Journal {
    pub quests: Vec<Quest>,
    pub flags: BTreeSet<String>,
    history: Vec<String>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a quest unless one with the same id already exists.
    pub fn add_quest(&mut self, quest: Quest) -> bool {
        if self.quests.iter().any(|q| q.id == quest.id) {
            return false;
        }
        self.quests.push(quest);
        true
    }

    pub fn quest_mut(&mut self, id: &str) -> Option<&mut Quest> {
        self.quests.iter_mut().find(|q| q.id == id)
    }

    pub fn set_flag(&mut self, flag: impl Into<String>) {
        self.flags.insert(flag.into());
    }

    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.contains(flag)
    }

    /// Appends a history line. History is append-only; there is no removal.
    pub fn record(&mut self, line: impl Into<String>) {
        self.history.push(line.into());
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quest_transitions_are_one_way() {
        let mut quest = Quest::active("q1", "Embers in the Dark", "Find the source of the fires.");
        assert!(quest.complete(Some("The culprit confessed.".into())));
        assert_eq!(quest.status, QuestStatus::Completed);

        // terminal: neither completing again nor failing changes anything
        assert!(!quest.complete(None));
        assert!(!quest.fail(None));
        assert_eq!(quest.status, QuestStatus::Completed);
        assert_eq!(quest.outcome.as_deref(), Some("The culprit confessed."));
    }

    #[test]
    fn duplicate_quest_ids_are_rejected() {
        let mut journal = Journal::new();
        assert!(journal.add_quest(Quest::active("q1", "A", "a")));
        assert!(!journal.add_quest(Quest::active("q1", "B", "b")));
        assert_eq!(journal.quests.len(), 1);
    }

    #[test]
    fn history_appends_in_order() {
        let mut journal = Journal::new();
        journal.record("Met the hermit.");
        journal.record("Left the valley.");
        assert_eq!(journal.history(), ["Met the hermit.", "Left the valley."]);
    }
}
