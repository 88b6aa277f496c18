use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{GameId, Tier};

/// Overwrites `slot` when `candidate` is strictly lower (or the slot is
/// empty). Returns whether the slot changed.
fn improve_min<T: PartialOrd + Copy>(slot: &mut Option<T>, candidate: T) -> bool {
    match slot {
        Some(current) if *current <= candidate => false,
        _ => {
            *slot = Some(candidate);
            true
        }
    }
}

/// Overwrites `slot` when `candidate` is strictly higher (or the slot is
/// empty). Returns whether the slot changed.
fn improve_max<T: PartialOrd + Copy>(slot: &mut Option<T>, candidate: T) -> bool {
    match slot {
        Some(current) if *current >= candidate => false,
        _ => {
            *slot = Some(candidate);
            true
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct MemoryCardsRecord {
    pub best_time: Option<u32>,
    pub best_moves: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct FocusClickerRecord {
    pub best_avg_reaction: Option<u32>,
    pub best_score: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct NumberSequenceRecord {
    pub longest_sequence: Option<u32>,
    pub best_accuracy: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SimonSaysRecord {
    pub longest_sequence: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PatternGridRecord {
    pub highest_level: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct WordRecallRecord {
    pub best_streak: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct FocusAvoiderRecord {
    pub longest_survival: Option<u32>,
    pub best_accuracy: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DualTaskRecord {
    pub best_balance: Option<u32>,
}

/// Per-game best-metric snapshots. Fields only ever move in their
/// improvement direction; a record is never overwritten with a worse value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Records {
    pub memory_cards: BTreeMap<Tier, MemoryCardsRecord>,
    pub focus_clicker: FocusClickerRecord,
    pub number_sequence: NumberSequenceRecord,
    pub simon_says: SimonSaysRecord,
    pub pattern_grid: PatternGridRecord,
    pub word_recall: WordRecallRecord,
    pub focus_avoider: FocusAvoiderRecord,
    pub dual_task: DualTaskRecord,
}

/// One candidate update per game, carrying the metrics a finished session
/// can improve. The improvement direction is enforced here, not by callers.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordUpdate {
    MemoryCards {
        tier: Tier,
        time_secs: u32,
        moves: u32,
    },
    FocusClicker {
        avg_reaction_ms: u32,
        score: i64,
    },
    NumberSequence {
        longest_sequence: u32,
        accuracy: u32,
    },
    SimonSays {
        longest_sequence: u32,
    },
    PatternGrid {
        level: u32,
    },
    WordRecall {
        streak: u32,
    },
    FocusAvoider {
        survival_secs: u32,
        accuracy: u32,
    },
    DualTask {
        balance: u32,
    },
}

impl RecordUpdate {
    pub fn game_id(&self) -> GameId {
        match self {
            RecordUpdate::MemoryCards { .. } => GameId::MemoryCards,
            RecordUpdate::FocusClicker { .. } => GameId::FocusClicker,
            RecordUpdate::NumberSequence { .. } => GameId::NumberSequence,
            RecordUpdate::SimonSays { .. } => GameId::SimonSays,
            RecordUpdate::PatternGrid { .. } => GameId::PatternGrid,
            RecordUpdate::WordRecall { .. } => GameId::WordRecall,
            RecordUpdate::FocusAvoider { .. } => GameId::FocusAvoider,
            RecordUpdate::DualTask { .. } => GameId::DualTask,
        }
    }
}

impl Records {
    /// Applies an update field by field; each field moves only when the new
    /// value is strictly better under its direction. Returns whether any
    /// field improved.
    pub fn apply(&mut self, update: &RecordUpdate) -> bool {
        match *update {
            RecordUpdate::MemoryCards {
                tier,
                time_secs,
                moves,
            } => {
                let bucket = self.memory_cards.entry(tier).or_default();
                let time_improved = improve_min(&mut bucket.best_time, time_secs);
                let moves_improved = improve_min(&mut bucket.best_moves, moves);
                time_improved || moves_improved
            }
            RecordUpdate::FocusClicker {
                avg_reaction_ms,
                score,
            } => {
                let reaction_improved =
                    improve_min(&mut self.focus_clicker.best_avg_reaction, avg_reaction_ms);
                let score_improved = improve_max(&mut self.focus_clicker.best_score, score);
                reaction_improved || score_improved
            }
            RecordUpdate::NumberSequence {
                longest_sequence,
                accuracy,
            } => {
                let sequence_improved = improve_max(
                    &mut self.number_sequence.longest_sequence,
                    longest_sequence,
                );
                let accuracy_improved =
                    improve_max(&mut self.number_sequence.best_accuracy, accuracy);
                sequence_improved || accuracy_improved
            }
            RecordUpdate::SimonSays { longest_sequence } => {
                improve_max(&mut self.simon_says.longest_sequence, longest_sequence)
            }
            RecordUpdate::PatternGrid { level } => {
                improve_max(&mut self.pattern_grid.highest_level, level)
            }
            RecordUpdate::WordRecall { streak } => {
                improve_max(&mut self.word_recall.best_streak, streak)
            }
            RecordUpdate::FocusAvoider {
                survival_secs,
                accuracy,
            } => {
                let survival_improved =
                    improve_max(&mut self.focus_avoider.longest_survival, survival_secs);
                let accuracy_improved =
                    improve_max(&mut self.focus_avoider.best_accuracy, accuracy);
                survival_improved || accuracy_improved
            }
            RecordUpdate::DualTask { balance } => {
                improve_max(&mut self.dual_task.best_balance, balance)
            }
        }
    }

    pub fn memory_cards(&self, tier: Tier) -> MemoryCardsRecord {
        self.memory_cards.get(&tier).cloned().unwrap_or_default()
    }
}
