use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{GameId, RecordUpdate, Tier};

/// Per-game result payload for one finished playthrough, tagged by game id.
/// This is the closed set of shapes a game screen may hand to `finish`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "gameId")]
pub enum GameResult {
    #[serde(rename = "memoryCards", rename_all = "camelCase")]
    MemoryCards { tier: Tier, moves: u32, time_secs: u32 },
    #[serde(rename = "focusClicker", rename_all = "camelCase")]
    FocusClicker {
        avg_reaction_ms: u32,
        best_reaction_ms: u32,
        rounds: u32,
    },
    #[serde(rename = "numberSequence", rename_all = "camelCase")]
    NumberSequence {
        longest_sequence: u32,
        correct_streak: u32,
        total_attempts: u32,
        accuracy: u32,
    },
    #[serde(rename = "simonSays", rename_all = "camelCase")]
    SimonSays { longest_sequence: u32, level: u32 },
    #[serde(rename = "patternGrid", rename_all = "camelCase")]
    PatternGrid { level: u32 },
    #[serde(rename = "wordRecall", rename_all = "camelCase")]
    WordRecall {
        correct_streak: u32,
        total_attempts: u32,
        accuracy: u32,
    },
    #[serde(rename = "focusAvoider", rename_all = "camelCase")]
    FocusAvoider {
        survival_secs: u32,
        accuracy: u32,
        good_clicks: u32,
        bad_clicks: u32,
    },
    #[serde(rename = "dualTask", rename_all = "camelCase")]
    DualTask {
        task1_score: u32,
        task2_score: u32,
        balance: u32,
    },
}

impl GameResult {
    pub fn game_id(&self) -> GameId {
        match self {
            GameResult::MemoryCards { .. } => GameId::MemoryCards,
            GameResult::FocusClicker { .. } => GameId::FocusClicker,
            GameResult::NumberSequence { .. } => GameId::NumberSequence,
            GameResult::SimonSays { .. } => GameId::SimonSays,
            GameResult::PatternGrid { .. } => GameId::PatternGrid,
            GameResult::WordRecall { .. } => GameId::WordRecall,
            GameResult::FocusAvoider { .. } => GameId::FocusAvoider,
            GameResult::DualTask { .. } => GameId::DualTask,
        }
    }

    /// The candidate record update this result can produce.
    pub fn record_update(&self) -> RecordUpdate {
        match *self {
            GameResult::MemoryCards {
                tier,
                moves,
                time_secs,
            } => RecordUpdate::MemoryCards {
                tier,
                time_secs,
                moves,
            },
            GameResult::FocusClicker {
                avg_reaction_ms, ..
            } => RecordUpdate::FocusClicker {
                avg_reaction_ms,
                // The original scoring formula: fewer milliseconds, more points.
                score: 1000 - avg_reaction_ms as i64,
            },
            GameResult::NumberSequence {
                longest_sequence,
                accuracy,
                ..
            } => RecordUpdate::NumberSequence {
                longest_sequence,
                accuracy,
            },
            GameResult::SimonSays {
                longest_sequence, ..
            } => RecordUpdate::SimonSays { longest_sequence },
            GameResult::PatternGrid { level } => RecordUpdate::PatternGrid { level },
            GameResult::WordRecall { correct_streak, .. } => RecordUpdate::WordRecall {
                streak: correct_streak,
            },
            GameResult::FocusAvoider {
                survival_secs,
                accuracy,
                ..
            } => RecordUpdate::FocusAvoider {
                survival_secs,
                accuracy,
            },
            GameResult::DualTask { balance, .. } => RecordUpdate::DualTask { balance },
        }
    }

    /// The metric trend analysis compares between runs of the same game.
    pub fn primary_metric(&self) -> f64 {
        match *self {
            GameResult::MemoryCards { moves, .. } => moves as f64,
            GameResult::FocusClicker {
                avg_reaction_ms, ..
            } => avg_reaction_ms as f64,
            GameResult::NumberSequence {
                longest_sequence, ..
            } => longest_sequence as f64,
            GameResult::SimonSays {
                longest_sequence, ..
            } => longest_sequence as f64,
            GameResult::PatternGrid { level } => level as f64,
            GameResult::WordRecall { correct_streak, .. } => correct_streak as f64,
            GameResult::FocusAvoider { survival_secs, .. } => survival_secs as f64,
            GameResult::DualTask { balance, .. } => balance as f64,
        }
    }
}

/// The fields a caller supplies for a session; id and timestamp are assigned
/// by the store when the session is appended.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionDraft {
    pub duration_secs: u32,
    pub score: i64,
    pub result: GameResult,
}

/// One completed playthrough, as stored. Immutable once appended.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: u64,
    pub duration_secs: u32,
    pub score: i64,
    pub recorded_at: DateTime<Utc>,
    #[serde(flatten)]
    pub result: GameResult,
}

impl Session {
    pub fn game_id(&self) -> GameId {
        self.result.game_id()
    }
}
