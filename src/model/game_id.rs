use serde::{Deserialize, Serialize};

/// The fixed set of mini-games the engine tracks progress for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum GameId {
    MemoryCards,
    FocusClicker,
    NumberSequence,
    SimonSays,
    PatternGrid,
    WordRecall,
    FocusAvoider,
    DualTask,
}

impl GameId {
    pub fn all() -> Vec<GameId> {
        vec![
            GameId::MemoryCards,
            GameId::FocusClicker,
            GameId::NumberSequence,
            GameId::SimonSays,
            GameId::PatternGrid,
            GameId::WordRecall,
            GameId::FocusAvoider,
            GameId::DualTask,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameId::MemoryCards => "memoryCards",
            GameId::FocusClicker => "focusClicker",
            GameId::NumberSequence => "numberSequence",
            GameId::SimonSays => "simonSays",
            GameId::PatternGrid => "patternGrid",
            GameId::WordRecall => "wordRecall",
            GameId::FocusAvoider => "focusAvoider",
            GameId::DualTask => "dualTask",
        }
    }

    /// MemoryCards keeps a separate record bucket per difficulty tier.
    pub fn is_tiered(&self) -> bool {
        matches!(self, GameId::MemoryCards)
    }

    /// Improvement direction of the game's primary metric. Move counts and
    /// reaction latencies improve downward; everything else upward.
    pub fn lower_is_better(&self) -> bool {
        matches!(self, GameId::MemoryCards | GameId::FocusClicker)
    }
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
