use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The fixed achievement catalog. Thresholds live in the badge rule engine;
/// this enum carries the presentational metadata the original catalog shipped
/// with each entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BadgeId {
    Speedster,
    PerfectMemory,
    Consistent,
    SimonMaster,
    PatternExpert,
    WordWizard,
    Survivor,
    Multitasker,
    Dedicated,
    Champion,
}

impl BadgeId {
    pub fn all() -> Vec<BadgeId> {
        vec![
            BadgeId::Speedster,
            BadgeId::PerfectMemory,
            BadgeId::Consistent,
            BadgeId::SimonMaster,
            BadgeId::PatternExpert,
            BadgeId::WordWizard,
            BadgeId::Survivor,
            BadgeId::Multitasker,
            BadgeId::Dedicated,
            BadgeId::Champion,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BadgeId::Speedster => "speedster",
            BadgeId::PerfectMemory => "perfect_memory",
            BadgeId::Consistent => "consistent",
            BadgeId::SimonMaster => "simon_master",
            BadgeId::PatternExpert => "pattern_expert",
            BadgeId::WordWizard => "word_wizard",
            BadgeId::Survivor => "survivor",
            BadgeId::Multitasker => "multitasker",
            BadgeId::Dedicated => "dedicated",
            BadgeId::Champion => "champion",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BadgeId::Speedster => "Speedster",
            BadgeId::PerfectMemory => "Perfect Memory",
            BadgeId::Consistent => "Consistent",
            BadgeId::SimonMaster => "Simon Master",
            BadgeId::PatternExpert => "Pattern Expert",
            BadgeId::WordWizard => "Word Wizard",
            BadgeId::Survivor => "Survivor",
            BadgeId::Multitasker => "Multitasker",
            BadgeId::Dedicated => "Dedicated",
            BadgeId::Champion => "Champion",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            BadgeId::Speedster => "Average reaction time under 450 ms",
            BadgeId::PerfectMemory => "Cleared the hard card grid without a wasted move",
            BadgeId::Consistent => "10 correct sequences in a row",
            BadgeId::SimonMaster => "Repeated a sequence of 20 steps or more",
            BadgeId::PatternExpert => "Reached level 10 in Pattern Grid",
            BadgeId::WordWizard => "15 words recalled in a row",
            BadgeId::Survivor => "Survived 60 seconds in Focus Avoider",
            BadgeId::Multitasker => "90% balance in Dual Task",
            BadgeId::Dedicated => "Played 50 games",
            BadgeId::Champion => "Collected every other badge",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            BadgeId::Speedster => "⚡",
            BadgeId::PerfectMemory => "🧠",
            BadgeId::Consistent => "🎯",
            BadgeId::SimonMaster => "🎨",
            BadgeId::PatternExpert => "🔷",
            BadgeId::WordWizard => "📝",
            BadgeId::Survivor => "🛡️",
            BadgeId::Multitasker => "⚖️",
            BadgeId::Dedicated => "🏆",
            BadgeId::Champion => "👑",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            BadgeId::Speedster => "#f59e0b",
            BadgeId::PerfectMemory => "#8b5cf6",
            BadgeId::Consistent => "#10b981",
            BadgeId::SimonMaster => "#06b6d4",
            BadgeId::PatternExpert => "#3b82f6",
            BadgeId::WordWizard => "#ec4899",
            BadgeId::Survivor => "#ef4444",
            BadgeId::Multitasker => "#14b8a6",
            BadgeId::Dedicated => "#f97316",
            BadgeId::Champion => "#facc15",
        }
    }
}

impl std::fmt::Display for BadgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An earned achievement. Never revoked; `earned_at` is the first award time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub id: BadgeId,
    pub earned_at: DateTime<Utc>,
}
