use serde::{Deserialize, Serialize};

/// Difficulty tier for the card-grid game. Each tier keeps its own record
/// bucket.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Easy,
    Medium,
    Hard,
}

impl Default for Tier {
    fn default() -> Self {
        Tier::Easy
    }
}

impl Tier {
    pub fn all() -> Vec<Tier> {
        vec![Tier::Easy, Tier::Medium, Tier::Hard]
    }

    pub fn grid_size(&self) -> usize {
        match self {
            Tier::Easy => 4,
            Tier::Medium => 6,
            Tier::Hard => 8,
        }
    }

    /// Number of card pairs on the grid; also the minimum possible move
    /// count for a flawless playthrough.
    pub fn pair_count(&self) -> u32 {
        let size = self.grid_size() as u32;
        size * size / 2
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Easy => "easy",
            Tier::Medium => "medium",
            Tier::Hard => "hard",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
