use serde::{Deserialize, Serialize};

/// Cheap monotonic counters, maintained eagerly on every session append.
/// Everything else (skill level, streak, favorite game) is derived lazily
/// by the analytics module.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Stats {
    pub total_games_played: u32,
    pub total_play_time_secs: u64,
}
