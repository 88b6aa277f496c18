use std::rc::Rc;

use chrono::{DateTime, Days, NaiveDate, Utc};
use itertools::Itertools;

use crate::model::{GameId, Records, Session, Tier, SESSION_CAP};
use crate::store::ProgressStore;

use super::clock::{to_utc, Clock, SystemClock};

/// Absolute mean-metric change that counts as a real movement; anything
/// smaller reads as neutral.
const TREND_THRESHOLD: f64 = 5.0;
/// Trend needs two full windows of this size.
const TREND_WINDOW: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverallStats {
    pub total_games_played: u32,
    pub total_play_time_secs: u64,
    pub badge_count: usize,
    /// Composite 0-100 score over the per-game bests.
    pub skill_level: u32,
    pub favorite_game: Option<GameId>,
    pub avg_session_secs: u32,
    /// Consecutive calendar days with at least one session, ending today.
    pub daily_streak: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameSummary {
    pub games_played: usize,
    pub average_metric: f64,
    pub total_play_time_secs: u64,
    pub trend: Trend,
}

/// One point of a per-day progress series.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Read-only derivations over the store snapshot. Every function degrades to
/// zero/empty/neutral defaults when the underlying data is absent.
pub struct Analytics {
    store: Rc<ProgressStore>,
    clock: Box<dyn Clock>,
}

impl Analytics {
    pub fn new(store: Rc<ProgressStore>) -> Self {
        Self::with_clock(store, Box::new(SystemClock))
    }

    pub fn with_clock(store: Rc<ProgressStore>, clock: Box<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn overall_stats(&self) -> OverallStats {
        let stats = self.store.stats();
        let sessions = self.store.sessions(None, SESSION_CAP);

        let favorite_game = sessions
            .iter()
            .map(|s| s.game_id())
            .counts()
            .into_iter()
            .sorted_by(|a, b| b.1.cmp(&a.1).then(a.0.as_str().cmp(b.0.as_str())))
            .map(|(game, _)| game)
            .next();

        let avg_session_secs = if stats.total_games_played > 0 {
            (stats.total_play_time_secs / stats.total_games_played as u64) as u32
        } else {
            0
        };

        OverallStats {
            total_games_played: stats.total_games_played,
            total_play_time_secs: stats.total_play_time_secs,
            badge_count: self.store.badges().len(),
            skill_level: skill_level(&self.store.records()),
            favorite_game,
            avg_session_secs,
            daily_streak: self.daily_streak(&sessions),
        }
    }

    pub fn game_summary(&self, game: GameId) -> GameSummary {
        let sessions = self.store.sessions(Some(game), SESSION_CAP);

        let average_metric = mean(sessions.iter().map(|s| s.result.primary_metric()));
        let total_play_time_secs = sessions.iter().map(|s| s.duration_secs as u64).sum();

        GameSummary {
            games_played: sessions.len(),
            average_metric,
            total_play_time_secs,
            trend: trend(game, &sessions),
        }
    }

    /// Per-day averaged primary metric for a game over the trailing `days`
    /// window, oldest day first. Days without a session yield no point.
    pub fn progress_chart(&self, game: GameId, days: u64) -> Vec<ChartPoint> {
        let now = to_utc(self.clock.now());
        let cutoff = now
            .checked_sub_days(Days::new(days))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);

        self.store
            .sessions(Some(game), SESSION_CAP)
            .into_iter()
            .filter(|s| s.recorded_at >= cutoff)
            .map(|s| (s.recorded_at.date_naive(), s.result.primary_metric()))
            .into_group_map()
            .into_iter()
            .map(|(date, values)| ChartPoint {
                date,
                value: mean(values.into_iter()),
            })
            .sorted_by(|a, b| a.date.cmp(&b.date))
            .collect()
    }

    /// Counts back from today over the distinct session dates; stops at the
    /// first missing day. No session today means no streak.
    fn daily_streak(&self, sessions: &[Session]) -> u32 {
        let today = to_utc(self.clock.now()).date_naive();
        let days = sessions
            .iter()
            .map(|s| s.recorded_at.date_naive())
            .unique()
            .sorted_by(|a, b| b.cmp(a));

        let mut streak = 0;
        let mut expected = today;
        for day in days {
            if day > expected {
                continue;
            }
            if day != expected {
                break;
            }
            streak += 1;
            expected = match expected.checked_sub_days(Days::new(1)) {
                Some(previous) => previous,
                None => break,
            };
        }
        streak
    }
}

/// Composite skill level: the mean of up to four normalized sub-scores, one
/// per game with a qualifying record, each clamped to 0-100. No records, no
/// score.
pub fn skill_level(records: &Records) -> u32 {
    let mut sub_scores: Vec<f64> = Vec::new();

    if let Some(moves) = records.memory_cards(Tier::Hard).best_moves {
        let optimal = Tier::Hard.pair_count() as f64;
        sub_scores.push(100.0 - (moves as f64 - optimal) * 2.0);
    }
    if let Some(reaction) = records.focus_clicker.best_avg_reaction {
        sub_scores.push(100.0 - (reaction as f64 - 200.0) / 3.0);
    }
    if let Some(sequence) = records.number_sequence.longest_sequence {
        sub_scores.push(sequence as f64 * 10.0);
    }
    if let Some(sequence) = records.simon_says.longest_sequence {
        sub_scores.push(sequence as f64 * 5.0);
    }

    if sub_scores.is_empty() {
        return 0;
    }
    let average = sub_scores
        .iter()
        .map(|s| s.clamp(0.0, 100.0))
        .sum::<f64>()
        / sub_scores.len() as f64;
    average.round() as u32
}

/// Mean of the latest window against the window before it, signed by the
/// game's improvement direction. Under ten sessions there is not enough
/// history to call a direction.
fn trend(game: GameId, sessions: &[Session]) -> Trend {
    if sessions.len() < TREND_WINDOW * 2 {
        return Trend::Neutral;
    }

    let recent = mean(
        sessions[..TREND_WINDOW]
            .iter()
            .map(|s| s.result.primary_metric()),
    );
    let previous = mean(
        sessions[TREND_WINDOW..TREND_WINDOW * 2]
            .iter()
            .map(|s| s.result.primary_metric()),
    );

    let improvement = if game.lower_is_better() {
        previous - recent
    } else {
        recent - previous
    };

    if improvement > TREND_THRESHOLD {
        Trend::Up
    } else if improvement < -TREND_THRESHOLD {
        Trend::Down
    } else {
        Trend::Neutral
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let collected: Vec<f64> = values.collect();
    if collected.is_empty() {
        return 0.0;
    }
    collected.iter().sum::<f64>() / collected.len() as f64
}
