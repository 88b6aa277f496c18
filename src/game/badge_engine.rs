use std::rc::Rc;

use log::debug;

use crate::model::{BadgeId, GameResult, Records, Session, Tier};
use crate::store::ProgressStore;

pub const SPEEDSTER_AVG_REACTION_MS: u32 = 450;
pub const CONSISTENT_STREAK: u32 = 10;
pub const SIMON_MASTER_SEQUENCE: u32 = 20;
pub const PATTERN_EXPERT_LEVEL: u32 = 10;
pub const WORD_WIZARD_STREAK: u32 = 15;
pub const SURVIVOR_SURVIVAL_SECS: u32 = 60;
pub const MULTITASKER_BALANCE: u32 = 90;
pub const DEDICATED_GAMES_PLAYED: u32 = 50;

/// Maps a finished session to the badges it newly earns. Per-game thresholds
/// are tested against the better of the session's own fields and the stored
/// best record, so a badge whose threshold a player's lifetime best already
/// clears is awarded retroactively on their next run of that game. Awarding
/// is idempotent; a held badge is never re-earned.
pub struct BadgeEngine {
    store: Rc<ProgressStore>,
}

impl BadgeEngine {
    pub fn new(store: Rc<ProgressStore>) -> Self {
        Self { store }
    }

    /// Runs the per-game rules for the session's game, then the global
    /// rules. Returns every badge newly added during this call.
    pub fn evaluate(&self, session: &Session) -> Vec<BadgeId> {
        let records = self.store.records();
        let mut earned = Vec::new();

        if let Some(id) = self.game_rule(&session.result, &records) {
            self.try_award(id, &mut earned);
        }
        self.global_rules(&mut earned);

        if !earned.is_empty() {
            debug!(target: "badges", "Session {} earned {:?}", session.id, earned);
        }
        earned
    }

    /// Idempotent single award; returns whether the badge was newly added.
    pub fn award(&self, id: BadgeId) -> bool {
        self.store.add_badge(id)
    }

    fn try_award(&self, id: BadgeId, earned: &mut Vec<BadgeId>) {
        if self.store.add_badge(id) {
            earned.push(id);
        }
    }

    /// Best-of helpers: a threshold holds if either the current run or the
    /// historical best clears it.
    fn game_rule(&self, result: &GameResult, records: &Records) -> Option<BadgeId> {
        match *result {
            GameResult::FocusClicker {
                avg_reaction_ms, ..
            } => {
                let best = records
                    .focus_clicker
                    .best_avg_reaction
                    .map_or(avg_reaction_ms, |r| r.min(avg_reaction_ms));
                (best < SPEEDSTER_AVG_REACTION_MS).then_some(BadgeId::Speedster)
            }
            GameResult::MemoryCards { tier, moves, .. } => {
                let optimal = Tier::Hard.pair_count();
                let flawless_now = tier == Tier::Hard && moves == optimal;
                let flawless_ever =
                    records.memory_cards(Tier::Hard).best_moves == Some(optimal);
                (flawless_now || flawless_ever).then_some(BadgeId::PerfectMemory)
            }
            GameResult::NumberSequence { correct_streak, .. } => {
                let best = records
                    .number_sequence
                    .longest_sequence
                    .map_or(correct_streak, |s| s.max(correct_streak));
                (best >= CONSISTENT_STREAK).then_some(BadgeId::Consistent)
            }
            GameResult::SimonSays {
                longest_sequence, ..
            } => {
                let best = records
                    .simon_says
                    .longest_sequence
                    .map_or(longest_sequence, |s| s.max(longest_sequence));
                (best >= SIMON_MASTER_SEQUENCE).then_some(BadgeId::SimonMaster)
            }
            GameResult::PatternGrid { level } => {
                let best = records
                    .pattern_grid
                    .highest_level
                    .map_or(level, |l| l.max(level));
                (best >= PATTERN_EXPERT_LEVEL).then_some(BadgeId::PatternExpert)
            }
            GameResult::WordRecall { correct_streak, .. } => {
                let best = records
                    .word_recall
                    .best_streak
                    .map_or(correct_streak, |s| s.max(correct_streak));
                (best >= WORD_WIZARD_STREAK).then_some(BadgeId::WordWizard)
            }
            GameResult::FocusAvoider { survival_secs, .. } => {
                let best = records
                    .focus_avoider
                    .longest_survival
                    .map_or(survival_secs, |s| s.max(survival_secs));
                (best >= SURVIVOR_SURVIVAL_SECS).then_some(BadgeId::Survivor)
            }
            GameResult::DualTask { balance, .. } => {
                let best = records
                    .dual_task
                    .best_balance
                    .map_or(balance, |b| b.max(balance));
                (best >= MULTITASKER_BALANCE).then_some(BadgeId::Multitasker)
            }
        }
    }

    fn global_rules(&self, earned: &mut Vec<BadgeId>) {
        if self.store.stats().total_games_played >= DEDICATED_GAMES_PLAYED {
            self.try_award(BadgeId::Dedicated, earned);
        }

        let all_others_held = BadgeId::all()
            .into_iter()
            .filter(|id| *id != BadgeId::Champion)
            .all(|id| self.store.has_badge(id));
        if all_others_held {
            self.try_award(BadgeId::Champion, earned);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{RecordUpdate, SessionDraft};
    use crate::store::MemoryMedium;

    use super::*;

    fn engine() -> (BadgeEngine, Rc<ProgressStore>) {
        let store = Rc::new(ProgressStore::new(Box::new(MemoryMedium::new())));
        (BadgeEngine::new(Rc::clone(&store)), store)
    }

    fn store_session(store: &ProgressStore, result: GameResult) -> Session {
        store.add_session(SessionDraft {
            duration_secs: 30,
            score: 0,
            result,
        })
    }

    fn focus_clicker(avg_reaction_ms: u32) -> GameResult {
        GameResult::FocusClicker {
            avg_reaction_ms,
            best_reaction_ms: avg_reaction_ms,
            rounds: 10,
        }
    }

    #[test]
    fn test_speedster_awarded_below_threshold_once() {
        let (engine, store) = engine();

        let session = store_session(&store, focus_clicker(300));
        assert_eq!(engine.evaluate(&session), vec![BadgeId::Speedster]);

        // Identical second session: nothing new.
        let session = store_session(&store, focus_clicker(300));
        assert!(engine.evaluate(&session).is_empty());
        assert_eq!(store.badges().len(), 1);
    }

    #[test]
    fn test_speedster_not_awarded_at_threshold() {
        let (engine, store) = engine();
        let session = store_session(&store, focus_clicker(SPEEDSTER_AVG_REACTION_MS));
        assert!(engine.evaluate(&session).is_empty());
    }

    #[test]
    fn test_threshold_met_by_historical_best_only() {
        let (engine, store) = engine();

        // Lifetime best predates the badge catalog entry; the current run is
        // slower than the threshold.
        store.update_record(&RecordUpdate::SimonSays {
            longest_sequence: 25,
        });
        let session = store_session(
            &store,
            GameResult::SimonSays {
                longest_sequence: 6,
                level: 6,
            },
        );

        assert_eq!(engine.evaluate(&session), vec![BadgeId::SimonMaster]);
    }

    #[test]
    fn test_perfect_memory_requires_hard_tier() {
        let (engine, store) = engine();

        let session = store_session(
            &store,
            GameResult::MemoryCards {
                tier: Tier::Easy,
                moves: Tier::Easy.pair_count(),
                time_secs: 40,
            },
        );
        assert!(engine.evaluate(&session).is_empty());

        let session = store_session(
            &store,
            GameResult::MemoryCards {
                tier: Tier::Hard,
                moves: Tier::Hard.pair_count(),
                time_secs: 200,
            },
        );
        assert_eq!(engine.evaluate(&session), vec![BadgeId::PerfectMemory]);
    }

    #[test]
    fn test_dedicated_awarded_at_games_played_threshold() {
        let (engine, store) = engine();

        for _ in 0..(DEDICATED_GAMES_PLAYED - 1) {
            let session = store_session(&store, GameResult::PatternGrid { level: 2 });
            assert!(!engine.evaluate(&session).contains(&BadgeId::Dedicated));
        }

        let session = store_session(&store, GameResult::PatternGrid { level: 2 });
        assert!(engine.evaluate(&session).contains(&BadgeId::Dedicated));
    }

    #[test]
    fn test_champion_awarded_when_all_others_held() {
        let (engine, store) = engine();

        for id in BadgeId::all() {
            if id != BadgeId::Champion && id != BadgeId::Survivor {
                store.add_badge(id);
            }
        }

        // Ninth badge arrives with this session; champion follows in the
        // same call.
        let session = store_session(
            &store,
            GameResult::FocusAvoider {
                survival_secs: 75,
                accuracy: 90,
                good_clicks: 20,
                bad_clicks: 2,
            },
        );
        let earned = engine.evaluate(&session);
        assert_eq!(earned, vec![BadgeId::Survivor, BadgeId::Champion]);
        assert_eq!(store.badges().len(), BadgeId::all().len());
    }
}
