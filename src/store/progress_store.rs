use log::{debug, error, trace};

use crate::game::clock::{to_utc, Clock, SystemClock};
use crate::model::{
    Badge, BadgeId, Document, GameId, Profile, ProfilePatch, RecordUpdate, Records, Session,
    SessionDraft, Stats, SESSION_CAP,
};

use super::StorageMedium;

/// Typed accessor surface over a storage medium. All state lives in the
/// persisted document; every accessor loads, mutates, and replaces it whole,
/// so there are no partial-field races on the single-threaded host.
///
/// Reads never fail: an absent or corrupt document is replaced by schema
/// defaults. Write failures are logged and reported as `false`, never
/// propagated as panics.
pub struct ProgressStore {
    medium: Box<dyn StorageMedium>,
    clock: Box<dyn Clock>,
}

impl ProgressStore {
    pub fn new(medium: Box<dyn StorageMedium>) -> Self {
        Self::with_clock(medium, Box::new(SystemClock))
    }

    pub fn with_clock(medium: Box<dyn StorageMedium>, clock: Box<dyn Clock>) -> Self {
        Self { medium, clock }
    }

    pub fn load(&self) -> Document {
        self.medium
            .load()
            .unwrap_or_else(|| Document::initial(to_utc(self.clock.now())))
    }

    pub fn save(&self, document: &Document) -> bool {
        self.medium.save(document)
    }

    pub fn profile(&self) -> Profile {
        self.load().profile
    }

    pub fn update_profile(&self, patch: ProfilePatch) -> Profile {
        let mut document = self.load();
        document.profile.apply(patch);
        self.save(&document);
        document.profile
    }

    pub fn records(&self) -> Records {
        self.load().records
    }

    /// Applies a candidate record update under its improvement direction and
    /// persists only when a field actually moved. Returns whether it did.
    pub fn update_record(&self, update: &RecordUpdate) -> bool {
        let mut document = self.load();
        let improved = document.records.apply(update);
        if improved {
            debug!(target: "store", "New record for {}: {:?}", update.game_id(), update);
            self.save(&document);
        }
        improved
    }

    /// Appends a session, assigning its id and timestamp, and bumps the
    /// eager stat counters in the same document write so the two can never
    /// disagree. The log is capped; the oldest entry is evicted first.
    pub fn add_session(&self, draft: SessionDraft) -> Session {
        let mut document = self.load();

        let session = Session {
            id: document.next_session_id,
            duration_secs: draft.duration_secs,
            score: draft.score,
            recorded_at: to_utc(self.clock.now()),
            result: draft.result,
        };
        document.next_session_id += 1;

        document.sessions.insert(0, session.clone());
        document.sessions.truncate(SESSION_CAP);

        document.stats.total_games_played += 1;
        document.stats.total_play_time_secs += session.duration_secs as u64;

        trace!(
            target: "store",
            "Recorded session {} for {} ({}s)",
            session.id,
            session.game_id(),
            session.duration_secs
        );
        self.save(&document);
        session
    }

    /// Sessions most-recent-first, optionally filtered by game.
    pub fn sessions(&self, game: Option<GameId>, limit: usize) -> Vec<Session> {
        let sessions = self.load().sessions;
        sessions
            .into_iter()
            .filter(|s| game.map_or(true, |g| s.game_id() == g))
            .take(limit)
            .collect()
    }

    /// Idempotent: returns whether the badge was newly added. An already
    /// held badge keeps its original earned timestamp.
    pub fn add_badge(&self, id: BadgeId) -> bool {
        let mut document = self.load();
        if document.badges.iter().any(|b| b.id == id) {
            return false;
        }

        document.badges.push(Badge {
            id,
            earned_at: to_utc(self.clock.now()),
        });
        debug!(target: "store", "Badge earned: {}", id);
        self.save(&document);
        true
    }

    pub fn badges(&self) -> Vec<Badge> {
        self.load().badges
    }

    pub fn has_badge(&self, id: BadgeId) -> bool {
        self.load().badges.iter().any(|b| b.id == id)
    }

    pub fn stats(&self) -> Stats {
        self.load().stats
    }

    /// Resets to the default document in one write.
    pub fn clear_all(&self) -> bool {
        self.save(&Document::initial(to_utc(self.clock.now())))
    }

    pub fn export_json(&self) -> String {
        serde_json::to_string_pretty(&self.load()).unwrap_or_else(|e| {
            error!(target: "store", "Failed to export document: {}", e);
            String::new()
        })
    }

    /// Replaces the document when the payload parses; leaves state untouched
    /// otherwise.
    pub fn import_json(&self, raw: &str) -> bool {
        match serde_json::from_str::<Document>(raw) {
            Ok(document) => self.save(&document),
            Err(e) => {
                error!(target: "store", "Rejected import: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;
    use std::time::{Duration, UNIX_EPOCH};

    use crate::game::clock::FixedClock;
    use crate::model::{GameResult, Tier};
    use crate::store::MemoryMedium;

    use super::*;

    fn test_store() -> (ProgressStore, Rc<FixedClock>) {
        let clock = FixedClock::at(UNIX_EPOCH + Duration::from_secs(1_700_000_000));
        let store = ProgressStore::with_clock(
            Box::new(MemoryMedium::new()),
            Box::new(Rc::clone(&clock)),
        );
        (store, clock)
    }

    fn simon_draft(longest_sequence: u32, duration_secs: u32) -> SessionDraft {
        SessionDraft {
            duration_secs,
            score: longest_sequence as i64 * 10,
            result: GameResult::SimonSays {
                longest_sequence,
                level: longest_sequence,
            },
        }
    }

    #[test]
    fn test_add_session_increments_stats_in_lockstep() {
        let (store, _) = test_store();

        store.add_session(simon_draft(5, 30));
        store.add_session(simon_draft(8, 45));

        let stats = store.stats();
        assert_eq!(stats.total_games_played, 2);
        assert_eq!(stats.total_play_time_secs, 75);
    }

    #[test]
    fn test_session_ids_are_monotonic_and_log_is_newest_first() {
        let (store, clock) = test_store();

        store.add_session(simon_draft(5, 30));
        clock.advance(Duration::from_secs(60));
        store.add_session(simon_draft(8, 45));

        let sessions = store.sessions(None, 10);
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].id, 2);
        assert_eq!(sessions[1].id, 1);
        assert!(sessions[0].recorded_at > sessions[1].recorded_at);
    }

    #[test]
    fn test_session_log_is_capped_fifo() {
        let (store, _) = test_store();

        for i in 0..(SESSION_CAP as u32 + 5) {
            store.add_session(simon_draft(i, 1));
        }

        let sessions = store.sessions(None, SESSION_CAP + 10);
        assert_eq!(sessions.len(), SESSION_CAP);
        // Newest kept, the five oldest evicted.
        assert_eq!(sessions[0].id, SESSION_CAP as u64 + 5);
        assert_eq!(sessions.last().unwrap().id, 6);
        // Stats still count every append.
        assert_eq!(store.stats().total_games_played, SESSION_CAP as u32 + 5);
    }

    #[test]
    fn test_sessions_filtered_by_game() {
        let (store, _) = test_store();

        store.add_session(simon_draft(5, 30));
        store.add_session(SessionDraft {
            duration_secs: 60,
            score: 0,
            result: GameResult::PatternGrid { level: 4 },
        });

        let simon = store.sessions(Some(GameId::SimonSays), 10);
        assert_eq!(simon.len(), 1);
        assert_eq!(simon[0].game_id(), GameId::SimonSays);

        assert!(store.sessions(Some(GameId::DualTask), 10).is_empty());
    }

    #[test]
    fn test_add_badge_is_idempotent_with_earliest_timestamp() {
        let (store, clock) = test_store();

        assert!(store.add_badge(BadgeId::Speedster));
        let first = store.badges()[0].earned_at;

        clock.advance(Duration::from_secs(3600));
        assert!(!store.add_badge(BadgeId::Speedster));

        let badges = store.badges();
        assert_eq!(badges.len(), 1);
        assert_eq!(badges[0].earned_at, first);
        assert!(store.has_badge(BadgeId::Speedster));
        assert!(!store.has_badge(BadgeId::Champion));
    }

    #[test]
    fn test_update_record_persists_only_improvements() {
        let (store, _) = test_store();

        assert!(store.update_record(&RecordUpdate::MemoryCards {
            tier: Tier::Easy,
            time_secs: 40,
            moves: 12,
        }));
        assert!(!store.update_record(&RecordUpdate::MemoryCards {
            tier: Tier::Easy,
            time_secs: 50,
            moves: 14,
        }));

        let bucket = store.records().memory_cards(Tier::Easy);
        assert_eq!(bucket.best_time, Some(40));
        assert_eq!(bucket.best_moves, Some(12));
    }

    #[test]
    fn test_clear_all_resets_to_defaults() {
        let (store, _) = test_store();
        store.add_session(simon_draft(5, 30));
        store.add_badge(BadgeId::SimonMaster);

        assert!(store.clear_all());

        assert_eq!(store.stats(), Stats::default());
        assert!(store.sessions(None, 10).is_empty());
        assert!(store.badges().is_empty());
    }

    #[test]
    fn test_export_import_round_trip() {
        let (store, _) = test_store();
        store.add_session(simon_draft(5, 30));
        store.add_badge(BadgeId::SimonMaster);
        let exported = store.export_json();

        let (other, _) = test_store();
        assert!(other.import_json(&exported));
        assert_eq!(other.stats(), store.stats());
        assert_eq!(other.badges(), store.badges());
        assert_eq!(other.sessions(None, 10), store.sessions(None, 10));
    }

    #[test]
    fn test_import_rejects_garbage_and_keeps_state() {
        let (store, _) = test_store();
        store.add_session(simon_draft(5, 30));

        assert!(!store.import_json("{\"profile\": 42}"));
        assert_eq!(store.stats().total_games_played, 1);
    }

    #[test]
    fn test_reads_fall_back_to_defaults_on_empty_medium() {
        let (store, _) = test_store();

        assert_eq!(store.stats(), Stats::default());
        assert_eq!(store.profile().theme, "light");
        assert_eq!(store.records(), Records::default());
        assert!(store.sessions(None, 10).is_empty());
    }

    #[test]
    fn test_first_load_stamps_profile_creation_from_clock() {
        let (store, clock) = test_store();
        assert_eq!(store.profile().created_at, to_utc(clock.now()));
    }

    #[test]
    fn test_clock_stamps_session_time() {
        let at = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        let clock = FixedClock::at(at);
        let store = ProgressStore::with_clock(
            Box::new(MemoryMedium::new()),
            Box::new(Rc::clone(&clock)),
        );

        let session = store.add_session(simon_draft(5, 30));
        assert_eq!(session.recorded_at, to_utc(at));
    }
}
