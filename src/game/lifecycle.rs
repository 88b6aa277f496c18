use std::rc::Rc;

use log::{error, trace};
use uuid::Uuid;

use crate::model::{BadgeId, GameId, GameResult, Session, SessionDraft, Tier, TimerState};
use crate::store::ProgressStore;

use super::badge_engine::BadgeEngine;
use super::clock::{Clock, SystemClock};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Idle,
    Playing,
    Paused,
    Finished,
}

/// What `finish` hands back to the game screen: the session as stored plus
/// any badges it newly earned, for celebratory UI.
#[derive(Debug, Clone, PartialEq)]
pub struct FinishedSession {
    pub session: Session,
    pub earned_badges: Vec<BadgeId>,
}

/// Per-game-instance state machine: Idle → Playing ⇄ Paused → Finished.
/// Owns only the ephemeral in-progress state; nothing becomes durable until
/// `finish`. Invalid transitions are silent no-ops since UI races such as a
/// double-click are expected and harmless.
///
/// Recorded durations exclude paused intervals (see the timer state).
pub struct GameLifecycle {
    game_id: GameId,
    state: LifecycleState,
    score: i64,
    tier: Option<Tier>,
    timer: Option<TimerState>,
    playthrough_id: Uuid,
    store: Rc<ProgressStore>,
    badge_engine: BadgeEngine,
    clock: Box<dyn Clock>,
}

impl GameLifecycle {
    pub fn new(game_id: GameId, store: Rc<ProgressStore>) -> Self {
        Self::with_clock(game_id, store, Box::new(SystemClock))
    }

    pub fn with_clock(game_id: GameId, store: Rc<ProgressStore>, clock: Box<dyn Clock>) -> Self {
        let badge_engine = BadgeEngine::new(Rc::clone(&store));
        Self {
            game_id,
            state: LifecycleState::Idle,
            score: 0,
            tier: None,
            timer: None,
            playthrough_id: Uuid::new_v4(),
            store,
            badge_engine,
            clock,
        }
    }

    /// Begins a playthrough. Valid from Idle or Finished; zeroes the running
    /// score, stamps the start time, and keeps the selected tier for tiered
    /// games.
    pub fn start(&mut self, tier: Option<Tier>) {
        match self.state {
            LifecycleState::Idle | LifecycleState::Finished => {
                self.state = LifecycleState::Playing;
                self.score = 0;
                self.tier = tier;
                self.timer = Some(TimerState::started_at(self.clock.now()));
                self.playthrough_id = Uuid::new_v4();
                trace!(
                    target: "lifecycle",
                    "{}: started playthrough {}",
                    self.game_id,
                    self.playthrough_id
                );
            }
            _ => {
                trace!(target: "lifecycle", "{}: start ignored in {:?}", self.game_id, self.state);
            }
        }
    }

    pub fn pause(&mut self) {
        if self.state == LifecycleState::Playing {
            self.state = LifecycleState::Paused;
            let now = self.clock.now();
            self.timer = self.timer.take().map(|t| t.paused(now));
        }
    }

    pub fn resume(&mut self) {
        if self.state == LifecycleState::Paused {
            self.state = LifecycleState::Playing;
            let now = self.clock.now();
            self.timer = self.timer.take().map(|t| t.resumed(now));
        }
    }

    /// Ends the playthrough: computes the elapsed duration, persists the
    /// session (which also bumps the eager stat counters), applies the
    /// session's record update, and runs the badge rules. Valid from Playing
    /// or Paused; returns `None` otherwise, or when the result payload is
    /// for a different game than this controller.
    pub fn finish(&mut self, result: GameResult) -> Option<FinishedSession> {
        match self.state {
            LifecycleState::Playing | LifecycleState::Paused => (),
            _ => {
                trace!(target: "lifecycle", "{}: finish ignored in {:?}", self.game_id, self.state);
                return None;
            }
        }
        if result.game_id() != self.game_id {
            error!(
                target: "lifecycle",
                "{}: dropped finish carrying a {} result",
                self.game_id,
                result.game_id()
            );
            return None;
        }

        let now = self.clock.now();
        let ended = self
            .timer
            .take()
            .unwrap_or_else(|| TimerState::started_at(now))
            .ended(now);
        self.state = LifecycleState::Finished;

        let record_update = result.record_update();
        let session = self.store.add_session(SessionDraft {
            duration_secs: ended.elapsed(now).as_secs() as u32,
            score: self.score,
            result,
        });
        self.store.update_record(&record_update);
        let earned_badges = self.badge_engine.evaluate(&session);

        trace!(
            target: "lifecycle",
            "{}: playthrough {} finished as session {}",
            self.game_id,
            self.playthrough_id,
            session.id
        );
        Some(FinishedSession {
            session,
            earned_badges,
        })
    }

    /// Back to Idle, discarding transient state. Any session already written
    /// by `finish` stays.
    pub fn reset(&mut self) {
        self.state = LifecycleState::Idle;
        self.score = 0;
        self.tier = None;
        self.timer = None;
    }

    pub fn set_score(&mut self, score: i64) {
        self.score = score;
    }

    pub fn add_score(&mut self, amount: i64) {
        self.score += amount;
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn game_id(&self) -> GameId {
        self.game_id
    }

    pub fn tier(&self) -> Option<Tier> {
        self.tier
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn playthrough_id(&self) -> Uuid {
        self.playthrough_id
    }

    pub fn is_playing(&self) -> bool {
        self.state == LifecycleState::Playing
    }

    pub fn is_paused(&self) -> bool {
        self.state == LifecycleState::Paused
    }

    pub fn is_finished(&self) -> bool {
        self.state == LifecycleState::Finished
    }
}
