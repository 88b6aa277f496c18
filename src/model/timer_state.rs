use std::time::{Duration, SystemTime};

use serde_with::serde_as;
use serde_with::TimestampSeconds;

/// Wall-clock span of one playthrough. All methods take the current time as
/// an argument; the state machine never reads the clock itself, so elapsed
/// time is fully deterministic under test. Accumulated pause time is
/// subtracted from the elapsed span.
#[serde_as]
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimerState {
    #[serde_as(as = "TimestampSeconds")]
    pub started_timestamp: SystemTime,
    #[serde_as(as = "Option<TimestampSeconds>")]
    pub paused_timestamp: Option<SystemTime>,
    pub paused_duration: Duration,
    #[serde_as(as = "Option<TimestampSeconds>")]
    pub ended_timestamp: Option<SystemTime>,
}

impl TimerState {
    pub fn started_at(now: SystemTime) -> Self {
        Self {
            started_timestamp: now,
            paused_timestamp: None,
            paused_duration: Duration::from_secs(0),
            ended_timestamp: None,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused_timestamp.is_some()
    }

    pub fn elapsed(&self, now: SystemTime) -> Duration {
        let until_time = self.paused_timestamp.or(self.ended_timestamp).unwrap_or(now);

        until_time
            .duration_since(self.started_timestamp)
            .unwrap_or(Duration::default())
            .saturating_sub(self.paused_duration)
    }

    pub fn paused(&self, now: SystemTime) -> TimerState {
        let mut new_state = self.clone();
        new_state.paused_timestamp = Some(now);
        new_state
    }

    pub fn resumed(&self, now: SystemTime) -> TimerState {
        let mut new_state = self.clone();
        if let Some(pause_time) = new_state.paused_timestamp.take() {
            new_state.paused_duration = new_state.paused_duration.saturating_add(
                now.duration_since(pause_time).unwrap_or(Duration::default()),
            );
        }
        new_state
    }

    pub fn ended(&self, now: SystemTime) -> TimerState {
        let mut new_state = self.clone();
        new_state.ended_timestamp = Some(now);
        new_state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_with_pause() {
        let now = SystemTime::now();
        let timer = TimerState::started_at(now).paused(now + Duration::from_secs(5));

        assert_eq!(
            timer.elapsed(now + Duration::from_secs(30)),
            Duration::from_secs(5)
        );
    }

    #[test]
    fn test_elapsed_with_end() {
        let now = SystemTime::now();
        let timer = TimerState::started_at(now).ended(now + Duration::from_secs(10));

        assert_eq!(
            timer.elapsed(now + Duration::from_secs(99)),
            Duration::from_secs(10)
        );
    }

    #[test]
    fn test_pause_interval_excluded_after_resume() {
        let now = SystemTime::now();
        let timer = TimerState::started_at(now)
            .paused(now + Duration::from_secs(10))
            .resumed(now + Duration::from_secs(13));

        // 20 seconds wall clock, 3 of them paused.
        assert_eq!(
            timer.elapsed(now + Duration::from_secs(20)),
            Duration::from_secs(17)
        );
    }

    #[test]
    fn test_elapsed_running() {
        let now = SystemTime::now();
        let timer = TimerState::started_at(now);

        assert_eq!(
            timer.elapsed(now + Duration::from_secs(5)),
            Duration::from_secs(5)
        );
    }

    #[test]
    fn test_elapsed_never_negative() {
        let now = SystemTime::now();
        // Clock skew: "now" earlier than the start timestamp.
        let timer = TimerState::started_at(now + Duration::from_secs(100));

        assert_eq!(timer.elapsed(now), Duration::from_secs(0));
    }
}
