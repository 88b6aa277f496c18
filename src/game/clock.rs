use std::time::SystemTime;

use chrono::{DateTime, Utc};

/// Source of wall-clock time. Injected everywhere a timestamp or duration is
/// taken so tests never have to wait on real time.
pub trait Clock {
    fn now(&self) -> SystemTime;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

pub fn to_utc(time: SystemTime) -> DateTime<Utc> {
    DateTime::<Utc>::from(time)
}

#[cfg(test)]
pub use fixed::FixedClock;

#[cfg(test)]
mod fixed {
    use std::cell::Cell;
    use std::rc::Rc;
    use std::time::{Duration, SystemTime};

    use super::Clock;

    /// Test clock; the test keeps an `Rc` handle and moves time by hand.
    #[derive(Debug)]
    pub struct FixedClock {
        now: Cell<SystemTime>,
    }

    impl FixedClock {
        pub fn at(now: SystemTime) -> Rc<Self> {
            Rc::new(FixedClock {
                now: Cell::new(now),
            })
        }

        pub fn set(&self, now: SystemTime) {
            self.now.set(now);
        }

        pub fn advance(&self, by: Duration) {
            self.now.set(self.now.get() + by);
        }
    }

    impl Clock for Rc<FixedClock> {
        fn now(&self) -> SystemTime {
            self.now.get()
        }
    }
}
