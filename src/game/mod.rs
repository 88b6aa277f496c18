pub mod analytics;
pub mod badge_engine;
pub mod clock;
pub mod lifecycle;

pub use analytics::{Analytics, ChartPoint, GameSummary, OverallStats, Trend};
pub use badge_engine::BadgeEngine;
pub use clock::{Clock, SystemClock};
pub use lifecycle::{FinishedSession, GameLifecycle, LifecycleState};
