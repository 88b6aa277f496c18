mod badge;
mod document;
mod game_id;
mod profile;
mod record;
mod session;
mod stats;
mod tier;
mod timer_state;

pub use badge::{Badge, BadgeId};
pub use document::{Document, SESSION_CAP};
pub use game_id::GameId;
pub use profile::{AccessibilitySettings, FontSize, Profile, ProfilePatch};
pub use record::{
    DualTaskRecord, FocusAvoiderRecord, FocusClickerRecord, MemoryCardsRecord,
    NumberSequenceRecord, PatternGridRecord, RecordUpdate, Records, SimonSaysRecord,
    WordRecallRecord,
};
pub use session::{GameResult, Session, SessionDraft};
pub use stats::Stats;
pub use tier::Tier;
pub use timer_state::TimerState;
