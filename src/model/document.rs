use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Badge, Profile, Records, Session, Stats};

/// Maximum retained sessions; the oldest entry is evicted first.
pub const SESSION_CAP: usize = 100;

fn default_next_session_id() -> u64 {
    1
}

/// The whole persisted document. This is the only durable wire format the
/// engine has; every write replaces it as a unit. Unknown or missing fields
/// fall back to schema defaults so older documents stay readable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Document {
    pub profile: Profile,
    pub records: Records,
    pub badges: Vec<Badge>,
    /// Most-recent-first.
    pub sessions: Vec<Session>,
    pub stats: Stats,
    #[serde(default = "default_next_session_id")]
    pub next_session_id: u64,
}

impl Document {
    /// Fresh document whose profile creation time comes from the caller's
    /// clock rather than the system clock.
    pub fn initial(created_at: DateTime<Utc>) -> Self {
        Document {
            profile: Profile::initial(created_at),
            ..Document::default()
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Document {
            profile: Profile::default(),
            records: Records::default(),
            badges: Vec::new(),
            sessions: Vec::new(),
            stats: Stats::default(),
            next_session_id: default_next_session_id(),
        }
    }
}
