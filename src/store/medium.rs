use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;

use log::{debug, error};

use crate::model::Document;

/// Durable medium behind the progress store. `load` returning `None` means
/// the document is absent or unreadable; the store substitutes defaults.
pub trait StorageMedium {
    fn load(&self) -> Option<Document>;
    fn save(&self, document: &Document) -> bool;
}

/// JSON file in the platform user-data directory. The serialized document is
/// the engine's only durable wire format and must stay backward-readable.
pub struct JsonFileMedium {
    path: PathBuf,
}

impl JsonFileMedium {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn in_user_data_dir() -> Self {
        let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::new(base.join("mindgym").join("progress.json"))
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl StorageMedium for JsonFileMedium {
    fn load(&self) -> Option<Document> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(_) => {
                debug!(target: "store", "No document at {:?}, using defaults", self.path);
                return None;
            }
        };

        match serde_json::from_str(&contents) {
            Ok(document) => Some(document),
            Err(e) => {
                error!(target: "store", "Corrupt document at {:?}: {}", self.path, e);
                None
            }
        }
    }

    fn save(&self, document: &Document) -> bool {
        let result = (|| -> std::io::Result<()> {
            if let Some(dir) = self.path.parent() {
                fs::create_dir_all(dir)?;
            }
            let contents = serde_json::to_string(document)?;
            fs::write(&self.path, contents)
        })();

        match result {
            Ok(()) => true,
            Err(e) => {
                error!(target: "store", "Failed to save document to {:?}: {}", self.path, e);
                false
            }
        }
    }
}

/// In-memory medium. The engine is single-threaded, so a `RefCell` slot is
/// all the interior mutability required.
#[derive(Default)]
pub struct MemoryMedium {
    slot: RefCell<Option<Document>>,
}

impl MemoryMedium {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageMedium for MemoryMedium {
    fn load(&self) -> Option<Document> {
        self.slot.borrow().clone()
    }

    fn save(&self, document: &Document) -> bool {
        *self.slot.borrow_mut() = Some(document.clone());
        true
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    #[serial]
    fn test_file_medium_round_trips_document() {
        let dir = tempfile::tempdir().unwrap();
        let medium = JsonFileMedium::new(dir.path().join("progress.json"));

        assert!(medium.load().is_none());

        let mut document = Document::default();
        document.stats.total_games_played = 3;
        assert!(medium.save(&document));

        let loaded = medium.load().unwrap();
        assert_eq!(loaded.stats.total_games_played, 3);
    }

    #[test]
    #[serial]
    fn test_file_medium_treats_garbage_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");
        fs::write(&path, "{not json").unwrap();

        let medium = JsonFileMedium::new(path);
        assert!(medium.load().is_none());
    }

    #[test]
    fn test_memory_medium_round_trips_document() {
        let medium = MemoryMedium::new();
        assert!(medium.load().is_none());

        let document = Document::default();
        assert!(medium.save(&document));
        assert_eq!(medium.load().unwrap().stats, document.stats);
    }
}
