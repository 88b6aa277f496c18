mod medium;
mod progress_store;

pub use medium::{JsonFileMedium, MemoryMedium, StorageMedium};
pub use progress_store::ProgressStore;
