mod json_store;
mod memory;
mod seed;
mod traits;
mod writer;

pub use json_store::JsonFileStore;
pub use memory::MemoryStore;
pub use seed::SeedData;
pub use traits::KeyValueStore;
pub use writer::PersistenceWriter;

use std::fmt;

/// Errors from the persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Persistence writer has shut down")]
    WriterClosed,
}

/// The keys under which each collection is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKey {
    User,
    Subjects,
    Logs,
    Reviews,
}

impl CollectionKey {
    pub const ALL: [CollectionKey; 4] = [Self::User, Self::Subjects, Self::Logs, Self::Reviews];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "remind_user",
            Self::Subjects => "remind_subjects",
            Self::Logs => "remind_logs",
            Self::Reviews => "remind_reviews",
        }
    }
}

impl fmt::Display for CollectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
