use study::LogId;
use study_client::ClientError;

use crate::persistence::PersistenceError;

/// Errors surfaced by the entity store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Unknown subject: {0}")]
    UnknownSubject(String),
    #[error("Subject already exists: {0}")]
    DuplicateSubject(String),
    #[error("Subject name must not be empty")]
    EmptyName,
    /// The study log was stored locally, but could not be mirrored because
    /// no actor is logged in.
    #[error("Study {log_id} saved locally but not mirrored: {source}")]
    MissingActor {
        log_id: LogId,
        #[source]
        source: ClientError,
    },
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl StoreError {
    /// ID of a study log that was written despite the error, if any.
    pub fn saved_log_id(&self) -> Option<LogId> {
        match self {
            Self::MissingActor { log_id, .. } => Some(*log_id),
            _ => None,
        }
    }
}
