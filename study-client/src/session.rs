use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ClientError, ClientResult};
use crate::traits::{ActorId, ActorResolver};

/// What a successful login leaves on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredSession {
    pub actor_id: ActorId,
    #[serde(default)]
    pub email: Option<String>,
}

/// Login session persisted as a small JSON file.
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Save a session to disk.
    pub fn save(&self, session: &StoredSession) -> ClientResult<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)
                .map_err(|e| ClientError::Session(format!("Failed to create directory: {}", e)))?;
        }
        let json = serde_json::to_string_pretty(session)
            .map_err(|e| ClientError::Session(format!("Failed to serialize session: {}", e)))?;
        std::fs::write(&self.path, json)
            .map_err(|e| ClientError::Session(format!("Failed to write session file: {}", e)))?;
        Ok(())
    }

    /// Load the saved session, if one exists.
    pub fn load(&self) -> ClientResult<Option<StoredSession>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&self.path)
            .map_err(|e| ClientError::Session(format!("Failed to read session file: {}", e)))?;
        let session = serde_json::from_str(&contents)
            .map_err(|e| ClientError::Session(format!("Failed to parse session file: {}", e)))?;
        Ok(Some(session))
    }

    /// Delete the session file (logout).
    pub fn clear(&self) -> ClientResult<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)
                .map_err(|e| ClientError::Session(format!("Failed to remove session file: {}", e)))?;
        }
        Ok(())
    }
}

impl ActorResolver for SessionFile {
    fn resolve_actor_id(&self) -> ClientResult<ActorId> {
        match self.load() {
            Ok(Some(session)) if !session.actor_id.trim().is_empty() => Ok(session.actor_id),
            Ok(_) => Err(ClientError::MissingActor(
                "not logged in (no session file)".to_string(),
            )),
            Err(e) => Err(ClientError::MissingActor(e.to_string())),
        }
    }
}

/// Resolver with a fixed answer.
#[derive(Debug, Clone, Default)]
pub struct StaticActor(pub Option<ActorId>);

impl StaticActor {
    pub fn logged_in(actor_id: impl Into<ActorId>) -> Self {
        Self(Some(actor_id.into()))
    }

    pub fn anonymous() -> Self {
        Self(None)
    }
}

impl ActorResolver for StaticActor {
    fn resolve_actor_id(&self) -> ClientResult<ActorId> {
        self.0
            .clone()
            .ok_or_else(|| ClientError::MissingActor("no actor configured".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_load_clear() {
        let dir = tempfile::tempdir().unwrap();
        let file = SessionFile::new(dir.path().join("nested").join("session.json"));
        let session = StoredSession {
            actor_id: "17".to_string(),
            email: Some("ana@example.com".to_string()),
        };

        file.save(&session).unwrap();
        assert_eq!(file.load().unwrap(), Some(session));
        assert_eq!(file.resolve_actor_id().unwrap(), "17");

        file.clear().unwrap();
        assert_eq!(file.load().unwrap(), None);
    }

    #[test]
    fn test_missing_session_is_missing_actor() {
        let dir = tempfile::tempdir().unwrap();
        let file = SessionFile::new(dir.path().join("session.json"));
        assert!(matches!(
            file.resolve_actor_id(),
            Err(ClientError::MissingActor(_))
        ));
    }

    #[test]
    fn test_corrupt_session_is_missing_actor() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();
        let file = SessionFile::new(path);
        assert!(matches!(
            file.resolve_actor_id(),
            Err(ClientError::MissingActor(_))
        ));
    }

    #[test]
    fn test_static_actor() {
        assert_eq!(StaticActor::logged_in("9").resolve_actor_id().unwrap(), "9");
        assert!(StaticActor::anonymous().resolve_actor_id().is_err());
    }
}
