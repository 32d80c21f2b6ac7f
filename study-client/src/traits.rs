//! Backend and identity abstractions consumed by the scheduler

use crate::error::ClientResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Identifier of the authenticated user on the backend.
pub type ActorId = String;

/// One study session as the backend records it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudySubmission {
    pub actor_id: ActorId,
    pub subject: String,
    pub topic: String,
    pub hours: u32,
    pub minutes: u32,
    /// Lowercase difficulty name ("easy", "medium", "hard").
    pub difficulty: String,
}

impl StudySubmission {
    /// Build a submission, splitting `duration_minutes` into hours and minutes.
    pub fn new(
        actor_id: impl Into<ActorId>,
        subject: impl Into<String>,
        topic: impl Into<String>,
        duration_minutes: u32,
        difficulty: impl Into<String>,
    ) -> Self {
        Self {
            actor_id: actor_id.into(),
            subject: subject.into(),
            topic: topic.into(),
            hours: duration_minutes / 60,
            minutes: duration_minutes % 60,
            difficulty: difficulty.into(),
        }
    }
}

/// Remote service that mirrors study sessions.
/// Implemented by both the real HttpBackend and MockBackend
#[async_trait]
pub trait StudyBackend: Send + Sync {
    /// Record a study session remotely.
    async fn submit_study(&self, submission: &StudySubmission) -> ClientResult<()>;
}

/// Resolves the current actor. Fails with `ClientError::MissingActor` when
/// nobody is logged in; there is no fallback identity.
pub trait ActorResolver: Send + Sync {
    fn resolve_actor_id(&self) -> ClientResult<ActorId>;
}
