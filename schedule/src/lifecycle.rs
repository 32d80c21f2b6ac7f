//! Completing reviews.
//!
//! A review moves `Pending -> Done` exactly once. Completing it records a
//! study session that points back at the review through `origin_id`; that
//! session never schedules further reviews.

use study::{Difficulty, LogId, ReviewId, StudyPayload};

use crate::error::StoreError;
use crate::store::EntityStore;

/// Difficulty recorded for sessions produced by completing a review.
pub const REVIEW_SESSION_DIFFICULTY: Difficulty = Difficulty::Medium;

impl EntityStore {
    /// Complete a review, crediting the configured default duration.
    pub fn complete_review(&mut self, id: ReviewId) -> Result<Option<LogId>, StoreError> {
        let minutes = self.config().default_review_minutes;
        self.complete_review_with_duration(id, minutes)
    }

    /// Mark a pending review done and log the session that completed it.
    ///
    /// Returns the new log's ID, or `None` when the review is unknown or
    /// already done. Neither case changes any state.
    pub fn complete_review_with_duration(
        &mut self,
        id: ReviewId,
        duration_minutes: i64,
    ) -> Result<Option<LogId>, StoreError> {
        let Some(review) = self.review(id) else {
            tracing::info!(review_id = %id, "Completion of unknown review ignored");
            return Ok(None);
        };
        if review.is_done() {
            tracing::info!(review_id = %id, "Review already done, completion ignored");
            return Ok(None);
        }

        let payload = StudyPayload::new(review.subject.clone(), review.topic.clone(), duration_minutes)
            .with_difficulty(REVIEW_SESSION_DIFFICULTY)
            .from_review(id);

        tracing::info!(review_id = %id, minutes = duration_minutes, "Completing review");
        self.register_study(payload).map(Some)
    }
}
