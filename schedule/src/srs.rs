//! Spaced-repetition review generation.
//!
//! Intervals are fixed; there is no ease factor or performance feedback.

use chrono::Days;
use study::{new_id, Review, ReviewStatus, StudyLog, REVIEW_TOPIC_PREFIX};

/// Build the review batch for a fresh study session.
///
/// One pending review per offset, in offset order, each due `offset` calendar
/// days after the session's local date. Callers must not invoke this for
/// sessions that complete a review; those never spawn new reviews.
pub fn generate_reviews(log: &StudyLog, offsets: &[u64]) -> Vec<Review> {
    debug_assert!(log.origin_id.is_none(), "review sessions do not spawn reviews");

    let date = log.date();
    offsets
        .iter()
        .enumerate()
        .filter_map(|(index, &offset)| {
            let Some(due_date) = date.checked_add_days(Days::new(offset)) else {
                tracing::warn!(log_id = %log.id, offset, "Review due date out of range, skipped");
                return None;
            };
            Some(Review {
                id: new_id(),
                origin_log_id: log.id,
                subject: log.subject.clone(),
                topic: format!("{} {}: {}", REVIEW_TOPIC_PREFIX, index + 1, log.topic),
                due_date,
                status: ReviewStatus::Pending,
                completed_at: None,
            })
        })
        .collect()
}
