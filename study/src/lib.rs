//! Canonical domain types for the study tracker.
//!
//! Every other crate in the workspace speaks in these types: the schedule
//! store owns collections of them, analytics projects over borrowed slices
//! of them, and the CLI renders them.

pub mod clock;
pub mod entities;
pub mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use entities::{
    new_id, LogId, ProfileUpdate, ReviewId, StudyLog, StudyPayload, Review, Subject, SubjectId,
    UserProfile, REVIEW_TOPIC_PREFIX,
};
pub use types::{Difficulty, ModelError, ReviewStatus};
