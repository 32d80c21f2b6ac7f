use chrono::{DateTime, Datelike, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{Difficulty, ReviewStatus};

pub type SubjectId = Uuid;
pub type LogId = Uuid;
pub type ReviewId = Uuid;

/// Word that marks a topic as a scheduled review ("Review 2: Cytology").
pub const REVIEW_TOPIC_PREFIX: &str = "Review";

/// Mint a fresh opaque entity ID.
pub fn new_id() -> Uuid {
    Uuid::new_v4()
}

/// A subject the user studies, e.g. "History".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    pub color: String,
}

/// One completed study session.
///
/// `subject` is the subject's name, not its ID. Logs are immutable once
/// created; the only mutation is deletion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StudyLog {
    pub id: LogId,
    pub subject: String,
    pub topic: String,
    pub difficulty: Difficulty,
    /// Minutes studied.
    pub duration: u32,
    pub occurred_at: DateTime<FixedOffset>,
    /// Set when this session was produced by completing a review.
    #[serde(default)]
    pub origin_id: Option<ReviewId>,
}

impl StudyLog {
    /// Local calendar date of the session.
    pub fn date(&self) -> NaiveDate {
        self.occurred_at.date_naive()
    }

    /// Day-of-week bucket, 0 = Sunday .. 6 = Saturday.
    pub fn weekday_index(&self) -> usize {
        self.occurred_at.weekday().num_days_from_sunday() as usize
    }

    pub fn is_review_session(&self) -> bool {
        self.origin_id.is_some()
    }
}

/// A future review obligation spawned by a study session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub origin_log_id: LogId,
    pub subject: String,
    /// Carries the ordinal, e.g. "Review 2: Functions".
    pub topic: String,
    pub due_date: NaiveDate,
    pub status: ReviewStatus,
    #[serde(default)]
    pub completed_at: Option<DateTime<FixedOffset>>,
}

impl Review {
    pub fn is_pending(&self) -> bool {
        self.status == ReviewStatus::Pending
    }

    pub fn is_done(&self) -> bool {
        self.status == ReviewStatus::Done
    }

    /// Apply the `Pending -> Done` transition.
    ///
    /// Returns `false` without touching `completed_at` if the review was
    /// already done.
    pub fn complete(&mut self, at: DateTime<FixedOffset>) -> bool {
        if self.is_done() {
            return false;
        }
        self.status = ReviewStatus::Done;
        self.completed_at = Some(at);
        true
    }

    /// Due on or before `today` and still pending.
    pub fn is_due_by(&self, today: NaiveDate) -> bool {
        self.is_pending() && self.due_date <= today
    }

    /// Due strictly before `today` and still pending.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.is_pending() && self.due_date < today
    }
}

/// Input for registering a study session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyPayload {
    pub subject: String,
    pub topic: String,
    pub difficulty: Difficulty,
    /// Raw minutes as entered; negative values are coerced to zero.
    pub duration_minutes: i64,
    /// The review this session completes, if any.
    pub origin_id: Option<ReviewId>,
}

impl StudyPayload {
    pub fn new(subject: impl Into<String>, topic: impl Into<String>, duration_minutes: i64) -> Self {
        Self {
            subject: subject.into(),
            topic: topic.into(),
            difficulty: Difficulty::default(),
            duration_minutes,
            origin_id: None,
        }
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn from_review(mut self, review_id: ReviewId) -> Self {
        self.origin_id = Some(review_id);
        self
    }

    /// Duration clamped into `0..=u32::MAX` minutes.
    pub fn coerced_duration(&self) -> u32 {
        self.duration_minutes.clamp(0, u32::MAX as i64) as u32
    }
}

/// The local user's profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Partial profile edit; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
}

impl UserProfile {
    pub fn apply(&mut self, update: ProfileUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(avatar) = update.avatar {
            self.avatar = Some(avatar);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(y, m, d, 10, 0, 0)
            .unwrap()
    }

    fn pending_review(due: NaiveDate) -> Review {
        Review {
            id: new_id(),
            origin_log_id: new_id(),
            subject: "History".to_string(),
            topic: "Review 1: French Revolution".to_string(),
            due_date: due,
            status: ReviewStatus::Pending,
            completed_at: None,
        }
    }

    #[test]
    fn test_complete_transitions_once() {
        let mut review = pending_review(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert!(review.complete(at(2024, 1, 2)));
        assert!(review.is_done());
        assert_eq!(review.completed_at, Some(at(2024, 1, 2)));

        // Second completion leaves the first timestamp alone
        assert!(!review.complete(at(2024, 1, 5)));
        assert_eq!(review.completed_at, Some(at(2024, 1, 2)));
    }

    #[test]
    fn test_due_and_overdue() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let yesterday = pending_review(today.pred_opt().unwrap());
        let due_today = pending_review(today);
        let tomorrow = pending_review(today.succ_opt().unwrap());

        assert!(yesterday.is_due_by(today) && yesterday.is_overdue(today));
        assert!(due_today.is_due_by(today) && !due_today.is_overdue(today));
        assert!(!tomorrow.is_due_by(today));
    }

    #[test]
    fn test_coerced_duration_clamps_negative() {
        assert_eq!(StudyPayload::new("Math", "Sets", -15).coerced_duration(), 0);
        assert_eq!(StudyPayload::new("Math", "Sets", 45).coerced_duration(), 45);
    }

    #[test]
    fn test_log_weekday_index_starts_on_sunday() {
        // 2024-01-07 was a Sunday
        let log = StudyLog {
            id: new_id(),
            subject: "Math".into(),
            topic: "Sets".into(),
            difficulty: Difficulty::Easy,
            duration: 10,
            occurred_at: at(2024, 1, 7),
            origin_id: None,
        };
        assert_eq!(log.weekday_index(), 0);
    }

    #[test]
    fn test_profile_apply_merges_fields() {
        let mut profile = UserProfile {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            avatar: None,
        };
        profile.apply(ProfileUpdate {
            email: Some("ana@remind.dev".into()),
            ..Default::default()
        });
        assert_eq!(profile.name, "Ana");
        assert_eq!(profile.email, "ana@remind.dev");
    }

    #[test]
    fn test_log_json_uses_camel_case() {
        let log = StudyLog {
            id: new_id(),
            subject: "Math".into(),
            topic: "Sets".into(),
            difficulty: Difficulty::Hard,
            duration: 10,
            occurred_at: at(2024, 1, 7),
            origin_id: None,
        };
        let json = serde_json::to_value(&log).unwrap();
        assert!(json.get("occurredAt").is_some());
        assert_eq!(json["difficulty"], "Hard");
    }
}
