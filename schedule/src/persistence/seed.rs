//! First-run data, used when a collection key is absent.
//!
//! Demo dates are generated relative to "now" so a fresh install always has a
//! plausible recent history: a current streak, a review due today, one
//! overdue and one upcoming.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate};
use study::{
    new_id, Difficulty, LogId, Review, ReviewStatus, StudyLog, Subject, UserProfile,
};

/// Default contents for each collection.
#[derive(Debug, Clone, Default)]
pub struct SeedData {
    pub profile: UserProfile,
    pub subjects: Vec<Subject>,
    pub logs: Vec<StudyLog>,
    pub reviews: Vec<Review>,
}

impl SeedData {
    /// Nothing at all; a first run starts from a blank slate.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Demonstration data anchored at `now`.
    pub fn demo(now: DateTime<FixedOffset>) -> Self {
        let subjects: Vec<Subject> = [
            ("Mathematics", "#F2994A"),
            ("Portuguese", "#8456B5"),
            ("History", "#2F80ED"),
            ("Biology", "#27AE60"),
            ("English", "#EB5757"),
        ]
        .into_iter()
        .map(|(name, color)| Subject {
            id: new_id(),
            name: name.to_string(),
            color: color.to_string(),
        })
        .collect();

        let log = |days_ago: i64, subject: &str, topic: &str, difficulty: Difficulty, duration: u32| StudyLog {
            id: new_id(),
            subject: subject.to_string(),
            topic: topic.to_string(),
            difficulty,
            duration,
            occurred_at: now - Duration::days(days_ago),
            origin_id: None,
        };
        let logs = vec![
            log(0, "Portuguese", "Grammar", Difficulty::Medium, 60),
            log(2, "Biology", "Cytology", Difficulty::Easy, 30),
            log(7, "Mathematics", "Functions", Difficulty::Hard, 90),
            log(14, "History", "French Revolution", Difficulty::Medium, 45),
        ];

        let origin_of = |subject: &str| -> LogId {
            logs.iter()
                .find(|l| l.subject == subject)
                .map(|l| l.id)
                .unwrap_or_else(new_id)
        };
        let today = now.date_naive();
        let day = |offset: i64| -> NaiveDate { today + Duration::days(offset) };
        let review = |subject: &str, topic: &str, due: NaiveDate, done: bool| Review {
            id: new_id(),
            origin_log_id: origin_of(subject),
            subject: subject.to_string(),
            topic: topic.to_string(),
            due_date: due,
            status: if done {
                ReviewStatus::Done
            } else {
                ReviewStatus::Pending
            },
            completed_at: done.then(|| now + (due - today)),
        };
        let reviews = vec![
            review("History", "Review 1: French Revolution", day(-13), true),
            review("History", "Review 2: French Revolution", day(-7), true),
            review("History", "Review 3: French Revolution", day(0), false),
            review("Mathematics", "Review 2: Functions", day(0), false),
            review("Biology", "Review 1: Cytology", day(-1), false),
            review("Portuguese", "Review 1: Grammar", day(1), false),
        ];

        Self {
            profile: UserProfile {
                name: "Demo Student".to_string(),
                email: "student@example.com".to_string(),
                avatar: None,
            },
            subjects,
            logs,
            reviews,
        }
    }
}
