use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;
use study::{Review, StudyLog};

/// Accumulated study time split into whole hours and remaining minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StudyTime {
    pub hours: u64,
    pub minutes: u64,
}

impl StudyTime {
    pub fn from_minutes(total: u64) -> Self {
        Self {
            hours: total / 60,
            minutes: total % 60,
        }
    }

    pub fn total_minutes(&self) -> u64 {
        self.hours * 60 + self.minutes
    }
}

impl fmt::Display for StudyTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h {}m", self.hours, self.minutes)
    }
}

/// Pending reviews due today or earlier (overdue included).
pub fn reviews_due_today(reviews: &[Review], today: NaiveDate) -> usize {
    reviews.iter().filter(|r| r.is_due_by(today)).count()
}

/// Pending reviews due strictly before today.
pub fn overdue_count(reviews: &[Review], today: NaiveDate) -> usize {
    reviews.iter().filter(|r| r.is_overdue(today)).count()
}

pub fn total_study_time(logs: &[StudyLog]) -> StudyTime {
    let total: u64 = logs.iter().map(|l| u64::from(l.duration)).sum();
    StudyTime::from_minutes(total)
}

/// Subject with the largest summed duration.
///
/// Subjects are ranked in order of first appearance in `logs`; a later
/// subject only wins with a strictly larger total. A subject needs a non-zero
/// total to be picked at all.
pub fn top_subject(logs: &[StudyLog]) -> Option<String> {
    let mut totals: Vec<(&str, u64)> = Vec::new();
    for log in logs {
        match totals.iter_mut().find(|(name, _)| *name == log.subject) {
            Some((_, minutes)) => *minutes += u64::from(log.duration),
            None => totals.push((&log.subject, u64::from(log.duration))),
        }
    }

    let mut best: Option<(&str, u64)> = None;
    for (name, minutes) in totals {
        let current = best.map(|(_, m)| m).unwrap_or(0);
        if minutes > current {
            best = Some((name, minutes));
        }
    }
    best.map(|(name, _)| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};
    use study::{new_id, Difficulty, ReviewStatus};

    fn log(subject: &str, duration: u32) -> StudyLog {
        StudyLog {
            id: new_id(),
            subject: subject.into(),
            topic: "Topic".into(),
            difficulty: Difficulty::Medium,
            duration,
            occurred_at: FixedOffset::east_opt(0)
                .unwrap()
                .with_ymd_and_hms(2024, 1, 1, 9, 0, 0)
                .unwrap(),
            origin_id: None,
        }
    }

    fn review(due: NaiveDate, status: ReviewStatus) -> Review {
        Review {
            id: new_id(),
            origin_log_id: new_id(),
            subject: "Biology".into(),
            topic: "Review 1: Cytology".into(),
            due_date: due,
            status,
            completed_at: None,
        }
    }

    #[test]
    fn test_total_time_splits_hours() {
        let logs = vec![log("Math", 90), log("History", 45)];
        let total = total_study_time(&logs);
        assert_eq!(total, StudyTime { hours: 2, minutes: 15 });
        assert_eq!(total.to_string(), "2h 15m");
        assert_eq!(total.total_minutes(), 135);
    }

    #[test]
    fn test_top_subject_sums_per_subject() {
        let logs = vec![log("Math", 30), log("History", 50), log("Math", 30)];
        assert_eq!(top_subject(&logs).as_deref(), Some("Math"));
    }

    #[test]
    fn test_top_subject_tie_goes_to_first_seen() {
        let logs = vec![log("History", 40), log("Math", 40)];
        assert_eq!(top_subject(&logs).as_deref(), Some("History"));
    }

    #[test]
    fn test_top_subject_none_without_time() {
        assert_eq!(top_subject(&[]), None);
        assert_eq!(top_subject(&[log("Math", 0)]), None);
    }

    #[test]
    fn test_due_counts() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let reviews = vec![
            review(today.pred_opt().unwrap(), ReviewStatus::Pending),
            review(today, ReviewStatus::Pending),
            review(today, ReviewStatus::Done),
            review(today.succ_opt().unwrap(), ReviewStatus::Pending),
        ];
        assert_eq!(reviews_due_today(&reviews, today), 2);
        assert_eq!(overdue_count(&reviews, today), 1);
    }
}
