use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use study::{Review, StudyLog, Subject};

use crate::streak::compute_streak;
use crate::totals::{overdue_count, reviews_due_today, top_subject, total_study_time, StudyTime};
use crate::upcoming::{upcoming_reviews, UpcomingReview};
use crate::weekly::{weekly_histogram, WeekdayActivity};

/// Tunables for the dashboard projections.
#[derive(Debug, Clone)]
pub struct AnalyticsConfig {
    /// Maximum entries in the upcoming-review list.
    pub upcoming_limit: usize,
    /// Floor for the weekly histogram scale, in minutes.
    pub min_histogram_scale: u64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            upcoming_limit: 4,
            min_histogram_scale: 60,
        }
    }
}

/// Everything the dashboard shows, derived in one pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyticsView {
    pub reviews_due_today: usize,
    pub overdue_reviews: usize,
    pub streak_days: u32,
    pub total_time: StudyTime,
    pub top_subject: Option<String>,
    pub weekly: [WeekdayActivity; 7],
    pub upcoming: Vec<UpcomingReview>,
}

impl AnalyticsView {
    pub fn top_subject_label(&self) -> &str {
        self.top_subject.as_deref().unwrap_or("none")
    }
}

pub fn compute_analytics(
    subjects: &[Subject],
    logs: &[StudyLog],
    reviews: &[Review],
    now: DateTime<FixedOffset>,
    config: &AnalyticsConfig,
) -> AnalyticsView {
    let today = now.date_naive();
    AnalyticsView {
        reviews_due_today: reviews_due_today(reviews, today),
        overdue_reviews: overdue_count(reviews, today),
        streak_days: compute_streak(logs, today),
        total_time: total_study_time(logs),
        top_subject: top_subject(logs),
        weekly: weekly_histogram(logs, config.min_histogram_scale),
        upcoming: upcoming_reviews(reviews, subjects, today, config.upcoming_limit),
    }
}
