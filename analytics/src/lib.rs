//! Read-only projections over the study history.
//!
//! Nothing here is cached: every view is recomputed from the collections and
//! an explicit "now", so results are deterministic under a pinned clock.

pub mod streak;
pub mod totals;
pub mod upcoming;
pub mod view;
pub mod weekly;

pub use streak::compute_streak;
pub use totals::{overdue_count, reviews_due_today, top_subject, total_study_time, StudyTime};
pub use upcoming::{display_topic, upcoming_reviews, ReviewTag, UpcomingReview};
pub use view::{compute_analytics, AnalyticsConfig, AnalyticsView};
pub use weekly::{weekly_histogram, WeekdayActivity, WEEKDAY_LABELS};
