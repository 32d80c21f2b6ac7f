use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use study::{Review, Subject, REVIEW_TOPIC_PREFIX};

static ORDINAL_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"{} \d+: ", REVIEW_TOPIC_PREFIX)).expect("ordinal prefix pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReviewTag {
    Review,
    Study,
}

/// A pending review prepared for the "coming up" list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpcomingReview {
    pub review_id: study::ReviewId,
    pub subject: String,
    /// Topic without its "Review N: " ordinal.
    pub topic: String,
    pub due_date: NaiveDate,
    /// `DD/MM`
    pub date_label: String,
    pub tag: ReviewTag,
    /// Color of the subject, if it still exists.
    pub color: Option<String>,
}

/// Strip the first "Review N: " ordinal from a topic.
pub fn display_topic(topic: &str) -> String {
    ORDINAL_PREFIX.replace(topic, "").into_owned()
}

/// Pending reviews due today or later, soonest first, at most `limit`.
///
/// Overdue reviews are left out; they are counted by the due-today stat.
pub fn upcoming_reviews(
    reviews: &[Review],
    subjects: &[Subject],
    today: NaiveDate,
    limit: usize,
) -> Vec<UpcomingReview> {
    let mut pending: Vec<&Review> = reviews
        .iter()
        .filter(|r| r.is_pending() && r.due_date >= today)
        .collect();
    pending.sort_by_key(|r| r.due_date);

    pending
        .into_iter()
        .take(limit)
        .map(|r| UpcomingReview {
            review_id: r.id,
            subject: r.subject.clone(),
            topic: display_topic(&r.topic),
            due_date: r.due_date,
            date_label: r.due_date.format("%d/%m").to_string(),
            tag: if r.topic.contains(REVIEW_TOPIC_PREFIX) {
                ReviewTag::Review
            } else {
                ReviewTag::Study
            },
            color: subjects
                .iter()
                .find(|s| s.name == r.subject)
                .map(|s| s.color.clone()),
        })
        .collect()
}
