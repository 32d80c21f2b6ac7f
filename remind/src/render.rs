//! Plain-text rendering of store state for the terminal.

use std::fmt::Write;

use analytics::{AnalyticsView, ReviewTag};
use study::{Review, StudyLog, Subject, UserProfile};

const BAR_WIDTH: u32 = 20;

pub fn dashboard(view: &AnalyticsView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Reviews due today  {}", view.reviews_due_today);
    if view.overdue_reviews > 0 {
        let _ = writeln!(out, "  of which overdue {}", view.overdue_reviews);
    }
    let _ = writeln!(out, "Streak             {} days", view.streak_days);
    let _ = writeln!(out, "Total study time   {}", view.total_time);
    let _ = writeln!(out, "Top subject        {}", view.top_subject_label());

    let _ = writeln!(out, "\nThis week");
    for bucket in &view.weekly {
        let filled = (bucket.percent * BAR_WIDTH / 100) as usize;
        let _ = writeln!(
            out,
            "  {} {:<width$} {} min",
            bucket.day,
            "#".repeat(filled),
            bucket.minutes,
            width = BAR_WIDTH as usize
        );
    }

    let _ = writeln!(out, "\nComing up");
    if view.upcoming.is_empty() {
        let _ = writeln!(out, "  nothing scheduled");
    }
    for item in &view.upcoming {
        let tag = match item.tag {
            ReviewTag::Review => "review",
            ReviewTag::Study => "study",
        };
        let _ = writeln!(
            out,
            "  {}  {} - {} [{}]",
            item.date_label, item.subject, item.topic, tag
        );
    }
    out
}

pub fn review_line(review: &Review) -> String {
    match review.completed_at {
        Some(at) => format!(
            "{}  {}  {} - {}  done {}",
            review.id,
            review.due_date,
            review.subject,
            review.topic,
            at.format("%Y-%m-%d %H:%M")
        ),
        None => format!(
            "{}  {}  {} - {}",
            review.id, review.due_date, review.subject, review.topic
        ),
    }
}

pub fn log_line(log: &StudyLog) -> String {
    let marker = if log.is_review_session() { " (review)" } else { "" };
    format!(
        "{}  {}  {} - {}  {} min, {}{}",
        log.id,
        log.occurred_at.format("%Y-%m-%d %H:%M"),
        log.subject,
        log.topic,
        log.duration,
        log.difficulty,
        marker
    )
}

pub fn subject_line(subject: &Subject) -> String {
    format!("{}  {:<8} {}", subject.id, subject.color, subject.name)
}

pub fn profile(profile: &UserProfile) -> String {
    let mut out = format!("Name   {}\nEmail  {}\n", profile.name, profile.email);
    if let Some(avatar) = &profile.avatar {
        let _ = writeln!(out, "Avatar {}", avatar);
    }
    out
}
