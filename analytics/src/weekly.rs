use serde::Serialize;
use study::StudyLog;

pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Minutes studied on one day of the week, scaled for a bar chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekdayActivity {
    pub day: &'static str,
    pub minutes: u64,
    /// Bar height in percent of the busiest bucket (or of `min_scale`).
    pub percent: u32,
}

/// Bucket study minutes by weekday (index 0 = Sunday).
///
/// Percentages are relative to `max(busiest bucket, min_scale)` so that a
/// single short session does not render as a full bar.
pub fn weekly_histogram(logs: &[StudyLog], min_scale: u64) -> [WeekdayActivity; 7] {
    let mut minutes = [0u64; 7];
    for log in logs {
        minutes[log.weekday_index()] += u64::from(log.duration);
    }

    let scale = minutes.iter().copied().max().unwrap_or(0).max(min_scale).max(1);

    std::array::from_fn(|i| WeekdayActivity {
        day: WEEKDAY_LABELS[i],
        minutes: minutes[i],
        percent: (minutes[i] as f64 / scale as f64 * 100.0).round() as u32,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};
    use study::{new_id, Difficulty};

    // 2024-01-01 was a Monday
    fn log_on(day: u32, duration: u32) -> StudyLog {
        StudyLog {
            id: new_id(),
            subject: "English".into(),
            topic: "Phrasal verbs".into(),
            difficulty: Difficulty::Easy,
            duration,
            occurred_at: FixedOffset::east_opt(0)
                .unwrap()
                .with_ymd_and_hms(2024, 1, day, 18, 0, 0)
                .unwrap(),
            origin_id: None,
        }
    }

    #[test]
    fn test_same_weekday_sums_and_scales_to_full() {
        // Monday 1st and Monday 8th
        let logs = vec![log_on(1, 30), log_on(8, 90)];
        let week = weekly_histogram(&logs, 60);
        assert_eq!(week[1].day, "Mon");
        assert_eq!(week[1].minutes, 120);
        assert_eq!(week[1].percent, 100);
        assert_eq!(week[0].percent, 0);
    }

    #[test]
    fn test_short_session_uses_minimum_scale() {
        let week = weekly_histogram(&[log_on(3, 15)], 60);
        assert_eq!(week[3].minutes, 15);
        assert_eq!(week[3].percent, 25);
    }

    #[test]
    fn test_percent_rounds_to_nearest() {
        // 40 / 120 = 33.3 -> 33, 100 / 120 = 83.3 -> 83
        let logs = vec![log_on(1, 120), log_on(2, 40), log_on(3, 100)];
        let week = weekly_histogram(&logs, 60);
        assert_eq!(week[2].percent, 33);
        assert_eq!(week[3].percent, 83);
    }

    #[test]
    fn test_empty_history_is_all_zero() {
        let week = weekly_histogram(&[], 60);
        assert!(week.iter().all(|d| d.minutes == 0 && d.percent == 0));
        assert_eq!(week[6].day, "Sat");
    }
}
