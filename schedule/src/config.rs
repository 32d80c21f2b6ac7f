use analytics::AnalyticsConfig;

/// Fixed review cadence, in days after the study session.
pub const REVIEW_OFFSETS_DAYS: [u64; 3] = [1, 7, 14];

/// Minutes credited for completing a review when the caller gives none.
pub const DEFAULT_REVIEW_MINUTES: i64 = 30;

/// Color given to subjects created without one.
pub const FALLBACK_SUBJECT_COLOR: &str = "#333";

/// Configuration for the schedule store.
#[derive(Debug, Clone)]
pub struct ScheduleConfig {
    /// Day offsets of the generated reviews, in emission order. Every
    /// fresh study session spawns exactly one review per entry.
    pub review_offsets: [u64; 3],
    /// Duration logged when a review is completed without an explicit one.
    pub default_review_minutes: i64,
    pub fallback_color: String,
    /// Dashboard projection settings.
    pub analytics: AnalyticsConfig,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            review_offsets: REVIEW_OFFSETS_DAYS,
            default_review_minutes: DEFAULT_REVIEW_MINUTES,
            fallback_color: FALLBACK_SUBJECT_COLOR.to_string(),
            analytics: AnalyticsConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cadence() {
        let config = ScheduleConfig::default();
        assert_eq!(config.review_offsets, [1, 7, 14]);
        assert_eq!(config.default_review_minutes, 30);
        assert_eq!(config.fallback_color, "#333");
        assert_eq!(config.analytics.upcoming_limit, 4);
    }
}
