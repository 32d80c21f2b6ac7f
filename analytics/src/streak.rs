use std::collections::BTreeSet;

use chrono::NaiveDate;
use study::StudyLog;

/// Count consecutive study days ending today or yesterday.
///
/// Multiple sessions on one day collapse to a single date. If the most recent
/// study day is older than yesterday the streak is broken and this returns 0.
pub fn compute_streak(logs: &[StudyLog], today: NaiveDate) -> u32 {
    let days: BTreeSet<NaiveDate> = logs.iter().map(StudyLog::date).collect();

    // Most recent first
    let mut sorted = days.into_iter().rev();
    let Some(latest) = sorted.next() else {
        return 0;
    };

    let yesterday = today.pred_opt();
    if latest != today && Some(latest) != yesterday {
        return 0;
    }

    let mut streak = 1;
    let mut prev = latest;
    for day in sorted {
        if (prev - day).num_days() != 1 {
            break;
        }
        streak += 1;
        prev = day;
    }
    streak
}
