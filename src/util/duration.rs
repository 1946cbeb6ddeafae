use chrono::{DateTime, FixedOffset, Timelike};

/// Format a duration in whole seconds into the coarse inline form:
/// `45秒`, `3分钟`, `2小时`. Only the largest whole unit is kept — the
/// remainder is dropped, so 3661s renders as `1小时`. The format is lossy
/// and not invertible; it exists for inline display, not bookkeeping.
pub fn format_duration(seconds: i64) -> String {
    let seconds = seconds.max(0);
    if seconds < 60 {
        format!("{}秒", seconds)
    } else if seconds < 3600 {
        format!("{}分钟", seconds / 60)
    } else {
        format!("{}小时", seconds / 3600)
    }
}

/// Format the start time for inline display as `HH:MM` in the timestamp's
/// own offset (the host passes local wall-clock time).
pub fn format_display_time(time: DateTime<FixedOffset>) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}
