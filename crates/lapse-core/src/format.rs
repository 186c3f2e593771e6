//! Human-readable interval formatting
//!
//! Presentation helper for minute counts coming out of the sampler:
//! minutes below an hour, whole hours below a day, then days with an hours
//! remainder (omitted when zero).

const MINUTES_PER_HOUR: u64 = 60;
const MINUTES_PER_DAY: u64 = 24 * 60;

/// Format a minute count as study-app friendly text.
pub fn format_interval(minutes: u64) -> String {
    if minutes < MINUTES_PER_HOUR {
        format!("{minutes} minutes")
    } else if minutes < MINUTES_PER_DAY {
        format!("{} hours", minutes / MINUTES_PER_HOUR)
    } else {
        let days = minutes / MINUTES_PER_DAY;
        let hours = (minutes % MINUTES_PER_DAY) / MINUTES_PER_HOUR;
        if hours == 0 {
            format!("{days} days")
        } else {
            format!("{days} days, {hours} hours")
        }
    }
}
