//! Display formatting helpers for dashboard surfaces.
//!
//! Pure functions with fixed thresholds; no external state.

use chrono::{DateTime, Utc};

const KIB: f64 = 1024.0;
const MIB: f64 = 1024.0 * 1024.0;
const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Format a byte count for display.
///
/// Values under 1024 render as whole bytes; larger values render with two
/// decimals in the next unit up.
#[must_use]
pub fn format_file_size(bytes: u64) -> String {
    let b = bytes as f64;
    if b < KIB {
        format!("{bytes} B")
    } else if b < MIB {
        format!("{:.2} KB", b / KIB)
    } else if b < GIB {
        format!("{:.2} MB", b / MIB)
    } else {
        format!("{:.2} GB", b / GIB)
    }
}

/// Format how long ago `when` was, relative to `now`.
///
/// Timestamps in the future (clock skew) render as "Just now".
#[must_use]
pub fn format_time_ago(when: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - when).num_seconds().max(0);
    if seconds < 60 {
        return "Just now".to_string();
    }

    let minutes = seconds / 60;
    if minutes < 60 {
        return plural(minutes, "minute");
    }

    let hours = minutes / 60;
    if hours < 24 {
        return plural(hours, "hour");
    }

    let days = hours / 24;
    if days < 7 {
        return plural(days, "day");
    }

    let weeks = days / 7;
    if weeks < 5 {
        return plural(weeks, "week");
    }

    let months = days / 30;
    if months < 12 {
        return plural(months, "month");
    }

    plural(days / 365, "year")
}

/// [`format_time_ago`] against the current wall clock.
#[must_use]
pub fn format_time_ago_from_now(when: DateTime<Utc>) -> String {
    format_time_ago(when, Utc::now())
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_file_size_bytes_no_decimals() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(1023), "1023 B");
    }

    #[test]
    fn test_file_size_kb_threshold() {
        assert_eq!(format_file_size(1024), "1.00 KB");
        assert_eq!(format_file_size(2048), "2.00 KB");
        assert_eq!(format_file_size(1024 * 1024 - 1), "1024.00 KB");
    }

    #[test]
    fn test_file_size_mb_and_gb_thresholds() {
        assert_eq!(format_file_size(1024 * 1024), "1.00 MB");
        assert_eq!(format_file_size(5 * 1024 * 1024 + 512 * 1024), "5.50 MB");
        assert_eq!(format_file_size(1024 * 1024 * 1024), "1.00 GB");
    }

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).single().unwrap()
    }

    #[test]
    fn test_time_ago_just_now() {
        let now = at(1_000_000);
        assert_eq!(format_time_ago(at(1_000_000), now), "Just now");
        assert_eq!(format_time_ago(at(1_000_000 - 59), now), "Just now");
        // Future timestamps clamp instead of going negative.
        assert_eq!(format_time_ago(at(1_000_500), now), "Just now");
    }

    #[test]
    fn test_time_ago_minutes_and_hours() {
        let now = at(1_000_000);
        assert_eq!(format_time_ago(at(1_000_000 - 60), now), "1 minute ago");
        assert_eq!(format_time_ago(at(1_000_000 - 180), now), "3 minutes ago");
        assert_eq!(format_time_ago(at(1_000_000 - 3600), now), "1 hour ago");
        assert_eq!(format_time_ago(at(1_000_000 - 7200), now), "2 hours ago");
    }

    #[test]
    fn test_time_ago_days_and_weeks() {
        let now = at(10_000_000);
        let day = 86_400;
        assert_eq!(format_time_ago(at(10_000_000 - day), now), "1 day ago");
        assert_eq!(format_time_ago(at(10_000_000 - 6 * day), now), "6 days ago");
        assert_eq!(format_time_ago(at(10_000_000 - 7 * day), now), "1 week ago");
        assert_eq!(
            format_time_ago(at(10_000_000 - 21 * day), now),
            "3 weeks ago"
        );
    }
}
