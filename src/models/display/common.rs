//! Shared display helpers

use chrono::{DateTime, Utc};

/// Format a timestamp as a relative age, e.g. "2h ago"
pub fn format_relative_time(ts: DateTime<Utc>) -> String {
    let delta = Utc::now().signed_duration_since(ts);
    let secs = delta.num_seconds();

    if secs < 0 {
        return "just now".to_string();
    }
    if secs < 60 {
        return format!("{}s ago", secs);
    }
    if secs < 60 * 60 {
        return format!("{}m ago", delta.num_minutes());
    }
    if secs < 24 * 60 * 60 {
        return format!("{}h ago", delta.num_hours());
    }
    format!("{}d ago", delta.num_days())
}

/// Placeholder for missing values in table cells
pub fn dash() -> String {
    "--".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_relative_time_buckets() {
        let now = Utc::now();
        assert!(format_relative_time(now - Duration::seconds(30)).ends_with("s ago"));
        assert!(format_relative_time(now - Duration::minutes(5)).ends_with("m ago"));
        assert!(format_relative_time(now - Duration::hours(3)).ends_with("h ago"));
        assert!(format_relative_time(now - Duration::days(2)).ends_with("d ago"));
    }

    #[test]
    fn test_future_timestamp_is_just_now() {
        let future = Utc::now() + Duration::minutes(5);
        assert_eq!(format_relative_time(future), "just now");
    }
}
