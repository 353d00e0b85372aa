//! Terminal rendering helpers for notes.

use chrono::{DateTime, Duration, Local, Utc};

use mysli_core::DisplayConfig;

const PREVIEW_CHARS: usize = 72;

/// Human-friendly timestamp.
///
/// Recent timestamps render relative to `now` unless disabled in config;
/// anything older than a week (or in the future) uses `date_format` in
/// local time.
pub fn format_timestamp(ts: DateTime<Utc>, now: DateTime<Utc>, display: &DisplayConfig) -> String {
    if display.relative_dates {
        let elapsed = now.signed_duration_since(ts);
        if elapsed >= Duration::zero() {
            if elapsed < Duration::minutes(1) {
                return "just now".to_string();
            }
            if elapsed < Duration::hours(1) {
                return format!("{} min ago", elapsed.num_minutes());
            }
            if elapsed < Duration::days(1) {
                return format!("{} h ago", elapsed.num_hours());
            }
            if elapsed < Duration::days(2) {
                return "yesterday".to_string();
            }
            if elapsed < Duration::days(7) {
                return format!("{} days ago", elapsed.num_days());
            }
        }
    }

    ts.with_timezone(&Local)
        .format(&display.date_format)
        .to_string()
}

/// Confidence as a whole percentage
pub fn format_confidence(confidence: f64) -> String {
    format!("{:.0}%", confidence * 100.0)
}

/// First line of `content`, cut to a fixed width
pub fn preview(content: &str) -> String {
    let first_line = content.lines().next().unwrap_or_default();
    let truncated = first_line.chars().count() > PREVIEW_CHARS || content.lines().nth(1).is_some();

    let mut out: String = first_line.chars().take(PREVIEW_CHARS).collect();
    if truncated {
        out.push('…');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_relative_timestamps() {
        let display = DisplayConfig::default();
        let now = now();

        assert_eq!(
            format_timestamp(now - Duration::seconds(10), now, &display),
            "just now"
        );
        assert_eq!(
            format_timestamp(now - Duration::minutes(5), now, &display),
            "5 min ago"
        );
        assert_eq!(
            format_timestamp(now - Duration::hours(3), now, &display),
            "3 h ago"
        );
        assert_eq!(
            format_timestamp(now - Duration::hours(30), now, &display),
            "yesterday"
        );
        assert_eq!(
            format_timestamp(now - Duration::days(4), now, &display),
            "4 days ago"
        );
    }

    #[test]
    fn test_old_timestamps_use_date_format() {
        let display = DisplayConfig {
            date_format: "%Y".to_string(),
            relative_dates: true,
        };
        let now = now();
        assert_eq!(format_timestamp(now - Duration::days(30), now, &display), "2024");
    }

    #[test]
    fn test_relative_dates_disabled() {
        let display = DisplayConfig {
            date_format: "%Y".to_string(),
            relative_dates: false,
        };
        let now = now();
        assert_eq!(format_timestamp(now - Duration::minutes(5), now, &display), "2024");
    }

    #[test]
    fn test_future_timestamps_are_absolute() {
        let display = DisplayConfig {
            date_format: "%Y".to_string(),
            relative_dates: true,
        };
        let now = now();
        assert_eq!(format_timestamp(now + Duration::hours(2), now, &display), "2024");
    }

    #[test]
    fn test_format_confidence() {
        assert_eq!(format_confidence(0.0), "0%");
        assert_eq!(format_confidence(4.0 / 15.0), "27%");
        assert_eq!(format_confidence(1.0), "100%");
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview("krótka notatka"), "krótka notatka");
        assert_eq!(preview("pierwsza\ndruga"), "pierwsza…");

        let long = "ż".repeat(100);
        let p = preview(&long);
        assert_eq!(p.chars().count(), PREVIEW_CHARS + 1);
        assert!(p.ends_with('…'));
    }
}
