//! Time helpers
//!
//! All timestamps are stored as Unix epoch milliseconds (UTC).

use chrono::{DateTime, Utc};

const DAY_MILLIS: i64 = 24 * 60 * 60 * 1000;

/// Current time as epoch milliseconds
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Start of the trailing window of `days` days, as epoch milliseconds
pub fn window_start_millis(days: u32) -> i64 {
    now_millis() - i64::from(days) * DAY_MILLIS
}

/// Calendar day (UTC) for an epoch-millis timestamp, as `YYYY-MM-DD`
pub fn day_string(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_string_formats_utc_date() {
        // 2024-03-01T12:30:00Z
        assert_eq!(day_string(1_709_296_200_000), "2024-03-01");
        // Epoch
        assert_eq!(day_string(0), "1970-01-01");
    }

    #[test]
    fn test_day_string_same_day_boundaries() {
        let noon = 1_709_296_200_000;
        let same_day_start = 1_709_251_200_000; // 2024-03-01T00:00:00Z
        assert_eq!(day_string(noon), day_string(same_day_start));
    }

    #[test]
    fn test_window_start_is_in_the_past() {
        let start = window_start_millis(30);
        assert!(start < now_millis());
        assert_eq!(now_millis() / DAY_MILLIS - start / DAY_MILLIS, 30);
    }
}
