//! Timestamp display formatting for the Created At column.

use chrono::{DateTime, Utc};

/// Long date + time, e.g. `"January 1, 2023 10:00 AM"`.
///
/// Rendered from the record's own UTC value — no timezone conversion.
pub fn long_datetime(ts: &DateTime<Utc>) -> String {
    ts.format("%B %-d, %Y %-I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn formats_long_date_and_time() {
        let ts = Utc.with_ymd_and_hms(2023, 1, 1, 10, 0, 0).unwrap();
        assert_eq!(long_datetime(&ts), "January 1, 2023 10:00 AM");
    }

    #[test]
    fn afternoon_times_use_pm_without_padding() {
        let ts = Utc.with_ymd_and_hms(1986, 9, 4, 20, 30, 0).unwrap();
        assert_eq!(long_datetime(&ts), "September 4, 1986 8:30 PM");
    }
}
