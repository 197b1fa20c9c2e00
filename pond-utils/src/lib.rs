//! Shared utility functions for pond analyzer crates.

/// Timestamp utility functions
pub mod dates {
    use chrono::{DateTime, Local, TimeZone};

    /// Format used for history timestamps, e.g. "3/7/2025, 2:05:09 PM"
    pub const LOCALE_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

    /// Format a timestamp the way the history ledger displays it.
    pub fn format_timestamp<Tz: TimeZone>(moment: &DateTime<Tz>) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        moment.format(LOCALE_FORMAT).to_string()
    }

    /// Current local time, locale formatted.
    pub fn now_timestamp() -> String {
        format_timestamp(&Local::now())
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::{NaiveDate, Utc};

        #[test]
        fn test_format_timestamp_afternoon() {
            let moment = NaiveDate::from_ymd_opt(2025, 3, 7)
                .unwrap()
                .and_hms_opt(14, 5, 9)
                .unwrap()
                .and_utc();
            assert_eq!(format_timestamp(&moment), "3/7/2025, 2:05:09 PM");
        }

        #[test]
        fn test_format_timestamp_midnight() {
            let moment = Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap();
            assert_eq!(format_timestamp(&moment), "12/31/2024, 12:00:00 AM");
        }

        #[test]
        fn test_now_timestamp_not_empty() {
            assert!(!now_timestamp().is_empty());
        }
    }
}

/// Number formatting helpers
pub mod numbers {
    /// Round to a fixed number of decimals, like `toFixed` followed by a parse.
    pub fn round_to(value: f64, decimals: u32) -> f64 {
        let factor = 10f64.powi(decimals as i32);
        (value * factor).round() / factor
    }

    /// Render with a fixed number of decimals.
    pub fn format_fixed(value: f64, decimals: usize) -> String {
        format!("{:.*}", decimals, value)
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_round_to() {
            assert_eq!(round_to(78.456, 2), 78.46);
            assert_eq!(round_to(8.5, 0), 9.0);
            assert_eq!(round_to(-1.234, 1), -1.2);
        }

        #[test]
        fn test_format_fixed() {
            assert_eq!(format_fixed(78.5, 1), "78.5");
            assert_eq!(format_fixed(4500.0, 2), "4500.00");
            assert_eq!(format_fixed(1.6, 0), "2");
        }
    }
}
