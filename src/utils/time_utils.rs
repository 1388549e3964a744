use chrono::{DateTime, Days, NaiveDate, NaiveDateTime};

pub struct TimeUtils;

impl TimeUtils {
    pub const S_IN_D: i64 = 60 * 60 * 24;
    pub const STANDARD_TIME_FORMAT: &str = "%Y-%m-%d";
    pub const STANDARD_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
}

/// Plot x coordinate for a timestamp: fractional days since the Unix epoch.
/// Days (rather than seconds) keep bar widths and zoom steps readable.
pub fn datetime_to_plot_x(timestamp: NaiveDateTime) -> f64 {
    timestamp.and_utc().timestamp() as f64 / TimeUtils::S_IN_D as f64
}

pub fn plot_x_to_datetime(x: f64) -> Option<NaiveDateTime> {
    let secs = (x * TimeUtils::S_IN_D as f64).round();
    if !secs.is_finite() {
        return None;
    }
    DateTime::from_timestamp(secs as i64, 0).map(|dt| dt.naive_utc())
}

/// Used for axis labels. Returns an empty string outside chrono's range.
pub fn plot_x_to_date_string(x: f64) -> String {
    plot_x_to_datetime(x)
        .map(|dt| dt.format(TimeUtils::STANDARD_TIME_FORMAT).to_string())
        .unwrap_or_default()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(TimeUtils::STANDARD_TIME_FORMAT).to_string()
}

pub fn format_datetime(timestamp: NaiveDateTime) -> String {
    timestamp
        .format(TimeUtils::STANDARD_DATETIME_FORMAT)
        .to_string()
}

/// Parse a `YYYY-MM-DD` date (CLI arguments).
pub fn parse_date(text: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(text.trim(), TimeUtils::STANDARD_TIME_FORMAT)
        .map_err(|e| format!("invalid date '{}' (expected YYYY-MM-DD): {}", text, e))
}

/// Whole days from `start` to `end` (negative if `end` is earlier).
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

/// `start + days`, saturating at `start` if the result would overflow.
pub fn add_days(start: NaiveDate, days: u64) -> NaiveDate {
    start.checked_add_days(Days::new(days)).unwrap_or(start)
}
