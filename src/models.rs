use chrono::{Month, Weekday};

/// Columns every chart depends on. Checked against the header row before any row is read.
pub const REQUIRED_COLUMNS: [&str; 10] = [
    "temp_y",
    "hum_y",
    "windspeed_y",
    "weekday_y",
    "mnth_x",
    "hr",
    "cnt_y",
    "casual_y",
    "registered_y",
    "cluster",
];

/// Fixed display order of the weekday chart.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// One hourly observation, as charted by the dashboard.
///
/// Only the columns the charts read are typed here; everything else in the file is kept
/// in the numeric column table of [`crate::dataset::Dataset`].
#[derive(Debug, Clone, PartialEq)]
pub struct HourRecord {
    // Weather measures may be missing; such rows drop out of that parameter's series only.
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub windspeed: Option<f64>,
    pub weekday: Weekday,
    // Taken from `mnth_x`, the only charted `_x` column.
    pub month: Month,
    pub hour: u32,
    pub count: u64,
    pub casual: u64,
    pub registered: u64,
    pub cluster: i64,
}

pub fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Parse a weekday label: English names and abbreviations, or the numeric
/// encoding of the source data where 0 is Sunday.
pub fn parse_weekday(s: &str) -> Option<Weekday> {
    let s = s.trim();
    if let Some(n) = parse_integral(s) {
        return match n as i64 {
            0 => Some(Weekday::Sun),
            1..=6 => Some(WEEKDAYS[n as usize - 1]),
            _ => None,
        };
    }
    s.parse::<Weekday>().ok()
}

/// Parse a month label: 1..=12 or English names and abbreviations.
pub fn parse_month(s: &str) -> Option<Month> {
    let s = s.trim();
    if let Some(n) = parse_integral(s) {
        return match n as i64 {
            1..=12 => Some(MONTHS[n as usize - 1]),
            _ => None,
        };
    }
    s.parse::<Month>().ok()
}

/// Parse a non-negative count. Integral decimals such as `30.0` are accepted since
/// merged columns are often widened to floats upstream.
pub fn parse_count(s: &str) -> Option<u64> {
    parse_integral(s.trim())
        .filter(|n| *n >= 0.0 && *n <= u64::MAX as f64)
        .map(|n| n as u64)
}

fn parse_integral(s: &str) -> Option<f64> {
    let value = s.parse::<f64>().ok()?;
    if value.is_finite() && value.fract() == 0.0 {
        Some(value)
    } else {
        None
    }
}

/// Parse an optional weather measure. An empty cell is a missing value, anything
/// else must be a number.
pub fn parse_measure(s: &str) -> Option<Option<f64>> {
    let s = s.trim();
    if s.is_empty() {
        return Some(None);
    }
    s.parse::<f64>().ok().map(Some)
}

pub fn parse_hour(s: &str) -> Option<u32> {
    parse_count(s).filter(|h| *h <= 23).map(|h| h as u32)
}

pub fn parse_cluster(s: &str) -> Option<i64> {
    parse_integral(s.trim()).map(|n| n as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_parsing() {
        assert_eq!(parse_weekday("Saturday"), Some(Weekday::Sat));
        assert_eq!(parse_weekday("mon"), Some(Weekday::Mon));
        assert_eq!(parse_weekday("0"), Some(Weekday::Sun));
        assert_eq!(parse_weekday("6"), Some(Weekday::Sat));
        assert_eq!(parse_weekday("7"), None);
        assert_eq!(parse_weekday("Caturday"), None);
    }

    #[test]
    fn test_month_parsing() {
        assert_eq!(parse_month("1"), Some(Month::January));
        assert_eq!(parse_month("12.0"), Some(Month::December));
        assert_eq!(parse_month("March"), Some(Month::March));
        assert_eq!(parse_month("0"), None);
        assert_eq!(parse_month("13"), None);
    }

    #[test]
    fn test_count_parsing() {
        assert_eq!(parse_count("30"), Some(30));
        assert_eq!(parse_count(" 30.0 "), Some(30));
        assert_eq!(parse_count("3.5"), None);
        assert_eq!(parse_count("-1"), None);
        assert_eq!(parse_count(""), None);
    }

    #[test]
    fn test_weekday_labels_follow_display_order() {
        let labels: Vec<_> = WEEKDAYS.iter().map(|d| weekday_label(*d)).collect();
        assert_eq!(
            labels,
            ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"]
        );
    }

    #[test]
    fn test_measure_and_hour_parsing() {
        assert_eq!(parse_measure(""), Some(None));
        assert_eq!(parse_measure("0.24"), Some(Some(0.24)));
        assert_eq!(parse_measure("warm"), None);
        assert_eq!(parse_hour("23"), Some(23));
        assert_eq!(parse_hour("24"), None);
        assert_eq!(parse_cluster("-1"), Some(-1));
        assert_eq!(parse_cluster("1.5"), None);
    }
}
