use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc, Weekday};
use tracing::warn;

/// Offset from UTC in hours for a zone abbreviation at local time `local`.
///
/// `ET` follows the US Eastern daylight saving rule. Unknown zones return
/// `None`.
pub fn utc_offset_hours(zone: &str, local: NaiveDateTime) -> Option<i64> {
    match zone {
        "UTC" | "GMT" | "WET" => Some(0),
        "BST" | "WEST" | "CET" => Some(1),
        "CEST" | "EET" => Some(2),
        "EEST" | "MSK" => Some(3),
        "EST" => Some(-5),
        "EDT" => Some(-4),
        "ET" => Some(if is_us_dst(local) { -4 } else { -5 }),
        "CT" => Some(if is_us_dst(local) { -5 } else { -6 }),
        "MT" => Some(if is_us_dst(local) { -6 } else { -7 }),
        "PT" => Some(if is_us_dst(local) { -7 } else { -8 }),
        "AEST" => Some(10),
        "AEDT" => Some(11),
        _ => None,
    }
}

/// US daylight saving, shared by every US zone: second Sunday of March
/// 02:00 up to the first Sunday of November 02:00, local time.
fn is_us_dst(local: NaiveDateTime) -> bool {
    let year = local.date().year();
    let start = NaiveDate::from_weekday_of_month_opt(year, 3, Weekday::Sun, 2)
        .and_then(|d| d.and_hms_opt(2, 0, 0));
    let end = NaiveDate::from_weekday_of_month_opt(year, 11, Weekday::Sun, 1)
        .and_then(|d| d.and_hms_opt(2, 0, 0));
    match (start, end) {
        (Some(start), Some(end)) => local >= start && local < end,
        _ => false,
    }
}

/// Convert a site local wall clock time to UTC. Unknown zones are taken
/// as UTC.
pub fn to_utc(local: NaiveDateTime, zone: &str) -> DateTime<Utc> {
    let offset = utc_offset_hours(zone, local).unwrap_or_else(|| {
        warn!(zone, "Unknown time zone, assuming UTC");
        0
    });
    Utc.from_utc_datetime(&(local - Duration::hours(offset)))
}

/// Build a timestamp from header fields, `None` if they are not a real
/// date.
pub fn from_parts(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32, zone: &str) -> Option<DateTime<Utc>> {
    let local = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, min, sec)?;
    Some(to_utc(local, zone))
}
