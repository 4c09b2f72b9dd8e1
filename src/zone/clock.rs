//! Civil-time helpers: strict date parsing, UTC↔local projection, day-of-year
//! arithmetic and the wrapping seasonal window.

use crate::zone::error::ZoneError;
use chrono::{DateTime, Datelike, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use std::collections::BTreeSet;

/// Projects a UTC instant into the civil time of `zone`.
///
/// The `DateTime<Utc>` parameter makes the UTC-input requirement a type-level
/// guarantee.
pub fn to_local(ts_utc: DateTime<Utc>, zone: Tz) -> DateTime<Tz> {
    ts_utc.with_timezone(&zone)
}

/// Parses a strict `YYYY-MM-DD` date.
///
/// # Errors
///
/// [`ZoneError::InvalidDate`] for anything that is not a valid calendar date
/// in exactly that format.
pub fn parse_date(s: &str) -> Result<NaiveDate, ZoneError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| ZoneError::InvalidDate(s.to_string()))
}

/// Day-of-year, 1-based (366 only in leap years).
pub fn day_of_year(date: NaiveDate) -> u32 {
    date.ordinal()
}

/// Length of a calendar year in days.
pub fn year_length(year: i32) -> u32 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// The set of day-of-year values within `window` days of `target`, wrapping
/// across the year boundary on a 365-day cycle.
///
/// `doy_window(3, 5)` contains `{363, 364, 365, 1, ..., 8}`. After
/// de-duplication the set holds `min(2w + 1, 365)` days.
///
/// # Errors
///
/// [`ZoneError::InvalidDayOfYear`] when `target` is outside `[1, 365]`.
pub fn doy_window(target: u32, window: u32) -> Result<BTreeSet<u32>, ZoneError> {
    if !(1..=365).contains(&target) {
        return Err(ZoneError::InvalidDayOfYear(target));
    }

    let target = i64::from(target);
    let window = i64::from(window);
    let days = (-window..=window)
        .map(|offset| (((target - 1 + offset).rem_euclid(365)) + 1) as u32)
        .collect();
    Ok(days)
}

/// The instant at which `date` reaches civil `hour:00` in `zone`.
///
/// Daylight-saving transitions make some civil times ambiguous (clocks fall
/// back) or nonexistent (clocks spring forward). Ambiguity resolves to the
/// earlier instant; a nonexistent time resolves to the same civil time one
/// hour later, which lands just past the gap.
///
/// # Errors
///
/// [`ZoneError::InvalidHour`] when `hour` is outside `[0, 23]`.
pub fn local_instant(date: NaiveDate, hour: u32, zone: Tz) -> Result<DateTime<Tz>, ZoneError> {
    let civil: NaiveDateTime = date
        .and_hms_opt(hour, 0, 0)
        .ok_or(ZoneError::InvalidHour(hour))?;

    match zone.from_local_datetime(&civil) {
        LocalResult::Single(dt) => Ok(dt),
        LocalResult::Ambiguous(earlier, _) => Ok(earlier),
        LocalResult::None => {
            let shifted = civil + chrono::Duration::hours(1);
            match zone.from_local_datetime(&shifted) {
                LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Ok(dt),
                // DST gaps are at most one hour in the IANA database.
                LocalResult::None => Ok(zone.from_utc_datetime(&civil)),
            }
        }
    }
}
