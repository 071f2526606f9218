//! Conversions between wire-level temporal encodings and chrono values.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use udfwire_core::fatal;

const MICROS_PER_SECOND: i64 = 1_000_000;
const SECONDS_PER_DAY: i64 = 24 * 60 * 60;
const MICROS_PER_DAY: i64 = SECONDS_PER_DAY * MICROS_PER_SECOND;

fn epoch() -> NaiveDate {
    NaiveDate::default()
}

pub(crate) fn date_from_days(days: i32) -> NaiveDate {
    epoch()
        .checked_add_signed(TimeDelta::days(days.into()))
        .unwrap_or_else(|| fatal(format_args!("date {days} days from epoch is out of range")))
}

pub(crate) fn days_from_date(date: NaiveDate) -> i32 {
    // Every NaiveDate lies within ±2^28 days of the epoch.
    (date - epoch()).num_days() as i32
}

pub(crate) fn time_from_micros(micros: i64) -> NaiveTime {
    if !(0..MICROS_PER_DAY).contains(&micros) {
        fatal(format_args!("time of day {micros}us is out of range"));
    }
    let seconds = (micros / MICROS_PER_SECOND) as u32;
    let nanos = (micros % MICROS_PER_SECOND) as u32 * 1_000;
    NaiveTime::from_num_seconds_from_midnight_opt(seconds, nanos)
        .unwrap_or_else(|| fatal(format_args!("time of day {micros}us is out of range")))
}

/// Leap-second nanos fold into the last microsecond of the second.
pub(crate) fn micros_from_time(time: NaiveTime) -> i64 {
    let seconds = i64::from(time.num_seconds_from_midnight());
    let micros = i64::from(time.nanosecond().min(999_999_999) / 1_000);
    seconds * MICROS_PER_SECOND + micros
}

pub(crate) fn timestamp_from_micros(micros: i64) -> NaiveDateTime {
    DateTime::from_timestamp_micros(micros)
        .unwrap_or_else(|| fatal(format_args!("timestamp {micros}us is out of range")))
        .naive_utc()
}

pub(crate) fn micros_from_timestamp(timestamp: NaiveDateTime) -> i64 {
    timestamp.and_utc().timestamp_micros()
}

pub(crate) fn offset_from_minutes(minutes: i16) -> FixedOffset {
    FixedOffset::east_opt(i32::from(minutes) * 60)
        .unwrap_or_else(|| fatal(format_args!("time zone offset {minutes} minutes is out of range")))
}

/// Whole minutes east of UTC, rounding sub-minute offsets toward negative infinity.
pub(crate) fn minutes_from_offset(offset: FixedOffset) -> i16 {
    // |offset| < 86_400 s, so the minute count fits comfortably.
    offset.local_minus_utc().div_euclid(60) as i16
}

/// UTC instant at `utc_micros`, viewed at `offset_minutes`.
pub(crate) fn zoned_timestamp(utc_micros: i64, offset_minutes: i16) -> DateTime<FixedOffset> {
    let offset = offset_from_minutes(offset_minutes);
    DateTime::from_timestamp_micros(utc_micros)
        .unwrap_or_else(|| fatal(format_args!("timestamp {utc_micros}us is out of range")))
        .with_timezone(&offset)
}

/// UTC micros and whole-minute offset of a zoned timestamp.
pub(crate) fn zoned_parts(timestamp: &DateTime<FixedOffset>) -> (i64, i16) {
    let minutes = minutes_from_offset(*timestamp.offset());
    let wall = micros_from_timestamp(timestamp.naive_local());
    (wall - i64::from(minutes) * 60 * MICROS_PER_SECOND, minutes)
}

/// `i64::MIN` is the one wire value with no `TimeDelta`, whose range is
/// `±i64::MAX` milliseconds.
pub(crate) fn interval_from_millis(millis: i64) -> TimeDelta {
    TimeDelta::try_milliseconds(millis)
        .unwrap_or_else(|| fatal(format_args!("interval of {millis}ms is out of range")))
}

/// Whole microseconds rounded half up to milliseconds, or `None` when the result
/// does not fit the wire field.
pub(crate) fn millis_from_interval(interval: TimeDelta) -> Option<i64> {
    let nanos = i128::from(interval.num_seconds()) * 1_000_000_000
        + i128::from(interval.subsec_nanos());
    let micros = nanos / 1_000;
    let rounded = micros.div_euclid(1_000) + i128::from(micros.rem_euclid(1_000) >= 500);
    i64::try_from(rounded).ok()
}
