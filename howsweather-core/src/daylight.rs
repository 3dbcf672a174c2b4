use chrono::{DateTime, Duration, NaiveDateTime, Utc};

/// Wall-clock time at a location `offset_seconds` east of UTC.
pub fn local_clock(now_utc: DateTime<Utc>, offset_seconds: i32) -> NaiveDateTime {
    now_utc.naive_utc() + Duration::seconds(i64::from(offset_seconds))
}

/// True before sunrise or after sunset. `current_local` is the location's wall
/// clock; the offset is removed again to compare against the UTC timestamps.
/// Sunrise and sunset themselves count as daytime.
pub fn is_night(
    sunrise_unix: i64,
    sunset_unix: i64,
    current_local: NaiveDateTime,
    offset_seconds: i32,
) -> bool {
    let current_unix = current_local.and_utc().timestamp() - i64::from(offset_seconds);
    current_unix < sunrise_unix || current_unix > sunset_unix
}
