//! Estimate when the funds of a resolved ticket become spendable.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};

/// Blocks a vote or revocation must wait before its outputs mature.
pub const TICKET_MATURITY_BLOCKS: i64 = 256;

/// Target block interval in minutes.
pub const BLOCK_TIME_MINUTES: i64 = 5;

const MATURITY_FORMAT: &str = "%A %B %d, around %I:%M%p";

/// Blocks left before maturity. Negative once the maturity height has passed.
///
/// `None` when the heights are too large to compare.
pub fn blocks_until_mature(event_height: u64, current_height: u64) -> Option<i64> {
    let age = i64::try_from(current_height)
        .ok()?
        .checked_sub(i64::try_from(event_height).ok()?)?;
    TICKET_MATURITY_BLOCKS.checked_sub(age)
}

/// Local wall-clock time at which the ticket funds mature.
///
/// `None` when the estimate falls outside the representable time range.
pub fn maturity_time(
    event_height: u64,
    current_height: u64,
    utc_offset_hours: i32,
    now: DateTime<Utc>,
) -> Option<NaiveDateTime> {
    let blocks = blocks_until_mature(event_height, current_height)?;
    let wait = Duration::try_minutes(blocks.checked_mul(BLOCK_TIME_MINUTES)?)?;
    let offset = Duration::try_hours(i64::from(utc_offset_hours))?;
    let mature_local = now.checked_add_signed(wait)?.checked_add_signed(offset)?;
    Some(mature_local.naive_utc())
}

/// Human readable maturity estimate, e.g. `Monday January 01, around 04:40AM`.
///
/// Not clamped: a maturity height already behind the chain tip yields a time
/// in the past.
pub fn estimate_maturity(
    event_height: u64,
    current_height: u64,
    utc_offset_hours: i32,
    now: DateTime<Utc>,
) -> Option<String> {
    maturity_time(event_height, current_height, utc_offset_hours, now)
        .map(|time| time.format(MATURITY_FORMAT).to_string())
}
