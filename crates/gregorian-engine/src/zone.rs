//! Time-zone rule sources.
//!
//! [`ZoneRules`] is the seam between the calendar arithmetic and tz data. The
//! crate ships [`Zone`], backed by the `chrono-tz` IANA database or a fixed
//! UTC offset; anything else that can answer the three questions below can
//! drive a calendar too.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, Offset, TimeZone, Utc};
use chrono_tz::{OffsetComponents, Tz};

use crate::error::{CalendarError, Result};
use crate::time::AbsoluteTime;

const SCAN_STEP: i64 = 86_400;
/// Fifty years of daily steps. Zones that stop observing DST can go years
/// between offset changes.
const SCAN_HORIZON_DAYS: i64 = 366 * 50;

/// Offset data for a time zone at a given instant. Offsets are in seconds east of UTC.
pub trait ZoneRules: fmt::Debug + Send + Sync {
    /// Standard offset from UTC, excluding daylight saving.
    fn raw_offset(&self, at: AbsoluteTime) -> i32;

    /// Daylight-saving adjustment in force at `at` (zero outside DST).
    fn dst_offset(&self, at: AbsoluteTime) -> i32;

    /// The first instant after `after` at which the total offset changes, or
    /// `None` if there is none. Implementations may search a bounded horizon;
    /// [`Zone`] looks fifty years ahead.
    fn next_transition(&self, after: AbsoluteTime) -> Option<AbsoluteTime>;

    fn total_offset(&self, at: AbsoluteTime) -> i32 {
        self.raw_offset(at) + self.dst_offset(at)
    }

    fn is_daylight_saving_time(&self, at: AbsoluteTime) -> bool {
        self.dst_offset(at) != 0
    }
}

/// A concrete time zone: an IANA region or a fixed offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    Fixed(FixedOffset),
    Iana(Tz),
}

impl Zone {
    /// UTC as a fixed zero offset.
    pub fn utc() -> Self {
        Zone::Fixed(Utc.fix())
    }

    /// A zone `seconds` east of UTC.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidTimeZone` when the offset is a day or more.
    pub fn fixed(seconds: i32) -> Result<Self> {
        FixedOffset::east_opt(seconds)
            .map(Zone::Fixed)
            .ok_or_else(|| CalendarError::InvalidTimeZone(format!("offset {seconds}s")))
    }

    /// Stable identifier: the IANA name, or `GMT±hh:mm` for fixed offsets.
    pub fn identifier(&self) -> String {
        match self {
            Zone::Iana(tz) => tz.name().to_string(),
            Zone::Fixed(offset) => {
                let seconds = offset.local_minus_utc();
                let sign = if seconds < 0 { '-' } else { '+' };
                let magnitude = seconds.unsigned_abs();
                format!("GMT{}{:02}:{:02}", sign, magnitude / 3600, magnitude % 3600 / 60)
            }
        }
    }

    fn iana_offsets(tz: &Tz, seconds: i64) -> (i32, i32) {
        let min = DateTime::<Utc>::MIN_UTC.timestamp();
        let max = DateTime::<Utc>::MAX_UTC.timestamp();
        let utc = DateTime::from_timestamp(seconds.clamp(min, max), 0).unwrap_or_default();
        let offset = tz.offset_from_utc_datetime(&utc.naive_utc());
        (
            offset.base_utc_offset().num_seconds() as i32,
            offset.dst_offset().num_seconds() as i32,
        )
    }

    fn offsets_at(&self, seconds: i64) -> (i32, i32) {
        match self {
            Zone::Fixed(offset) => (offset.local_minus_utc(), 0),
            Zone::Iana(tz) => Self::iana_offsets(tz, seconds),
        }
    }

    fn total_at(&self, seconds: i64) -> i32 {
        let (raw, dst) = self.offsets_at(seconds);
        raw + dst
    }
}

impl Default for Zone {
    fn default() -> Self {
        Zone::utc()
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identifier())
    }
}

impl FromStr for Zone {
    type Err = CalendarError;

    /// Accepts IANA names (`America/Los_Angeles`, `UTC`) and fixed offsets in
    /// the forms `+05:30`, `-0800`, `GMT-8` and `UTC+01:00`.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Ok(tz) = trimmed.parse::<Tz>() {
            return Ok(Zone::Iana(tz));
        }
        let offset = trimmed
            .strip_prefix("GMT")
            .or_else(|| trimmed.strip_prefix("UTC"))
            .unwrap_or(trimmed);
        parse_offset(offset)
            .and_then(|seconds| FixedOffset::east_opt(seconds).map(Zone::Fixed))
            .ok_or_else(|| CalendarError::InvalidTimeZone(s.to_string()))
    }
}

fn parse_offset(text: &str) -> Option<i32> {
    let (sign, rest) = match text.as_bytes().first()? {
        b'+' => (1, &text[1..]),
        b'-' => (-1, &text[1..]),
        _ => return None,
    };
    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h, m),
        None if rest.len() == 4 => (rest.get(..2)?, rest.get(2..)?),
        None => (rest, "0"),
    };
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some(sign * (hours * 3600 + minutes * 60))
}

impl ZoneRules for Zone {
    fn raw_offset(&self, at: AbsoluteTime) -> i32 {
        self.offsets_at(at.seconds().floor() as i64).0
    }

    fn dst_offset(&self, at: AbsoluteTime) -> i32 {
        self.offsets_at(at.seconds().floor() as i64).1
    }

    fn total_offset(&self, at: AbsoluteTime) -> i32 {
        self.total_at(at.seconds().floor() as i64)
    }

    /// Steps forward a day at a time for up to fifty years, then bisects to the
    /// exact second. Fixed zones never transition. Offset changes that revert
    /// within a single day are not seen.
    fn next_transition(&self, after: AbsoluteTime) -> Option<AbsoluteTime> {
        if let Zone::Fixed(_) = self {
            return None;
        }
        let start = after.seconds().floor() as i64;
        let base = self.total_at(start);
        let mut lo = start;
        for _ in 0..SCAN_HORIZON_DAYS {
            let mut hi = lo + SCAN_STEP;
            if self.total_at(hi) != base {
                while hi - lo > 1 {
                    let mid = lo + (hi - lo) / 2;
                    if self.total_at(mid) == base {
                        lo = mid;
                    } else {
                        hi = mid;
                    }
                }
                return Some(AbsoluteTime::from_whole_seconds(hi));
            }
            lo = hi;
        }
        None
    }
}
