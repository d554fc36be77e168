//! Absolute points on the time line.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Sub};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Seconds (with sub-second precision) since 1970-01-01T00:00:00Z.
///
/// The supported range is roughly ±10 billion seconds around the epoch;
/// arithmetic outside it keeps working but loses sub-microsecond precision.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AbsoluteTime(f64);

impl AbsoluteTime {
    /// The epoch itself.
    pub const EPOCH: AbsoluteTime = AbsoluteTime(0.0);

    pub const fn new(seconds: f64) -> Self {
        AbsoluteTime(seconds)
    }

    pub(crate) fn from_whole_seconds(seconds: i64) -> Self {
        AbsoluteTime(seconds as f64)
    }

    /// Seconds since the epoch.
    pub const fn seconds(self) -> f64 {
        self.0
    }

    /// Splits into whole seconds (floored) and a nanosecond remainder in `0..1e9`.
    pub(crate) fn split(self) -> (i64, i64) {
        let whole = self.0.floor();
        let mut seconds = whole as i64;
        let mut nanos = ((self.0 - whole) * 1e9).round() as i64;
        if nanos >= 1_000_000_000 {
            seconds += 1;
            nanos -= 1_000_000_000;
        }
        (seconds, nanos)
    }

    /// Converts to a chrono UTC timestamp, if representable.
    pub fn to_utc(self) -> Option<DateTime<Utc>> {
        let (seconds, nanos) = self.split();
        DateTime::from_timestamp(seconds, u32::try_from(nanos).ok()?)
    }
}

impl From<DateTime<Utc>> for AbsoluteTime {
    fn from(value: DateTime<Utc>) -> Self {
        AbsoluteTime(value.timestamp() as f64 + f64::from(value.timestamp_subsec_nanos()) / 1e9)
    }
}

impl fmt::Display for AbsoluteTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PartialEq for AbsoluteTime {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for AbsoluteTime {}

impl PartialOrd for AbsoluteTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AbsoluteTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Add<f64> for AbsoluteTime {
    type Output = AbsoluteTime;

    fn add(self, rhs: f64) -> AbsoluteTime {
        AbsoluteTime(self.0 + rhs)
    }
}

impl Sub<f64> for AbsoluteTime {
    type Output = AbsoluteTime;

    fn sub(self, rhs: f64) -> AbsoluteTime {
        AbsoluteTime(self.0 - rhs)
    }
}

impl Sub for AbsoluteTime {
    type Output = f64;

    fn sub(self, rhs: AbsoluteTime) -> f64 {
        self.0 - rhs.0
    }
}
