//! Time basis: UTC offsets for instants and instants for local readings.
//!
//! Local readings are whole seconds counted from 1970-01-01T00:00:00 on the
//! zone's wall clock. Converting them back to instants is where folds and gaps
//! show up; both are resolved silently according to a [`DstPolicy`].

use tracing::trace;

use crate::civil::SECONDS_PER_DAY;
use crate::dst::{DstPolicy, TransitionPolicy};
use crate::time::AbsoluteTime;
use crate::zone::ZoneRules;

/// Raw and daylight-saving offsets, in seconds east of UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneOffsets {
    pub raw: i32,
    pub dst: i32,
}

impl ZoneOffsets {
    pub fn total(self) -> i32 {
        self.raw + self.dst
    }
}

/// How a local reading relates to the zone's transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalReading {
    /// Occurs exactly once.
    Unique,
    /// Occurs twice; the clock was set back over it.
    Fold,
    /// Never occurs; the clock jumped over it.
    Gap,
}

/// Offsets in force at `at`.
pub fn offsets(zone: &dyn ZoneRules, at: AbsoluteTime) -> ZoneOffsets {
    ZoneOffsets {
        raw: zone.raw_offset(at),
        dst: zone.dst_offset(at),
    }
}

/// Classifies `local` and returns the UTC seconds chosen by `policy`.
pub fn resolve_local(zone: &dyn ZoneRules, local: i64, policy: DstPolicy) -> (i64, LocalReading) {
    let before = i64::from(zone.total_offset(AbsoluteTime::from_whole_seconds(local - SECONDS_PER_DAY)));
    let after = i64::from(zone.total_offset(AbsoluteTime::from_whole_seconds(local + SECONDS_PER_DAY)));
    if before == after {
        return (local - before, LocalReading::Unique);
    }

    let Some(transition) =
        zone.next_transition(AbsoluteTime::from_whole_seconds(local - SECONDS_PER_DAY))
    else {
        return (local - before, LocalReading::Unique);
    };
    let transition = transition.seconds().floor() as i64;

    // Wall-clock readings on either side of the transition instant.
    let wall_before = transition + before;
    let wall_after = transition + after;
    if local < wall_before.min(wall_after) {
        return (local - before, LocalReading::Unique);
    }
    if local >= wall_before.max(wall_after) {
        return (local - after, LocalReading::Unique);
    }

    let (reading, choice) = if after < before {
        (LocalReading::Fold, policy.repeated)
    } else {
        (LocalReading::Gap, policy.skipped)
    };
    trace!(local, transition, ?reading, ?choice, "resolved ambiguous local time");
    let utc = match choice {
        TransitionPolicy::Former => local - before,
        TransitionPolicy::Latter => local - after,
    };
    (utc, reading)
}

/// UTC seconds for the local reading `local` under `policy`.
pub fn local_to_utc(zone: &dyn ZoneRules, local: i64, policy: DstPolicy) -> i64 {
    resolve_local(zone, local, policy).0
}

/// Local wall-clock seconds for the whole UTC second `utc`.
pub fn utc_to_local(zone: &dyn ZoneRules, utc: i64) -> i64 {
    utc + i64::from(zone.total_offset(AbsoluteTime::from_whole_seconds(utc)))
}
