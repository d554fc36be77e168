//! Field conversion between instants and calendar components.
//!
//! Instant → components splits the instant into a local day number and a
//! second-of-day, then inverts the day number with [`civil_from_days`]. The
//! reverse direction completes under-specified components by a fixed
//! precedence and lets out-of-range fields carry into larger units.

use tracing::debug;

use crate::basis;
use crate::civil::{
    self, civil_from_days, day_of_year, days_from_civil, era_year, extended_year, month_length,
    normalize_month, NANOS_PER_SECOND, SECONDS_PER_DAY,
};
use crate::components::DateComponents;
use crate::config::CalendarConfiguration;
use crate::dst::DstPolicy;
use crate::time::AbsoluteTime;
use crate::units::{CalendarUnit, UnitSet};

/// Largest magnitude accepted for any input field.
pub(crate) const FIELD_LIMIT: i64 = 1_000_000_000_000;
/// Largest astronomical year magnitude a conversion will produce.
pub(crate) const YEAR_LIMIT: i64 = 100_000_000;

pub(crate) fn within_field_limit(value: i64) -> bool {
    (-FIELD_LIMIT..=FIELD_LIMIT).contains(&value)
}

/// An instant broken down on the local wall clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LocalFields {
    pub day_number: i64,
    pub year: i64,
    pub month: i64,
    pub day: i64,
    pub seconds_of_day: i64,
    pub nanosecond: i64,
}

impl LocalFields {
    pub fn at(config: &CalendarConfiguration, at: AbsoluteTime) -> Self {
        let (utc, nanosecond) = at.split();
        let local = basis::utc_to_local(config.zone(), utc);
        let day_number = local.div_euclid(SECONDS_PER_DAY);
        let (year, month, day) = civil_from_days(day_number);
        LocalFields {
            day_number,
            year,
            month,
            day,
            seconds_of_day: local.rem_euclid(SECONDS_PER_DAY),
            nanosecond,
        }
    }

    pub fn hour(&self) -> i64 {
        self.seconds_of_day / 3600
    }

    pub fn minute(&self) -> i64 {
        self.seconds_of_day % 3600 / 60
    }

    pub fn second(&self) -> i64 {
        self.seconds_of_day % 60
    }

    pub fn weekday(&self) -> i64 {
        civil::weekday(self.day_number)
    }

    pub fn day_of_year(&self) -> i64 {
        day_of_year(self.year, self.month, self.day)
    }

    pub fn month_length(&self) -> i64 {
        month_length(self.year, self.month)
    }
}

/// Instant for a local day number plus time of day, resolved under `policy`.
pub(crate) fn instant_from_local(
    config: &CalendarConfiguration,
    day_number: i64,
    seconds_of_day: i64,
    nanosecond: i64,
    policy: DstPolicy,
) -> AbsoluteTime {
    let local = day_number * SECONDS_PER_DAY
        + seconds_of_day
        + nanosecond.div_euclid(NANOS_PER_SECOND);
    let utc = basis::local_to_utc(config.zone(), local, policy);
    AbsoluteTime::from_whole_seconds(utc)
        + nanosecond.rem_euclid(NANOS_PER_SECOND) as f64 / NANOS_PER_SECOND as f64
}

/// Day number for a civil date whose month may be out of range.
pub(crate) fn checked_day_number(year: i64, month: i64, day: i64) -> Option<i64> {
    let (year, month) = normalize_month(year, month);
    (-YEAR_LIMIT..=YEAR_LIMIT).contains(&year).then(|| days_from_civil(year, month, day))
}

/// Calendar components of `at`, filling only the fields in `units`.
pub fn components(config: &CalendarConfiguration, units: UnitSet, at: AbsoluteTime) -> DateComponents {
    let fields = LocalFields::at(config, at);
    let rule = config.week_rule();
    let weekday = fields.weekday();
    let (era, year_of_era) = era_year(fields.year);
    let week_of_year = if units.contains(CalendarUnit::WeekOfYear)
        || units.contains(CalendarUnit::YearForWeekOfYear)
    {
        Some(rule.week_of_year(fields.year, fields.day_of_year(), weekday))
    } else {
        None
    };

    let mut out = DateComponents::default();
    for unit in units.iter() {
        let value = match unit {
            CalendarUnit::Era => era,
            CalendarUnit::Year => year_of_era,
            CalendarUnit::Month => fields.month,
            CalendarUnit::Day => fields.day,
            CalendarUnit::Hour => fields.hour(),
            CalendarUnit::Minute => fields.minute(),
            CalendarUnit::Second => fields.second(),
            CalendarUnit::Nanosecond => fields.nanosecond,
            CalendarUnit::Weekday => weekday,
            CalendarUnit::WeekdayOrdinal => (fields.day - 1) / 7 + 1,
            CalendarUnit::Quarter => (fields.month - 1) / 3 + 1,
            CalendarUnit::WeekOfMonth => rule.week_number(fields.day, fields.day, weekday),
            CalendarUnit::WeekOfYear => week_of_year.map_or(0, |(week, _)| week),
            CalendarUnit::YearForWeekOfYear => week_of_year.map_or(0, |(_, year)| year),
        };
        out.set(unit, Some(value));
    }
    if units.contains(CalendarUnit::Month) {
        out.is_leap_month = Some(false);
    }
    out
}

/// Which fields pin the day when building a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Anchor {
    Day(i64),
    WeekOfYear { week: i64 },
    WeekOfMonth { week: i64 },
    WeekdayOrdinal { ordinal: i64, weekday: i64 },
}

fn anchor(c: &DateComponents) -> Option<Anchor> {
    if let Some(day) = c.day {
        return Some(Anchor::Day(day));
    }
    match c.weekday {
        Some(weekday) => {
            if let Some(week) = c.week_of_year {
                return Some(Anchor::WeekOfYear { week });
            }
            if let Some(week) = c.week_of_month {
                return Some(Anchor::WeekOfMonth { week });
            }
            if let Some(ordinal) = c.weekday_ordinal {
                return Some(Anchor::WeekdayOrdinal { ordinal, weekday });
            }
        }
        None if c.weekday_ordinal.is_some() => return None,
        None => {}
    }
    if c.year_for_week_of_year.is_some() && (c.week_of_year.is_some() || c.year.is_none()) {
        return Some(Anchor::WeekOfYear {
            week: c.week_of_year.unwrap_or(1),
        });
    }
    Some(Anchor::Day(1))
}

/// The instant described by `components`, with folds and gaps resolved by `policy`.
///
/// Precedence: `day`, then `weekOfYear + weekday`, then `weekOfMonth +
/// weekday`, then `weekdayOrdinal + weekday`, then `weekOfYear +
/// yearForWeekOfYear`. A lone `weekOfMonth` means day 1 of the month. Absent
/// era, year and month default to 1; absent time fields to 0.
///
/// Returns `None` when the components cannot anchor a date: a
/// `weekdayOrdinal` without a `weekday`, a leap month, or values outside the
/// representable range.
pub fn date(
    config: &CalendarConfiguration,
    components: &DateComponents,
    policy: DstPolicy,
) -> Option<AbsoluteTime> {
    let c = components;
    if c.is_leap_month == Some(true) {
        debug!("leap months do not exist in the Gregorian calendar");
        return None;
    }
    let in_range = CalendarUnit::ALL
        .into_iter()
        .filter_map(|unit| c.value(unit))
        .all(within_field_limit);
    if !in_range {
        debug!(?components, "component value outside the supported range");
        return None;
    }
    let Some(anchor) = anchor(c) else {
        debug!(?components, "weekdayOrdinal without weekday cannot anchor a date");
        return None;
    };

    let rule = config.week_rule();
    let year = extended_year(c.era.unwrap_or(1), c.year.unwrap_or(1));
    let day_number = match anchor {
        Anchor::Day(day) => checked_day_number(year, c.month.unwrap_or(1), day)?,
        Anchor::WeekOfYear { week } => {
            let year = c.year_for_week_of_year.unwrap_or(year);
            let start = checked_day_number(year, 1, 1)?;
            rule.day_in_week(start, week, c.weekday)
        }
        Anchor::WeekOfMonth { week } => {
            let start = checked_day_number(year, c.month.unwrap_or(1), 1)?;
            rule.day_in_week(start, week, c.weekday)
        }
        Anchor::WeekdayOrdinal { ordinal, weekday } => {
            let (year, month) = normalize_month(year, c.month.unwrap_or(1));
            let start = checked_day_number(year, month, 1)?;
            rule.ordinal_weekday(start, month_length(year, month), ordinal, weekday)
        }
    };

    let seconds_of_day =
        c.hour.unwrap_or(0) * 3600 + c.minute.unwrap_or(0) * 60 + c.second.unwrap_or(0);
    Some(instant_from_local(
        config,
        day_number,
        seconds_of_day,
        c.nanosecond.unwrap_or(0),
        policy,
    ))
}
