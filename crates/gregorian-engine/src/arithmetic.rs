//! Field arithmetic: adding signed amounts of calendar units to instants.
//!
//! Calendar-sized units (year through day) are added on the local wall clock
//! and resolved back with the former-offset policy, so a day added across a
//! spring-forward transition is 23 real hours. Time-of-day units are added as
//! elapsed time.

use tracing::debug;

use crate::civil::{era_year, extended_year, month_length, normalize_month, year_length, NANOS_PER_SECOND};
use crate::components::DateComponents;
use crate::config::CalendarConfiguration;
use crate::convert::{checked_day_number, instant_from_local, within_field_limit, LocalFields, YEAR_LIMIT};
use crate::dst::DstPolicy;
use crate::time::AbsoluteTime;
use crate::units::CalendarUnit;

/// Adds `amount` of `unit` to `at`.
///
/// Without wrapping, overflow carries into larger units. With wrapping, the
/// field cycles inside its immediate container and larger units stay fixed;
/// era is unchanged either way.
///
/// Returns `None` if the result falls outside the representable range.
pub fn add(
    config: &CalendarConfiguration,
    unit: CalendarUnit,
    amount: i64,
    at: AbsoluteTime,
    wrap: bool,
) -> Option<AbsoluteTime> {
    if amount == 0 {
        return Some(at);
    }
    if !within_field_limit(amount) {
        debug!(%unit, amount, "add amount outside the supported range");
        return None;
    }
    if wrap {
        add_wrapping(config, unit, amount, at)
    } else {
        add_carrying(config, unit, amount, at)
    }
}

/// Adds every present field of `components`, coarsest first, each against
/// the result of the previous step.
pub fn add_components(
    config: &CalendarConfiguration,
    components: &DateComponents,
    at: AbsoluteTime,
    wrap: bool,
) -> Option<AbsoluteTime> {
    components
        .present()
        .try_fold(at, |current, (unit, amount)| add(config, unit, amount, current, wrap))
}

fn on_day(config: &CalendarConfiguration, fields: &LocalFields, day_number: i64) -> AbsoluteTime {
    instant_from_local(
        config,
        day_number,
        fields.seconds_of_day,
        fields.nanosecond,
        DstPolicy::FORMER,
    )
}

/// Same wall time on `year`-`month`, with the day pinned to the month's length.
fn on_month(
    config: &CalendarConfiguration,
    fields: &LocalFields,
    year: i64,
    month: i64,
) -> Option<AbsoluteTime> {
    let (year, month) = normalize_month(year, month);
    if !(-YEAR_LIMIT..=YEAR_LIMIT).contains(&year) {
        return None;
    }
    let day = fields.day.min(month_length(year, month));
    let day_number = checked_day_number(year, month, day)?;
    Some(on_day(config, fields, day_number))
}

fn add_carrying(
    config: &CalendarConfiguration,
    unit: CalendarUnit,
    amount: i64,
    at: AbsoluteTime,
) -> Option<AbsoluteTime> {
    let fields = LocalFields::at(config, at);
    match unit {
        CalendarUnit::Era => Some(at),
        CalendarUnit::Year => on_month(config, &fields, fields.year + amount, fields.month),
        CalendarUnit::Quarter => on_month(config, &fields, fields.year, fields.month + 3 * amount),
        CalendarUnit::Month => on_month(config, &fields, fields.year, fields.month + amount),
        CalendarUnit::Day | CalendarUnit::Weekday => {
            Some(on_day(config, &fields, fields.day_number + amount))
        }
        CalendarUnit::WeekOfYear | CalendarUnit::WeekOfMonth | CalendarUnit::WeekdayOrdinal => {
            Some(on_day(config, &fields, fields.day_number + 7 * amount))
        }
        CalendarUnit::YearForWeekOfYear => {
            let rule = config.week_rule();
            let weekday = fields.weekday();
            let (week, week_year) = rule.week_of_year(fields.year, fields.day_of_year(), weekday);
            let start = checked_day_number(week_year + amount, 1, 1)?;
            Some(on_day(config, &fields, rule.day_in_week(start, week, Some(weekday))))
        }
        CalendarUnit::Hour => Some(at + (amount * 3600) as f64),
        CalendarUnit::Minute => Some(at + (amount * 60) as f64),
        CalendarUnit::Second => Some(at + amount as f64),
        CalendarUnit::Nanosecond => Some(at + amount as f64 / NANOS_PER_SECOND as f64),
    }
}

fn add_wrapping(
    config: &CalendarConfiguration,
    unit: CalendarUnit,
    amount: i64,
    at: AbsoluteTime,
) -> Option<AbsoluteTime> {
    let fields = LocalFields::at(config, at);
    let rule = config.week_rule();
    let shift_days = |days: i64| Some(on_day(config, &fields, fields.day_number + days));

    match unit {
        CalendarUnit::Era => Some(at),
        // The week-year has no cyclic container; it moves like a carrying add.
        CalendarUnit::YearForWeekOfYear => add_carrying(config, unit, amount, at),
        CalendarUnit::Year => {
            // Stays inside the era: never below year 1 of either era.
            let (era, year_of_era) = era_year(fields.year);
            let moved = if era == 1 { year_of_era + amount } else { year_of_era - amount };
            on_month(config, &fields, extended_year(era, moved.max(1)), fields.month)
        }
        CalendarUnit::Quarter => {
            let quarter = (fields.month - 1) / 3;
            let month_in_quarter = (fields.month - 1) % 3;
            let month = (quarter + amount).rem_euclid(4) * 3 + month_in_quarter + 1;
            on_month(config, &fields, fields.year, month)
        }
        CalendarUnit::Month => {
            let month = (fields.month - 1 + amount).rem_euclid(12) + 1;
            on_month(config, &fields, fields.year, month)
        }
        CalendarUnit::Day => {
            let day = (fields.day - 1 + amount).rem_euclid(fields.month_length()) + 1;
            shift_days(day - fields.day)
        }
        CalendarUnit::Weekday => {
            let position = rule.relative_weekday(fields.weekday());
            shift_days((position + amount).rem_euclid(7) - position)
        }
        CalendarUnit::WeekdayOrdinal => {
            let before = (fields.day - 1) / 7;
            let after = (fields.month_length() - fields.day) / 7;
            let moved = (before + amount).rem_euclid(before + after + 1);
            shift_days(7 * (moved - before))
        }
        CalendarUnit::WeekOfMonth => {
            // Cycle over the month padded out to whole weeks, then clamp back into it.
            let position = rule.relative_weekday(fields.weekday());
            let first_of_month = (position - fields.day + 1).rem_euclid(7);
            let start = if 7 - first_of_month < rule.minimum_days() {
                8 - first_of_month
            } else {
                1 - first_of_month
            };
            let length = fields.month_length();
            let last_of_month = (length - fields.day + position) % 7;
            let span = length + 7 - last_of_month - start;
            let day = ((fields.day + 7 * amount - start).rem_euclid(span) + start).clamp(1, length);
            shift_days(day - fields.day)
        }
        CalendarUnit::WeekOfYear => {
            let weekday = fields.weekday();
            let mut day_of_year = fields.day_of_year();
            let (mut week, week_year) = rule.week_of_year(fields.year, day_of_year, weekday);
            if fields.month == 1 {
                if week >= 52 {
                    day_of_year += year_length(week_year);
                }
            } else if week == 1 {
                day_of_year -= year_length(week_year - 1);
            }
            week += amount;
            if !(1..=52).contains(&week) {
                let mut last_day = year_length(week_year);
                let mut last_position = (last_day - day_of_year + weekday - rule.first_weekday()) % 7;
                if last_position < 0 {
                    last_position += 7;
                }
                if 6 - last_position >= rule.minimum_days() {
                    last_day -= 7;
                }
                let weeks = rule.week_number(last_day, last_day, last_position + 1);
                week = (week - 1).rem_euclid(weeks) + 1;
            }
            let start = checked_day_number(week_year, 1, 1)?;
            Some(on_day(config, &fields, rule.day_in_week(start, week, Some(weekday))))
        }
        CalendarUnit::Hour => {
            let hour = fields.hour();
            Some(at + (((hour + amount).rem_euclid(24) - hour) * 3600) as f64)
        }
        CalendarUnit::Minute => {
            let minute = fields.minute();
            Some(at + (((minute + amount).rem_euclid(60) - minute) * 60) as f64)
        }
        CalendarUnit::Second => {
            let second = fields.second();
            Some(at + ((second + amount).rem_euclid(60) - second) as f64)
        }
        CalendarUnit::Nanosecond => {
            // Truncating remainder: a negative sum stays negative and moves into the previous second.
            let nanosecond = fields.nanosecond;
            let moved = (nanosecond + amount) % NANOS_PER_SECOND;
            Some(at + (moved - nanosecond) as f64 / NANOS_PER_SECOND as f64)
        }
    }
}
