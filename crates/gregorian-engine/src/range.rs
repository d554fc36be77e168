//! Valid ranges of calendar fields.
//!
//! Ranges are half-open, matching the values a field can take: `1..13` for
//! months, `0..24` for hours.

use std::ops::Range;

use crate::civil::{self, days_from_civil, year_length, NANOS_PER_SECOND};
use crate::config::CalendarConfiguration;
use crate::convert::LocalFields;
use crate::time::AbsoluteTime;
use crate::units::CalendarUnit;

/// The range every instance of `unit` is guaranteed to cover.
pub fn minimum_range(unit: CalendarUnit) -> Range<i64> {
    match unit {
        CalendarUnit::Era => 0..2,
        CalendarUnit::Year | CalendarUnit::YearForWeekOfYear => 1..140_743,
        CalendarUnit::Quarter => 1..5,
        CalendarUnit::Month => 1..13,
        CalendarUnit::WeekOfMonth => 1..5,
        CalendarUnit::WeekOfYear => 1..53,
        CalendarUnit::Day => 1..29,
        CalendarUnit::Weekday => 1..8,
        CalendarUnit::WeekdayOrdinal => 1..5,
        CalendarUnit::Hour => 0..24,
        CalendarUnit::Minute | CalendarUnit::Second => 0..60,
        CalendarUnit::Nanosecond => 0..NANOS_PER_SECOND,
    }
}

/// The widest range any instance of `unit` can cover.
pub fn maximum_range(unit: CalendarUnit) -> Range<i64> {
    match unit {
        CalendarUnit::Year | CalendarUnit::YearForWeekOfYear => 1..144_684,
        CalendarUnit::WeekOfMonth => 1..7,
        CalendarUnit::WeekOfYear => 1..54,
        CalendarUnit::Day => 1..32,
        CalendarUnit::WeekdayOrdinal => 1..6,
        _ => minimum_range(unit),
    }
}

/// The values `small` actually takes inside the `large` unit containing `at`.
///
/// Returns `None` when `large` does not contain `small` or the pair has no
/// contiguous range.
pub fn range(
    config: &CalendarConfiguration,
    small: CalendarUnit,
    large: CalendarUnit,
    at: AbsoluteTime,
) -> Option<Range<i64>> {
    if !large.contains(small) {
        return None;
    }
    let fields = LocalFields::at(config, at);
    let rule = config.week_rule();
    let length = fields.month_length();

    let range = match (small, large) {
        (CalendarUnit::Year, CalendarUnit::Era) => maximum_range(CalendarUnit::Year),
        (CalendarUnit::Quarter, CalendarUnit::Year) => 1..5,
        (CalendarUnit::Month, CalendarUnit::Year) => 1..13,
        (CalendarUnit::Month, CalendarUnit::Quarter) => {
            let first = (fields.month - 1) / 3 * 3 + 1;
            first..first + 3
        }
        (CalendarUnit::Day, CalendarUnit::Year) => 1..year_length(fields.year) + 1,
        (CalendarUnit::Day, CalendarUnit::Quarter) => {
            let first_month = (fields.month - 1) / 3 * 3 + 1;
            let start = days_from_civil(fields.year, first_month, 1);
            let (next_year, next_month) = civil::normalize_month(fields.year, first_month + 3);
            1..days_from_civil(next_year, next_month, 1) - start + 1
        }
        (CalendarUnit::Day, CalendarUnit::Month) => 1..length + 1,
        (CalendarUnit::Day, CalendarUnit::WeekOfMonth | CalendarUnit::WeekOfYear) => {
            let first = fields.day - rule.relative_weekday(fields.weekday());
            first.max(1)..(first + 7).min(length + 1)
        }
        (CalendarUnit::Weekday, _) => 1..8,
        (CalendarUnit::WeekdayOrdinal, CalendarUnit::Month) => 1..(length - 1) / 7 + 2,
        (CalendarUnit::WeekOfMonth, CalendarUnit::Month) => {
            let first_weekday = civil::weekday(fields.day_number - fields.day + 1);
            let last_weekday = civil::weekday(fields.day_number - fields.day + length);
            rule.week_number(1, 1, first_weekday)..rule.week_number(length, length, last_weekday) + 1
        }
        (CalendarUnit::WeekOfYear, CalendarUnit::Year | CalendarUnit::YearForWeekOfYear) => {
            let (_, week_year) = rule.week_of_year(fields.year, fields.day_of_year(), fields.weekday());
            let next_start = rule.day_in_week(days_from_civil(week_year + 1, 1, 1), 1, None);
            let last_day = next_start - 1;
            let (year, month, day) = civil::civil_from_days(last_day);
            let (weeks, _) = rule.week_of_year(
                year,
                civil::day_of_year(year, month, day),
                civil::weekday(last_day),
            );
            1..weeks + 1
        }
        (CalendarUnit::Hour, CalendarUnit::Day | CalendarUnit::Weekday) => 0..24,
        (CalendarUnit::Minute, CalendarUnit::Hour) | (CalendarUnit::Second, CalendarUnit::Minute) => 0..60,
        (CalendarUnit::Nanosecond, CalendarUnit::Second) => 0..NANOS_PER_SECOND,
        _ => return None,
    };
    Some(range)
}
