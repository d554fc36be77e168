//! Ordinality: the 1-based position of a smaller unit inside a larger one.
//!
//! Positions are counted on the local wall clock. On a spring-forward day the
//! skipped hour has no position (02:xx never occurs, so 03:xx is hour 4); on
//! a fall-back day both passes through the repeated hour share a position.

use tracing::debug;

use crate::civil::{days_from_civil, era_year, WeekRule, FIRST_DAY_OF_ERA, NANOS_PER_SECOND, SECONDS_PER_DAY};
use crate::config::CalendarConfiguration;
use crate::convert::LocalFields;
use crate::time::AbsoluteTime;
use crate::units::CalendarUnit;

const NANOS_PER_DAY: i64 = SECONDS_PER_DAY * NANOS_PER_SECOND;

/// Position of the `small` unit containing `at` within the `large` unit containing `at`.
///
/// Returns `None` when `large` does not strictly contain `small`, for
/// sub-year positions inside era 0, and when the count overflows.
pub fn ordinality(
    config: &CalendarConfiguration,
    small: CalendarUnit,
    large: CalendarUnit,
    at: AbsoluteTime,
) -> Option<i64> {
    if !large.contains(small) {
        debug!(%small, %large, "ordinality requested for units that do not nest");
        return None;
    }
    let fields = LocalFields::at(config, at);
    let rule = config.week_rule();
    let weekday = fields.weekday();
    let (era, year_of_era) = era_year(fields.year);
    let quarter = (fields.month - 1) / 3 + 1;

    if small.is_time_of_day() {
        return time_position(&fields, &rule, small, large);
    }
    match small {
        CalendarUnit::Year => Some(year_of_era),
        CalendarUnit::Quarter => match large {
            CalendarUnit::Era if era == 1 => Some((year_of_era - 1) * 4 + quarter),
            CalendarUnit::Year => Some(quarter),
            _ => None,
        },
        CalendarUnit::Month => match large {
            CalendarUnit::Era if era == 1 => Some((year_of_era - 1) * 12 + fields.month),
            CalendarUnit::Year => Some(fields.month),
            CalendarUnit::Quarter => Some((fields.month - 1) % 3 + 1),
            _ => None,
        },
        CalendarUnit::Day => day_position(&fields, &rule, large),
        CalendarUnit::Weekday | CalendarUnit::WeekdayOrdinal => match large {
            CalendarUnit::WeekOfMonth | CalendarUnit::WeekOfYear => {
                Some(rule.relative_weekday(weekday) + 1)
            }
            _ => day_position(&fields, &rule, large).map(|day| (day - 1) / 7 + 1),
        },
        CalendarUnit::WeekOfMonth | CalendarUnit::WeekOfYear => match large {
            CalendarUnit::YearForWeekOfYear => {
                Some(rule.week_of_year(fields.year, fields.day_of_year(), weekday).0)
            }
            _ => day_position(&fields, &rule, large).map(|day| rule.week_number(day, day, weekday)),
        },
        _ => None,
    }
}

/// 1-based day of `fields` within the `large` unit containing it.
fn day_position(fields: &LocalFields, rule: &WeekRule, large: CalendarUnit) -> Option<i64> {
    let position = match large {
        CalendarUnit::Era => {
            if fields.year < 1 {
                return None;
            }
            fields.day_number - FIRST_DAY_OF_ERA + 1
        }
        CalendarUnit::Year => fields.day_of_year(),
        CalendarUnit::YearForWeekOfYear => {
            let (_, week_year) = rule.week_of_year(fields.year, fields.day_of_year(), fields.weekday());
            let first_week = rule.day_in_week(days_from_civil(week_year, 1, 1), 1, None);
            fields.day_number - first_week + 1
        }
        CalendarUnit::Quarter => {
            let first_month = (fields.month - 1) / 3 * 3 + 1;
            fields.day_number - days_from_civil(fields.year, first_month, 1) + 1
        }
        CalendarUnit::Month => fields.day,
        CalendarUnit::WeekOfMonth | CalendarUnit::WeekOfYear => {
            rule.relative_weekday(fields.weekday()) + 1
        }
        CalendarUnit::Day | CalendarUnit::Weekday | CalendarUnit::WeekdayOrdinal => 1,
        CalendarUnit::Hour | CalendarUnit::Minute | CalendarUnit::Second | CalendarUnit::Nanosecond => {
            return None
        }
    };
    Some(position)
}

fn time_position(
    fields: &LocalFields,
    rule: &WeekRule,
    small: CalendarUnit,
    large: CalendarUnit,
) -> Option<i64> {
    let nanos_of_day = fields.seconds_of_day * NANOS_PER_SECOND + fields.nanosecond;
    let unit_nanos = match small {
        CalendarUnit::Hour => 3600 * NANOS_PER_SECOND,
        CalendarUnit::Minute => 60 * NANOS_PER_SECOND,
        CalendarUnit::Second => NANOS_PER_SECOND,
        _ => 1,
    };
    let (elapsed_days, within) = match large {
        CalendarUnit::Hour => (0, nanos_of_day % (3600 * NANOS_PER_SECOND)),
        CalendarUnit::Minute => (0, nanos_of_day % (60 * NANOS_PER_SECOND)),
        CalendarUnit::Second => (0, fields.nanosecond),
        _ => (day_position(fields, rule, large)? - 1, nanos_of_day),
    };
    elapsed_days
        .checked_mul(NANOS_PER_DAY / unit_nanos)?
        .checked_add(within / unit_nanos)?
        .checked_add(1)
}
