//! Start-of-unit truncation.

use tracing::debug;

use crate::civil::{days_from_civil, FIRST_DAY_OF_ERA};
use crate::config::CalendarConfiguration;
use crate::convert::{instant_from_local, LocalFields};
use crate::dst::DstPolicy;
use crate::time::AbsoluteTime;
use crate::units::CalendarUnit;

/// The first instant of the `unit` containing `at`.
///
/// Calendar units truncate to local midnight of their first day, resolved
/// with the former-offset policy: when midnight is skipped by a transition,
/// the transition instant itself is returned. Hours, minutes and seconds are
/// truncated in elapsed time.
///
/// Returns `None` for the start of era 0, which has no first day.
pub fn start_of(config: &CalendarConfiguration, unit: CalendarUnit, at: AbsoluteTime) -> Option<AbsoluteTime> {
    let fields = LocalFields::at(config, at);
    let rule = config.week_rule();
    let midnight = |day_number: i64| Some(instant_from_local(config, day_number, 0, 0, DstPolicy::FORMER));
    let (whole, _) = at.split();
    let truncated = |unit_seconds: i64| {
        Some(AbsoluteTime::from_whole_seconds(
            whole - fields.seconds_of_day % unit_seconds,
        ))
    };

    match unit {
        CalendarUnit::Era => {
            if fields.year < 1 {
                debug!("era 0 has no first instant");
                return None;
            }
            midnight(FIRST_DAY_OF_ERA)
        }
        CalendarUnit::Year => midnight(days_from_civil(fields.year, 1, 1)),
        CalendarUnit::YearForWeekOfYear => {
            let (_, week_year) = rule.week_of_year(fields.year, fields.day_of_year(), fields.weekday());
            midnight(rule.day_in_week(days_from_civil(week_year, 1, 1), 1, None))
        }
        CalendarUnit::Quarter => {
            let first_month = (fields.month - 1) / 3 * 3 + 1;
            midnight(days_from_civil(fields.year, first_month, 1))
        }
        CalendarUnit::Month => midnight(fields.day_number - fields.day + 1),
        CalendarUnit::WeekOfMonth | CalendarUnit::WeekOfYear => {
            midnight(rule.week_start(fields.day_number))
        }
        CalendarUnit::Day | CalendarUnit::Weekday | CalendarUnit::WeekdayOrdinal => {
            midnight(fields.day_number)
        }
        CalendarUnit::Hour => truncated(3600),
        CalendarUnit::Minute => truncated(60),
        CalendarUnit::Second => truncated(1),
        CalendarUnit::Nanosecond => Some(at),
    }
}
