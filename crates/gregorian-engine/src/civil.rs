//! Closed-form proleptic Gregorian day arithmetic.
//!
//! Day numbers count days since 1970-01-01 (day 0, a Thursday) and extend
//! without gaps in both directions. Years are astronomical: year 0 is 1 BCE.
//! Conversions decompose into 400-year cycles of 146 097 days, so every
//! function here is O(1) over the whole signed range.

pub(crate) const SECONDS_PER_DAY: i64 = 86_400;
pub(crate) const NANOS_PER_SECOND: i64 = 1_000_000_000;

const DAYS_PER_CYCLE: i64 = 146_097;
/// Days from 0000-03-01 to 1970-01-01.
const EPOCH_SHIFT: i64 = 719_468;
/// Day number of 0001-01-01.
pub(crate) const FIRST_DAY_OF_ERA: i64 = -719_162;

pub fn is_leap_year(year: i64) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

pub fn year_length(year: i64) -> i64 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// Days in `month` (1..=12) of `year`.
pub fn month_length(year: i64, month: i64) -> i64 {
    if month == 2 {
        28 + i64::from(is_leap_year(year))
    } else {
        // 31 for Jan, Mar, May, Jul, Aug, Oct, Dec; the parity flips after July.
        30 + ((month ^ (month >> 3)) & 1)
    }
}

/// Day number of `year`-`month`-`day`. `month` must be in 1..=12; `day` may be
/// out of range and carries linearly.
pub fn days_from_civil(year: i64, month: i64, day: i64) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let cycle = y.div_euclid(400);
    let year_of_cycle = y - cycle * 400;
    let shifted_month = (month + 9) % 12;
    let day_of_year = (153 * shifted_month + 2) / 5 + day - 1;
    let day_of_cycle = year_of_cycle * 365 + year_of_cycle / 4 - year_of_cycle / 100 + day_of_year;
    cycle * DAYS_PER_CYCLE + day_of_cycle - EPOCH_SHIFT
}

/// Inverse of [`days_from_civil`]: `(year, month, day)` for a day number.
pub fn civil_from_days(days: i64) -> (i64, i64, i64) {
    let z = days + EPOCH_SHIFT;
    let cycle = z.div_euclid(DAYS_PER_CYCLE);
    let day_of_cycle = z - cycle * DAYS_PER_CYCLE;
    let year_of_cycle =
        (day_of_cycle - day_of_cycle / 1460 + day_of_cycle / 36524 - day_of_cycle / 146_096) / 365;
    let day_of_year = day_of_cycle - (365 * year_of_cycle + year_of_cycle / 4 - year_of_cycle / 100);
    let shifted_month = (5 * day_of_year + 2) / 153;
    let day = day_of_year - (153 * shifted_month + 2) / 5 + 1;
    let month = if shifted_month < 10 { shifted_month + 3 } else { shifted_month - 9 };
    let year = year_of_cycle + cycle * 400 + i64::from(month <= 2);
    (year, month, day)
}

/// 1 = Sunday … 7 = Saturday.
pub fn weekday(days: i64) -> i64 {
    (days + 4).rem_euclid(7) + 1
}

pub fn day_of_year(year: i64, month: i64, day: i64) -> i64 {
    days_from_civil(year, month, day) - days_from_civil(year, 1, 1) + 1
}

/// Folds an out-of-range month into `(year, 1..=12)`.
pub fn normalize_month(year: i64, month: i64) -> (i64, i64) {
    let zero_based = month - 1;
    (year + zero_based.div_euclid(12), zero_based.rem_euclid(12) + 1)
}

/// `(era, year of era)` for an astronomical year.
pub fn era_year(year: i64) -> (i64, i64) {
    if year >= 1 {
        (1, year)
    } else {
        (0, 1 - year)
    }
}

/// Astronomical year for an era-relative year. Any era other than 0 counts as 1.
pub fn extended_year(era: i64, year_of_era: i64) -> i64 {
    if era <= 0 {
        1 - year_of_era
    } else {
        year_of_era
    }
}

/// Week numbering parameters: which weekday starts a week and how many days
/// of a new year or month the first week needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct WeekRule {
    first_weekday: i64,
    minimum_days: i64,
}

impl WeekRule {
    pub fn new(first_weekday: i64, minimum_days: i64) -> Self {
        WeekRule {
            first_weekday,
            minimum_days,
        }
    }

    pub fn first_weekday(&self) -> i64 {
        self.first_weekday
    }

    pub fn minimum_days(&self) -> i64 {
        self.minimum_days
    }

    /// 0-based position of `weekday` counted from the first weekday.
    pub fn relative_weekday(&self, weekday: i64) -> i64 {
        (weekday - self.first_weekday).rem_euclid(7)
    }

    /// Week of a period containing `desired`, given that `day_of_period`
    /// falls on `weekday`. Week 0 is a partial week too short to count.
    pub fn week_number(&self, desired: i64, day_of_period: i64, weekday: i64) -> i64 {
        let period_start = (weekday - self.first_weekday - day_of_period + 1).rem_euclid(7);
        let mut week = (desired + period_start - 1) / 7;
        if 7 - period_start >= self.minimum_days {
            week += 1;
        }
        week
    }

    /// `(weekOfYear, yearForWeekOfYear)` for a day of `year`.
    ///
    /// A leading partial week belongs to the last week of the previous
    /// week-year; trailing days that start a qualifying week belong to week 1
    /// of the next.
    pub fn week_of_year(&self, year: i64, day_of_year: i64, weekday: i64) -> (i64, i64) {
        let length = year_length(year);
        let relative_dow = self.relative_weekday(weekday);
        let relative_jan1 = (weekday - day_of_year + 1 - self.first_weekday).rem_euclid(7);
        let mut week = (day_of_year - 1 + relative_jan1) / 7;
        if 7 - relative_jan1 >= self.minimum_days {
            week += 1;
        }

        if week == 0 {
            let previous = day_of_year + year_length(year - 1);
            return (self.week_number(previous, previous, weekday), year - 1);
        }
        if day_of_year >= length - 5 {
            let last_relative_dow = (relative_dow + length - day_of_year) % 7;
            if 6 - last_relative_dow >= self.minimum_days && day_of_year + 7 - relative_dow > length
            {
                return (1, year + 1);
            }
        }
        (week, year)
    }

    /// Day number for `weekday` in week `week` of the period whose first day
    /// is `period_start`. Without a weekday the first day of the week is used.
    pub fn day_in_week(&self, period_start: i64, week: i64, target: Option<i64>) -> i64 {
        let first = self.relative_weekday(weekday(period_start));
        let mut date = 1 - first + target.map_or(0, |w| self.relative_weekday(w));
        if 7 - first < self.minimum_days {
            date += 7;
        }
        date += 7 * (week - 1);
        period_start - 1 + date
    }

    /// Day number of the `ordinal`-th `weekday` of a month. Negative ordinals
    /// count from the end of the month.
    pub fn ordinal_weekday(&self, month_start: i64, month_length: i64, ordinal: i64, target: i64) -> i64 {
        let first = self.relative_weekday(weekday(month_start));
        let mut date = 1 - first + self.relative_weekday(target);
        if date < 1 {
            date += 7;
        }
        if ordinal >= 0 {
            date += 7 * (ordinal - 1);
        } else {
            date += ((month_length - date) / 7 + ordinal + 1) * 7;
        }
        month_start - 1 + date
    }

    /// First day of the week containing `days`.
    pub fn week_start(&self, days: i64) -> i64 {
        days - self.relative_weekday(weekday(days))
    }
}
