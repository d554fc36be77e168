//! Calendar units and the containment order between them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CalendarError;

/// The closed set of calendar units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CalendarUnit {
    Era,
    Year,
    YearForWeekOfYear,
    Quarter,
    Month,
    WeekOfMonth,
    WeekOfYear,
    Day,
    Weekday,
    WeekdayOrdinal,
    Hour,
    Minute,
    Second,
    Nanosecond,
}

impl CalendarUnit {
    pub const ALL: [CalendarUnit; 14] = [
        CalendarUnit::Era,
        CalendarUnit::Year,
        CalendarUnit::YearForWeekOfYear,
        CalendarUnit::Quarter,
        CalendarUnit::Month,
        CalendarUnit::WeekOfMonth,
        CalendarUnit::WeekOfYear,
        CalendarUnit::Day,
        CalendarUnit::Weekday,
        CalendarUnit::WeekdayOrdinal,
        CalendarUnit::Hour,
        CalendarUnit::Minute,
        CalendarUnit::Second,
        CalendarUnit::Nanosecond,
    ];

    /// Order in which a composite add applies its fields.
    pub const ADD_ORDER: [CalendarUnit; 14] = [
        CalendarUnit::Era,
        CalendarUnit::Year,
        CalendarUnit::YearForWeekOfYear,
        CalendarUnit::Quarter,
        CalendarUnit::Month,
        CalendarUnit::Day,
        CalendarUnit::WeekOfYear,
        CalendarUnit::WeekOfMonth,
        CalendarUnit::Weekday,
        CalendarUnit::WeekdayOrdinal,
        CalendarUnit::Hour,
        CalendarUnit::Minute,
        CalendarUnit::Second,
        CalendarUnit::Nanosecond,
    ];

    /// Camel-case name, matching the serde representation.
    pub fn name(self) -> &'static str {
        match self {
            CalendarUnit::Era => "era",
            CalendarUnit::Year => "year",
            CalendarUnit::YearForWeekOfYear => "yearForWeekOfYear",
            CalendarUnit::Quarter => "quarter",
            CalendarUnit::Month => "month",
            CalendarUnit::WeekOfMonth => "weekOfMonth",
            CalendarUnit::WeekOfYear => "weekOfYear",
            CalendarUnit::Day => "day",
            CalendarUnit::Weekday => "weekday",
            CalendarUnit::WeekdayOrdinal => "weekdayOrdinal",
            CalendarUnit::Hour => "hour",
            CalendarUnit::Minute => "minute",
            CalendarUnit::Second => "second",
            CalendarUnit::Nanosecond => "nanosecond",
        }
    }

    /// Hour, minute, second or nanosecond.
    pub fn is_time_of_day(self) -> bool {
        matches!(
            self,
            CalendarUnit::Hour | CalendarUnit::Minute | CalendarUnit::Second | CalendarUnit::Nanosecond
        )
    }

    /// Strict containment: every instance of `small` lies inside one instance of `self`.
    pub fn contains(self, small: CalendarUnit) -> bool {
        use CalendarUnit::*;

        if self == small {
            return false;
        }
        match self {
            Era => small != YearForWeekOfYear,
            Year => !matches!(small, Era | YearForWeekOfYear),
            YearForWeekOfYear => matches!(small, WeekOfYear | Day | Weekday) || small.is_time_of_day(),
            Quarter => !matches!(small, Era | Year | YearForWeekOfYear),
            Month => {
                matches!(small, WeekOfMonth | Day | Weekday | WeekdayOrdinal) || small.is_time_of_day()
            }
            WeekOfMonth | WeekOfYear => matches!(small, Day | Weekday) || small.is_time_of_day(),
            Day | Weekday => small.is_time_of_day(),
            WeekdayOrdinal => false,
            Hour => matches!(small, Minute | Second | Nanosecond),
            Minute => matches!(small, Second | Nanosecond),
            Second => small == Nanosecond,
            Nanosecond => false,
        }
    }
}

impl fmt::Display for CalendarUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CalendarUnit {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CalendarUnit::ALL
            .into_iter()
            .find(|unit| unit.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| CalendarError::InvalidComponents(format!("unknown calendar unit '{s}'")))
    }
}

/// A set of calendar units, used to request fields from a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct UnitSet(u16);

impl UnitSet {
    pub const fn empty() -> Self {
        UnitSet(0)
    }

    pub fn all() -> Self {
        CalendarUnit::ALL.into_iter().collect()
    }

    pub fn contains(self, unit: CalendarUnit) -> bool {
        self.0 & Self::bit(unit) != 0
    }

    pub fn insert(&mut self, unit: CalendarUnit) {
        self.0 |= Self::bit(unit);
    }

    #[must_use]
    pub fn with(mut self, unit: CalendarUnit) -> Self {
        self.insert(unit);
        self
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = CalendarUnit> {
        CalendarUnit::ALL.into_iter().filter(move |unit| self.contains(*unit))
    }

    fn bit(unit: CalendarUnit) -> u16 {
        1 << unit as u16
    }
}

impl FromIterator<CalendarUnit> for UnitSet {
    fn from_iter<I: IntoIterator<Item = CalendarUnit>>(iter: I) -> Self {
        let mut set = UnitSet::empty();
        for unit in iter {
            set.insert(unit);
        }
        set
    }
}

impl<const N: usize> From<[CalendarUnit; N]> for UnitSet {
    fn from(units: [CalendarUnit; N]) -> Self {
        units.into_iter().collect()
    }
}
