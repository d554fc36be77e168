//! Sparse calendar field records.

use serde::{Deserialize, Serialize};

use crate::units::{CalendarUnit, UnitSet};

/// Calendar fields, each independently present or absent.
///
/// Used both as conversion output (only requested fields are filled) and as
/// input to [`date`](crate::GregorianCalendar::date) and composite adds. Zero
/// is a meaningful value and distinct from `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateComponents {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub era: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hour: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minute: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nanosecond: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekday: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekday_ordinal: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quarter: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week_of_month: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week_of_year: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_for_week_of_year: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_leap_month: Option<bool>,
}

impl DateComponents {
    /// Year, month and day, with every other field absent.
    pub fn ymd(year: i64, month: i64, day: i64) -> Self {
        DateComponents {
            year: Some(year),
            month: Some(month),
            day: Some(day),
            ..Default::default()
        }
    }

    /// A record holding a single field.
    pub fn single(unit: CalendarUnit, value: i64) -> Self {
        let mut components = DateComponents::default();
        components.set(unit, Some(value));
        components
    }

    /// Adds hour, minute and second to the record.
    #[must_use]
    pub fn with_time(mut self, hour: i64, minute: i64, second: i64) -> Self {
        self.hour = Some(hour);
        self.minute = Some(minute);
        self.second = Some(second);
        self
    }

    pub fn value(&self, unit: CalendarUnit) -> Option<i64> {
        match unit {
            CalendarUnit::Era => self.era,
            CalendarUnit::Year => self.year,
            CalendarUnit::YearForWeekOfYear => self.year_for_week_of_year,
            CalendarUnit::Quarter => self.quarter,
            CalendarUnit::Month => self.month,
            CalendarUnit::WeekOfMonth => self.week_of_month,
            CalendarUnit::WeekOfYear => self.week_of_year,
            CalendarUnit::Day => self.day,
            CalendarUnit::Weekday => self.weekday,
            CalendarUnit::WeekdayOrdinal => self.weekday_ordinal,
            CalendarUnit::Hour => self.hour,
            CalendarUnit::Minute => self.minute,
            CalendarUnit::Second => self.second,
            CalendarUnit::Nanosecond => self.nanosecond,
        }
    }

    pub fn set(&mut self, unit: CalendarUnit, value: Option<i64>) {
        let slot = match unit {
            CalendarUnit::Era => &mut self.era,
            CalendarUnit::Year => &mut self.year,
            CalendarUnit::YearForWeekOfYear => &mut self.year_for_week_of_year,
            CalendarUnit::Quarter => &mut self.quarter,
            CalendarUnit::Month => &mut self.month,
            CalendarUnit::WeekOfMonth => &mut self.week_of_month,
            CalendarUnit::WeekOfYear => &mut self.week_of_year,
            CalendarUnit::Day => &mut self.day,
            CalendarUnit::Weekday => &mut self.weekday,
            CalendarUnit::WeekdayOrdinal => &mut self.weekday_ordinal,
            CalendarUnit::Hour => &mut self.hour,
            CalendarUnit::Minute => &mut self.minute,
            CalendarUnit::Second => &mut self.second,
            CalendarUnit::Nanosecond => &mut self.nanosecond,
        };
        *slot = value;
    }

    /// Present fields in coarsest-to-finest add order.
    pub fn present(&self) -> impl Iterator<Item = (CalendarUnit, i64)> + '_ {
        CalendarUnit::ADD_ORDER
            .into_iter()
            .filter_map(|unit| self.value(unit).map(|value| (unit, value)))
    }

    /// Keeps only the fields in `units`, clearing everything else.
    #[must_use]
    pub fn restricted_to(&self, units: UnitSet) -> Self {
        let mut out = DateComponents::default();
        for unit in units.iter() {
            out.set(unit, self.value(unit));
        }
        out
    }
}
