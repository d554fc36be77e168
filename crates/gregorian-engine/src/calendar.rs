//! The calendar capability interface and its Gregorian implementation.

use std::ops::Range;

use crate::arithmetic;
use crate::components::DateComponents;
use crate::config::CalendarConfiguration;
use crate::convert;
use crate::dst::DstPolicy;
use crate::error::{CalendarError, Result};
use crate::ordinality;
use crate::range;
use crate::time::AbsoluteTime;
use crate::truncate;
use crate::units::{CalendarUnit, UnitSet};

/// Operations every calendar family provides.
///
/// All methods are pure functions of the configuration and their inputs, so
/// implementations are safe to share across threads without locking.
pub trait CalendarEngine: Send + Sync {
    /// Calendar family identifier, e.g. `"gregorian"`.
    fn identifier(&self) -> &'static str;

    fn configuration(&self) -> &CalendarConfiguration;

    /// Components of `at`, filling only the requested fields.
    fn components(&self, units: UnitSet, at: AbsoluteTime) -> DateComponents;

    /// The instant for `components`, resolving folds and gaps with `policy`.
    fn date_with_policy(&self, components: &DateComponents, policy: DstPolicy) -> Option<AbsoluteTime>;

    fn add(&self, unit: CalendarUnit, amount: i64, at: AbsoluteTime, wrap: bool) -> Option<AbsoluteTime>;

    fn add_components(&self, components: &DateComponents, at: AbsoluteTime, wrap: bool) -> Option<AbsoluteTime>;

    fn ordinality(&self, small: CalendarUnit, large: CalendarUnit, at: AbsoluteTime) -> Option<i64>;

    fn start_of(&self, unit: CalendarUnit, at: AbsoluteTime) -> Option<AbsoluteTime>;

    fn range(&self, small: CalendarUnit, large: CalendarUnit, at: AbsoluteTime) -> Option<Range<i64>>;

    fn minimum_range(&self, unit: CalendarUnit) -> Range<i64>;

    fn maximum_range(&self, unit: CalendarUnit) -> Range<i64>;

    /// [`date_with_policy`](Self::date_with_policy) with the former-offset policy.
    fn date(&self, components: &DateComponents) -> Option<AbsoluteTime> {
        self.date_with_policy(components, DstPolicy::FORMER)
    }

    /// Like [`date`](Self::date), but with a typed error.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidComponents` when the components cannot anchor a date.
    fn try_date(&self, components: &DateComponents) -> Result<AbsoluteTime> {
        self.date(components).ok_or_else(|| {
            CalendarError::InvalidComponents(format!("cannot anchor a date from {components:?}"))
        })
    }

    /// Like [`ordinality`](Self::ordinality), but with a typed error.
    ///
    /// # Errors
    /// Returns `CalendarError::IncompatibleUnits` when `large` does not contain
    /// `small`, and `CalendarError::InvalidComponents` when the position is
    /// undefined at `at`.
    fn try_ordinality(&self, small: CalendarUnit, large: CalendarUnit, at: AbsoluteTime) -> Result<i64> {
        if !large.contains(small) {
            return Err(CalendarError::IncompatibleUnits { small, large });
        }
        self.ordinality(small, large, at).ok_or_else(|| {
            CalendarError::InvalidComponents(format!("no position for {small} in {large} at {at}"))
        })
    }
}

/// The proleptic Gregorian calendar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct GregorianCalendar {
    config: CalendarConfiguration,
}

impl GregorianCalendar {
    pub fn new(config: CalendarConfiguration) -> Self {
        GregorianCalendar { config }
    }
}

impl CalendarEngine for GregorianCalendar {
    fn identifier(&self) -> &'static str {
        "gregorian"
    }

    fn configuration(&self) -> &CalendarConfiguration {
        &self.config
    }

    fn components(&self, units: UnitSet, at: AbsoluteTime) -> DateComponents {
        convert::components(&self.config, units, at)
    }

    fn date_with_policy(&self, components: &DateComponents, policy: DstPolicy) -> Option<AbsoluteTime> {
        convert::date(&self.config, components, policy)
    }

    fn add(&self, unit: CalendarUnit, amount: i64, at: AbsoluteTime, wrap: bool) -> Option<AbsoluteTime> {
        arithmetic::add(&self.config, unit, amount, at, wrap)
    }

    fn add_components(&self, components: &DateComponents, at: AbsoluteTime, wrap: bool) -> Option<AbsoluteTime> {
        arithmetic::add_components(&self.config, components, at, wrap)
    }

    fn ordinality(&self, small: CalendarUnit, large: CalendarUnit, at: AbsoluteTime) -> Option<i64> {
        ordinality::ordinality(&self.config, small, large, at)
    }

    fn start_of(&self, unit: CalendarUnit, at: AbsoluteTime) -> Option<AbsoluteTime> {
        truncate::start_of(&self.config, unit, at)
    }

    fn range(&self, small: CalendarUnit, large: CalendarUnit, at: AbsoluteTime) -> Option<Range<i64>> {
        range::range(&self.config, small, large, at)
    }

    fn minimum_range(&self, unit: CalendarUnit) -> Range<i64> {
        range::minimum_range(unit)
    }

    fn maximum_range(&self, unit: CalendarUnit) -> Range<i64> {
        range::maximum_range(unit)
    }
}
