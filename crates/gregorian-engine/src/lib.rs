//! # gregorian-engine
//!
//! Proleptic Gregorian calendar arithmetic with DST-aware time zones.
//!
//! The engine converts between absolute instants and calendar components
//! (era, year, month, day, time of day, weekday, week numbers, quarter) and
//! builds field addition, ordinality and start-of-unit truncation on top of
//! that conversion. Every operation is closed-form and a pure function of a
//! [`CalendarConfiguration`] and its inputs.
//!
//! ## Modules
//!
//! - [`calendar`] — `CalendarEngine` capability trait and `GregorianCalendar`
//! - [`convert`] — instant ↔ components
//! - [`arithmetic`] — wrapping and carrying field addition
//! - [`ordinality`] — position of a smaller unit within a larger one
//! - [`truncate`] — start of the unit containing an instant
//! - [`range`] — valid ranges of fields
//! - [`basis`] — UTC offsets and fold/gap resolution
//! - [`zone`] — time-zone rule sources (`chrono-tz` or fixed offsets)
//! - [`civil`] — closed-form day-number math
//! - [`config`] — validated configuration and week-numbering defaults
//! - [`cache`] — shared calendars with explicit invalidation
//! - [`error`] — Error types

pub mod arithmetic;
pub mod basis;
pub mod cache;
pub mod calendar;
pub mod civil;
pub mod components;
pub mod config;
pub mod convert;
pub mod dst;
pub mod error;
pub mod ordinality;
pub mod range;
pub mod time;
pub mod truncate;
pub mod units;
pub mod zone;

pub use cache::{AutoupdatingCalendar, CalendarCache, InvalidationCounter, InvalidationSource};
pub use calendar::{CalendarEngine, GregorianCalendar};
pub use components::DateComponents;
pub use config::{CalendarConfiguration, ConfigFile, DefaultsProvider, RegionDefaults, WeekDefaults};
pub use dst::{DstPolicy, TransitionPolicy};
pub use error::{CalendarError, Result};
pub use time::AbsoluteTime;
pub use units::{CalendarUnit, UnitSet};
pub use zone::{Zone, ZoneRules};
