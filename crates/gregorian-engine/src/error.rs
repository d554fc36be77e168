//! Error types for the calendar engine.
//!
//! Per-call operations report "no result" as `None`; the variants here cover
//! construction-time failures and callers that want a typed reason.

use thiserror::Error;

use crate::units::CalendarUnit;

/// Errors that can occur when building or driving a calendar.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// A configuration field is outside `1..=7`.
    #[error("Invalid configuration: {field} must be in 1..=7, got {value}")]
    InvalidConfiguration { field: &'static str, value: i64 },

    /// The time zone identifier could not be resolved.
    #[error("Invalid timezone: {0}")]
    InvalidTimeZone(String),

    /// The supplied components cannot anchor a date.
    #[error("Invalid date components: {0}")]
    InvalidComponents(String),

    /// Ordinality or range was requested for a pair that does not nest.
    #[error("{small:?} is not contained in {large:?}")]
    IncompatibleUnits {
        small: CalendarUnit,
        large: CalendarUnit,
    },

    /// A configuration file could not be interpreted.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience result type for calendar operations.
pub type Result<T> = std::result::Result<T, CalendarError>;
