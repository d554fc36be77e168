//! Calendar configuration and its defaults.
//!
//! A [`CalendarConfiguration`] is validated once, when it is built, and is
//! immutable afterwards. Week-numbering values that the caller leaves out are
//! filled in from a [`DefaultsProvider`]; the stock provider is a static
//! region table.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::civil::WeekRule;
use crate::error::{CalendarError, Result};
use crate::zone::Zone;

/// Week-numbering values supplied when a configuration leaves them out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekDefaults {
    pub first_weekday: u8,
    pub minimum_days_in_first_week: u8,
}

impl Default for WeekDefaults {
    fn default() -> Self {
        WeekDefaults {
            first_weekday: 1,
            minimum_days_in_first_week: 1,
        }
    }
}

/// Source of week-numbering defaults.
pub trait DefaultsProvider {
    fn week_defaults(&self) -> WeekDefaults;
}

impl DefaultsProvider for WeekDefaults {
    fn week_defaults(&self) -> WeekDefaults {
        *self
    }
}

/// Region-keyed week defaults (ISO 3166 alpha-2 codes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionDefaults {
    region: String,
}

const SATURDAY_FIRST: &[&str] = &[
    "AE", "AF", "BH", "DJ", "DZ", "EG", "IQ", "IR", "JO", "KW", "LY", "OM", "QA", "SD", "SY",
];

const SUNDAY_FIRST: &[&str] = &[
    "AG", "AS", "BD", "BR", "BS", "BT", "BW", "BZ", "CA", "CN", "CO", "DM", "DO", "ET", "GT", "GU",
    "HK", "HN", "ID", "IL", "IN", "JM", "JP", "KE", "KH", "KR", "LA", "MH", "MM", "MO", "MT", "MX",
    "MZ", "NI", "NP", "PA", "PE", "PH", "PK", "PR", "PT", "PY", "SA", "SG", "SV", "TH", "TT", "TW",
    "UM", "US", "VE", "VI", "WS", "YE", "ZA", "ZW",
];

const FOUR_DAY_FIRST_WEEK: &[&str] = &[
    "AD", "AN", "AT", "AX", "BE", "BG", "CH", "CZ", "DE", "DK", "EE", "ES", "FI", "FJ", "FO", "FR",
    "GB", "GF", "GG", "GI", "GP", "GR", "HU", "IE", "IM", "IS", "IT", "JE", "LI", "LT", "LU", "MC",
    "MQ", "NL", "NO", "PL", "PT", "RE", "RU", "SE", "SJ", "SK", "SM", "VA",
];

impl RegionDefaults {
    pub fn new(region: impl Into<String>) -> Self {
        RegionDefaults {
            region: region.into().to_ascii_uppercase(),
        }
    }
}

impl DefaultsProvider for RegionDefaults {
    fn week_defaults(&self) -> WeekDefaults {
        let region = self.region.as_str();
        let first_weekday = if SATURDAY_FIRST.contains(&region) {
            7
        } else if SUNDAY_FIRST.contains(&region) {
            1
        } else {
            2
        };
        let minimum_days_in_first_week = if FOUR_DAY_FIRST_WEEK.contains(&region) { 4 } else { 1 };
        WeekDefaults {
            first_weekday,
            minimum_days_in_first_week,
        }
    }
}

/// Immutable calendar settings: week numbering and time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarConfiguration {
    first_weekday: u8,
    minimum_days_in_first_week: u8,
    zone: Zone,
}

impl CalendarConfiguration {
    /// Validates and builds a configuration.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidConfiguration` if either week value is
    /// outside `1..=7`.
    pub fn new(first_weekday: i64, minimum_days_in_first_week: i64, zone: Zone) -> Result<Self> {
        Ok(CalendarConfiguration {
            first_weekday: check_weekday_field("first_weekday", first_weekday)?,
            minimum_days_in_first_week: check_weekday_field(
                "minimum_days_in_first_week",
                minimum_days_in_first_week,
            )?,
            zone,
        })
    }

    pub fn builder() -> CalendarConfigurationBuilder {
        CalendarConfigurationBuilder::default()
    }

    /// 1 = Sunday … 7 = Saturday.
    pub fn first_weekday(&self) -> u8 {
        self.first_weekday
    }

    pub fn minimum_days_in_first_week(&self) -> u8 {
        self.minimum_days_in_first_week
    }

    pub fn zone(&self) -> &Zone {
        &self.zone
    }

    pub(crate) fn week_rule(&self) -> WeekRule {
        WeekRule::new(
            i64::from(self.first_weekday),
            i64::from(self.minimum_days_in_first_week),
        )
    }
}

impl Default for CalendarConfiguration {
    fn default() -> Self {
        let defaults = WeekDefaults::default();
        CalendarConfiguration {
            first_weekday: defaults.first_weekday,
            minimum_days_in_first_week: defaults.minimum_days_in_first_week,
            zone: Zone::utc(),
        }
    }
}

fn check_weekday_field(field: &'static str, value: i64) -> Result<u8> {
    match u8::try_from(value) {
        Ok(v @ 1..=7) => Ok(v),
        _ => Err(CalendarError::InvalidConfiguration { field, value }),
    }
}

/// Builder for [`CalendarConfiguration`]; unset week values come from defaults.
#[derive(Debug, Clone, Default)]
pub struct CalendarConfigurationBuilder {
    first_weekday: Option<i64>,
    minimum_days_in_first_week: Option<i64>,
    zone: Option<Zone>,
}

impl CalendarConfigurationBuilder {
    pub fn first_weekday(mut self, value: i64) -> Self {
        self.first_weekday = Some(value);
        self
    }

    pub fn minimum_days_in_first_week(mut self, value: i64) -> Self {
        self.minimum_days_in_first_week = Some(value);
        self
    }

    pub fn zone(mut self, zone: Zone) -> Self {
        self.zone = Some(zone);
        self
    }

    /// Parses `identifier` as a zone and sets it.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidTimeZone` if the identifier is unknown.
    pub fn time_zone(self, identifier: &str) -> Result<Self> {
        Ok(self.zone(identifier.parse()?))
    }

    /// Builds with [`WeekDefaults::default`] for absent week values.
    pub fn build(self) -> Result<CalendarConfiguration> {
        self.build_with(&WeekDefaults::default())
    }

    /// Builds, consulting `defaults` only for absent week values.
    pub fn build_with(self, defaults: &dyn DefaultsProvider) -> Result<CalendarConfiguration> {
        let first_weekday = match self.first_weekday {
            Some(value) => value,
            None => i64::from(defaults.week_defaults().first_weekday),
        };
        let minimum_days = match self.minimum_days_in_first_week {
            Some(value) => value,
            None => i64::from(defaults.week_defaults().minimum_days_in_first_week),
        };
        let config =
            CalendarConfiguration::new(first_weekday, minimum_days, self.zone.unwrap_or_default())?;
        debug!(
            first_weekday = config.first_weekday,
            minimum_days = config.minimum_days_in_first_week,
            zone = %config.zone,
            "built calendar configuration"
        );
        Ok(config)
    }
}

/// Serializable configuration with every field optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub time_zone: Option<String>,
    #[serde(default)]
    pub first_weekday: Option<i64>,
    #[serde(default)]
    pub minimum_days_in_first_week: Option<i64>,
    /// Region used to look up absent week values.
    #[serde(default)]
    pub region: Option<String>,
}

impl ConfigFile {
    /// Parses a JSON configuration document.
    ///
    /// # Errors
    /// Returns `CalendarError::Config` for malformed JSON or unknown keys.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| CalendarError::Config(e.to_string()))
    }

    /// Resolves into a validated configuration.
    ///
    /// # Errors
    /// Propagates zone and range errors from the builder.
    pub fn resolve(&self) -> Result<CalendarConfiguration> {
        let mut builder = CalendarConfiguration::builder();
        if let Some(identifier) = &self.time_zone {
            builder = builder.time_zone(identifier)?;
        }
        if let Some(value) = self.first_weekday {
            builder = builder.first_weekday(value);
        }
        if let Some(value) = self.minimum_days_in_first_week {
            builder = builder.minimum_days_in_first_week(value);
        }
        match &self.region {
            Some(region) => builder.build_with(&RegionDefaults::new(region.as_str())),
            None => builder.build(),
        }
    }
}
