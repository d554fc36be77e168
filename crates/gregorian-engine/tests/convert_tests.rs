//! Instant ↔ component conversion.
//!
//! Vectors stay after the 1582 reform, where hybrid Julian/Gregorian
//! calendars and the proleptic calendar agree.

use gregorian_engine::{
    AbsoluteTime, CalendarConfiguration, CalendarEngine, CalendarError, CalendarUnit, DateComponents,
    DstPolicy, GregorianCalendar, UnitSet, Zone,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn calendar(first_weekday: i64, minimum_days: i64, zone: &str) -> GregorianCalendar {
    let zone: Zone = zone.parse().expect("zone should parse");
    GregorianCalendar::new(
        CalendarConfiguration::new(first_weekday, minimum_days, zone).expect("valid configuration"),
    )
}

fn at(seconds: f64) -> AbsoluteTime {
    AbsoluteTime::new(seconds)
}

fn ymd_hms(year: i64, month: i64, day: i64, hour: i64, minute: i64, second: i64) -> DateComponents {
    DateComponents::ymd(year, month, day).with_time(hour, minute, second)
}

// ---------------------------------------------------------------------------
// Components → instant, DST zone
// ---------------------------------------------------------------------------

#[test]
fn date_resolves_los_angeles_transitions() {
    let cal = calendar(1, 1, "America/Los_Angeles");
    let cases = [
        (DateComponents::ymd(2023, 10, 16), 1697439600.0),
        (ymd_hms(2023, 10, 16, 1, 34, 52), 1697445292.0),
        (DateComponents::ymd(2023, 11, 6), 1699257600.0),
        (DateComponents::ymd(2023, 3, 12), 1678608000.0),
        (ymd_hms(2023, 3, 12, 1, 34, 52), 1678613692.0),
        // 02:34:52 is skipped; the former offset lands on 03:34:52 PDT.
        (ymd_hms(2023, 3, 12, 2, 34, 52), 1678617292.0),
        (ymd_hms(2023, 3, 12, 3, 34, 52), 1678617292.0),
        (ymd_hms(2023, 3, 13, 0, 0, 0), 1678690800.0),
        (DateComponents::ymd(2023, 11, 5), 1699167600.0),
        // 01:34:52 happens twice; the former offset picks the PDT pass.
        (ymd_hms(2023, 11, 5, 1, 34, 52), 1699173292.0),
        (ymd_hms(2023, 11, 5, 2, 34, 52), 1699180492.0),
        (ymd_hms(2023, 11, 5, 3, 34, 52), 1699184092.0),
    ];
    for (components, expected) in cases {
        assert_eq!(cal.date(&components), Some(at(expected)), "{components:?}");
    }
}

#[test]
fn date_with_latter_policy_picks_the_later_offset() {
    let cal = calendar(1, 1, "America/Los_Angeles");

    // Repeated 01:34:52 on 2023-11-05: the PST pass is an hour later.
    let fold = ymd_hms(2023, 11, 5, 1, 34, 52);
    assert_eq!(cal.date_with_policy(&fold, DstPolicy::LATTER), Some(at(1699176892.0)));

    // Skipped 02:34:52 on 2023-03-12: the PDT reading lands on 01:34:52 PST.
    let gap = ymd_hms(2023, 3, 12, 2, 34, 52);
    assert_eq!(cal.date_with_policy(&gap, DstPolicy::LATTER), Some(at(1678613692.0)));
}

// ---------------------------------------------------------------------------
// Components → instant, precedence and carrying (GMT, first weekday Sunday,
// four days in the first week)
// ---------------------------------------------------------------------------

#[test]
fn date_from_weekday_ordinal() {
    let cal = calendar(1, 4, "GMT");
    let cases = [
        ((2014, -4, -1, 4), 1377216000.0),
        ((2446, -1, -1, -1), 15017875200.0),
        ((2878, -9, -9, 1), 28627603200.0),
        ((2878, -5, 1, -6), 28636934400.0),
        ((2878, 7, -7, 8), 28673740800.0),
        ((2878, 11, -1, 4), 28682121600.0),
    ];
    for ((year, month, weekday, ordinal), expected) in cases {
        let components = DateComponents {
            year: Some(year),
            month: Some(month),
            weekday: Some(weekday),
            weekday_ordinal: Some(ordinal),
            ..Default::default()
        };
        assert_eq!(cal.date(&components), Some(at(expected)), "{components:?}");
    }
}

#[test]
fn date_carries_out_of_range_month_and_day() {
    let cal = calendar(1, 4, "GMT");
    let cases = [
        ((1705, 6, -6), -8350128000.0),
        ((1705, 6, 3), -8349350400.0),
        ((1828, -9, -3), -4507920000.0),
        ((1828, 3, 0), -4476038400.0),
        ((1828, 7, 5), -4465065600.0),
        ((2074, -4, 2), 3268857600.0),
        ((2197, 5, -2), 7173619200.0),
        ((2197, 5, 1), 7173878400.0),
        ((2320, -2, -2), 11036649600.0),
        ((2320, 6, -3), 11057644800.0),
        ((2443, 7, 5), 14942448000.0),
        ((2812, 5, 4), 26581651200.0),
        ((2935, 6, -3), 30465158400.0),
        ((2935, 6, 3), 30465676800.0),
    ];
    for ((year, month, day), expected) in cases {
        let components = DateComponents::ymd(year, month, day);
        assert_eq!(cal.date(&components), Some(at(expected)), "{components:?}");
    }
}

#[test]
fn lone_week_of_month_means_first_of_month() {
    let cal = calendar(1, 4, "GMT");
    let cases = [
        ((1705, 2, 1), -8359891200.0),
        ((1705, 6, -3), -8349523200.0),
        ((1828, 7, 2), -4465411200.0),
        ((1828, 7, 5), -4465411200.0),
        ((1828, 11, 0), -4454784000.0),
        ((2197, 5, -2), 7173878400.0),
        ((2197, 5, 1), 7173878400.0),
        ((2320, 2, 1), 11047536000.0),
        ((2320, 6, -3), 11057990400.0),
        ((2443, -5, 4), 14910566400.0),
        ((2443, -1, -1), 14921193600.0),
        ((2443, 7, -1), 14942102400.0),
        ((2443, 7, 2), 14942102400.0),
        ((2812, -3, -3), 26560396800.0),
        ((2812, 5, 1), 26581392000.0),
        ((2812, 5, 4), 26581392000.0),
        ((2935, 6, 0), 30465504000.0),
    ];
    for ((year, month, week), expected) in cases {
        let components = DateComponents {
            year: Some(year),
            month: Some(month),
            week_of_month: Some(week),
            ..Default::default()
        };
        assert_eq!(cal.date(&components), Some(at(expected)), "{components:?}");
    }
}

#[test]
fn date_from_week_of_year_and_week_year() {
    let cal = calendar(1, 4, "GMT");
    let cases = [
        ((-25, 1705), -8378035200.0),
        ((-4, 1705), -8365334400.0),
        ((3, 1705), -8361100800.0),
        ((0, 1828), -4481913600.0),
        ((25, 1951), -585187200.0),
        ((-34, 2074), 3260736000.0),
        ((1, 2074), 3281904000.0),
        ((8, 2074), 3286137600.0),
        ((-1, 2443), 14925513600.0),
        ((3, 2566), 18808934400.0),
        ((0, 2689), 22688726400.0),
        ((-52, 2812), 26538883200.0),
        ((1, 2935), 30452544000.0),
        ((43, 2935), 30477945600.0),
    ];
    for ((week, week_year), expected) in cases {
        let components = DateComponents {
            week_of_year: Some(week),
            year_for_week_of_year: Some(week_year),
            ..Default::default()
        };
        assert_eq!(cal.date(&components), Some(at(expected)), "{components:?}");
    }
}

#[test]
fn day_takes_precedence_over_week_fields() {
    let cal = calendar(1, 4, "GMT");
    let components = DateComponents {
        week_of_year: Some(30),
        weekday: Some(3),
        ..DateComponents::ymd(2197, 5, 1)
    };
    assert_eq!(cal.date(&components), Some(at(7173878400.0)));
}

#[test]
fn absent_fields_default_to_the_start_of_year_one() {
    let cal = calendar(1, 1, "UTC");
    // 0001-01-01T00:00:00Z
    assert_eq!(cal.date(&DateComponents::default()), Some(at(-62135596800.0)));
}

#[test]
fn era_zero_counts_years_backwards() {
    let cal = calendar(1, 1, "UTC");
    let components = DateComponents {
        era: Some(0),
        ..DateComponents::ymd(1, 6, 15).with_time(1, 0, 0)
    };
    // 1 BCE is astronomical year 0.
    assert_eq!(cal.date(&components), Some(at(-62152873200.0)));
}

// ---------------------------------------------------------------------------
// Components → instant, failures
// ---------------------------------------------------------------------------

#[test]
fn weekday_ordinal_without_weekday_has_no_date() {
    let cal = calendar(1, 4, "GMT");
    let components = DateComponents {
        year: Some(2024),
        month: Some(3),
        weekday_ordinal: Some(2),
        ..Default::default()
    };
    assert_eq!(cal.date(&components), None);
    assert!(matches!(
        cal.try_date(&components),
        Err(CalendarError::InvalidComponents(_))
    ));
}

#[test]
fn leap_month_has_no_date() {
    let cal = calendar(1, 1, "UTC");
    let components = DateComponents {
        is_leap_month: Some(true),
        ..DateComponents::ymd(2024, 2, 1)
    };
    assert_eq!(cal.date(&components), None);

    let not_leap = DateComponents {
        is_leap_month: Some(false),
        ..DateComponents::ymd(2024, 2, 1)
    };
    assert!(cal.date(&not_leap).is_some());
}

#[test]
fn huge_field_values_have_no_date() {
    let cal = calendar(1, 1, "UTC");
    assert_eq!(cal.date(&DateComponents::ymd(2024, 1, i64::MAX)), None);
    assert_eq!(cal.date(&DateComponents::ymd(i64::MIN, 1, 1)), None);
    assert_eq!(cal.date(&DateComponents::ymd(500_000_000, 1, 1)), None);
}

// ---------------------------------------------------------------------------
// Instant → components (UTC, first weekday Sunday, five days in the first week)
// ---------------------------------------------------------------------------

#[allow(clippy::too_many_arguments)]
fn expected(
    (year, month, day): (i64, i64, i64),
    (hour, minute, second): (i64, i64, i64),
    weekday: i64,
    weekday_ordinal: i64,
    quarter: i64,
    week_of_month: i64,
    week_of_year: i64,
    year_for_week_of_year: i64,
) -> DateComponents {
    DateComponents {
        era: Some(1),
        nanosecond: Some(0),
        weekday: Some(weekday),
        weekday_ordinal: Some(weekday_ordinal),
        quarter: Some(quarter),
        week_of_month: Some(week_of_month),
        week_of_year: Some(week_of_year),
        year_for_week_of_year: Some(year_for_week_of_year),
        is_leap_month: Some(false),
        ..DateComponents::ymd(year, month, day).with_time(hour, minute, second)
    }
}

#[test]
fn components_of_instants() {
    let cal = calendar(1, 5, "UTC");

    // 1996-12-31T15:23:07Z
    assert_eq!(
        cal.components(UnitSet::all(), at(852045787.0)),
        expected((1996, 12, 31), (15, 23, 7), 3, 5, 4, 5, 53, 1996)
    );
    // 1996-02-29T15:23:07Z
    assert_eq!(
        cal.components(UnitSet::all(), at(825607387.0)),
        expected((1996, 2, 29), (15, 23, 7), 5, 5, 1, 4, 9, 1996)
    );
    // 1996-04-07T01:03:07Z
    assert_eq!(
        cal.components(UnitSet::all(), at(828838987.0)),
        expected((1996, 4, 7), (1, 3, 7), 1, 1, 2, 2, 15, 1996)
    );
}

#[test]
fn components_fill_only_requested_units() {
    let cal = calendar(1, 1, "UTC");
    let units = UnitSet::from([CalendarUnit::Year, CalendarUnit::Day]);
    let components = cal.components(units, at(852045787.0));

    assert_eq!(components.year, Some(1996));
    assert_eq!(components.day, Some(31));
    assert_eq!(components.month, None);
    assert_eq!(components.hour, None);
    assert_eq!(components.is_leap_month, None);

    // The leap-month flag rides along with the month only.
    let with_month = cal.components(UnitSet::from([CalendarUnit::Month]), at(852045787.0));
    assert_eq!(with_month.month, Some(12));
    assert_eq!(with_month.is_leap_month, Some(false));

    assert_eq!(cal.components(UnitSet::empty(), at(0.0)), DateComponents::default());
}

#[test]
fn components_follow_the_local_wall_clock() {
    let cal = calendar(1, 1, "America/Los_Angeles");
    let units = UnitSet::from([CalendarUnit::Day, CalendarUnit::Hour, CalendarUnit::Minute]);

    // The repeated hour on 2023-11-05 reads 01:34 on both passes.
    for seconds in [1699173292.0, 1699176892.0] {
        let components = cal.components(units, at(seconds));
        assert_eq!((components.day, components.hour, components.minute), (Some(5), Some(1), Some(34)));
    }
}

#[test]
fn components_report_sub_second_nanoseconds() {
    let cal = calendar(1, 1, "UTC");
    let components = cal.components(UnitSet::from([CalendarUnit::Second, CalendarUnit::Nanosecond]), at(-0.25));

    // 1969-12-31T23:59:59.75Z
    assert_eq!(components.second, Some(59));
    assert_eq!(components.nanosecond, Some(750_000_000));
}

#[test]
fn era_zero_components_use_era_relative_years() {
    let cal = calendar(1, 1, "UTC");
    let components = cal.components(UnitSet::from([CalendarUnit::Era, CalendarUnit::Year]), at(-62152873200.0));
    assert_eq!((components.era, components.year), (Some(0), Some(1)));
}

#[test]
fn components_round_trip_through_date() {
    let cal = calendar(2, 4, "Europe/Berlin");
    let units = UnitSet::from([
        CalendarUnit::Year,
        CalendarUnit::Month,
        CalendarUnit::Day,
        CalendarUnit::Hour,
        CalendarUnit::Minute,
        CalendarUnit::Second,
    ]);
    for seconds in [0.0, 825723300.0, 1711846800.0, 1729987200.0, 4102444800.0] {
        let components = cal.components(units, at(seconds));
        assert_eq!(cal.date(&components), Some(at(seconds)), "{components:?}");
    }
}
