//! Field arithmetic: single-unit adds, wrapping and carrying, and composite adds.
//!
//! The single-unit vectors use a calendar one hour east of UTC whose weeks
//! start on Tuesday and need four days in the first week.

use gregorian_engine::{
    AbsoluteTime, CalendarConfiguration, CalendarEngine, CalendarUnit, DateComponents,
    GregorianCalendar, UnitSet, Zone,
};
use CalendarUnit::*;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn calendar(first_weekday: i64, minimum_days: i64, zone: &str) -> GregorianCalendar {
    let zone: Zone = zone.parse().expect("zone should parse");
    GregorianCalendar::new(
        CalendarConfiguration::new(first_weekday, minimum_days, zone).expect("valid configuration"),
    )
}

fn gmt_plus_one() -> GregorianCalendar {
    calendar(3, 4, "+01:00")
}

fn at(seconds: f64) -> AbsoluteTime {
    AbsoluteTime::new(seconds)
}

fn check_adds(cal: &GregorianCalendar, base: f64, wrap: bool, cases: &[(CalendarUnit, i64, f64)]) {
    for &(unit, amount, expected) in cases {
        assert_eq!(
            cal.add(unit, amount, at(base), wrap),
            Some(at(expected)),
            "adding {amount} {unit} to {base} (wrap: {wrap})"
        );
    }
}

/// Midnight UTC plus `hour`, for a civil date.
fn utc(year: i64, month: i64, day: i64, hour: i64) -> f64 {
    let cal = calendar(1, 1, "UTC");
    cal.date(&DateComponents::ymd(year, month, day).with_time(hour, 0, 0))
        .expect("valid date")
        .seconds()
}

// ---------------------------------------------------------------------------
// Wrapping adds
// ---------------------------------------------------------------------------

#[test]
fn wrapping_adds_from_march_1996() {
    // 1996-03-01T00:35:00+01:00
    check_adds(&gmt_plus_one(), 825723300.0, true, &[
        (Era, 4, 825723300.0),
        (Era, -6, 825723300.0),
        (Year, 1274, 41029284900.0),
        (YearForWeekOfYear, 183, 6600353700.0),
        (YearForWeekOfYear, -1336, -41334279900.0),
        (Month, 11, 823217700.0),
        (Month, -1, 823217700.0),
        (Day, 73, 826673700.0),
        (Day, -302, 826414500.0),
        (Hour, 179, 825762900.0),
        (Hour, -133, 825762900.0),
        (Minute, 235, 825723000.0),
        (Minute, -1195, 825723600.0),
        (Second, 1208, 825723308.0),
        (Second, -4362, 825723318.0),
        (Weekday, 7, 825723300.0),
        (Weekday, -21, 825723300.0),
        (WeekdayOrdinal, 17, 826932900.0),
        (WeekdayOrdinal, -30, 825723300.0),
        (WeekOfYear, 13, 833585700.0),
        (WeekOfYear, -49, 826932900.0),
        (WeekOfMonth, 40, 825723300.0),
        (WeekOfMonth, -62, 827537700.0),
    ]);
}

#[test]
fn wrapping_adds_from_october_1582() {
    check_adds(&gmt_plus_one(), -12218515200.0, true, &[
        (Era, 6, -12218515200.0),
        (Era, -10, -12218515200.0),
        (Year, 1957, 49538390400.0),
        (Hour, 279, -12218461200.0),
        (Hour, -316, -12218443200.0),
        (Minute, 945, -12218512500.0),
        (Minute, -1314, -12218514840.0),
        (Second, 6371, -12218515189.0),
        (Second, -259, -12218515159.0),
        (Weekday, -14, -12218515200.0),
        (Nanosecond, 278337903, -12218515199.721663),
    ]);
}

#[test]
fn wrapping_adds_at_start_of_year() {
    // 3939-01-01T01:00:00+01:00
    check_adds(&gmt_plus_one(), 62135596800.0, true, &[
        (Era, 1, 62135596800.0),
        (Era, -1, 62135596800.0),
        (Year, 1, 62167132800.0),
        (Year, -1, 62104060800.0),
        (YearForWeekOfYear, 1, 62167046400.0),
        (YearForWeekOfYear, -1, 62103542400.0),
        (Month, 1, 62138275200.0),
        (Month, -1, 62164454400.0),
        (Day, 1, 62135683200.0),
        (Day, -1, 62138188800.0),
        (Hour, 1, 62135600400.0),
        (Hour, -1, 62135593200.0),
        (Minute, 1, 62135596860.0),
        (Minute, -1, 62135600340.0),
        (Second, 1, 62135596801.0),
        (Second, -1, 62135596859.0),
        (Weekday, 1, 62135683200.0),
        (Weekday, -1, 62135510400.0),
        (WeekdayOrdinal, 1, 62136201600.0),
        (WeekdayOrdinal, -1, 62138016000.0),
        (WeekOfYear, 1, 62136201600.0),
        (WeekOfYear, -1, 62134992000.0),
        (WeekOfMonth, 1, 62136201600.0),
        (WeekOfMonth, -1, 62138016000.0),
        (Nanosecond, 1, 62135596800.0),
        (Nanosecond, -1, 62135596800.0),
    ]);
}

// ---------------------------------------------------------------------------
// Carrying adds
// ---------------------------------------------------------------------------

#[test]
fn carrying_adds_from_march_1996() {
    check_adds(&gmt_plus_one(), 825723300.0, false, &[
        (Era, 10, 825723300.0),
        (Era, -4, 825723300.0),
        (Year, 1044, 33771166500.0),
        (YearForWeekOfYear, 686, 22473934500.0),
        (Month, 10, 852161700.0),
        (Month, -24, 762564900.0),
        (Day, 464, 865812900.0),
        (Day, -576, 775956900.0),
        (Hour, 208, 826472100.0),
        (Hour, -351, 824459700.0),
        (Minute, 1541, 825815760.0),
        (Minute, -6383, 825340320.0),
        (Second, 4025, 825727325.0),
        (Second, -4753, 825718547.0),
        (Weekday, 9, 826500900.0),
        (Weekday, -17, 824254500.0),
        (WeekdayOrdinal, 11, 832376100.0),
        (WeekdayOrdinal, -27, 809393700.0),
        (WeekOfYear, 65, 865035300.0),
        (WeekOfYear, -5, 822699300.0),
        (WeekOfMonth, 39, 849310500.0),
        (WeekOfMonth, -34, 805160100.0),
    ]);
}

#[test]
fn carrying_adds_from_october_1582() {
    check_adds(&gmt_plus_one(), -12218515200.0, false, &[
        (Era, 5, -12218515200.0),
        (Era, -7, -12218515200.0),
        (Year, 531, 4538246400.0),
        (Month, 7, -12200198400.0),
        (Month, 0, -12218515200.0),
        (Day, 410, -12183091200.0),
        (Hour, 228, -12217694400.0),
        (Minute, 3913, -12218280420.0),
        (Second, 6483, -12218508717.0),
        (Weekday, 16, -12217132800.0),
        (WeekdayOrdinal, 9, -12213072000.0),
        (WeekOfYear, 41, -12193718400.0),
        (WeekOfMonth, 64, -12179808000.0),
        (Nanosecond, 720667058, -12218515199.279333),
    ]);
}

#[test]
fn carrying_adds_at_start_of_year() {
    check_adds(&gmt_plus_one(), 62135596800.0, false, &[
        (Era, 1, 62135596800.0),
        (Era, -1, 62135596800.0),
        (Year, 1, 62167132800.0),
        (Year, -1, 62104060800.0),
        (YearForWeekOfYear, 1, 62167046400.0),
        (YearForWeekOfYear, -1, 62103542400.0),
        (Month, 1, 62138275200.0),
        (Month, -1, 62132918400.0),
        (Day, 1, 62135683200.0),
        (Day, -1, 62135510400.0),
        (Hour, 1, 62135600400.0),
        (Hour, -1, 62135593200.0),
        (Minute, 1, 62135596860.0),
        (Minute, -1, 62135596740.0),
        (Second, 1, 62135596801.0),
        (Second, -1, 62135596799.0),
        (Weekday, 1, 62135683200.0),
        (Weekday, -1, 62135510400.0),
        (WeekdayOrdinal, 1, 62136201600.0),
        (WeekdayOrdinal, -1, 62134992000.0),
        (WeekOfYear, 1, 62136201600.0),
        (WeekOfYear, -1, 62134992000.0),
        (WeekOfMonth, 1, 62136201600.0),
        (WeekOfMonth, -1, 62134992000.0),
        (Nanosecond, 1, 62135596800.0),
        (Nanosecond, -1, 62135596800.0),
    ]);
}

// ---------------------------------------------------------------------------
// Month and year lengths
// ---------------------------------------------------------------------------

#[test]
fn month_add_pins_day_to_month_length() {
    let cal = calendar(1, 1, "UTC");
    let jan_31 = at(utc(2024, 1, 31, 1));

    assert_eq!(cal.add(Month, 1, jan_31, false), Some(at(utc(2024, 2, 29, 1))));
    assert_eq!(cal.add(Month, -1, jan_31, true), Some(at(utc(2024, 12, 31, 1))));
    assert_eq!(cal.add(Quarter, 1, jan_31, false), Some(at(utc(2024, 4, 30, 1))));
    assert_eq!(
        cal.add(Quarter, 3, at(utc(2024, 11, 15, 0)), true),
        Some(at(utc(2024, 8, 15, 0)))
    );
    assert_eq!(
        cal.add(Year, 1, at(utc(2024, 2, 29, 0)), false),
        Some(at(utc(2025, 2, 28, 0)))
    );
}

#[test]
fn wrapping_year_stays_inside_era_zero() {
    let cal = calendar(1, 1, "UTC");
    // 5 BCE is astronomical year -4.
    let five_bce = at(utc(-4, 6, 15, 0));

    // Moving forward in time counts era-0 years down, and stops at 1 BCE.
    assert_eq!(cal.add(Year, 10, five_bce, true), Some(at(utc(0, 6, 15, 0))));
    assert_eq!(cal.add(Year, -3, five_bce, true), Some(at(utc(-7, 6, 15, 0))));
}

#[test]
fn zero_amount_is_identity() {
    let cal = gmt_plus_one();
    for unit in CalendarUnit::ALL {
        for wrap in [false, true] {
            assert_eq!(cal.add(unit, 0, at(825723300.5), wrap), Some(at(825723300.5)));
        }
    }
}

#[test]
fn out_of_range_amounts_have_no_result() {
    let cal = gmt_plus_one();
    assert_eq!(cal.add(Day, i64::MAX, at(0.0), false), None);
    assert_eq!(cal.add(Second, i64::MIN, at(0.0), true), None);
    assert_eq!(cal.add(Year, 900_000_000, at(0.0), false), None);
}

#[test]
fn nanosecond_wrap_borrows_from_the_second() {
    let cal = calendar(1, 1, "UTC");
    let result = cal.add(Nanosecond, -3, at(10.25), true).expect("in range");
    let components = cal.components(UnitSet::from([Second, Nanosecond]), result);
    assert_eq!(components.second, Some(10));
    assert_eq!(components.nanosecond, Some(249_999_997));
}

// ---------------------------------------------------------------------------
// DST
// ---------------------------------------------------------------------------

#[test]
fn day_add_keeps_wall_time_across_spring_forward() {
    let cal = calendar(1, 1, "America/Los_Angeles");
    // 2023-03-11T12:00-08:00 + 1 day = 2023-03-12T12:00-07:00, 23 hours later.
    let result = cal.add(Day, 1, at(1678564800.0), false).expect("in range");
    assert_eq!(result, at(1678647600.0));
    assert_eq!(result - at(1678564800.0), 23.0 * 3600.0);
}

#[test]
fn hour_add_is_elapsed_time_across_spring_forward() {
    let cal = calendar(1, 1, "America/Los_Angeles");
    // 01:34:52 PST + 1 hour = 03:34:52 PDT.
    assert_eq!(cal.add(Hour, 1, at(1678613692.0), false), Some(at(1678617292.0)));
    assert_eq!(cal.add(Hour, 1, at(1678613692.0), true), Some(at(1678617292.0)));
}

// ---------------------------------------------------------------------------
// Composite adds
// ---------------------------------------------------------------------------

fn components(fields: &[(CalendarUnit, i64)]) -> DateComponents {
    let mut components = DateComponents::default();
    for &(unit, value) in fields {
        components.set(unit, Some(value));
    }
    components
}

fn composite_cases() -> Vec<DateComponents> {
    vec![
        components(&[(Day, -1), (Hour, 1)]),
        components(&[(Month, -1), (Hour, 1)]),
        components(&[(Month, -1), (Day, 30)]),
        components(&[(Year, 4), (Day, -1)]),
        components(&[(Day, -1), (Hour, 24)]),
        components(&[(Day, -1), (Weekday, 1)]),
        components(&[(Day, -7), (WeekOfYear, 1)]),
        components(&[(Day, -7), (WeekOfMonth, 1)]),
        components(&[(Day, -7), (WeekOfMonth, 1), (WeekOfYear, 1)]),
    ]
}

fn check_composite(cal: &GregorianCalendar, wrap: bool, expected: [f64; 9]) {
    let march_1996 = at(825723300.0);
    for (fields, expected) in composite_cases().iter().zip(expected) {
        assert_eq!(
            cal.add_components(fields, march_1996, wrap),
            Some(at(expected)),
            "{fields:?} (wrap: {wrap})"
        );
    }
}

#[test]
fn composite_adds_in_fixed_zone() {
    let cal = calendar(3, 7, "+01:00");
    check_composite(&cal, false, [
        825640500.0, 823221300.0, 825809700.0, 951867300.0, 825723300.0,
        825723300.0, 825723300.0, 825723300.0, 826328100.0,
    ]);
    check_composite(&cal, true, [
        825640500.0, 823221300.0, 823304100.0, 951867300.0, 825636900.0,
        825723300.0, 828401700.0, 825982500.0, 829006500.0,
    ]);
}

#[test]
fn composite_adds_in_los_angeles() {
    let cal = calendar(2, 4, "America/Los_Angeles");
    check_composite(&cal, false, [
        825640500.0, 823221300.0, 825809700.0, 951867300.0, 825723300.0,
        825723300.0, 825723300.0, 825723300.0, 826328100.0,
    ]);
    check_composite(&cal, true, [
        828318900.0, 823221300.0, 823304100.0, 954545700.0, 828315300.0,
        827796900.0, 828401700.0, 825982500.0, 829002900.0,
    ]);
}

#[test]
fn composite_add_applies_larger_units_first() {
    let cal = calendar(1, 1, "UTC");
    let jan_31 = at(utc(2024, 1, 31, 1));
    // Month first pins to Feb 29, then the day moves to Mar 1.
    let fields = components(&[(Month, 1), (Day, 1)]);
    assert_eq!(cal.add_components(&fields, jan_31, false), Some(at(utc(2024, 3, 1, 1))));
}

#[test]
fn empty_composite_is_identity() {
    let cal = gmt_plus_one();
    assert_eq!(
        cal.add_components(&DateComponents::default(), at(825723300.0), true),
        Some(at(825723300.0))
    );
}
