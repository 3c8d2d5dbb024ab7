//! Pure calendar arithmetic: conversions between absolute Unix seconds and
//! broken-down (year, month, day, hour, minute, second), correct across the
//! full signed 64-bit range.
//!
//! The day/second decomposition below mirrors the constant-time civil-from-days
//! algorithm used by `libc`-style `time_t` converters: everything is shifted
//! into a non-negative "absolute" coordinate system before dividing through
//! nested 400/100/4/1-year cycles, so no branch ever has to special-case a
//! negative dividend.

pub(crate) const SECONDS_PER_MINUTE: i64 = 60;
pub(crate) const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
pub(crate) const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;

const DAYS_PER_400_YEARS: i64 = 365 * 400 + 97;
const DAYS_PER_100_YEARS: i64 = 365 * 100 + 24;
const DAYS_PER_4_YEARS: i64 = 365 * 4 + 1;

/// The year whose January 1st falls on absolute day 0.
const ABSOLUTE_ZERO_YEAR: i64 = -292_277_022_399;
const ABSOLUTE_TO_INTERNAL: i64 = -9_223_371_966_579_724_800;
const INTERNAL_TO_ABSOLUTE: i64 = -ABSOLUTE_TO_INTERNAL;

const UNIX_TO_INTERNAL: i64 = (1969 * 365 + 1969 / 4 - 1969 / 100 + 1969 / 400) * SECONDS_PER_DAY;
/// Shifts a raw Unix-epoch second count into the non-negative absolute
/// coordinate used by [`date_from_seconds`].
const UNIX_TO_ABSOLUTE: i64 = UNIX_TO_INTERNAL + INTERNAL_TO_ABSOLUTE;

const DAYS_BEFORE: [i64; 12] = [
    0,
    31,
    31 + 28,
    31 + 28 + 31,
    31 + 28 + 31 + 30,
    31 + 28 + 31 + 30 + 31,
    31 + 28 + 31 + 30 + 31 + 30,
    31 + 28 + 31 + 30 + 31 + 30 + 31,
    31 + 28 + 31 + 30 + 31 + 30 + 31 + 31,
    31 + 28 + 31 + 30 + 31 + 30 + 31 + 31 + 30,
    31 + 28 + 31 + 30 + 31 + 30 + 31 + 31 + 30 + 31,
    31 + 28 + 31 + 30 + 31 + 30 + 31 + 31 + 30 + 31 + 30,
];

/// Broken-down calendar date. `month` is `1..=12`, `day` is `1..=31`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Date {
    /// Proleptic Gregorian year. May be zero or negative.
    pub year: i64,
    /// Month of year, `1..=12`.
    pub month: i8,
    /// Day of month, `1..=31`.
    pub day: i8,
}

/// Broken-down time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hms {
    /// Hour, `0..=23`.
    pub hours: i8,
    /// Minute, `0..=59`.
    pub minutes: i8,
    /// Second, `0..=59`.
    pub seconds: i8,
}

/// Whether `year` is a Gregorian leap year.
pub(crate) fn is_leap_year(year: i64) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

fn leap_years_before(year: i64) -> i64 {
    let year = year - 1;
    year / 4 - year / 100 + year / 400
}

fn leap_years_between(start: i64, end: i64) -> i64 {
    leap_years_before(end) - leap_years_before(start + 1)
}

/// Unix seconds at the start of `year`'s January 1st.
pub(crate) fn year_to_time(year: i64) -> i64 {
    let year_gap = year - 1970;
    let leap_count = leap_years_between(1970, year);
    (year_gap * 365 + leap_count) * SECONDS_PER_DAY
}

/// Seconds from January 1st to the start of the given 0-indexed month.
pub(crate) fn month_to_seconds(month: i64, is_leap: bool) -> i64 {
    const MONTH_SECONDS: [i64; 12] = [
        0,
        31 * SECONDS_PER_DAY,
        59 * SECONDS_PER_DAY,
        90 * SECONDS_PER_DAY,
        120 * SECONDS_PER_DAY,
        151 * SECONDS_PER_DAY,
        181 * SECONDS_PER_DAY,
        212 * SECONDS_PER_DAY,
        243 * SECONDS_PER_DAY,
        273 * SECONDS_PER_DAY,
        304 * SECONDS_PER_DAY,
        334 * SECONDS_PER_DAY,
    ];
    let mut t = MONTH_SECONDS[month as usize];
    if is_leap && month >= 2 {
        t += SECONDS_PER_DAY;
    }
    t
}

/// Number of days in `month` (`1..=12`) of `year`.
pub(crate) fn last_day_of_month(year: i64, month: i64) -> i64 {
    const MONTH_DAYS: [i64; 13] = [-1, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    let mut day = MONTH_DAYS[month as usize];
    if month == 2 && is_leap_year(year) {
        day += 1;
    }
    day
}

/// Decomposes Unix seconds into a calendar [`Date`].
pub(crate) fn date_from_seconds(time: i64) -> Date {
    let abs = time.wrapping_add(UNIX_TO_ABSOLUTE) as u64;
    let mut d = abs / SECONDS_PER_DAY as u64;

    let mut n = d / DAYS_PER_400_YEARS as u64;
    let mut y = 400 * n;
    d -= DAYS_PER_400_YEARS as u64 * n;

    n = d / DAYS_PER_100_YEARS as u64;
    n -= n >> 2;
    y += 100 * n;
    d -= DAYS_PER_100_YEARS as u64 * n;

    n = d / DAYS_PER_4_YEARS as u64;
    y += 4 * n;
    d -= DAYS_PER_4_YEARS as u64 * n;

    n = d / 365;
    n -= n >> 2;
    y += n;
    d -= 365 * n;

    let year = y as i64 + ABSOLUTE_ZERO_YEAR;
    let mut day = d as i64;

    if is_leap_year(year) {
        match day.cmp(&(31 + 29 - 1)) {
            std::cmp::Ordering::Greater => day -= 1,
            std::cmp::Ordering::Equal => {
                return Date {
                    year,
                    month: 2,
                    day: 29,
                }
            }
            std::cmp::Ordering::Less => {}
        }
    }

    let mut month = day / 31;
    let end = DAYS_BEFORE[(month + 1) as usize];
    let begin = if day >= end {
        month += 1;
        end
    } else {
        DAYS_BEFORE[month as usize]
    };
    month += 1;
    day = day - begin + 1;

    Date {
        year,
        month: month as i8,
        day: day as i8,
    }
}

/// Extracts the time-of-day component of Unix seconds.
pub(crate) fn hms_from_seconds(time: i64) -> Hms {
    let mut secs = time.wrapping_add(INTERNAL_TO_ABSOLUTE).rem_euclid(SECONDS_PER_DAY);

    let hours = secs / SECONDS_PER_HOUR;
    secs -= hours * SECONDS_PER_HOUR;

    let minutes = secs / SECONDS_PER_MINUTE;
    secs -= minutes * SECONDS_PER_MINUTE;

    Hms {
        hours: hours as i8,
        minutes: minutes as i8,
        seconds: secs as i8,
    }
}

/// Combines a [`Date`] and [`Hms`] into Unix seconds, with no time zone applied.
pub(crate) fn seconds_from_components(date: Date, hms: Hms) -> i64 {
    let is_leap = is_leap_year(date.year);
    let mut time = year_to_time(date.year);
    time += month_to_seconds(date.month as i64 - 1, is_leap);
    time += (date.day as i64 - 1) * SECONDS_PER_DAY;
    time += hms.hours as i64 * SECONDS_PER_HOUR;
    time += hms.minutes as i64 * SECONDS_PER_MINUTE;
    time += hms.seconds as i64;
    time
}

/// Weekday of the Unix second `t`'s containing day, Thursday-anchored
/// (`0`=Sunday), since 1970-01-01 was a Thursday.
pub(crate) fn weekday_of(t: i64) -> i64 {
    (t + 4 * SECONDS_PER_DAY).rem_euclid(7 * SECONDS_PER_DAY) / SECONDS_PER_DAY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_round_trips() {
        let date = date_from_seconds(0);
        assert_eq!(date, Date { year: 1970, month: 1, day: 1 });
        assert_eq!(hms_from_seconds(0), Hms { hours: 0, minutes: 0, seconds: 0 });
        assert_eq!(seconds_from_components(date, hms_from_seconds(0)), 0);
    }

    #[test]
    fn just_before_epoch() {
        let date = date_from_seconds(-1);
        assert_eq!(date, Date { year: 1969, month: 12, day: 31 });
        assert_eq!(
            hms_from_seconds(-1),
            Hms { hours: 23, minutes: 59, seconds: 59 }
        );
    }

    #[test]
    fn leap_day() {
        // 2024-02-29T00:00:00Z
        let date = date_from_seconds(1_709_164_800);
        assert_eq!(date, Date { year: 2024, month: 2, day: 29 });
    }

    #[test]
    fn far_future_and_past() {
        let future = seconds_from_components(
            Date { year: 10_000, month: 1, day: 1 },
            Hms { hours: 0, minutes: 0, seconds: 0 },
        );
        assert_eq!(date_from_seconds(future).year, 10_000);

        let past = seconds_from_components(
            Date { year: -10_000, month: 6, day: 15 },
            Hms { hours: 12, minutes: 0, seconds: 0 },
        );
        let round_tripped = date_from_seconds(past);
        assert_eq!(round_tripped, Date { year: -10_000, month: 6, day: 15 });
    }

    #[test]
    fn thursday_anchor() {
        // 1970-01-01 was a Thursday.
        assert_eq!(weekday_of(0), 4);
        // 1970-01-04 was a Sunday.
        assert_eq!(weekday_of(3 * SECONDS_PER_DAY), 0);
    }

    #[test]
    fn leap_year_predicate() {
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(2023));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Broken-down components round-trip through seconds across the
            /// full proleptic range this crate claims to support.
            #[test]
            fn date_hms_round_trip(
                year in -10_000i64..=10_000,
                month in 1i8..=12,
                day_seed in 0i64..31,
                hours in 0i8..24,
                minutes in 0i8..60,
                seconds in 0i8..60,
            ) {
                let last_day = last_day_of_month(year, month as i64);
                let day = (day_seed % last_day) as i8 + 1;
                let date = Date { year, month, day };
                let hms = Hms { hours, minutes, seconds };

                let t = seconds_from_components(date, hms);
                prop_assert_eq!(date_from_seconds(t), date);
                prop_assert_eq!(hms_from_seconds(t), hms);
            }

            /// `date_from_seconds` never panics and always returns a calendar
            /// month/day within range, for any `i64` second count.
            #[test]
            fn date_from_seconds_never_panics(t in any::<i64>()) {
                let date = date_from_seconds(t);
                prop_assert!((1..=12).contains(&date.month));
                prop_assert!((1..=31).contains(&date.day));
            }
        }
    }
}
