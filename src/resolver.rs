//! Resolves a Unix instant (or local calendar instant) to the UTC offset and
//! abbreviation in effect, using a [`Region`]'s explicit transition history
//! and, beyond its end, its POSIX recurrence rule.

use crate::calendar::{self, SECONDS_PER_DAY};
use crate::posix::{RecurrenceRule, TransitionDate};
use crate::region::{Record, Region};

/// The offset/name/dst-flag in effect at some instant, resolved from either
/// an explicit [`Record`] or a projected recurrence rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Resolved {
    pub(crate) utoff: i64,
    pub(crate) is_dst: bool,
    pub(crate) shortname: String,
}

impl From<&Record> for Resolved {
    fn from(r: &Record) -> Self {
        Self {
            utoff: r.utoff,
            is_dst: r.is_dst,
            shortname: r.shortname.clone(),
        }
    }
}

/// Resolves the offset in effect at `unix_time` within `region`.
pub(crate) fn resolve(region: &Region, unix_time: i64) -> Resolved {
    match region.records.last() {
        None => project_rrule(&region.rule, unix_time),
        Some(last) if unix_time > last.time => project_rrule(&region.rule, unix_time),
        _ => match floor_record(&region.records, unix_time) {
            Some(record) => Resolved::from(record),
            None => project_rrule(&region.rule, unix_time),
        },
    }
}

/// Binary search for the record with the greatest `time <= target`.
fn floor_record(records: &[Record], target: i64) -> Option<&Record> {
    if records.is_empty() || target < records[0].time {
        return None;
    }
    let mut lo = 0usize;
    let mut hi = records.len();
    while lo + 1 < hi {
        let mid = lo + (hi - lo) / 2;
        if records[mid].time <= target {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    Some(&records[lo])
}

/// Projects the recurrence rule's std/dst schedule to find the offset active
/// at `unix_time`. Builds both candidate transitions for the containing
/// year, sorts them, and picks whichever phase's interval contains
/// `unix_time` — wrapping to the earlier phase outside both transitions,
/// since the pair of transitions bound the *other* phase's active interval.
fn project_rrule(rule: &RecurrenceRule, unix_time: i64) -> Resolved {
    let std = Resolved {
        utoff: rule.std_offset,
        is_dst: false,
        shortname: rule.std_name.clone(),
    };

    if !rule.has_dst {
        return std;
    }
    let dst = Resolved {
        utoff: rule.dst_offset.expect("has_dst implies dst_offset"),
        is_dst: true,
        shortname: rule.dst_name.clone().expect("has_dst implies dst_name"),
    };

    let year = calendar::date_from_seconds(unix_time).year;
    let std_time = trans_date_to_seconds(rule.std_date, year);
    let dst_time = trans_date_to_seconds(rule.dst_date.expect("has_dst implies dst_date"), year);

    let (mut a_time, mut a) = (std_time, std);
    let (mut b_time, mut b) = (dst_time, dst);
    if a_time > b_time {
        std::mem::swap(&mut a_time, &mut b_time);
        std::mem::swap(&mut a, &mut b);
    }

    if unix_time < a_time {
        a
    } else if unix_time < b_time {
        b
    } else {
        a
    }
}

/// Converts a POSIX recurrence date, interpreted within `year`, into Unix seconds.
pub(crate) fn trans_date_to_seconds(date: TransitionDate, year: i64) -> i64 {
    let is_leap = calendar::is_leap_year(year);
    let year_start = calendar::year_to_time(year);

    match date {
        TransitionDate::JulianNoLeap { day, time } => {
            let mut offset = (day as i64 - 1) * SECONDS_PER_DAY;
            if is_leap && day >= 60 {
                offset += SECONDS_PER_DAY;
            }
            year_start + offset + time as i64
        }
        TransitionDate::JulianLeap { day, time } => {
            year_start + day as i64 * SECONDS_PER_DAY + time as i64
        }
        TransitionDate::MonthWeekDay { month, week, day, time } => {
            if month < 1 {
                return year_start;
            }
            let month_start = year_start + calendar::month_to_seconds(month as i64 - 1, is_leap);
            let first_weekday = calendar::weekday_of(month_start);
            let mut day_of_month = 1 + (day as i64 - first_weekday).rem_euclid(7);
            if week == 5 {
                let last_day = calendar::last_day_of_month(year, month as i64);
                while day_of_month + 7 <= last_day {
                    day_of_month += 7;
                }
            } else {
                day_of_month += (week as i64 - 1) * 7;
            }
            month_start + (day_of_month - 1) * SECONDS_PER_DAY + time as i64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::posix::parse_posix_tz;

    #[test]
    fn projects_summer_and_winter_correctly() {
        let rule = parse_posix_tz("EST5EDT,M3.2.0,M11.1.0").unwrap();
        // 2024-07-01T12:00:00Z, should be EDT.
        let summer = resolve(&Region { name: "x".into(), records: Vec::new(), rule: rule.clone(), leap_seconds: Vec::new() }, 1_719_835_200);
        assert!(summer.is_dst);
        assert_eq!(summer.shortname, "EDT");

        // 2024-01-01T12:00:00Z, should be EST.
        let winter = resolve(&Region { name: "x".into(), records: Vec::new(), rule, leap_seconds: Vec::new() }, 1_704_110_400);
        assert!(!winter.is_dst);
        assert_eq!(winter.shortname, "EST");
    }

    #[test]
    fn floor_record_picks_preceding_transition() {
        let records = vec![
            Record { time: 100, utoff: 0, is_dst: false, shortname: "A".into() },
            Record { time: 200, utoff: 3600, is_dst: true, shortname: "B".into() },
        ];
        assert_eq!(floor_record(&records, 150).unwrap().shortname, "A");
        assert_eq!(floor_record(&records, 200).unwrap().shortname, "B");
        assert_eq!(floor_record(&records, 250).unwrap().shortname, "B");
        assert!(floor_record(&records, 50).is_none());
    }

    #[test]
    fn southern_hemisphere_dst_wraps_the_year_boundary() {
        // Sydney: DST runs October -> April, so the std/dst rule order is
        // reversed relative to a northern-hemisphere zone like EST5EDT.
        let rule = parse_posix_tz("AEST-10AEDT,M10.1.0,M4.1.0/3").unwrap();
        let region = Region { name: "x".into(), records: Vec::new(), rule, leap_seconds: Vec::new() };

        // 2024-01-15T12:00:00Z: southern summer, should be daylight time.
        assert!(resolve(&region, 1_705_320_000).is_dst);
        // 2024-07-15T12:00:00Z: southern winter, should be standard time.
        assert!(!resolve(&region, 1_721_044_800).is_dst);
        // 2024-11-15T12:00:00Z: after the October start, still daylight time.
        assert!(resolve(&region, 1_731_672_000).is_dst);
    }

    #[test]
    fn no_dst_rule_always_resolves_to_std() {
        let rule = parse_posix_tz("UTC0").unwrap();
        let region = Region { name: "x".into(), records: Vec::new(), rule, leap_seconds: Vec::new() };
        assert!(!resolve(&region, 0).is_dst);
        assert!(!resolve(&region, 1_000_000_000).is_dst);
    }

    #[test]
    fn month_week_day_with_month_zero_is_a_year_start_no_op() {
        // `TransitionDate`'s fields are public, so a `month == 0` value must
        // resolve rather than index out of bounds.
        let date = TransitionDate::MonthWeekDay { month: 0, week: 1, day: 0, time: 0 };
        assert_eq!(trans_date_to_seconds(date, 2024), calendar::year_to_time(2024));
    }
}
