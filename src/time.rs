//! The public [`Time`] type: a point in time optionally bound to a
//! [`Region`], with calendar and offset queries resolved against it.

use crate::calendar::{self, Date, Hms};
use crate::region::Region;
use crate::resolver::{self, Resolved};

/// A point in time, optionally carrying a borrowed [`Region`] used to
/// resolve local-time queries.
///
/// With a region attached, `time` stores the *local* absolute seconds — the
/// UTC instant plus the offset in effect, pre-shifted at construction —
/// rather than a raw Unix instant. This makes [`Time::get_date`] and
/// [`Time::get_hms`] constant-time breakdowns that never re-resolve the
/// offset; the cost is pushed onto [`Time::to_utc`] and
/// [`Time::to_unix_seconds`] instead, which resolve once to undo the shift.
/// With no region, `time` is plain UTC and all queries are identity.
#[derive(Debug, Clone, Copy)]
pub struct Time<'a> {
    time: i64,
    region: Option<&'a Region>,
}

impl<'a> Time<'a> {
    /// Builds a `Time` from a raw Unix second count, with no time zone.
    pub fn from_unix(unix_seconds: i64) -> Self {
        Self {
            time: unix_seconds,
            region: None,
        }
    }

    /// Attaches `region` to this instant, so that local-time queries resolve
    /// against it instead of reporting plain UTC.
    pub fn with_region(self, region: &'a Region) -> Self {
        self.to_tz(region)
    }

    /// Builds a `Time` from broken-down local calendar components,
    /// interpreted within `region`'s offset at that wall-clock instant.
    ///
    /// The naive components are stored directly, matching the pre-shifted
    /// storage convention, so `get_date`/`get_hms` on the result return
    /// `date`/`hms` exactly. Because DST transitions create both skipped and
    /// repeated wall-clock ranges, [`Time::to_utc`] (which does resolve the
    /// offset) is correct except inside the narrow ambiguous or nonexistent
    /// window immediately around a transition.
    pub fn from_components(date: Date, hms: Hms, region: &'a Region) -> Self {
        let naive = calendar::seconds_from_components(date, hms);
        Self {
            time: naive,
            region: Some(region),
        }
    }

    /// This instant's raw Unix second count.
    pub fn to_unix_seconds(&self) -> i64 {
        self.to_utc().time
    }

    /// Re-expresses this instant against a different region: normalizes to
    /// UTC first, then re-shifts by `region`'s offset at that UTC instant.
    pub fn to_tz(&self, region: &'a Region) -> Self {
        if let Some(current) = self.region {
            if std::ptr::eq(current, region) {
                return *self;
            }
        }
        let utc = self.to_utc();
        let record = resolver::resolve(region, utc.time);
        Self {
            time: utc.time + record.utoff,
            region: Some(region),
        }
    }

    /// Drops the attached region, resolving the offset in effect and
    /// subtracting it to recover the plain Unix instant.
    pub fn to_utc(&self) -> Self {
        match self.region {
            None => *self,
            Some(region) => {
                let record = resolver::resolve(region, self.time);
                Self {
                    time: self.time - record.utoff,
                    region: None,
                }
            }
        }
    }

    fn resolved(&self) -> Option<Resolved> {
        self.region.map(|r| resolver::resolve(r, self.time))
    }

    /// The offset, in seconds east of UTC, in effect at this instant.
    pub fn offset_seconds(&self) -> i64 {
        self.resolved().map(|r| r.utoff).unwrap_or(0)
    }

    /// The calendar date of this instant's local wall clock.
    pub fn get_date(&self) -> Date {
        calendar::date_from_seconds(self.time)
    }

    /// The time-of-day of this instant's local wall clock.
    pub fn get_hms(&self) -> Hms {
        calendar::hms_from_seconds(self.time)
    }

    /// The time zone abbreviation in effect, e.g. `"CEST"`, or `"UTC"` with
    /// no region attached.
    pub fn shortname(&self) -> String {
        self.resolved().map(|r| r.shortname).unwrap_or_else(|| "UTC".to_owned())
    }

    /// Whether daylight saving time is in effect at this instant.
    pub fn is_dst(&self) -> bool {
        self.resolved().map(|r| r.is_dst).unwrap_or(false)
    }
}
