//! Public time zone data types, and zone-specific loading from raw TZif bytes.

use crate::errors::TzError;
use crate::posix::RecurrenceRule;
use crate::tzif;

/// A single decoded local time type: not a public collaborator, but the
/// shape [`Record`] is built out of.
#[derive(Debug, Clone)]
pub(crate) struct LocalTimeType {
    pub(crate) utoff: i64,
    pub(crate) is_dst: bool,
    pub(crate) shortname: String,
}

/// One explicit UTC transition recorded in a TZif file: at `time` (Unix
/// seconds), the zone's offset became `utoff` seconds east of UTC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Unix time, in seconds, at which this offset took effect.
    pub time: i64,
    /// Offset from UTC, in seconds, east positive.
    pub utoff: i64,
    /// Whether this offset represents daylight saving time.
    pub is_dst: bool,
    /// Abbreviation in effect during this offset, e.g. `"CEST"`.
    pub shortname: String,
}

/// A fully decoded time zone: explicit historical transitions plus the POSIX
/// rule used to project transitions beyond the last one on record.
#[derive(Debug, Clone)]
pub struct Region {
    /// The name this region was loaded under, e.g. `"Europe/Berlin"`.
    pub name: String,
    /// Explicit transitions, strictly increasing by `time`.
    pub records: Vec<Record>,
    /// The POSIX recurrence rule from the TZif footer, used beyond the last
    /// explicit transition.
    pub rule: RecurrenceRule,
    /// Leap second records as `(occurrence, total correction)` pairs.
    pub(crate) leap_seconds: Vec<(i64, i32)>,
}

impl Region {
    /// Decodes a TZif byte buffer into a named [`Region`].
    pub fn from_tzif(bytes: &[u8], name: &str) -> Result<Self, TzError> {
        tzif::parse(bytes, name)
    }

    /// Builds a [`Region`] directly from a POSIX TZ string, with no explicit
    /// transition history. All resolution falls through to the recurrence
    /// rule projection.
    pub fn from_posix_tz(tz_string: &str, name: &str) -> Result<Self, TzError> {
        let rule = crate::posix::parse_posix_tz(tz_string)?;
        Ok(Self {
            name: name.to_owned(),
            records: Vec::new(),
            rule,
            leap_seconds: Vec::new(),
        })
    }
}
