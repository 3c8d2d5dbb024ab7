use super::cursor::Cursor;
use crate::errors::{TzError, BUG_MSG};

/// One local time type record: a UTC offset, DST flag, and abbreviation index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LocalTimeType {
    pub(crate) utoff: i32,
    pub(crate) is_dst: bool,
    pub(crate) abbrev_index: u8,
}

/// The decoded (version 2/3, 8-byte-timestamp) TZif data block.
pub(crate) struct DataBlock {
    pub(crate) transition_times: Vec<i64>,
    pub(crate) transition_types: Vec<u8>,
    pub(crate) local_time_types: Vec<LocalTimeType>,
    pub(crate) designations: Vec<u8>,
    pub(crate) leap_seconds: Vec<(i64, i32)>,
}

/// Transition times below this are treated as implausible and rejected; TZif
/// files occasionally carry a `-2^59`-ish "since the beginning of time"
/// sentinel well below any real historical transition.
const TRANSITION_TIME_FLOOR: i64 = -0x0800_0000_0000_0000;

impl DataBlock {
    pub(crate) fn parse(
        cursor: &mut Cursor,
        timecnt: usize,
        typecnt: usize,
        leapcnt: usize,
        isstdcnt: usize,
        isutcnt: usize,
        charcnt: usize,
    ) -> Result<Self, TzError> {
        let mut transition_times = Vec::with_capacity(timecnt);
        for chunk in cursor.read_exact(timecnt * 8)?.chunks_exact(8) {
            let t = i64::from_be_bytes(chunk.try_into().expect(BUG_MSG));
            if t < TRANSITION_TIME_FLOOR {
                return Err(TzError::InvalidTzif("transition time below sanity floor"));
            }
            transition_times.push(t);
        }
        for i in 1..transition_times.len() {
            if transition_times[i - 1] >= transition_times[i] {
                return Err(TzError::InvalidTzif("transition times must be strictly increasing"));
            }
        }

        let transition_types_raw = cursor.read_exact(timecnt)?;
        let mut transition_types = Vec::with_capacity(timecnt);
        for &idx in transition_types_raw {
            if idx as usize >= typecnt {
                return Err(TzError::InvalidTzif("transition type index out of range"));
            }
            transition_types.push(idx);
        }

        let mut local_time_types = Vec::with_capacity(typecnt);
        for chunk in cursor.read_exact(typecnt * 6)?.chunks_exact(6) {
            let utoff = i32::from_be_bytes(chunk[0..4].try_into().expect(BUG_MSG));
            if !(-89_999..=93_599).contains(&utoff) {
                return Err(TzError::InvalidTzif("UTC offset out of range"));
            }
            let is_dst = match chunk[4] {
                0 => false,
                1 => true,
                _ => return Err(TzError::InvalidTzif("isdst flag must be 0 or 1")),
            };
            let abbrev_index = chunk[5];
            if abbrev_index as usize >= charcnt {
                return Err(TzError::InvalidTzif("abbreviation index out of range"));
            }
            local_time_types.push(LocalTimeType {
                utoff,
                is_dst,
                abbrev_index,
            });
        }

        let designations = cursor.read_exact(charcnt)?.to_vec();

        let mut leap_seconds = Vec::with_capacity(leapcnt);
        for chunk in cursor.read_exact(leapcnt * 12)?.chunks_exact(12) {
            let occur = i64::from_be_bytes(chunk[0..8].try_into().expect(BUG_MSG));
            let corr = i32::from_be_bytes(chunk[8..12].try_into().expect(BUG_MSG));
            leap_seconds.push((occur, corr));
        }
        if let Some(&(first, _)) = leap_seconds.first() {
            if first < 0 {
                return Err(TzError::InvalidTzif("first leap second must not be negative"));
            }
        }

        for &flag in cursor.read_exact(isstdcnt)? {
            if flag > 1 {
                return Err(TzError::InvalidTzif("isstd flag must be 0 or 1"));
            }
        }
        for &flag in cursor.read_exact(isutcnt)? {
            if flag > 1 {
                return Err(TzError::InvalidTzif("isut flag must be 0 or 1"));
            }
        }

        Ok(Self {
            transition_times,
            transition_types,
            local_time_types,
            designations,
            leap_seconds,
        })
    }
}
