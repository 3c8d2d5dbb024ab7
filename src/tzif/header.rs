use super::cursor::Cursor;
use crate::errors::{TzError, BUG_MSG};

/// TZif format version. Only version 2 and 3 files are accepted; version 1
/// is obsolete (32-bit transition times) and version 4+ is unrecognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Version {
    V2,
    V3,
}

pub(crate) struct Header {
    pub(crate) version: Version,
    pub(crate) isutcnt: usize,
    pub(crate) isstdcnt: usize,
    pub(crate) leapcnt: usize,
    pub(crate) timecnt: usize,
    pub(crate) typecnt: usize,
    pub(crate) charcnt: usize,
}

impl Header {
    /// Parses one 44-byte TZif header, including the six trailing counts.
    pub(crate) fn parse(cursor: &mut Cursor) -> Result<Self, TzError> {
        let magic = cursor.read_exact(4)?;
        if magic != b"TZif" {
            return Err(TzError::InvalidTzif("magic bytes \"TZif\" not found"));
        }

        let version = match cursor.read_exact(1)? {
            [b'2'] => Version::V2,
            [b'3'] => Version::V3,
            _ => {
                return Err(TzError::InvalidTzif(
                    "unsupported TZif version, only 2 and 3 are accepted",
                ))
            }
        };

        cursor.read_exact(15)?;

        let isutcnt = u32::from_be_bytes(cursor.read_exact(4)?.try_into().expect(BUG_MSG)) as usize;
        let isstdcnt = u32::from_be_bytes(cursor.read_exact(4)?.try_into().expect(BUG_MSG)) as usize;
        let leapcnt = u32::from_be_bytes(cursor.read_exact(4)?.try_into().expect(BUG_MSG)) as usize;
        let timecnt = u32::from_be_bytes(cursor.read_exact(4)?.try_into().expect(BUG_MSG)) as usize;
        let typecnt = u32::from_be_bytes(cursor.read_exact(4)?.try_into().expect(BUG_MSG)) as usize;
        let charcnt = u32::from_be_bytes(cursor.read_exact(4)?.try_into().expect(BUG_MSG)) as usize;

        if typecnt == 0 {
            return Err(TzError::InvalidTzif("typecnt must be greater than zero"));
        }
        if charcnt == 0 {
            return Err(TzError::InvalidTzif("charcnt must be greater than zero"));
        }
        if isutcnt != 0 && isutcnt != typecnt {
            return Err(TzError::InvalidTzif("isutcnt must be zero or typecnt"));
        }
        if isstdcnt != 0 && isstdcnt != typecnt {
            return Err(TzError::InvalidTzif("isstdcnt must be zero or typecnt"));
        }

        Ok(Self {
            version,
            isutcnt,
            isstdcnt,
            leapcnt,
            timecnt,
            typecnt,
            charcnt,
        })
    }

    /// Size in bytes of the first (32-bit-timestamp) data block that precedes
    /// the version 2/3 header and must be skipped over.
    pub(crate) fn v1_block_size(&self) -> usize {
        self.timecnt * 4
            + self.timecnt
            + self.typecnt * 6
            + self.charcnt
            + self.leapcnt * (4 + 4)
            + self.isstdcnt
            + self.isutcnt
    }
}
