//! TZif (RFC 8536) binary decoding.
//!
//! A TZif file always carries two copies of its data: an obsolete 32-bit
//! block (version 1 framing) followed by the real 64-bit block (version 2/3
//! framing). We parse the first header only to learn how many bytes to skip,
//! then parse the second header and its data block for real.

pub(crate) mod cursor;
mod data_block;
mod header;

use cursor::Cursor;
use data_block::DataBlock;
use header::Header;

use crate::errors::TzError;
use crate::posix;
use crate::region::{LocalTimeType as PublicLocalTimeType, Record, Region};

/// Parses a full TZif byte buffer into a [`Region`] named `name`.
pub(crate) fn parse(bytes: &[u8], name: &str) -> Result<Region, TzError> {
    let mut cursor = Cursor::new(bytes);

    let v1_header = Header::parse(&mut cursor)?;
    cursor.read_exact(v1_header.v1_block_size())?;

    // Nothing distinguishes v2 from v3 at the header level; the only
    // difference is whether `/offset` rule times may exceed 24h, which
    // `posix::parse_footer` allows unconditionally.
    let header = Header::parse(&mut cursor)?;

    let data_block = DataBlock::parse(
        &mut cursor,
        header.timecnt,
        header.typecnt,
        header.leapcnt,
        header.isstdcnt,
        header.isutcnt,
        header.charcnt,
    )?;

    let footer = cursor.remaining();
    let rule = posix::parse_footer(footer)?;

    let local_time_types: Vec<PublicLocalTimeType> = data_block
        .local_time_types
        .iter()
        .map(|lt| PublicLocalTimeType {
            utoff: lt.utoff as i64,
            is_dst: lt.is_dst,
            shortname: read_designation(&data_block.designations, lt.abbrev_index),
        })
        .collect();

    let records = data_block
        .transition_times
        .iter()
        .zip(data_block.transition_types.iter())
        .map(|(&time, &type_idx)| {
            let lt = &local_time_types[type_idx as usize];
            Record {
                time,
                utoff: lt.utoff,
                is_dst: lt.is_dst,
                shortname: lt.shortname.clone(),
            }
        })
        .collect();

    Ok(Region {
        name: name.to_owned(),
        records,
        rule,
        leap_seconds: data_block.leap_seconds,
    })
}

fn read_designation(designations: &[u8], index: u8) -> String {
    let start = index as usize;
    let end = designations[start..]
        .iter()
        .position(|&b| b == 0)
        .map(|p| start + p)
        .unwrap_or(designations.len());
    String::from_utf8_lossy(&designations[start..end]).into_owned()
}
