//! Parser for POSIX TZ strings (the footer of a version 2/3 TZif file, and a
//! standalone ingest format in its own right).
//!
//! Grammar: `name offset [ name [offset] "," rule "," rule ]`. See RFC 8536
//! §3.3 and `tzset(3)`.

use crate::tzif::cursor::Cursor;
use crate::errors::{TzError, BUG_MSG};
use std::str::FromStr;

/// One of the three shapes a POSIX recurrence date can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionDate {
    /// `Jn`: day of year `1..=365`, never counting February 29.
    JulianNoLeap { day: u16, time: i32 },
    /// Bare `n`: day of year `0..=365`, counting February 29 in leap years.
    JulianLeap { day: u16, time: i32 },
    /// `Mm.w.d`: the `w`-th occurrence of weekday `d` in month `m`.
    /// `w == 5` means the last occurrence.
    MonthWeekDay { month: u8, week: u8, day: u8, time: i32 },
}

/// A parsed POSIX TZ recurrence rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceRule {
    pub has_dst: bool,
    pub std_name: String,
    pub std_offset: i64,
    pub std_date: TransitionDate,
    pub dst_name: Option<String>,
    pub dst_offset: Option<i64>,
    pub dst_date: Option<TransitionDate>,
}

const TWO_AM: i32 = 2 * 3600;

/// Parses a full POSIX TZ string, e.g. `"EST5EDT,M3.2.0,M11.1.0"`.
pub fn parse_posix_tz(s: &str) -> Result<RecurrenceRule, TzError> {
    if s.contains('\0') {
        return Err(TzError::InvalidPosixTz("embedded NUL byte"));
    }
    let mut cursor = Cursor::new_posix_tz(s.as_bytes());

    let std_name = parse_name(&mut cursor)?;
    let std_offset = -parse_offset(&mut cursor)?;

    if cursor.empty() {
        return Ok(RecurrenceRule {
            has_dst: false,
            std_name,
            std_offset,
            std_date: TransitionDate::JulianLeap { day: 0, time: TWO_AM },
            dst_name: None,
            dst_offset: None,
            dst_date: None,
        });
    }

    let dst_name = parse_name(&mut cursor)?;

    let dst_offset = match cursor.remaining().first() {
        Some(b',') => std_offset + 3600,
        Some(_) => -parse_offset(&mut cursor)?,
        None => return Err(TzError::InvalidPosixTz("missing rule pair after DST name")),
    };

    cursor.read_tag(b",")?;
    let std_date = parse_rule(&mut cursor, true)?;
    cursor.read_tag(b",")?;
    let dst_date = parse_rule(&mut cursor, true)?;

    if !cursor.empty() {
        return Err(TzError::InvalidPosixTz("trailing data after second rule"));
    }

    Ok(RecurrenceRule {
        has_dst: true,
        std_name,
        std_offset,
        std_date,
        dst_name: Some(dst_name),
        dst_offset: Some(dst_offset),
        dst_date: Some(dst_date),
    })
}

/// Parses the footer of a TZif file: `\n<posix tz string>\n`. `string_extensions`
/// allows the version-3 `/offset` range of `-167..=167` hours on rule times.
pub(crate) fn parse_footer(footer: &[u8]) -> Result<RecurrenceRule, TzError> {
    let footer = std::str::from_utf8(footer)?;
    if !footer.starts_with('\n') || !footer.ends_with('\n') {
        return Err(TzError::InvalidTzif("footer must be delimited by newlines"));
    }
    let tz_string = footer.trim_matches('\n');
    if tz_string.starts_with(':') {
        return Err(TzError::InvalidTzif("footer must not begin with ':'"));
    }
    parse_posix_tz(tz_string).map_err(|_| TzError::InvalidTzif("malformed POSIX TZ footer"))
}

fn parse_name(cursor: &mut Cursor) -> Result<String, TzError> {
    let name = if cursor.get_next()? == b'<' {
        cursor.read_exact(1).expect(BUG_MSG);
        let inner = cursor.read_while(|c| c.is_ascii_alphanumeric() || *c == b'+' || *c == b'-');
        cursor
            .read_tag(b">")
            .map_err(|_| TzError::InvalidPosixTz("unterminated quoted name"))?;
        inner
    } else {
        let name = cursor.read_while(u8::is_ascii_alphabetic);
        if name.is_empty() {
            return Err(TzError::InvalidPosixTz("expected a zone name"));
        }
        name
    };
    Ok(std::str::from_utf8(name).map_err(|_| TzError::InvalidPosixTz("name is not UTF-8"))?.to_owned())
}

fn parse_hms(cursor: &mut Cursor) -> Result<(i64, i64, i64, i64), TzError> {
    let sign = match cursor.get_next()? {
        b'-' => {
            cursor.read_exact(1).expect(BUG_MSG);
            -1
        }
        b'+' => {
            cursor.read_exact(1).expect(BUG_MSG);
            1
        }
        _ => 1,
    };

    let hour = parse_int::<i64>(cursor.read_while(u8::is_ascii_digit))?;

    let mut minute = 0;
    let mut second = 0;
    if !cursor.empty() && cursor.get_next().expect(BUG_MSG) == b':' {
        cursor.read_exact(1).expect(BUG_MSG);
        minute = parse_int::<i64>(cursor.read_while(u8::is_ascii_digit))?;
        if !cursor.empty() && cursor.get_next().expect(BUG_MSG) == b':' {
            cursor.read_exact(1).expect(BUG_MSG);
            second = parse_int::<i64>(cursor.read_while(u8::is_ascii_digit))?;
        }
    }

    Ok((sign, hour, minute, second))
}

/// Parses a leading std/dst offset (`-167..=167` hours per POSIX.1).
fn parse_offset(cursor: &mut Cursor) -> Result<i64, TzError> {
    let (sign, hour, minute, second) = parse_hms(cursor)?;
    if !(0..=167).contains(&hour) {
        return Err(TzError::InvalidPosixTz("offset hour out of range"));
    }
    if !(0..=59).contains(&minute) {
        return Err(TzError::InvalidPosixTz("offset minute out of range"));
    }
    if !(0..=59).contains(&second) {
        return Err(TzError::InvalidPosixTz("offset second out of range"));
    }
    Ok(sign * (hour * 3600 + minute * 60 + second))
}

/// Parses a rule-time suboffset (`/offset`). Versions before 3 only allow
/// `0..=24` hours; version 3's `string_extensions` widen this to `-167..=167`.
fn parse_rule_time_offset(cursor: &mut Cursor, string_extensions: bool) -> Result<i32, TzError> {
    let (sign, hour, minute, second) = parse_hms(cursor)?;
    let in_range = if string_extensions {
        (-167..=167).contains(&hour)
    } else {
        (0..=24).contains(&hour)
    };
    if !in_range {
        return Err(TzError::InvalidPosixTz("rule time hour out of range"));
    }
    if !(0..=59).contains(&minute) {
        return Err(TzError::InvalidPosixTz("rule time minute out of range"));
    }
    if !(0..=59).contains(&second) {
        return Err(TzError::InvalidPosixTz("rule time second out of range"));
    }
    Ok((sign * (hour * 3600 + minute * 60 + second)) as i32)
}

fn parse_rule(cursor: &mut Cursor, string_extensions: bool) -> Result<TransitionDate, TzError> {
    let date = match cursor.get_next()? {
        b'J' => {
            cursor.read_exact(1).expect(BUG_MSG);
            let day = parse_int::<u16>(cursor.read_while(u8::is_ascii_digit))?;
            if !(1..=365).contains(&day) {
                return Err(TzError::InvalidPosixTz("Julian day out of range"));
            }
            TransitionDate::JulianNoLeap { day, time: TWO_AM }
        }
        b'M' => {
            cursor.read_exact(1).expect(BUG_MSG);
            let month = parse_int::<u8>(cursor.read_until(b'.'))?;
            cursor.read_tag(b".")?;
            let week = parse_int::<u8>(cursor.read_until(b'.'))?;
            cursor.read_tag(b".")?;
            let day = parse_int::<u8>(cursor.read_while(u8::is_ascii_digit))?;
            if !(1..=12).contains(&month) || !(1..=5).contains(&week) || day > 6 {
                return Err(TzError::InvalidPosixTz("month/week/day field out of range"));
            }
            TransitionDate::MonthWeekDay { month, week, day, time: TWO_AM }
        }
        byte if byte.is_ascii_digit() => {
            let day = parse_int::<u16>(cursor.read_while(u8::is_ascii_digit))?;
            if day > 365 {
                return Err(TzError::InvalidPosixTz("Julian day out of range"));
            }
            TransitionDate::JulianLeap { day, time: TWO_AM }
        }
        _ => return Err(TzError::InvalidPosixTz("expected a rule")),
    };

    if !cursor.empty() && cursor.get_next().expect(BUG_MSG) == b'/' {
        cursor.read_exact(1).expect(BUG_MSG);
        let time = parse_rule_time_offset(cursor, string_extensions)?;
        return Ok(with_time(date, time));
    }

    Ok(date)
}

fn with_time(date: TransitionDate, time: i32) -> TransitionDate {
    match date {
        TransitionDate::JulianNoLeap { day, .. } => TransitionDate::JulianNoLeap { day, time },
        TransitionDate::JulianLeap { day, .. } => TransitionDate::JulianLeap { day, time },
        TransitionDate::MonthWeekDay { month, week, day, .. } => {
            TransitionDate::MonthWeekDay { month, week, day, time }
        }
    }
}

fn parse_int<T: FromStr<Err = std::num::ParseIntError>>(bytes: &[u8]) -> Result<T, TzError> {
    std::str::from_utf8(bytes)
        .map_err(|_| TzError::InvalidPosixTz("expected ASCII digits"))?
        .parse()
        .map_err(TzError::from)
}
