//! `serde` support for [`Date`] and [`Hms`], gated behind the `serde` feature.
//! Both serialize as plain strings rather than structs, mirroring how most
//! date/time crates represent these types on the wire.

use crate::{Date, Hms};
use serde::{de, ser};
use std::fmt;

impl ser::Serialize for Date {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_str(&format!("{:04}-{:02}-{:02}", self.year, self.month, self.day))
    }
}

struct DateVisitor;

impl de::Visitor<'_> for DateVisitor {
    type Value = Date;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a date string in the format `yyyy-MM-dd`")
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        let mut parts = value.splitn(3, '-');
        let (year, month, day) = (|| {
            let year = parts.next()?.parse().ok()?;
            let month = parts.next()?.parse().ok()?;
            let day = parts.next()?.parse().ok()?;
            Some((year, month, day))
        })()
        .ok_or_else(|| E::custom("expected `yyyy-MM-dd`"))?;
        Ok(Date { year, month, day })
    }
}

impl<'de> de::Deserialize<'de> for Date {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_str(DateVisitor)
    }
}

impl ser::Serialize for Hms {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_str(&format!(
            "{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds
        ))
    }
}

struct HmsVisitor;

impl de::Visitor<'_> for HmsVisitor {
    type Value = Hms;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a time string in the format `HH:mm:ss`")
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        let mut parts = value.splitn(3, ':');
        let (hours, minutes, seconds) = (|| {
            let hours = parts.next()?.parse().ok()?;
            let minutes = parts.next()?.parse().ok()?;
            let seconds = parts.next()?.parse().ok()?;
            Some((hours, minutes, seconds))
        })()
        .ok_or_else(|| E::custom("expected `HH:mm:ss`"))?;
        Ok(Hms { hours, minutes, seconds })
    }
}

impl<'de> de::Deserialize<'de> for Hms {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_str(HmsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_test::{assert_tokens, Token};

    #[test]
    fn date_round_trips() {
        let date = Date { year: 2024, month: 2, day: 29 };
        assert_tokens(&date, &[Token::Str("2024-02-29")]);
    }

    #[test]
    fn hms_round_trips() {
        let hms = Hms { hours: 9, minutes: 5, seconds: 0 };
        assert_tokens(&hms, &[Token::Str("09:05:00")]);
    }
}
