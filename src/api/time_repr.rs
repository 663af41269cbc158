use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::num::NonZeroU8;
use time::format_description::well_known::Iso8601;
use time::format_description::well_known::iso8601::{Config, EncodedConfig, TimePrecision};
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

/// ISO 8601 with the 7 fractional digits .NET clients produce.
const ALPACA_FORMAT: EncodedConfig = Config::DEFAULT
    .set_time_precision(TimePrecision::Second {
        decimal_digits: NonZeroU8::new(7),
    })
    .encode();

/// A UTC timestamp as exchanged over Alpaca.
///
/// Serializes as ISO 8601 with a `Z` suffix. Parsing accepts any ISO 8601
/// date-time and treats a missing offset as UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::From)]
pub struct UtcDate(pub OffsetDateTime);

impl UtcDate {
    /// Current time.
    pub fn now() -> Self {
        Self(OffsetDateTime::now_utc())
    }

    fn parse(value: &str) -> Result<Self, time::error::Parse> {
        OffsetDateTime::parse(value, &Iso8601::PARSING)
            .or_else(|err| {
                PrimitiveDateTime::parse(value, &Iso8601::PARSING)
                    .map(PrimitiveDateTime::assume_utc)
                    .map_err(|_| err)
            })
            .map(|date| Self(date.to_offset(UtcOffset::UTC)))
    }
}

impl Serialize for UtcDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0
            .to_offset(UtcOffset::UTC)
            .format(&Iso8601::<ALPACA_FORMAT>)
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for UtcDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Cow::<'de, str>::deserialize(deserializer)?;
        Self::parse(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn formats_with_seven_digits_and_zulu() {
        let date = UtcDate(datetime!(2024-03-04 17:45:31.1234567 UTC));
        assert_eq!(
            serde_json::to_string(&date).unwrap(),
            r#""2024-03-04T17:45:31.1234567Z""#
        );
    }

    #[test]
    fn parses_with_and_without_offset() {
        let with_zulu: UtcDate = serde_plain::from_str("2024-03-04T17:45:31Z").unwrap();
        let without: UtcDate = serde_plain::from_str("2024-03-04T17:45:31").unwrap();
        let shifted: UtcDate = serde_plain::from_str("2024-03-04T19:45:31+02:00").unwrap();
        assert_eq!(with_zulu.0, datetime!(2024-03-04 17:45:31 UTC));
        assert_eq!(without, with_zulu);
        assert_eq!(shifted, with_zulu);
    }

    #[test]
    fn rejects_garbage() {
        assert!(serde_plain::from_str::<UtcDate>("yesterday").is_err());
    }
}
