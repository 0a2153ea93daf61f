use jiff::Timestamp;
use serde::{Deserialize, Deserializer, Serializer};
use snafu::{ResultExt, Snafu};
use std::str::FromStr;

pub(crate) mod required {
    use super::*;

    pub fn serialize<S>(timestamp: &Timestamp, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(timestamp)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Timestamp, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Owned string, `ciborium` refuses to hand out a borrowed slice
        let string = String::deserialize(deserializer)?;
        Timestamp::from_str(&string).map_err(serde::de::Error::custom)
    }
}

pub(crate) mod optional {
    use super::*;

    pub fn serialize<S>(optional: &Option<Timestamp>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match optional {
            Some(ref value) => serializer.serialize_some(&value.to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let string = Option::<String>::deserialize(deserializer)?;

        string
            .map(|string| Timestamp::from_str(&string).map_err(serde::de::Error::custom))
            .transpose()
    }
}

#[derive(Debug, Snafu)]
#[snafu(display("Failed to parse timestamp {timestamp}"))]
/// Error while converting Unix seconds to a timestamp
pub struct TimestampError {
    timestamp: i64,
    source: jiff::Error,
}

pub(crate) fn parse_timestamp(timestamp: i64) -> Result<Timestamp, TimestampError> {
    Timestamp::from_second(timestamp).context(TimestampSnafu { timestamp })
}

/// Calendar day of a timestamp, `YYYY-MM-DD` in UTC
pub(crate) fn format_day(timestamp: Timestamp) -> String {
    timestamp.strftime("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_required_timestamp_string() {
        #[derive(Deserialize)]
        struct Test {
            #[serde(with = "crate::timestamp::required")]
            created: Timestamp,
        }

        let json = r#"{"created": "not a date"}"#;
        let test: Result<Test, _> = serde_json::from_str(json);
        assert!(test.is_err());

        let json = r#"{"created": "2024-12-24T10:44:58Z"}"#;
        let test: Result<Test, _> = serde_json::from_str(json);
        assert_eq!(test.unwrap().created.as_second(), 1735037098);
    }

    #[test]
    fn deserialize_optional_timestamp_string() {
        #[derive(Deserialize)]
        struct Test {
            #[serde(with = "crate::timestamp::optional")]
            expires: Option<Timestamp>,
        }

        let json = r#"{"expires": null}"#;
        let test: Test = serde_json::from_str(json).unwrap();
        assert!(test.expires.is_none());

        let json = r#"{"expires": "garbage"}"#;
        let test: Result<Test, _> = serde_json::from_str(json);
        assert!(test.is_err());

        let json = r#"{"expires": "2024-12-24T10:44:58Z"}"#;
        let test: Test = serde_json::from_str(json).unwrap();
        assert_eq!(test.expires.map(|t| t.as_second()), Some(1735037098));
    }

    #[test]
    fn out_of_range_seconds_are_rejected() {
        assert!(parse_timestamp(i64::MAX).is_err());
        assert_eq!(parse_timestamp(0).unwrap(), Timestamp::UNIX_EPOCH);
    }

    #[test]
    fn day_is_rendered_in_utc() {
        // 2024-12-24T23:30:00Z
        let timestamp = parse_timestamp(1735083000).unwrap();
        assert_eq!(format_day(timestamp), "2024-12-24");
    }
}
