//! Custom serde codecs for Tradier's wire quirks.
//!
//! The Tradier API is inconsistent in two ways this module papers over:
//!
//! - List-valued fields serialize as a bare object when there is exactly one
//!   element and as an array otherwise ([`one_or_many`]).
//! - Timestamps appear in three encodings depending on the endpoint:
//!   milliseconds since the epoch ([`epoch_millis`]), seconds since the
//!   epoch ([`epoch_seconds`]), and the fixed string format
//!   `yyyy-MM-dd HH:mm:ss` ([`datetime_format`]). The streaming feed carries
//!   its epoch values as numeric strings, so the epoch codecs accept both.
//!
//! All three date codecs are invertible: the write path encodes the UTC
//! instant back into the wire representation, and the read path rejects
//! malformed input with a decode error rather than guessing.

/// Tolerates a bare object where the API may emit either an object or an
/// array. Always deserializes to a `Vec` (of length 1 for the scalar case).
/// Serialization emits a bare object only when the length is exactly 1.
pub mod one_or_many {
    use serde::de::{Deserialize, Deserializer};
    use serde::ser::{Serialize, Serializer};

    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum OneOrMany<T> {
        Many(Vec<T>),
        One(T),
    }

    /// Deserialize either a single element or an array into a `Vec`.
    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        match OneOrMany::deserialize(deserializer)? {
            OneOrMany::Many(items) => Ok(items),
            OneOrMany::One(item) => Ok(vec![item]),
        }
    }

    /// Serialize a `Vec` as a bare element when it has exactly one entry.
    pub fn serialize<S, T>(items: &[T], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        if items.len() == 1 {
            items[0].serialize(serializer)
        } else {
            items.serialize(serializer)
        }
    }
}

/// Milliseconds-since-epoch timestamps (`1557757189195`), also accepted as
/// numeric strings as emitted by the streaming feed (`"1557757189195"`).
pub mod epoch_millis {
    use chrono::{DateTime, Utc};
    use serde::de::{Deserialize, Deserializer, Error as DeError};
    use serde::ser::Serializer;

    pub(super) fn parse<E: DeError>(raw: super::EpochRepr) -> Result<i64, E> {
        match raw {
            super::EpochRepr::Int(ms) => Ok(ms),
            super::EpochRepr::Str(s) => s
                .parse::<i64>()
                .map_err(|_| E::custom(format!("invalid epoch timestamp: {:?}", s))),
        }
    }

    /// Deserialize an epoch-milliseconds value into a UTC instant.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let ms = parse(super::EpochRepr::deserialize(deserializer)?)?;
        DateTime::<Utc>::from_timestamp_millis(ms)
            .ok_or_else(|| D::Error::custom(format!("epoch millis out of range: {}", ms)))
    }

    /// Serialize a UTC instant as epoch milliseconds.
    pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(dt.timestamp_millis())
    }

    /// `Option`-valued variant of [`epoch_millis`](self).
    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::de::{Deserialize, Deserializer};
        use serde::ser::Serializer;

        /// Deserialize an optional epoch-milliseconds value.
        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
        where
            D: Deserializer<'de>,
        {
            use serde::de::Error;
            match Option::<crate::models::serde_util::EpochRepr>::deserialize(deserializer)? {
                None => Ok(None),
                Some(raw) => {
                    let ms = super::parse(raw)?;
                    DateTime::<Utc>::from_timestamp_millis(ms)
                        .map(Some)
                        .ok_or_else(|| {
                            D::Error::custom(format!("epoch millis out of range: {}", ms))
                        })
                }
            }
        }

        /// Serialize an optional UTC instant as epoch milliseconds.
        pub fn serialize<S>(dt: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match dt {
                Some(dt) => serializer.serialize_i64(dt.timestamp_millis()),
                None => serializer.serialize_none(),
            }
        }
    }
}

/// Seconds-since-epoch timestamps (`1557150001`), also accepted as numeric
/// strings.
pub mod epoch_seconds {
    use chrono::{DateTime, Utc};
    use serde::de::{Deserialize, Deserializer, Error as DeError};
    use serde::ser::Serializer;

    /// Deserialize an epoch-seconds value into a UTC instant.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = super::epoch_millis::parse(super::EpochRepr::deserialize(deserializer)?)?;
        DateTime::<Utc>::from_timestamp(secs, 0)
            .ok_or_else(|| D::Error::custom(format!("epoch seconds out of range: {}", secs)))
    }

    /// Serialize a UTC instant as epoch seconds.
    pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(dt.timestamp())
    }

    /// `Option`-valued variant of [`epoch_seconds`](self).
    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::de::{Deserialize, Deserializer};
        use serde::ser::Serializer;

        /// Deserialize an optional epoch-seconds value.
        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
        where
            D: Deserializer<'de>,
        {
            use serde::de::Error;
            match Option::<crate::models::serde_util::EpochRepr>::deserialize(deserializer)? {
                None => Ok(None),
                Some(raw) => {
                    let secs = crate::models::serde_util::epoch_millis::parse(raw)?;
                    DateTime::<Utc>::from_timestamp(secs, 0).map(Some).ok_or_else(|| {
                        D::Error::custom(format!("epoch seconds out of range: {}", secs))
                    })
                }
            }
        }

        /// Serialize an optional UTC instant as epoch seconds.
        pub fn serialize<S>(dt: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match dt {
                Some(dt) => serializer.serialize_i64(dt.timestamp()),
                None => serializer.serialize_none(),
            }
        }
    }
}

/// The fixed `yyyy-MM-dd HH:mm:ss` string format used by the greeks block
/// and the fundamentals feeds (`"2019-08-29 14:59:08"`). Values are UTC.
pub mod datetime_format {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::de::{Deserialize, Deserializer, Error as DeError};
    use serde::ser::Serializer;

    pub(super) const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    /// Deserialize a `yyyy-MM-dd HH:mm:ss` string into a UTC instant.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, FORMAT)
            .map(|naive| naive.and_utc())
            .map_err(|_| D::Error::custom(format!("invalid datetime {:?}, expected {}", s, FORMAT)))
    }

    /// Serialize a UTC instant as a `yyyy-MM-dd HH:mm:ss` string.
    pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&dt.format(FORMAT).to_string())
    }

    /// `Option`-valued variant of [`datetime_format`](self).
    pub mod option {
        use chrono::{DateTime, NaiveDateTime, Utc};
        use serde::de::{Deserialize, Deserializer, Error as DeError};
        use serde::ser::Serializer;

        /// Deserialize an optional `yyyy-MM-dd HH:mm:ss` string.
        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
        where
            D: Deserializer<'de>,
        {
            match Option::<String>::deserialize(deserializer)? {
                None => Ok(None),
                Some(s) => NaiveDateTime::parse_from_str(&s, super::FORMAT)
                    .map(|naive| Some(naive.and_utc()))
                    .map_err(|_| {
                        D::Error::custom(format!(
                            "invalid datetime {:?}, expected {}",
                            s,
                            super::FORMAT
                        ))
                    }),
            }
        }

        /// Serialize an optional UTC instant as a `yyyy-MM-dd HH:mm:ss` string.
        pub fn serialize<S>(dt: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match dt {
                Some(dt) => serializer.serialize_str(&dt.format(super::FORMAT).to_string()),
                None => serializer.serialize_none(),
            }
        }
    }
}

/// Wire representation shared by the epoch codecs: an integer, or the same
/// integer carried as a string (the streaming feed does this).
#[derive(serde::Deserialize)]
#[serde(untagged)]
pub(crate) enum EpochRepr {
    /// Plain JSON integer
    Int(i64),
    /// Numeric string
    Str(String),
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Wrapper {
        #[serde(with = "super::one_or_many")]
        item: Vec<String>,
    }

    #[test]
    fn test_one_or_many_reads_scalar() {
        let parsed: Wrapper = serde_json::from_str(r#"{"item": "AAPL"}"#).unwrap();
        assert_eq!(parsed.item, vec!["AAPL"]);
    }

    #[test]
    fn test_one_or_many_reads_array() {
        let parsed: Wrapper = serde_json::from_str(r#"{"item": ["AAPL", "SPY"]}"#).unwrap();
        assert_eq!(parsed.item, vec!["AAPL", "SPY"]);
    }

    #[test]
    fn test_one_or_many_writes_scalar_for_len_one() {
        let json = serde_json::to_string(&Wrapper {
            item: vec!["AAPL".to_string()],
        })
        .unwrap();
        assert_eq!(json, r#"{"item":"AAPL"}"#);
    }

    #[test]
    fn test_one_or_many_writes_array_otherwise() {
        let json = serde_json::to_string(&Wrapper {
            item: vec!["AAPL".to_string(), "SPY".to_string()],
        })
        .unwrap();
        assert_eq!(json, r#"{"item":["AAPL","SPY"]}"#);

        let empty = serde_json::to_string(&Wrapper { item: vec![] }).unwrap();
        assert_eq!(empty, r#"{"item":[]}"#);
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Millis {
        #[serde(with = "super::epoch_millis")]
        at: DateTime<Utc>,
    }

    #[test]
    fn test_epoch_millis_roundtrip() {
        let parsed: Millis = serde_json::from_str(r#"{"at": 1557757189195}"#).unwrap();
        assert_eq!(parsed.at.timestamp_millis(), 1557757189195);
        assert_eq!(
            serde_json::to_string(&parsed).unwrap(),
            r#"{"at":1557757189195}"#
        );
    }

    #[test]
    fn test_epoch_millis_accepts_numeric_string() {
        let parsed: Millis = serde_json::from_str(r#"{"at": "1557757189195"}"#).unwrap();
        assert_eq!(parsed.at.timestamp_millis(), 1557757189195);
    }

    #[test]
    fn test_epoch_millis_rejects_garbage() {
        assert!(serde_json::from_str::<Millis>(r#"{"at": "yesterday"}"#).is_err());
        assert!(serde_json::from_str::<Millis>(r#"{"at": true}"#).is_err());
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Seconds {
        #[serde(with = "super::epoch_seconds")]
        at: DateTime<Utc>,
    }

    #[test]
    fn test_epoch_seconds_roundtrip() {
        let parsed: Seconds = serde_json::from_str(r#"{"at": 1557150001}"#).unwrap();
        assert_eq!(parsed.at, Utc.with_ymd_and_hms(2019, 5, 6, 13, 40, 1).unwrap());
        assert_eq!(
            serde_json::to_string(&parsed).unwrap(),
            r#"{"at":1557150001}"#
        );
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Formatted {
        #[serde(with = "super::datetime_format")]
        at: DateTime<Utc>,
    }

    #[test]
    fn test_datetime_format_roundtrip() {
        let parsed: Formatted = serde_json::from_str(r#"{"at": "2019-08-29 14:59:08"}"#).unwrap();
        assert_eq!(
            parsed.at,
            Utc.with_ymd_and_hms(2019, 8, 29, 14, 59, 8).unwrap()
        );
        assert_eq!(
            serde_json::to_string(&parsed).unwrap(),
            r#"{"at":"2019-08-29 14:59:08"}"#
        );
    }

    #[test]
    fn test_datetime_format_rejects_other_shapes() {
        // ISO 8601 with a T separator is not this codec's format
        assert!(serde_json::from_str::<Formatted>(r#"{"at": "2019-08-29T14:59:08"}"#).is_err());
        assert!(serde_json::from_str::<Formatted>(r#"{"at": "2019-08-29"}"#).is_err());
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct OptMillis {
        #[serde(default, with = "super::epoch_millis::option")]
        at: Option<DateTime<Utc>>,
    }

    #[test]
    fn test_option_variants() {
        let parsed: OptMillis = serde_json::from_str(r#"{"at": null}"#).unwrap();
        assert_eq!(parsed.at, None);

        let parsed: OptMillis = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(parsed.at, None);

        let parsed: OptMillis = serde_json::from_str(r#"{"at": "1557757189195"}"#).unwrap();
        assert_eq!(parsed.at.unwrap().timestamp_millis(), 1557757189195);
    }
}
