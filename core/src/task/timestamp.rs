//! ISO-8601 encoding for task timestamps.
//!
//! Written as UTC with a `Z` suffix and at least millisecond precision; finer
//! fractions are kept as they were read. Read leniently: any RFC 3339 offset,
//! or a bare `YYYY-MM-DD` date taken as midnight UTC.

use chrono::{DateTime, NaiveDate, SecondsFormat, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serializer};

pub fn format(ts: &DateTime<Utc>) -> String {
    let precision = if ts.nanosecond() % 1_000_000 == 0 {
        SecondsFormat::Millis
    } else {
        SecondsFormat::AutoSi
    };
    ts.to_rfc3339_opts(precision, true)
}

pub fn parse(raw: &str) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("invalid ISO-8601 timestamp: {raw:?}"))
}

pub(crate) fn serialize<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(ts))
}

pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(serde::de::Error::custom)
}

pub(crate) mod option {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub(crate) fn serialize<S>(ts: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match ts {
            Some(ts) => serializer.serialize_str(&super::format(ts)),
            None => serializer.serialize_none(),
        }
    }

    /// Anything that is not a readable timestamp becomes `None`.
    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(match value {
            None | Some(serde_json::Value::Null) => None,
            Some(serde_json::Value::String(raw)) if raw.trim().is_empty() => None,
            Some(serde_json::Value::String(raw)) => match super::parse(&raw) {
                Ok(ts) => Some(ts),
                Err(e) => {
                    tracing::warn!(error = %e, "unreadable date, treating as absent");
                    None
                }
            },
            Some(other) => {
                tracing::warn!(value = %other, "non-string date, treating as absent");
                None
            }
        })
    }
}
