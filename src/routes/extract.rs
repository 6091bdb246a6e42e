use axum::extract::FromRequest;
use chrono::{DateTime, NaiveDateTime};
use serde::{de, Deserialize, Deserializer};

use crate::error::AppError;

/// JSON body extractor whose rejections go through [`AppError`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Parse an ISO 8601 timestamp.
///
/// RFC 3339 values with an offset (`2024-01-17T10:00:00Z`,
/// `2024-01-17T12:00:00+02:00`) are converted to UTC; values without one are
/// taken as UTC already.
///
/// # Errors
///
/// Returns the chrono parse error when neither form matches.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.naive_utc())
        .or_else(|_| raw.parse::<NaiveDateTime>())
}

/// `deserialize_with` helpers for payload timestamps.
pub mod timestamp {
    use super::{de, parse_timestamp, Deserialize, Deserializer, NaiveDateTime};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_timestamp(&raw).map_err(de::Error::custom)
    }

    pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .as_deref()
            .map(parse_timestamp)
            .transpose()
            .map_err(de::Error::custom)
    }
}
