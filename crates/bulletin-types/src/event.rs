//! Event types

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A bulletin record as stored in the `events` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,
    pub event_type: Option<String>,
    pub location: Option<String>,
    pub time: Option<String>,
    pub poster: Option<String>,
    pub description: Option<String>,
    pub emergency: bool,
}

/// An event ready to be inserted; the id is assigned by storage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewEvent {
    pub event_type: Option<String>,
    pub location: Option<String>,
    pub time: Option<String>,
    pub poster: Option<String>,
    pub description: Option<String>,
    pub emergency: bool,
}

impl NewEvent {
    /// Build an emergency event stamped with `now`.
    ///
    /// Any client-side notion of time is ignored; the timestamp is always
    /// generated by the server.
    pub fn sos(req: SosRequest, now: DateTime<Utc>) -> Self {
        Self {
            event_type: req.event_type,
            location: req.location,
            time: Some(iso_timestamp(now)),
            poster: req.name,
            description: req.description,
            emergency: true,
        }
    }
}

impl From<CreateEventRequest> for NewEvent {
    fn from(req: CreateEventRequest) -> Self {
        Self {
            event_type: req.event_type,
            location: req.location,
            time: req.time,
            poster: req.poster,
            description: req.description,
            emergency: false,
        }
    }
}

/// Body of `POST /api/events`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[serde(default, deserialize_with = "lenient_text")]
    pub event_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub time: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub poster: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
}

/// Body of `POST /api/sos`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SosRequest {
    #[serde(default, deserialize_with = "lenient_text")]
    pub event_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
}

/// Format an instant as ISO-8601 with millisecond precision, e.g.
/// `2024-09-28T12:34:56.789Z`.
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Accept any JSON value for a text column.
///
/// Strings pass through, `null` becomes `None`, anything else is kept as its
/// JSON text.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}
