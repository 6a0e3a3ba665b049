//! Whisper wire format and normalization
//!
//! The backend speaks a JSON envelope `{status, message, data?: {data: [..]}}`
//! whose records carry PascalCase fields and a free-form `"lat,lng"` location
//! string. Everything entering the reconciler passes through
//! [`WhisperRecord::from_raw`] first, so unchecked external shapes never flow
//! into core logic. Bad records are dropped and logged, never escalated to a
//! whole-batch failure.

use crate::core::geo::LatLng;
use serde::Deserialize;

/// Content kind of a whisper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhisperKind {
    Text,
    Image,
    Video,
}

impl WhisperKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "text" => Some(Self::Text),
            "image" => Some(Self::Image),
            "video" => Some(Self::Video),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Video => "video",
        }
    }
}

/// One whisper as the backend serializes it.
#[derive(Debug, Clone, Deserialize)]
pub struct RawWhisper {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "DataType")]
    pub data_type: String,
    #[serde(rename = "Data", default)]
    pub data: String,
    #[serde(rename = "MaxListens", default)]
    pub max_listens: i64,
    #[serde(rename = "AmountListens", default)]
    pub amount_listens: i64,
    #[serde(rename = "Emotions", default)]
    pub emotions: Vec<String>,
    #[serde(rename = "MediaUrl", default)]
    pub media_url: Option<String>,
}

/// Response envelope wrapping the whisper collection.
#[derive(Debug, Clone, Deserialize)]
pub struct WhisperEnvelope {
    pub status: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<EnvelopePayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnvelopePayload {
    #[serde(default)]
    pub data: Option<Vec<RawWhisper>>,
}

impl WhisperEnvelope {
    /// The backend mirrors HTTP semantics inside the envelope.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Flattens the nested payload; an absent payload on success is an
    /// empty collection, not an error.
    pub fn into_records(self) -> Vec<RawWhisper> {
        self.data.and_then(|p| p.data).unwrap_or_default()
    }
}

/// A validated, render-ready whisper. Derived once at ingestion and never
/// mutated field-by-field afterwards; refetches replace records wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct WhisperRecord {
    pub id: String,
    pub raw_location: String,
    pub kind: WhisperKind,
    pub body: String,
    pub media_ref: Option<String>,
    pub emotions: Vec<String>,
    pub listen_count: u32,
    pub listen_cap: u32,
    pub position: LatLng,
}

impl WhisperRecord {
    /// Validates one raw whisper. Returns `None` when the record cannot be
    /// shown on the map: unparseable location, unknown content kind, or an
    /// exhausted listen budget (the backend stops serving those).
    pub fn from_raw(raw: RawWhisper) -> Option<Self> {
        let position = match LatLng::parse(&raw.location) {
            Some(p) => p,
            None => {
                log::warn!(
                    "skipping whisper {} with invalid location {:?}",
                    raw.id,
                    raw.location
                );
                return None;
            }
        };

        let kind = match WhisperKind::parse(&raw.data_type) {
            Some(k) => k,
            None => {
                log::warn!(
                    "skipping whisper {} with unknown data type {:?}",
                    raw.id,
                    raw.data_type
                );
                return None;
            }
        };

        let listen_count = raw.amount_listens.max(0) as u32;
        let listen_cap = raw.max_listens.max(0) as u32;
        if listen_count >= listen_cap {
            log::debug!("skipping exhausted whisper {} ({}/{})", raw.id, listen_count, listen_cap);
            return None;
        }

        Some(Self {
            id: raw.id,
            raw_location: raw.location,
            kind,
            body: raw.data,
            media_ref: raw.media_url,
            emotions: clean_emotions(raw.emotions),
            listen_count,
            listen_cap,
            position,
        })
    }

    /// Validates a whole batch, dropping bad records and preserving the
    /// order of the good ones.
    pub fn from_raw_batch(raws: Vec<RawWhisper>) -> Vec<Self> {
        let total = raws.len();
        let records: Vec<Self> = raws.into_iter().filter_map(Self::from_raw).collect();
        if records.len() < total {
            log::info!("kept {}/{} whispers after validation", records.len(), total);
        }
        records
    }
}

/// Trims emotion tags and drops empty segments, matching the backend's
/// cleanup on create.
pub fn clean_emotions<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter()
        .map(|e| e.as_ref().trim().to_string())
        .filter(|e| !e.is_empty())
        .collect()
}
