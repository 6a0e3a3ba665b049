//! Whisper content fetching
//!
//! One request, no retries — retry policy belongs to the caller. Transport
//! failures and server-reported envelope failures both normalize to
//! [`WhisprError`]; records with bad locations are dropped individually
//! rather than failing the batch.

use crate::data::whisper::{WhisperEnvelope, WhisperRecord};
use crate::{Result, WhisprError};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Client;

/// Shared HTTP client with a custom User-Agent. Building the client once
/// avoids the cost of TLS and connection pool setup for every fetch.
static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .user_agent("whispr-map/0.1 (+https://github.com/example/whispr-map)")
        .build()
        .expect("failed to build reqwest client")
});

/// Capability surface for retrieving the whisper collection. The session
/// only ever sees validated [`WhisperRecord`]s.
#[async_trait]
pub trait WhisperSource: Send + Sync {
    async fn fetch_whispers(&self) -> Result<Vec<WhisperRecord>>;
}

/// Fetches whispers from the configured backend endpoint.
pub struct HttpWhisperSource {
    endpoint: String,
}

impl HttpWhisperSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl WhisperSource for HttpWhisperSource {
    async fn fetch_whispers(&self) -> Result<Vec<WhisperRecord>> {
        log::debug!("fetching whispers from {}", self.endpoint);
        let resp = HTTP_CLIENT.get(&self.endpoint).send().await?;
        if !resp.status().is_success() {
            return Err(WhisprError::Fetch(format!("HTTP {}", resp.status())));
        }
        let envelope: WhisperEnvelope = resp.json().await?;
        decode_envelope(envelope)
    }
}

/// Applies the envelope contract: a 2xx envelope status with an absent
/// payload is an empty collection; anything outside 2xx fails with the
/// server-supplied message when one is present.
pub fn decode_envelope(envelope: WhisperEnvelope) -> Result<Vec<WhisperRecord>> {
    if !envelope.is_success() {
        let message = if envelope.message.is_empty() {
            format!("server reported status {}", envelope.status)
        } else {
            envelope.message
        };
        log::error!("whisper fetch rejected: {}", message);
        return Err(WhisprError::Fetch(message));
    }
    Ok(WhisperRecord::from_raw_batch(envelope.into_records()))
}
