//! Session configuration
//!
//! Plain typed options for one map session: where whispers come from, the
//! fallback view when geolocation is unavailable, and the probe bound.

use crate::core::geo::LatLng;
use crate::{Result, WhisprError};
use std::time::Duration;

/// Fallback view used until (or instead of) a successful geolocation fix.
pub const DEFAULT_CENTER: LatLng = LatLng { lat: 51.0, lng: 49.0 };
pub const DEFAULT_ZOOM: u8 = 10;

/// Zoom applied when the probe pins down the user's position.
pub const LOCATED_ZOOM: u8 = 14;

/// High-accuracy geolocation bound; the probe never waits longer than this.
pub const PROBE_TIMEOUT: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Endpoint serving the whisper collection.
    pub endpoint: String,
    /// Token for the map rendering collaborator. Optional here; sessions
    /// started without it degrade to a labeled error state.
    pub map_token: Option<String>,
    pub default_center: LatLng,
    pub default_zoom: u8,
    pub located_zoom: u8,
    pub probe_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8080/whispers".to_string(),
            map_token: None,
            default_center: DEFAULT_CENTER,
            default_zoom: DEFAULT_ZOOM,
            located_zoom: LOCATED_ZOOM,
            probe_timeout: PROBE_TIMEOUT,
        }
    }
}

impl SessionConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    pub fn with_map_token(mut self, token: impl Into<String>) -> Self {
        self.map_token = Some(token.into());
        self
    }

    /// Checks that the rendering collaborator can actually be driven.
    pub fn require_map_token(&self) -> Result<&str> {
        self.map_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| WhisprError::Config("map token is missing".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.default_center, LatLng::new(51.0, 49.0));
        assert_eq!(config.default_zoom, 10);
        assert_eq!(config.located_zoom, 14);
        assert_eq!(config.probe_timeout, Duration::from_millis(5000));
    }

    #[test]
    fn test_map_token_requirement() {
        let config = SessionConfig::new("http://localhost:8080/whispers");
        assert!(config.require_map_token().is_err());

        let config = config.with_map_token("pk.test");
        assert_eq!(config.require_map_token().unwrap(), "pk.test");
    }
}
