//! One-shot geolocation probe
//!
//! The platform's dual-callback geolocation API is modeled as a single
//! suspending operation returning a tagged result. The probe enforces its
//! own wait bound and resolves exactly once; whether anyone still listens
//! by then is the session's concern, not the probe's.

use crate::core::{config::SessionConfig, geo::LatLng};
use crate::{Result, WhisprError};
use async_trait::async_trait;

/// A successful geolocation fix plus the zoom level to apply for it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeFix {
    pub position: LatLng,
    pub zoom: u8,
}

/// Platform positioning capability. Implementations should request a fresh,
/// high-accuracy position; cached fixes are the caller's enemy here.
#[async_trait]
pub trait PositionProvider: Send + Sync {
    async fn current_position(&self) -> Result<LatLng>;
}

/// Provider for platforms without any positioning capability.
pub struct UnsupportedPlatform;

#[async_trait]
impl PositionProvider for UnsupportedPlatform {
    async fn current_position(&self) -> Result<LatLng> {
        Err(WhisprError::Geolocation(
            "geolocation is not supported on this platform".to_string(),
        ))
    }
}

/// Runs the provider under the configured wait bound. Success yields the
/// position and the close-in zoom; denial, timeout and unsupported
/// platforms all surface as a non-fatal [`WhisprError::Geolocation`] so the
/// caller can fall back to the default view.
pub async fn probe_position(
    provider: &dyn PositionProvider,
    config: &SessionConfig,
) -> Result<ProbeFix> {
    match tokio::time::timeout(config.probe_timeout, provider.current_position()).await {
        Ok(Ok(position)) => {
            if !position.is_valid() {
                return Err(WhisprError::Geolocation(format!(
                    "provider reported out-of-range position ({}, {})",
                    position.lat, position.lng
                )));
            }
            log::debug!("geolocation fix: {}, {}", position.lat, position.lng);
            Ok(ProbeFix {
                position,
                zoom: config.located_zoom,
            })
        }
        Ok(Err(err)) => {
            log::warn!("geolocation failed: {}", err);
            Err(err)
        }
        Err(_) => {
            log::warn!(
                "geolocation timed out after {}ms",
                config.probe_timeout.as_millis()
            );
            Err(WhisprError::Geolocation(format!(
                "timed out after {}ms",
                config.probe_timeout.as_millis()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    struct FixedProvider(LatLng);

    #[async_trait]
    impl PositionProvider for FixedProvider {
        async fn current_position(&self) -> Result<LatLng> {
            Ok(self.0)
        }
    }

    struct StalledProvider;

    #[async_trait]
    impl PositionProvider for StalledProvider {
        async fn current_position(&self) -> Result<LatLng> {
            futures::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_probe_success_uses_located_zoom() {
        let config = SessionConfig::default();
        let fix = probe_position(&FixedProvider(LatLng::new(40.0, -74.0)), &config)
            .await
            .unwrap();
        assert_eq!(fix.position, LatLng::new(40.0, -74.0));
        assert_eq!(fix.zoom, config.located_zoom);
    }

    #[tokio::test]
    async fn test_probe_rejects_out_of_range_fix() {
        let config = SessionConfig::default();
        let err = probe_position(&FixedProvider(LatLng::new(200.0, 0.0)), &config)
            .await
            .unwrap_err();
        assert!(matches!(err, WhisprError::Geolocation(_)));
    }

    #[tokio::test]
    async fn test_probe_times_out() {
        let config = SessionConfig {
            probe_timeout: Duration::from_millis(20),
            ..SessionConfig::default()
        };
        let err = probe_position(&StalledProvider, &config).await.unwrap_err();
        assert!(matches!(&err, WhisprError::Geolocation(m) if m.contains("timed out")));
    }

    #[tokio::test]
    async fn test_unsupported_platform() {
        let config = SessionConfig::default();
        let err = probe_position(&UnsupportedPlatform, &config)
            .await
            .unwrap_err();
        assert!(matches!(&err, WhisprError::Geolocation(m) if m.contains("not supported")));
    }
}
