use serde::{Deserialize, Serialize};

/// Represents a geographical coordinate with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validates that the coordinates are within valid ranges
    pub fn is_valid(&self) -> bool {
        self.lat >= -90.0 && self.lat <= 90.0 && self.lng >= -180.0 && self.lng <= 180.0
    }

    /// Parses a raw `"lat,lng"` location string into a validated coordinate.
    ///
    /// The string must contain exactly one comma. Each side is trimmed and
    /// parsed as a finite decimal; latitude must lie in [-90, 90] and
    /// longitude in [-180, 180]. Any deviation yields `None` — failure is a
    /// value here, not an error, because callers drop bad records and move
    /// on. Rejects are logged, which never affects the return value.
    pub fn parse(raw: &str) -> Option<LatLng> {
        let mut parts = raw.split(',');
        let (lat_str, lng_str) = match (parts.next(), parts.next(), parts.next()) {
            (Some(lat), Some(lng), None) => (lat.trim(), lng.trim()),
            _ => {
                log::warn!("invalid location string format (expected one comma): {:?}", raw);
                return None;
            }
        };

        let lat: f64 = match lat_str.parse() {
            Ok(v) => v,
            Err(_) => {
                log::warn!("invalid latitude {:?} in location string {:?}", lat_str, raw);
                return None;
            }
        };
        let lng: f64 = match lng_str.parse() {
            Ok(v) => v,
            Err(_) => {
                log::warn!("invalid longitude {:?} in location string {:?}", lng_str, raw);
                return None;
            }
        };

        if !lat.is_finite() || !lng.is_finite() {
            log::warn!("non-finite coordinate in location string {:?}", raw);
            return None;
        }

        let coord = LatLng::new(lat, lng);
        if !coord.is_valid() {
            log::warn!(
                "coordinate out of range: lat={}, lng={} from {:?}",
                lat,
                lng,
                raw
            );
            return None;
        }

        Some(coord)
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lat_lng_creation() {
        let coord = LatLng::new(40.7128, -74.0060);
        assert_eq!(coord.lat, 40.7128);
        assert_eq!(coord.lng, -74.0060);
        assert!(coord.is_valid());
    }

    #[test]
    fn test_parse_valid_pair() {
        assert_eq!(LatLng::parse("51,49"), Some(LatLng::new(51.0, 49.0)));
        assert_eq!(
            LatLng::parse(" 40.7128 , -74.0060 "),
            Some(LatLng::new(40.7128, -74.0060))
        );
        assert_eq!(LatLng::parse("-90,180"), Some(LatLng::new(-90.0, 180.0)));
    }

    #[test]
    fn test_parse_rejects_bad_comma_count() {
        assert_eq!(LatLng::parse("51 49"), None);
        assert_eq!(LatLng::parse("51,49,1"), None);
        assert_eq!(LatLng::parse(""), None);
        assert_eq!(LatLng::parse(","), None);
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        assert_eq!(LatLng::parse("abc,49"), None);
        assert_eq!(LatLng::parse("51,def"), None);
        assert_eq!(LatLng::parse("NaN,49"), None);
        assert_eq!(LatLng::parse("inf,0"), None);
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        assert_eq!(LatLng::parse("200,49"), None);
        assert_eq!(LatLng::parse("-91,0"), None);
        assert_eq!(LatLng::parse("51,181"), None);
        assert_eq!(LatLng::parse("51,-180.5"), None);
    }
}
