//! Geocoding results from the location search endpoint.

use serde::{Deserialize, Serialize};

use crate::geo::LatLon;

/// One geocoding result. Coordinates are absent when the query resolved to
/// nothing; the service may also attach a human-readable place name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl SearchHit {
    /// The resolved position, when both coordinates are present.
    pub fn position(&self) -> Option<LatLon> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(LatLon::new(lat, lon)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_with_coordinates() {
        let hit: SearchHit =
            serde_json::from_str(r#"{"lat": 48.85, "lon": 2.35, "display_name": "Paris"}"#)
                .unwrap();
        assert_eq!(hit.position(), Some(LatLon::new(48.85, 2.35)));
    }

    #[test]
    fn test_hit_without_coordinates() {
        let hit: SearchHit = serde_json::from_str(r#"{"error": "Location not found"}"#).unwrap();
        assert_eq!(hit.position(), None);
    }

    #[test]
    fn test_hit_with_partial_coordinates() {
        let hit: SearchHit = serde_json::from_str(r#"{"lat": 48.85}"#).unwrap();
        assert_eq!(hit.position(), None);
    }
}
