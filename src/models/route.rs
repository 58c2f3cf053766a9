//! Route geometries from the routing endpoint.

use serde::{Deserialize, Serialize};

use crate::geo::LatLon;

/// A GeoJSON LineString connecting two coordinates. Opaque to the controller
/// beyond drawing it and framing the view around it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteGeometry {
    #[serde(rename = "type")]
    pub kind: String,
    /// GeoJSON positions: `[lon, lat]` pairs.
    pub coordinates: Vec<[f64; 2]>,
}

impl RouteGeometry {
    /// The path as coordinate points, in GeoJSON's lon-first order.
    pub fn points(&self) -> Vec<LatLon> {
        self.coordinates
            .iter()
            .map(|[lon, lat]| LatLon::new(*lat, *lon))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_swap_geojson_order() {
        let geometry: RouteGeometry = serde_json::from_str(
            r#"{"type": "LineString", "coordinates": [[2.35, 48.85], [2.29, 48.86]]}"#,
        )
        .unwrap();
        let points = geometry.points();
        assert_eq!(points[0], LatLon::new(48.85, 2.35));
        assert_eq!(points[1], LatLon::new(48.86, 2.29));
    }

    #[test]
    fn test_empty_geometry() {
        let geometry = RouteGeometry {
            kind: "LineString".into(),
            coordinates: vec![],
        };
        assert!(geometry.is_empty());
        assert!(geometry.points().is_empty());
    }
}
