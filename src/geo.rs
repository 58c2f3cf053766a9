//! Geographic primitives: coordinates, view bounds, haversine distances.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Great-circle distance to another point in meters (haversine).
    pub fn distance_to(&self, other: &LatLon) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let dlat = (other.lat - self.lat).to_radians();
        let dlon = (other.lon - self.lon).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_M * c
    }
}

impl std::fmt::Display for LatLon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.5},{:.5}", self.lat, self.lon)
    }
}

/// The geographic rectangle currently visible in a map view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLonBounds {
    pub south_west: LatLon,
    pub north_east: LatLon,
}

impl LatLonBounds {
    pub fn new(south_west: LatLon, north_east: LatLon) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    pub fn center(&self) -> LatLon {
        LatLon::new(
            (self.south_west.lat + self.north_east.lat) / 2.0,
            (self.south_west.lon + self.north_east.lon) / 2.0,
        )
    }

    /// Bounding radius in meters: distance from the center to the farthest
    /// visible corner.
    pub fn viewport_radius(&self) -> f64 {
        let center = self.center();
        center
            .distance_to(&self.north_east)
            .max(center.distance_to(&self.south_west))
    }

    /// Smallest bounds containing every point. None for an empty slice.
    pub fn enclosing(points: &[LatLon]) -> Option<Self> {
        let first = points.first()?;
        let mut south = first.lat;
        let mut north = first.lat;
        let mut west = first.lon;
        let mut east = first.lon;
        for p in &points[1..] {
            south = south.min(p.lat);
            north = north.max(p.lat);
            west = west.min(p.lon);
            east = east.max(p.lon);
        }
        Some(Self::new(
            LatLon::new(south, west),
            LatLon::new(north, east),
        ))
    }

    pub fn contains(&self, point: &LatLon) -> bool {
        point.lat >= self.south_west.lat
            && point.lat <= self.north_east.lat
            && point.lon >= self.south_west.lon
            && point.lon <= self.north_east.lon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_known_distance() {
        // Paris to London is roughly 344 km
        let paris = LatLon::new(48.8566, 2.3522);
        let london = LatLon::new(51.5074, -0.1278);
        let d = paris.distance_to(&london);
        assert!((d - 344_000.0).abs() < 5_000.0, "got {d}");
    }

    #[test]
    fn test_distance_zero_for_same_point() {
        let p = LatLon::new(10.0, 20.0);
        assert_eq!(p.distance_to(&p), 0.0);
    }

    #[test]
    fn test_viewport_radius_is_farthest_corner() {
        let bounds = LatLonBounds::new(LatLon::new(48.0, 2.0), LatLon::new(49.0, 3.0));
        let center = bounds.center();
        let expected = center
            .distance_to(&bounds.north_east)
            .max(center.distance_to(&bounds.south_west));
        assert_eq!(bounds.viewport_radius(), expected);
        assert!(expected > 0.0);
    }

    #[test]
    fn test_viewport_radius_asymmetric_bounds() {
        // At high latitude the NE and SW corners are not equidistant from
        // the center in meters; the radius must take the larger one.
        let bounds = LatLonBounds::new(LatLon::new(60.0, 10.0), LatLon::new(70.0, 30.0));
        let center = bounds.center();
        let ne = center.distance_to(&bounds.north_east);
        let sw = center.distance_to(&bounds.south_west);
        assert!(bounds.viewport_radius() >= ne.max(sw));
    }

    #[test]
    fn test_enclosing_bounds() {
        let points = vec![
            LatLon::new(48.0, 2.0),
            LatLon::new(50.0, -1.0),
            LatLon::new(47.0, 3.5),
        ];
        let bounds = LatLonBounds::enclosing(&points).unwrap();
        assert_eq!(bounds.south_west, LatLon::new(47.0, -1.0));
        assert_eq!(bounds.north_east, LatLon::new(50.0, 3.5));
        for p in &points {
            assert!(bounds.contains(p));
        }
    }

    #[test]
    fn test_enclosing_empty() {
        assert!(LatLonBounds::enclosing(&[]).is_none());
    }
}
