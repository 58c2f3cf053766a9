//! Map surface abstraction.
//!
//! [`MapSurface`] is the seam where the mapping widget sits: the controller
//! only needs a view it can recenter, markers it can place and remove, and a
//! single route polyline. [`HeadlessSurface`] models the viewport in memory
//! and backs both the CLI and the test suite.

use crate::geo::{LatLon, LatLonBounds};

/// Handle to a placed marker.
pub type MarkerId = u64;

/// Zoom for a world-scale overview.
pub const WORLD_ZOOM: u8 = 2;
/// Zoom for a street-scale view of one place.
pub const STREET_ZOOM: u8 = 13;
/// Deepest zoom the surface will fit to.
pub const MAX_ZOOM: u8 = 19;

/// The drawable map view consumed by the controller.
pub trait MapSurface {
    /// Recenter the view.
    fn set_view(&mut self, center: LatLon, zoom: u8);

    fn center(&self) -> LatLon;

    fn zoom(&self) -> u8;

    /// Geographic rectangle currently visible.
    fn bounds(&self) -> LatLonBounds;

    /// Place a labeled marker, returning its handle.
    fn add_marker(&mut self, position: LatLon, label: String) -> MarkerId;

    fn remove_marker(&mut self, id: MarkerId);

    /// Draw a route polyline, replacing any drawn route.
    fn draw_route(&mut self, points: Vec<LatLon>);

    fn clear_route(&mut self);

    /// Adjust the view so the rectangle is fully framed.
    fn fit_bounds(&mut self, bounds: LatLonBounds);
}

/// A placed marker in the headless view.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessMarker {
    pub id: MarkerId,
    pub position: LatLon,
    pub label: String,
}

/// In-memory map view. The visible span is derived from zoom the way slippy
/// maps do it: the whole world at zoom 0, halving per level, with the
/// latitude span following a fixed aspect ratio.
pub struct HeadlessSurface {
    center: LatLon,
    zoom: u8,
    aspect: f64,
    markers: Vec<HeadlessMarker>,
    route: Option<Vec<LatLon>>,
    next_marker_id: MarkerId,
}

impl HeadlessSurface {
    pub fn new(center: LatLon, zoom: u8) -> Self {
        Self {
            center,
            zoom,
            aspect: 2.0,
            markers: Vec::new(),
            route: None,
            next_marker_id: 1,
        }
    }

    /// World-scale default view.
    pub fn world() -> Self {
        Self::new(LatLon::new(0.0, 0.0), WORLD_ZOOM)
    }

    fn lon_span(&self) -> f64 {
        360.0 / f64::from(1u32 << self.zoom.min(MAX_ZOOM))
    }

    fn lat_span(&self) -> f64 {
        self.lon_span() / self.aspect
    }

    /// Markers currently placed, in placement order.
    pub fn markers(&self) -> &[HeadlessMarker] {
        &self.markers
    }

    /// The drawn route, if any.
    pub fn route(&self) -> Option<&[LatLon]> {
        self.route.as_deref()
    }
}

impl MapSurface for HeadlessSurface {
    fn set_view(&mut self, center: LatLon, zoom: u8) {
        self.center = center;
        self.zoom = zoom.min(MAX_ZOOM);
    }

    fn center(&self) -> LatLon {
        self.center
    }

    fn zoom(&self) -> u8 {
        self.zoom
    }

    fn bounds(&self) -> LatLonBounds {
        let half_lon = self.lon_span() / 2.0;
        let half_lat = self.lat_span() / 2.0;
        let south = (self.center.lat - half_lat).max(-85.0);
        let north = (self.center.lat + half_lat).min(85.0);
        LatLonBounds::new(
            LatLon::new(south, self.center.lon - half_lon),
            LatLon::new(north, self.center.lon + half_lon),
        )
    }

    fn add_marker(&mut self, position: LatLon, label: String) -> MarkerId {
        let id = self.next_marker_id;
        self.next_marker_id += 1;
        self.markers.push(HeadlessMarker {
            id,
            position,
            label,
        });
        id
    }

    fn remove_marker(&mut self, id: MarkerId) {
        self.markers.retain(|m| m.id != id);
    }

    fn draw_route(&mut self, points: Vec<LatLon>) {
        self.route = Some(points);
    }

    fn clear_route(&mut self) {
        self.route = None;
    }

    fn fit_bounds(&mut self, bounds: LatLonBounds) {
        let width = (bounds.north_east.lon - bounds.south_west.lon).abs();
        let height = (bounds.north_east.lat - bounds.south_west.lat).abs();

        // Deepest zoom whose span still covers the rectangle on both axes.
        let mut zoom = MAX_ZOOM;
        for level in (0..=MAX_ZOOM).rev() {
            let lon_span = 360.0 / f64::from(1u32 << level);
            let lat_span = lon_span / self.aspect;
            if lon_span >= width && lat_span >= height {
                zoom = level;
                break;
            }
        }

        self.center = bounds.center();
        self.zoom = zoom;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_view_bounds() {
        let surface = HeadlessSurface::world();
        let bounds = surface.bounds();
        assert!(bounds.contains(&LatLon::new(0.0, 0.0)));
        assert_eq!(bounds.south_west.lon, -45.0);
        assert_eq!(bounds.north_east.lon, 45.0);
    }

    #[test]
    fn test_zoom_halves_span() {
        let mut surface = HeadlessSurface::world();
        let wide = surface.bounds();
        surface.set_view(surface.center(), surface.zoom() + 1);
        let narrow = surface.bounds();
        let wide_span = wide.north_east.lon - wide.south_west.lon;
        let narrow_span = narrow.north_east.lon - narrow.south_west.lon;
        assert!((wide_span - 2.0 * narrow_span).abs() < 1e-9);
    }

    #[test]
    fn test_marker_handles_are_stable() {
        let mut surface = HeadlessSurface::world();
        let a = surface.add_marker(LatLon::new(1.0, 1.0), "a".into());
        let b = surface.add_marker(LatLon::new(2.0, 2.0), "b".into());
        surface.remove_marker(a);
        assert_eq!(surface.markers().len(), 1);
        assert_eq!(surface.markers()[0].id, b);
    }

    #[test]
    fn test_fit_bounds_frames_rectangle() {
        let mut surface = HeadlessSurface::world();
        let target = LatLonBounds::new(LatLon::new(48.0, 2.0), LatLon::new(49.0, 3.0));
        surface.fit_bounds(target);
        let visible = surface.bounds();
        assert!(visible.contains(&target.south_west));
        assert!(visible.contains(&target.north_east));
        assert_eq!(surface.center(), target.center());
    }

    #[test]
    fn test_route_replaced_not_stacked() {
        let mut surface = HeadlessSurface::world();
        surface.draw_route(vec![LatLon::new(0.0, 0.0), LatLon::new(1.0, 1.0)]);
        surface.draw_route(vec![LatLon::new(2.0, 2.0)]);
        assert_eq!(surface.route().unwrap().len(), 1);
    }
}
