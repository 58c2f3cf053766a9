//! Map view controller.
//!
//! Owns the whole mutable view state: the surface, the marker set, the
//! selected landmark, the route overlay, and the filter selection. Every
//! user-facing event (view moved, filter toggled, search submitted, marker
//! selected, route requested, chat command) funnels into one method here.
//!
//! Failure policy: backend failures are best-effort refreshes, recovered
//! locally and logged as diagnostics. The only user-facing failures are the
//! two search notices, surfaced as [`SearchOutcome`] for the driver to
//! render.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::chat::{self, Command};
use crate::client::LandmarkBackend;
use crate::geo::{LatLon, LatLonBounds};
use crate::locate::{locate_with_timeout, Locator};
use crate::models::{FilterTag, Landmark, LandmarkDetail};
use crate::surface::{MapSurface, MarkerId, STREET_ZOOM};

/// Result of a location search, rendered by the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// View recentered on the hit; markers were refreshed.
    Recentered { display_name: Option<String> },
    /// The query resolved to nothing; the view is unchanged.
    NotFound,
    /// The request itself failed.
    Failed,
    /// Empty input; no request was issued.
    Empty,
}

/// What a recognized chat command did to the map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEffect {
    /// A "center the map on X" command ran a search.
    Search(SearchOutcome),
    /// A filter was toggled and the markers refreshed.
    FiltersChanged,
}

/// A marker currently on the surface and the landmark it stands for.
#[derive(Debug, Clone)]
struct MarkerEntry {
    id: MarkerId,
    landmark: Landmark,
}

/// Single owner of the map view state.
pub struct MapController<S: MapSurface> {
    surface: S,
    backend: Arc<dyn LandmarkBackend>,
    filters: BTreeSet<FilterTag>,
    markers: Vec<MarkerEntry>,
    selected: Option<Landmark>,
    detail: Option<LandmarkDetail>,
    user_position: Option<LatLon>,
    /// Monotonic sync counter; a completed sync is applied only if no newer
    /// sync was issued while it was in flight.
    sync_seq: u64,
}

impl<S: MapSurface> MapController<S> {
    /// Create a controller over a surface. All filter tags start enabled,
    /// matching a fresh page with every checkbox checked.
    pub fn new(surface: S, backend: Arc<dyn LandmarkBackend>) -> Self {
        Self {
            surface,
            backend,
            filters: FilterTag::ALL.into_iter().collect(),
            markers: Vec::new(),
            selected: None,
            detail: None,
            user_position: None,
            sync_seq: 0,
        }
    }

    /// Conclude startup: try to resolve the user's position within the
    /// bounded wait and recenter to street scale on success; keep the
    /// default view otherwise. Either way, finish with one landmark sync.
    pub async fn bootstrap(&mut self, locator: Option<&dyn Locator>, timeout: Duration) {
        if let Some(locator) = locator {
            match locate_with_timeout(locator, timeout).await {
                Some(position) => {
                    info!(%position, "user position resolved");
                    self.user_position = Some(position);
                    self.surface.set_view(position, STREET_ZOOM);
                }
                None => {
                    debug!("user position unavailable, keeping default view");
                }
            }
        }

        self.sync_landmarks().await;
    }

    /// Refresh the marker set for the current viewport and filter selection.
    ///
    /// On success the marker set is replaced atomically: every existing
    /// handle is removed, then one marker is placed per returned landmark.
    /// On failure the previous markers stay untouched.
    pub async fn sync_landmarks(&mut self) {
        self.sync_seq += 1;
        let seq = self.sync_seq;

        let bounds = self.surface.bounds();
        let center = bounds.center();
        let radius = bounds.viewport_radius();
        let filters: Vec<FilterTag> = self.filters.iter().copied().collect();

        let landmarks = match self.backend.landmarks(center, radius, &filters).await {
            Ok(landmarks) => landmarks,
            Err(error) => {
                warn!(%error, "landmark sync failed, keeping previous markers");
                return;
            }
        };

        if seq != self.sync_seq {
            debug!(seq, latest = self.sync_seq, "discarding stale landmark sync");
            return;
        }

        debug!(count = landmarks.len(), radius, "landmark sync applied");
        for entry in self.markers.drain(..) {
            self.surface.remove_marker(entry.id);
        }
        for landmark in landmarks {
            let id = self.surface.add_marker(landmark.position(), landmark.label());
            self.markers.push(MarkerEntry { id, landmark });
        }
    }

    /// Marker click: record the landmark as selected for routing and fetch
    /// its detail text. A failed detail fetch leaves the panel as it was.
    pub async fn select_landmark(&mut self, pageid: &str) {
        let Some(landmark) = self
            .markers
            .iter()
            .map(|entry| &entry.landmark)
            .find(|l| l.pageid == pageid)
            .cloned()
        else {
            debug!(pageid, "no marker for landmark");
            return;
        };

        self.selected = Some(landmark);

        match self.backend.landmark_detail(pageid).await {
            Ok(detail) => {
                self.detail = Some(detail);
            }
            Err(error) => {
                warn!(pageid, %error, "landmark detail fetch failed");
            }
        }
    }

    /// Resolve free text to a place and recenter on it. Empty input is a
    /// no-op; a hit without coordinates leaves the view untouched.
    pub async fn search(&mut self, query: &str) -> SearchOutcome {
        let query = query.trim();
        if query.is_empty() {
            return SearchOutcome::Empty;
        }

        let hit = match self.backend.search(query).await {
            Ok(hit) => hit,
            Err(error) => {
                warn!(query, %error, "search failed");
                return SearchOutcome::Failed;
            }
        };

        let Some(position) = hit.position() else {
            info!(query, "location not found");
            return SearchOutcome::NotFound;
        };

        self.surface.set_view(position, STREET_ZOOM);
        // Old markers go before the refresh so a slow sync never shows the
        // previous neighborhood at the new location.
        for entry in self.markers.drain(..) {
            self.surface.remove_marker(entry.id);
        }
        self.sync_landmarks().await;

        SearchOutcome::Recentered {
            display_name: hit.display_name,
        }
    }

    /// Set the initial filter selection without refreshing. This is the
    /// checkbox state at page load; toggles after that go through
    /// [`Self::set_filter`].
    pub fn replace_filters(&mut self, filters: BTreeSet<FilterTag>) {
        self.filters = filters;
    }

    /// Filter checkbox change: update the selection and refresh once.
    pub async fn set_filter(&mut self, tag: FilterTag, enabled: bool) {
        if enabled {
            self.filters.insert(tag);
        } else {
            self.filters.remove(&tag);
        }
        self.sync_landmarks().await;
    }

    /// View moved (pan/zoom settled): refresh markers for the new viewport.
    pub async fn move_view(&mut self, center: LatLon, zoom: u8) {
        self.surface.set_view(center, zoom);
        self.sync_landmarks().await;
    }

    /// Draw a route from the user position to the selected landmark,
    /// replacing any previous route and framing the view around it.
    /// Returns true when a route was drawn.
    pub async fn route_to_selected(&mut self) -> bool {
        let (Some(start), Some(landmark)) = (self.user_position, self.selected.clone()) else {
            debug!("route requires a user position and a selected landmark");
            return false;
        };

        let geometry = match self.backend.route(start, landmark.position()).await {
            Ok(geometry) => geometry,
            Err(error) => {
                warn!(%error, "route fetch failed, keeping existing route");
                return false;
            }
        };

        let points = geometry.points();
        if points.is_empty() {
            warn!("route geometry was empty");
            return false;
        }

        self.surface.clear_route();
        if let Some(bounds) = LatLonBounds::enclosing(&points) {
            self.surface.fit_bounds(bounds);
        }
        self.surface.draw_route(points);
        info!(landmark = %landmark.title, "route drawn");
        true
    }

    /// Interpret one line of inbound chat. Recognized commands act on the
    /// map and report their effect; anything else returns None and does
    /// nothing.
    pub async fn handle_chat(&mut self, text: &str) -> Option<ChatEffect> {
        match chat::parse(text)? {
            Command::CenterOn(query) => Some(ChatEffect::Search(self.search(&query).await)),
            Command::AddFilter(tag) => {
                self.set_filter(tag, true).await;
                Some(ChatEffect::FiltersChanged)
            }
            Command::RemoveFilter(tag) => {
                self.set_filter(tag, false).await;
                Some(ChatEffect::FiltersChanged)
            }
        }
    }

    /// Record the user position (CLI stand-in for a geolocation fix).
    pub fn set_user_position(&mut self, position: LatLon) {
        self.user_position = Some(position);
    }

    pub fn user_position(&self) -> Option<LatLon> {
        self.user_position
    }

    /// Landmarks behind the current marker set, in display order.
    pub fn landmarks(&self) -> impl Iterator<Item = &Landmark> {
        self.markers.iter().map(|entry| &entry.landmark)
    }

    pub fn selected(&self) -> Option<&Landmark> {
        self.selected.as_ref()
    }

    /// Detail panel content; None while the panel is hidden.
    pub fn detail(&self) -> Option<&LandmarkDetail> {
        self.detail.as_ref()
    }

    pub fn filters(&self) -> &BTreeSet<FilterTag> {
        &self.filters
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}
