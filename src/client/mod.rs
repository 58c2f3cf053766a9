//! Landmark backend client.
//!
//! The four read-only endpoints the controller depends on (landmark sync,
//! landmark detail, location search, route) live behind the
//! [`LandmarkBackend`] trait so the controller can be driven against a
//! scripted backend in tests.

mod http;

pub use http::HttpBackend;

use async_trait::async_trait;
use thiserror::Error;

use crate::geo::LatLon;
use crate::models::{FilterTag, Landmark, LandmarkDetail, RouteGeometry, SearchHit};

/// Errors from backend requests.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("invalid base URL: {0}")]
    BaseUrl(#[from] url::ParseError),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Read-only landmark service surface.
#[async_trait]
pub trait LandmarkBackend: Send + Sync {
    /// Landmarks within `radius_m` meters of `center`, restricted to the
    /// given filter tags.
    async fn landmarks(
        &self,
        center: LatLon,
        radius_m: f64,
        filters: &[FilterTag],
    ) -> Result<Vec<Landmark>, BackendError>;

    /// Descriptive text for one landmark.
    async fn landmark_detail(&self, pageid: &str) -> Result<LandmarkDetail, BackendError>;

    /// Resolve free text to coordinates. A hit without coordinates means the
    /// location was not found; that is a result, not an error.
    async fn search(&self, query: &str) -> Result<SearchHit, BackendError>;

    /// Route geometry between two points.
    async fn route(&self, start: LatLon, end: LatLon) -> Result<RouteGeometry, BackendError>;
}
