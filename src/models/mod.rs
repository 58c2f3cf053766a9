//! Data models for Waymark.

mod landmark;
mod route;
mod search;

pub use landmark::{FilterTag, Landmark, LandmarkDetail};
pub use route::RouteGeometry;
pub use search::SearchHit;
