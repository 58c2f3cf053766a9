//! HTTP implementation of the landmark backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

use super::{BackendError, LandmarkBackend};
use crate::geo::LatLon;
use crate::models::{FilterTag, Landmark, LandmarkDetail, RouteGeometry, SearchHit};

/// Default client user agent.
pub const USER_AGENT: &str = concat!("waymark/", env!("CARGO_PKG_VERSION"));

/// Landmark service client over HTTP.
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

/// Wrapper shape of the route endpoint response.
#[derive(Deserialize)]
struct RouteResponse {
    geometry: RouteGeometry,
}

impl HttpBackend {
    /// The user agent used when none is configured.
    pub fn default_user_agent() -> &'static str {
        USER_AGENT
    }

    /// Create a client for the service at `base_url`.
    pub fn new(base_url: &str, timeout: Duration, user_agent: &str) -> Result<Self, BackendError> {
        url::Url::parse(base_url)?;

        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .gzip(true)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, BackendError> {
        debug!(url, "backend request");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status(status));
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl LandmarkBackend for HttpBackend {
    async fn landmarks(
        &self,
        center: LatLon,
        radius_m: f64,
        filters: &[FilterTag],
    ) -> Result<Vec<Landmark>, BackendError> {
        let filters = filters
            .iter()
            .map(|tag| tag.as_str())
            .collect::<Vec<_>>()
            .join(",");
        let url = format!(
            "{}/landmarks?lat={}&lon={}&radius={:.0}&filters={}",
            self.base_url, center.lat, center.lon, radius_m, filters
        );
        self.get_json(&url).await
    }

    async fn landmark_detail(&self, pageid: &str) -> Result<LandmarkDetail, BackendError> {
        let url = format!(
            "{}/landmark/{}",
            self.base_url,
            urlencoding::encode(pageid)
        );
        self.get_json(&url).await
    }

    async fn search(&self, query: &str) -> Result<SearchHit, BackendError> {
        let url = format!(
            "{}/search?q={}",
            self.base_url,
            urlencoding::encode(query)
        );
        debug!(url, "backend request");
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        // The service answers 404 for a query that resolved to nothing;
        // that is the no-coordinates result, not a failure.
        if status == StatusCode::NOT_FOUND {
            return Ok(SearchHit::default());
        }
        if !status.is_success() {
            return Err(BackendError::Status(status));
        }
        Ok(response.json().await?)
    }

    async fn route(&self, start: LatLon, end: LatLon) -> Result<RouteGeometry, BackendError> {
        let url = format!(
            "{}/route?start_lat={}&start_lon={}&end_lat={}&end_lon={}",
            self.base_url, start.lat, start.lon, end.lat, end.lon
        );
        let response: RouteResponse = self.get_json(&url).await?;
        Ok(response.geometry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let backend =
            HttpBackend::new("http://localhost:5001/", Duration::from_secs(10), USER_AGENT)
                .unwrap();
        assert_eq!(backend.base_url, "http://localhost:5001");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let result = HttpBackend::new("not a url", Duration::from_secs(10), USER_AGENT);
        assert!(matches!(result, Err(BackendError::BaseUrl(_))));
    }
}
