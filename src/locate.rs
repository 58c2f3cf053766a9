//! User position resolution.
//!
//! Stands in for the browser geolocation capability: position lookup is
//! best-effort, bounded by a timeout, and its absence must never block the
//! initial landmark sync.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::geo::LatLon;

/// A source of the user's current position.
#[async_trait]
pub trait Locator: Send + Sync {
    /// Resolve the current position, or None if unavailable.
    async fn locate(&self) -> Option<LatLon>;
}

/// Locator pinned to a known position (from config or a CLI flag).
pub struct FixedLocator {
    position: LatLon,
}

impl FixedLocator {
    pub fn new(position: LatLon) -> Self {
        Self { position }
    }
}

#[async_trait]
impl Locator for FixedLocator {
    async fn locate(&self) -> Option<LatLon> {
        Some(self.position)
    }
}

/// Resolve a position with a bounded wait. Timeout or an unavailable
/// position both yield None.
pub async fn locate_with_timeout(locator: &dyn Locator, timeout: Duration) -> Option<LatLon> {
    match tokio::time::timeout(timeout, locator.locate()).await {
        Ok(position) => position,
        Err(_) => {
            debug!(timeout_ms = timeout.as_millis() as u64, "position lookup timed out");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NeverLocator;

    #[async_trait]
    impl Locator for NeverLocator {
        async fn locate(&self) -> Option<LatLon> {
            // Simulates a geolocation prompt nobody answers.
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_fixed_locator_resolves() {
        let locator = FixedLocator::new(LatLon::new(48.85, 2.35));
        let position = locate_with_timeout(&locator, Duration::from_secs(5)).await;
        assert_eq!(position, Some(LatLon::new(48.85, 2.35)));
    }

    #[tokio::test]
    async fn test_timeout_yields_none() {
        let position = locate_with_timeout(&NeverLocator, Duration::from_millis(10)).await;
        assert_eq!(position, None);
    }
}
