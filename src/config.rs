//! Configuration management for Waymark.
//!
//! Settings come from an optional TOML file (`--config`, or `waymark.toml`
//! in the working directory) with environment variable overrides. Every
//! field has a default so the tool runs with no config at all.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::geo::LatLon;

/// Config file looked for when --config is not given.
pub const DEFAULT_CONFIG_FILE: &str = "waymark.toml";

/// Environment override for the backend base URL.
pub const ENV_BASE_URL: &str = "WAYMARK_BASE_URL";
/// Environment override for the fixed user position ("lat,lon").
pub const ENV_POSITION: &str = "WAYMARK_POSITION";

/// Top-level settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub backend: BackendSettings,
    pub view: ViewSettings,
    pub position: PositionSettings,
}

/// Landmark service connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendSettings {
    /// Base URL of the service exposing /landmarks, /landmark/:id, /search
    /// and /route.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5001".to_string(),
            timeout_secs: 30,
            user_agent: crate::client::HttpBackend::default_user_agent().to_string(),
        }
    }
}

impl BackendSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Initial map view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    pub lat: f64,
    pub lon: f64,
    pub zoom: u8,
}

impl Default for ViewSettings {
    fn default() -> Self {
        // World-scale overview, matching a fresh map before any position fix.
        Self {
            lat: 0.0,
            lon: 0.0,
            zoom: crate::surface::WORLD_ZOOM,
        }
    }
}

impl ViewSettings {
    pub fn center(&self) -> LatLon {
        LatLon::new(self.lat, self.lon)
    }
}

/// User position resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionSettings {
    /// Fixed position as "lat,lon"; unset means no position is known.
    pub fixed: Option<String>,
    /// Bounded wait for position resolution, in seconds.
    pub timeout_secs: u64,
}

impl Default for PositionSettings {
    fn default() -> Self {
        Self {
            fixed: None,
            timeout_secs: 5,
        }
    }
}

impl PositionSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The configured fixed position, if present and well formed.
    pub fn fixed_position(&self) -> Option<LatLon> {
        self.fixed.as_deref().and_then(parse_position)
    }
}

/// Parse a "lat,lon" pair.
pub fn parse_position(s: &str) -> Option<LatLon> {
    let (lat, lon) = s.split_once(',')?;
    let lat: f64 = lat.trim().parse().ok()?;
    let lon: f64 = lon.trim().parse().ok()?;
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return None;
    }
    Some(LatLon::new(lat, lon))
}

/// Load settings from a config file (explicit path, or the default file when
/// it exists), then apply environment overrides.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading config file {}", path.display()))?;
            toml::from_str(&raw)
                .with_context(|| format!("parsing config file {}", path.display()))?
        }
        None => {
            let default = Path::new(DEFAULT_CONFIG_FILE);
            if default.exists() {
                let raw = fs::read_to_string(default).context("reading waymark.toml")?;
                toml::from_str(&raw).context("parsing waymark.toml")?
            } else {
                Settings::default()
            }
        }
    };

    if let Ok(base_url) = std::env::var(ENV_BASE_URL) {
        settings.backend.base_url = base_url;
    }
    if let Ok(position) = std::env::var(ENV_POSITION) {
        settings.position.fixed = Some(position);
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.backend.base_url, "http://localhost:5001");
        assert_eq!(settings.view.zoom, crate::surface::WORLD_ZOOM);
        assert_eq!(settings.view.center(), LatLon::new(0.0, 0.0));
        assert_eq!(settings.position.timeout(), Duration::from_secs(5));
        assert_eq!(settings.position.fixed_position(), None);
    }

    #[test]
    fn test_parse_partial_file() {
        let settings: Settings = toml::from_str(
            r#"
            [backend]
            base_url = "https://maps.example.org"

            [position]
            fixed = "48.85, 2.35"
            "#,
        )
        .unwrap();
        assert_eq!(settings.backend.base_url, "https://maps.example.org");
        assert_eq!(settings.backend.timeout_secs, 30);
        assert_eq!(
            settings.position.fixed_position(),
            Some(LatLon::new(48.85, 2.35))
        );
    }

    #[test]
    fn test_parse_position() {
        assert_eq!(parse_position("48.85,2.35"), Some(LatLon::new(48.85, 2.35)));
        assert_eq!(parse_position(" -33.9 , 151.2 "), Some(LatLon::new(-33.9, 151.2)));
        assert_eq!(parse_position("91.0,0.0"), None);
        assert_eq!(parse_position("0.0,181.0"), None);
        assert_eq!(parse_position("nope"), None);
        assert_eq!(parse_position("1.0"), None);
    }
}
