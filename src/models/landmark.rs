//! Landmark records returned by the landmark service.

use serde::{Deserialize, Deserializer, Serialize};

use crate::geo::LatLon;

/// Landmark category tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterTag {
    Historical,
    Natural,
    Cultural,
}

impl FilterTag {
    /// Every known tag, in display order.
    pub const ALL: [FilterTag; 3] = [Self::Historical, Self::Natural, Self::Cultural];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Historical => "historical",
            Self::Natural => "natural",
            Self::Cultural => "cultural",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "historical" => Some(Self::Historical),
            "natural" => Some(Self::Natural),
            "cultural" => Some(Self::Cultural),
            _ => None,
        }
    }
}

impl std::fmt::Display for FilterTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A point of interest returned by the landmark sync endpoint.
///
/// The service serializes numeric fields as JSON strings in some deployments;
/// coordinates accept either form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub pageid: String,
    #[serde(deserialize_with = "f64_or_string")]
    pub lat: f64,
    #[serde(deserialize_with = "f64_or_string")]
    pub lon: f64,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: FilterTag,
}

impl Landmark {
    pub fn position(&self) -> LatLon {
        LatLon::new(self.lat, self.lon)
    }

    /// Marker label: title plus category.
    pub fn label(&self) -> String {
        format!("{} — {}", self.title, self.kind)
    }
}

/// Descriptive text for a single landmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandmarkDetail {
    pub title: String,
    pub extract: String,
}

fn f64_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrStr {
        Num(f64),
        Str(String),
    }

    match NumOrStr::deserialize(deserializer)? {
        NumOrStr::Num(n) => Ok(n),
        NumOrStr::Str(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_tag_roundtrip() {
        for tag in FilterTag::ALL {
            assert_eq!(FilterTag::from_str(tag.as_str()), Some(tag));
        }
    }

    #[test]
    fn test_filter_tag_from_invalid() {
        assert_eq!(FilterTag::from_str("modern"), None);
        assert_eq!(FilterTag::from_str(""), None);
    }

    #[test]
    fn test_landmark_parses_string_coordinates() {
        let json = r#"{
            "pageid": "12345",
            "title": "Old Castle",
            "lat": "48.85",
            "lon": "2.35",
            "type": "historical"
        }"#;
        let landmark: Landmark = serde_json::from_str(json).unwrap();
        assert_eq!(landmark.pageid, "12345");
        assert_eq!(landmark.lat, 48.85);
        assert_eq!(landmark.lon, 2.35);
        assert_eq!(landmark.kind, FilterTag::Historical);
    }

    #[test]
    fn test_landmark_parses_numeric_coordinates() {
        let json = r#"{
            "pageid": "9",
            "title": "Green Park",
            "lat": 51.5,
            "lon": -0.14,
            "type": "natural"
        }"#;
        let landmark: Landmark = serde_json::from_str(json).unwrap();
        assert_eq!(landmark.position(), crate::geo::LatLon::new(51.5, -0.14));
    }

    #[test]
    fn test_landmark_label() {
        let landmark = Landmark {
            pageid: "1".into(),
            lat: 0.0,
            lon: 0.0,
            title: "Opera House".into(),
            kind: FilterTag::Cultural,
        };
        assert_eq!(landmark.label(), "Opera House — cultural");
    }
}
