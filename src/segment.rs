//! Route segment input types.
//!
//! Segments are built by the caller right before compilation. Every styling
//! attribute except `color` is optional and resolved to its default by the
//! compiler, never here.

use serde::{Deserialize, Serialize};

/// Stroke weight used when a segment does not set one
pub const DEFAULT_WEIGHT: f64 = 4.0;
/// Stroke opacity used for solid segments that do not set one
pub const DEFAULT_OPACITY: f64 = 1.0;
/// Draw order used when a segment does not set one
pub const DEFAULT_Z_INDEX: i64 = 1;

/// A single geographic point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<(f64, f64)> for LatLng {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

/// One contiguous piece of a route, drawn as a single styled line
///
/// The serde representation matches the JSON shape produced by the
/// dashboards and mobile apps (`dashArray`, `zIndex` in camelCase).
///
/// # Examples
///
/// ```
/// use routeline::RouteSegment;
///
/// let seg = RouteSegment::new(vec![(1.0, 2.0).into(), (3.0, 4.0).into()], "#FF0000")
///     .with_weight(6.0)
///     .with_dash_array("5,5");
/// assert!(seg.is_dashed());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSegment {
    /// Ordered points of the line
    #[serde(default)]
    pub coordinates: Vec<LatLng>,
    /// Renderer color token (hex or named color). Required; an empty value
    /// is rejected at compile time.
    #[serde(default)]
    pub color: String,
    /// Stroke thickness
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Stroke opacity in [0, 1]; ignored for dashed segments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    /// Any non-empty value marks the segment as dashed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dash_array: Option<String>,
    /// Draw order among overlapping overlays
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i64>,
}

impl RouteSegment {
    pub fn new(coordinates: Vec<LatLng>, color: impl Into<String>) -> Self {
        Self {
            coordinates,
            color: color.into(),
            ..Default::default()
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn with_dash_array(mut self, dash_array: impl Into<String>) -> Self {
        self.dash_array = Some(dash_array.into());
        self
    }

    pub fn with_z_index(mut self, z_index: i64) -> Self {
        self.z_index = Some(z_index);
        self
    }

    /// Dashed iff `dash_array` is present and non-empty. The value itself is
    /// never parsed.
    pub fn is_dashed(&self) -> bool {
        self.dash_array.as_deref().is_some_and(|d| !d.is_empty())
    }
}

/// Parse a JSON array of segments
pub fn segments_from_json(input: &str) -> crate::Result<Vec<RouteSegment>> {
    Ok(serde_json::from_str(input)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dashed_requires_non_empty_dash_array() {
        let seg = RouteSegment::new(vec![], "red");
        assert!(!seg.is_dashed());
        assert!(!seg.clone().with_dash_array("").is_dashed());
        assert!(seg.with_dash_array("10,4").is_dashed());
    }

    #[test]
    fn parses_camel_case_json() {
        let json = r##"[
            {"coordinates":[{"lat":1,"lng":2}],"color":"#FF0000"},
            {"coordinates":[],"color":"blue","weight":2.5,"opacity":0.8,"dashArray":"5,5","zIndex":3}
        ]"##;
        let segs = segments_from_json(json).unwrap();
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0].coordinates, vec![LatLng::new(1.0, 2.0)]);
        assert_eq!(segs[0].weight, None);
        assert_eq!(segs[1].dash_array.as_deref(), Some("5,5"));
        assert_eq!(segs[1].z_index, Some(3));
        assert_eq!(segs[1].opacity, Some(0.8));
    }

    #[test]
    fn missing_color_deserializes_as_empty() {
        let segs = segments_from_json(r#"[{"coordinates":[]}]"#).unwrap();
        assert!(segs[0].color.is_empty());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = segments_from_json("[{").unwrap_err();
        assert!(matches!(err, crate::Error::ParseError(_)));
    }
}
